use crate::extensions::{BackupStore, EditorContext, EditorEvent, SampleGenerator};

use super::ChartEditor;

impl<B: BackupStore, G: SampleGenerator> ChartEditor<B, G> {
    pub(super) fn editor_context(&self) -> EditorContext {
        EditorContext {
            kind: self.model.kind(),
            datasets_len: self.model.len(),
            mode: self.modes.mode(),
            uniformity: self.modes.uniformity(),
            transition_pending: self.negotiator.is_pending(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: EditorEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.editor_context();
        for plugin in &mut self.plugins {
            plugin.on_event(&event, context);
        }
    }
}
