use indexmap::IndexMap;

use crate::error::ChartResult;
use crate::extensions::{BackupStore, EditorEvent, SampleGenerator};

use super::{ChartEditor, GroupingMode, Uniformity};

impl<B: BackupStore, G: SampleGenerator> ChartEditor<B, G> {
    pub fn set_mode(&mut self, mode: GroupingMode) -> ChartResult<()> {
        let previous = self.modes.mode();
        self.modes.set_mode(mode, &mut self.model, &self.config)?;
        if previous != mode {
            self.emit_plugin_event(EditorEvent::ModeChanged { mode });
        }
        Ok(())
    }

    /// Enters grouped mode placing datasets into caller-chosen groups
    /// (`label -> group id`).
    pub fn set_mode_with_groups(&mut self, assignments: &IndexMap<String, String>) -> ChartResult<()> {
        self.modes
            .set_mode_with_groups(assignments, &mut self.model, &self.config)?;
        self.emit_plugin_event(EditorEvent::ModeChanged {
            mode: GroupingMode::Grouped,
        });
        Ok(())
    }

    pub fn set_uniformity(&mut self, uniformity: Uniformity) -> ChartResult<()> {
        let previous = self.modes.uniformity();
        self.modes.set_uniformity(uniformity, &self.model)?;
        if previous != uniformity {
            self.emit_plugin_event(EditorEvent::UniformityChanged { uniformity });
        }
        Ok(())
    }

    pub fn set_active_group(&mut self, group_id: &str) -> ChartResult<()> {
        self.modes.set_active_group(group_id)?;
        self.emit_plugin_event(EditorEvent::ActiveGroupChanged {
            group_id: group_id.to_owned(),
        });
        Ok(())
    }

    /// Allocates an empty group and makes it active.
    pub fn new_group(&mut self) -> String {
        let group_id = self.modes.new_group(&self.model);
        self.emit_plugin_event(EditorEvent::ActiveGroupChanged {
            group_id: group_id.clone(),
        });
        group_id
    }
}
