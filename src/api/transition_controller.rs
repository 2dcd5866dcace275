use crate::core::ChartKind;
use crate::error::ChartResult;
use crate::extensions::{BackupStore, EditorEvent, SampleGenerator};

use super::{ChartEditor, DatasetBuilder, KindChange, NegotiationState, ResolutionAction};

impl<B: BackupStore, G: SampleGenerator> ChartEditor<B, G> {
    /// Requests a chart kind.
    ///
    /// Same-family kinds are applied immediately. A kind from the other family
    /// opens a transition proposal that must be resolved with one of the
    /// resolution actions or cancelled.
    pub fn request_kind(&mut self, target: ChartKind) -> ChartResult<KindChange> {
        let superseded = self.negotiator.pending().map(|proposal| proposal.request_id);
        let change = self.negotiator.request_kind(
            target,
            &mut self.model,
            &self.modes,
            &self.backup,
            &self.config,
        )?;

        if let Some(request_id) = superseded {
            self.emit_plugin_event(EditorEvent::TransitionCancelled { request_id });
        }
        match change {
            KindChange::Unchanged => {}
            KindChange::Relabeled { from, to } => {
                self.emit_plugin_event(EditorEvent::KindRelabeled { from, to });
            }
            KindChange::Proposed(proposal) => {
                self.emit_plugin_event(EditorEvent::TransitionProposed {
                    request_id: proposal.request_id,
                    from: proposal.from,
                    to: proposal.target,
                });
            }
        }
        Ok(change)
    }

    /// Reinstates the snapshot of the target family.
    pub fn restore(&mut self) -> ChartResult<()> {
        self.negotiator.restore(&mut self.model, &mut self.backup)?;
        self.after_resolution();
        Ok(())
    }

    pub fn load_sample(&mut self) -> ChartResult<()> {
        self.negotiator
            .load_sample(&mut self.model, &mut self.backup, &self.samples)?;
        self.after_resolution();
        Ok(())
    }

    pub fn quick_transform(&mut self) -> ChartResult<()> {
        self.negotiator
            .quick_transform(&mut self.model, &mut self.backup, &self.config)?;
        self.after_resolution();
        Ok(())
    }

    /// Starts manual entry for the pending coordinate transition.
    pub fn begin_manual_entry(&mut self) -> ChartResult<DatasetBuilder> {
        self.negotiator.begin_manual_entry(&self.config)
    }

    pub fn cancel_manual_entry(&mut self) -> ChartResult<()> {
        self.negotiator.cancel_manual_entry()
    }

    pub fn complete_manual_entry(&mut self, builder: &DatasetBuilder) -> ChartResult<()> {
        self.negotiator.complete_manual_entry(
            builder,
            &mut self.model,
            &mut self.backup,
            &self.config,
        )?;
        self.after_resolution();
        Ok(())
    }

    /// Abandons the pending transition; kind and datasets stay as they were.
    pub fn cancel_transition(&mut self) -> ChartResult<()> {
        self.negotiator.cancel()?;
        if let NegotiationState::Cancelled { request_id } = self.negotiator.state() {
            self.emit_plugin_event(EditorEvent::TransitionCancelled { request_id });
        }
        Ok(())
    }

    fn after_resolution(&mut self) {
        self.modes.sync_from_model(&self.model);
        if let NegotiationState::Resolved { request_id, action } = self.negotiator.state() {
            self.emit_resolution(request_id, action);
        }
    }

    fn emit_resolution(&mut self, request_id: u64, action: ResolutionAction) {
        let kind = self.model.kind();
        self.emit_plugin_event(EditorEvent::TransitionResolved {
            request_id,
            action,
            kind,
        });
    }
}
