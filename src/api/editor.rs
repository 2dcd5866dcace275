use crate::core::{ChartKind, Dataset};
use crate::error::ChartResult;
use crate::extensions::{
    BackupStore, DeterministicSampleGenerator, EditorPlugin, InMemoryBackupStore, SampleGenerator,
};
use crate::render::{ChartView, Renderer};

use super::{
    ChartDataModel, EditorConfig, GroupingMode, ModeController, NegotiationState,
    TransitionNegotiator, TransitionProposal, Uniformity,
};

/// Per-session editing facade consumed by host applications.
///
/// `ChartEditor` owns the chart model for one editing session and routes every
/// user intent (dataset edits, kind changes, mode changes) through validation,
/// the mode controller and the transition negotiator. Dropping the editor ends
/// the session; nothing is kept in process-wide state.
pub struct ChartEditor<B = InMemoryBackupStore, G = DeterministicSampleGenerator>
where
    B: BackupStore,
    G: SampleGenerator,
{
    pub(super) config: EditorConfig,
    pub(super) model: ChartDataModel,
    pub(super) modes: ModeController,
    pub(super) negotiator: TransitionNegotiator,
    pub(super) backup: B,
    pub(super) samples: G,
    pub(super) plugins: Vec<Box<dyn EditorPlugin>>,
}

impl<B: BackupStore, G: SampleGenerator> ChartEditor<B, G> {
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &ChartDataModel {
        &self.model
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.model.kind()
    }

    #[must_use]
    pub fn datasets(&self) -> &[Dataset] {
        self.model.datasets()
    }

    #[must_use]
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.model.dataset(label)
    }

    #[must_use]
    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    #[must_use]
    pub fn mode(&self) -> GroupingMode {
        self.modes.mode()
    }

    #[must_use]
    pub fn uniformity(&self) -> Uniformity {
        self.modes.uniformity()
    }

    #[must_use]
    pub fn active_group(&self) -> Option<&str> {
        self.modes.active_group()
    }

    #[must_use]
    pub fn negotiation_state(&self) -> NegotiationState {
        self.negotiator.state()
    }

    #[must_use]
    pub fn pending_transition(&self) -> Option<&TransitionProposal> {
        self.negotiator.pending()
    }

    #[must_use]
    pub fn backup_store(&self) -> &B {
        &self.backup
    }

    #[must_use]
    pub fn sample_generator(&self) -> &G {
        &self.samples
    }

    /// Read-only view handed to rendering consumers.
    #[must_use]
    pub fn view(&self) -> ChartView<'_> {
        ChartView::new(self.model.kind(), self.model.datasets())
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        renderer.render(&self.view())
    }

    /// Ends the session, handing back the collaborators.
    #[must_use]
    pub fn into_parts(self) -> (ChartDataModel, B, G) {
        (self.model, self.backup, self.samples)
    }
}
