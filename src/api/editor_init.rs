use tracing::debug;

use crate::core::ChartKind;
use crate::error::ChartResult;
use crate::extensions::{
    BackupStore, DeterministicSampleGenerator, InMemoryBackupStore, SampleGenerator,
};

use super::{ChartDataModel, ChartEditor, EditorConfig, ModeController, TransitionNegotiator};

impl ChartEditor<InMemoryBackupStore, DeterministicSampleGenerator> {
    /// Starts an empty session with default configuration and in-memory collaborators.
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        let config = EditorConfig::default();
        let samples = DeterministicSampleGenerator::from_config(&config);
        Self::assemble(kind, config, InMemoryBackupStore::new(), samples)
    }

    /// Starts an empty session with explicit configuration.
    pub fn with_config(kind: ChartKind, config: EditorConfig) -> ChartResult<Self> {
        config.validate()?;
        let samples = DeterministicSampleGenerator::from_config(&config);
        Ok(Self::assemble(kind, config, InMemoryBackupStore::new(), samples))
    }
}

impl<B: BackupStore, G: SampleGenerator> ChartEditor<B, G> {
    /// Starts a session backed by host-provided collaborators.
    pub fn with_collaborators(
        kind: ChartKind,
        config: EditorConfig,
        backup: B,
        samples: G,
    ) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self::assemble(kind, config, backup, samples))
    }

    fn assemble(kind: ChartKind, config: EditorConfig, backup: B, samples: G) -> Self {
        debug!(kind = %kind, "start chart editing session");
        Self {
            config,
            model: ChartDataModel::new(kind),
            modes: ModeController::new(),
            negotiator: TransitionNegotiator::new(),
            backup,
            samples,
            plugins: Vec::new(),
        }
    }
}
