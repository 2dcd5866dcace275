use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartKind, Dataset};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{BackupStore, EditorEvent, SampleGenerator};

use super::validation::validate_dataset_set;
use super::{ChartDataModel, ChartEditor};

pub const CHART_DOCUMENT_JSON_SCHEMA_V1: u32 = 1;

/// Persisted chart: the `{kind, datasets}` pair exchanged with storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub kind: ChartKind,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocumentJsonContractV1 {
    pub schema_version: u32,
    pub document: ChartDocument,
}

impl ChartDocument {
    #[must_use]
    pub fn from_model(model: &ChartDataModel) -> Self {
        Self {
            kind: model.kind(),
            datasets: model.datasets().to_vec(),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartDocumentJsonContractV1 {
            schema_version: CHART_DOCUMENT_JSON_SCHEMA_V1,
            document: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart document contract v1: {e}"))
        })
    }

    /// Accepts either a bare document or a versioned contract envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(document) = serde_json::from_str::<ChartDocument>(input) {
            return Ok(document);
        }
        let payload: ChartDocumentJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart document json payload: {e}"))
        })?;
        if payload.schema_version != CHART_DOCUMENT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart document schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.document)
    }

    /// Checks every model invariant and returns the model the document describes.
    pub fn into_model(self, mixable_kinds: &[ChartKind]) -> ChartResult<ChartDataModel> {
        let datasets = validate_dataset_set(self.kind.family(), self.datasets, mixable_kinds)?;
        ChartDataModel::with_datasets(self.kind, datasets)
    }
}

impl<B: BackupStore, G: SampleGenerator> ChartEditor<B, G> {
    #[must_use]
    pub fn document(&self) -> ChartDocument {
        ChartDocument::from_model(&self.model)
    }

    pub fn document_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.document().to_json_contract_v1_pretty()
    }

    /// Replaces the session's chart with a persisted document.
    ///
    /// A pending transition is discarded; modes are re-derived from the loaded
    /// datasets.
    pub fn load_document(&mut self, document: ChartDocument) -> ChartResult<()> {
        let model = document.into_model(&self.config.mixable_kinds)?;
        if let Some(proposal) = self.negotiator.pending().copied() {
            self.negotiator.cancel()?;
            self.emit_plugin_event(EditorEvent::TransitionCancelled {
                request_id: proposal.request_id,
            });
        }
        debug!(kind = %model.kind(), datasets = model.len(), "load chart document");
        self.model = model;
        self.modes.sync_from_model(&self.model);
        self.emit_plugin_event(EditorEvent::DocumentLoaded {
            kind: self.model.kind(),
            datasets_len: self.model.len(),
        });
        Ok(())
    }

    pub fn load_document_json(&mut self, input: &str) -> ChartResult<()> {
        self.load_document(ChartDocument::from_json_compat_str(input)?)
    }
}
