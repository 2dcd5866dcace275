use thiserror::Error;

use crate::api::ResolutionAction;
use crate::core::{ChartFamily, ChartKind};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("incompatible chart family: expected {expected}, found {found}")]
    IncompatibleFamily {
        expected: ChartFamily,
        found: ChartFamily,
    },

    #[error("group size mismatch: group has {expected} points, dataset has {found}")]
    GroupSizeMismatch { expected: usize, found: usize },

    #[error("slice label mismatch at position {position}: expected `{expected}`, found `{found}`")]
    SliceLabelMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("chart type is locked to {locked} in a uniform group (requested {requested})")]
    ChartTypeLockedInUniformGroup {
        locked: ChartKind,
        requested: ChartKind,
    },

    #[error("chart type {kind} cannot be mixed inside a group")]
    ChartTypeNotMixable { kind: ChartKind },

    #[error("bubble point {index} requires a finite radius > 0")]
    InvalidRadius { index: usize },

    #[error("current datasets cannot be transformed: {0}")]
    NotTransformable(String),

    #[error("group `{group_id}` mixes chart types; reconcile them before switching to uniform")]
    MixedTypesPresent { group_id: String },

    #[error("no backup snapshot exists for the {family} family")]
    MissingBackup { family: ChartFamily },

    #[error("dataset label `{label}` is already in use")]
    DuplicateLabel { label: String },

    #[error("dataset `{label}` does not exist")]
    DatasetNotFound { label: String },

    #[error("point index {index} is out of range for a dataset of {len} points")]
    PointIndexOutOfRange { index: usize, len: usize },

    #[error("resolution action {action} is not available for the pending transition")]
    ActionUnavailable { action: ResolutionAction },

    #[error("no chart-kind transition is pending")]
    NoPendingTransition,

    #[error("manual dataset entry was not started for the pending transition")]
    ManualEntryNotStarted,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
