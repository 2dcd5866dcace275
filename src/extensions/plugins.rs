use serde::{Deserialize, Serialize};

use crate::api::{GroupingMode, ResolutionAction, Uniformity};
use crate::core::{ChartKind, Color};

/// Read-only editor snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorContext {
    pub kind: ChartKind,
    pub datasets_len: usize,
    pub mode: GroupingMode,
    pub uniformity: Uniformity,
    pub transition_pending: bool,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    DatasetAdded { label: String },
    DatasetRemoved { label: String },
    PointUpdated { label: String, index: usize },
    PointColorUpdated { label: String, index: usize, color: Color },
    KindRelabeled { from: ChartKind, to: ChartKind },
    TransitionProposed { request_id: u64, from: ChartKind, to: ChartKind },
    TransitionResolved { request_id: u64, action: ResolutionAction, kind: ChartKind },
    TransitionCancelled { request_id: u64 },
    ModeChanged { mode: GroupingMode },
    UniformityChanged { uniformity: Uniformity },
    ActiveGroupChanged { group_id: String },
    DocumentLoaded { kind: ChartKind, datasets_len: usize },
}

/// Extension hook interface for host-side observers (autosave, history, analytics).
///
/// Plugins observe events and read editor context without mutating the model.
pub trait EditorPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &EditorEvent, context: EditorContext);
}
