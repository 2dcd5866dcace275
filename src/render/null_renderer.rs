use crate::core::ChartKind;
use crate::error::ChartResult;
use crate::render::{ChartView, Renderer};

/// No-op renderer used by tests and headless editor usage.
///
/// It still validates the view so tests can catch inconsistent models before a
/// real charting backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_kind: Option<ChartKind>,
    pub last_dataset_count: usize,
    pub last_point_count: usize,
    pub render_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, view: &ChartView<'_>) -> ChartResult<()> {
        view.validate()?;
        self.last_kind = Some(view.kind);
        self.last_dataset_count = view.datasets.len();
        self.last_point_count = view.total_points();
        self.render_count += 1;
        Ok(())
    }
}
