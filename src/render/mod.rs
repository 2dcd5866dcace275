mod frame;
mod null_renderer;

pub use frame::ChartView;
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a read-only `ChartView`; drawing never mutates the model.
pub trait Renderer {
    fn render(&mut self, view: &ChartView<'_>) -> ChartResult<()>;
}
