//! chart-composer: interactive chart editing core.
//!
//! This crate owns the chart data model behind a chart editor: a mutable set of
//! heterogeneous datasets kept consistent while the user switches chart kind,
//! grouping mode and uniformity mode. Rendering, persistence and sample data
//! are external collaborators reached through the traits in `extensions` and
//! `render`.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{ChartDataModel, ChartEditor, EditorConfig};
pub use error::{ChartError, ChartResult};
