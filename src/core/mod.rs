pub mod color;
pub mod dataset;
pub mod kind;
pub mod point;
pub mod primitives;

pub use color::{Color, default_palette};
pub use dataset::{Dataset, DatasetGrouping};
pub use kind::{ChartFamily, ChartKind};
pub use point::{CategoricalPoint, CoordinatePoint, DatasetPoints, Point};
