use serde::Serialize;

use crate::core::{ChartKind, Dataset};
use crate::error::{ChartError, ChartResult};

/// Read-only `{kind, datasets}` pair handed to rendering consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartView<'a> {
    pub kind: ChartKind,
    pub datasets: &'a [Dataset],
}

impl<'a> ChartView<'a> {
    #[must_use]
    pub fn new(kind: ChartKind, datasets: &'a [Dataset]) -> Self {
        Self { kind, datasets }
    }

    #[must_use]
    pub fn total_points(&self) -> usize {
        self.datasets.iter().map(Dataset::point_count).sum()
    }

    /// Re-checks family purity and per-dataset shape before drawing.
    pub fn validate(&self) -> ChartResult<()> {
        for dataset in self.datasets {
            if dataset.family() != self.kind.family() {
                return Err(ChartError::IncompatibleFamily {
                    expected: self.kind.family(),
                    found: dataset.family(),
                });
            }
            dataset.check_shape()?;
        }
        Ok(())
    }
}
