use crate::api::EditorConfig;
use crate::core::{
    CategoricalPoint, ChartFamily, ChartKind, Color, CoordinatePoint, Dataset, DatasetPoints,
    default_palette,
};
use crate::error::ChartResult;

/// Source of family-appropriate placeholder datasets.
pub trait SampleGenerator {
    fn generate(&self, kind: ChartKind) -> ChartResult<Vec<Dataset>>;
}

const SLICE_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Pure sample generator: the same kind always yields byte-identical datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct DeterministicSampleGenerator {
    point_count: usize,
    palette: Vec<Color>,
}

impl Default for DeterministicSampleGenerator {
    fn default() -> Self {
        Self {
            point_count: 8,
            palette: default_palette(),
        }
    }
}

impl DeterministicSampleGenerator {
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            point_count: config.sample_point_count.max(1),
            palette: if config.palette.is_empty() {
                default_palette()
            } else {
                config.palette.clone()
            },
        }
    }

    fn color(&self, kind: ChartKind, index: usize) -> Color {
        if kind.colors_per_slice() {
            self.palette[index % self.palette.len()]
        } else {
            self.palette[0]
        }
    }
}

impl SampleGenerator for DeterministicSampleGenerator {
    fn generate(&self, kind: ChartKind) -> ChartResult<Vec<Dataset>> {
        let count = self.point_count;
        let colors = (0..count).map(|i| self.color(kind, i)).collect();

        let dataset = match kind.family() {
            ChartFamily::Categorical => {
                let points: Vec<CategoricalPoint> = (0..count)
                    .map(|i| {
                        let base = SLICE_NAMES[i % SLICE_NAMES.len()];
                        let name = match i / SLICE_NAMES.len() {
                            0 => base.to_owned(),
                            cycle => format!("{base} {}", cycle + 1),
                        };
                        CategoricalPoint::new(name, sample_value(i))
                    })
                    .collect();
                let names = points.iter().map(|point| point.name.clone()).collect();
                Dataset::new("Sample data", kind, DatasetPoints::Categorical(points), colors)?
                    .with_slice_labels(names)?
            }
            ChartFamily::Coordinate => {
                let points = (0..count)
                    .map(|i| {
                        let x = i as f64;
                        let y = sample_value(i);
                        if kind.requires_radius() {
                            CoordinatePoint::bubble(x, y, 4.0 + ((i * 3) % 12) as f64)
                        } else {
                            CoordinatePoint::new(x, y)
                        }
                    })
                    .collect();
                Dataset::new("Sample data", kind, DatasetPoints::Coordinate(points), colors)?
            }
        };
        Ok(vec![dataset])
    }
}

fn sample_value(index: usize) -> f64 {
    ((index * 37 + 11) % 50 + 5) as f64
}
