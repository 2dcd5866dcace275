use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{ChartFamily, ChartKind, Color, Dataset, Point};
use crate::error::{ChartError, ChartResult};

/// Canonical in-memory chart: nominal kind plus the datasets it exclusively owns.
///
/// Every mutator either applies completely or returns an error with the model
/// left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataModel {
    kind: ChartKind,
    datasets: Vec<Dataset>,
}

impl ChartDataModel {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            datasets: Vec::new(),
        }
    }

    pub fn with_datasets(kind: ChartKind, datasets: Vec<Dataset>) -> ChartResult<Self> {
        let mut model = Self::new(kind);
        model.replace_all(kind, datasets)?;
        Ok(model)
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn family(&self) -> ChartFamily {
        self.kind.family()
    }

    #[must_use]
    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    #[must_use]
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|dataset| dataset.label() == label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Group ids in first-seen order with their member datasets.
    #[must_use]
    pub fn groups(&self) -> IndexMap<&str, Vec<&Dataset>> {
        let mut groups: IndexMap<&str, Vec<&Dataset>> = IndexMap::new();
        for dataset in &self.datasets {
            if let Some(group_id) = dataset.group_id() {
                groups.entry(group_id).or_default().push(dataset);
            }
        }
        groups
    }

    #[must_use]
    pub fn group_members(&self, group_id: &str) -> Vec<&Dataset> {
        self.datasets
            .iter()
            .filter(|dataset| dataset.group_id() == Some(group_id))
            .collect()
    }

    /// Atomically swaps kind and datasets.
    ///
    /// Family purity, per-dataset shape and label uniqueness are re-checked so a
    /// failed swap never becomes observable.
    pub fn replace_all(&mut self, kind: ChartKind, datasets: Vec<Dataset>) -> ChartResult<()> {
        for (index, dataset) in datasets.iter().enumerate() {
            ensure_family(kind.family(), dataset)?;
            dataset.check_shape()?;
            if datasets[..index]
                .iter()
                .any(|other| other.label() == dataset.label())
            {
                return Err(ChartError::DuplicateLabel {
                    label: dataset.label().to_owned(),
                });
            }
        }

        debug!(
            from_kind = %self.kind,
            to_kind = %kind,
            previous_count = self.datasets.len(),
            count = datasets.len(),
            "replace chart datasets"
        );
        self.kind = kind;
        self.datasets = datasets;
        Ok(())
    }

    /// Appends a dataset. Family mismatch is never permitted, whatever the
    /// uniformity mode.
    pub fn add_dataset(&mut self, dataset: Dataset) -> ChartResult<()> {
        ensure_family(self.family(), &dataset)?;
        dataset.check_shape()?;
        if self.dataset(dataset.label()).is_some() {
            return Err(ChartError::DuplicateLabel {
                label: dataset.label().to_owned(),
            });
        }
        trace!(
            label = dataset.label(),
            chart_type = %dataset.chart_type(),
            points = dataset.point_count(),
            "add dataset"
        );
        self.datasets.push(dataset);
        Ok(())
    }

    /// Removes a dataset by label. Absent labels are a no-op.
    pub fn remove_dataset(&mut self, label: &str) -> Option<Dataset> {
        let position = self
            .datasets
            .iter()
            .position(|dataset| dataset.label() == label)?;
        trace!(label, "remove dataset");
        Some(self.datasets.remove(position))
    }

    pub fn update_point(&mut self, label: &str, index: usize, point: Point) -> ChartResult<()> {
        self.dataset_mut(label)?.set_point(index, point)
    }

    pub fn set_point_color(&mut self, label: &str, index: usize, color: Color) -> ChartResult<()> {
        self.dataset_mut(label)?.set_color(index, color)
    }

    /// Within-family kind change.
    ///
    /// When `relabel_datasets` is set every dataset's `chart_type` follows the new
    /// kind; otherwise only the nominal kind moves.
    pub fn relabel_kind(
        &mut self,
        kind: ChartKind,
        relabel_datasets: bool,
        default_radius: f64,
    ) -> ChartResult<()> {
        if kind.family() != self.family() {
            return Err(ChartError::IncompatibleFamily {
                expected: self.family(),
                found: kind.family(),
            });
        }

        let mut datasets = self.datasets.clone();
        if relabel_datasets {
            for dataset in &mut datasets {
                dataset.relabel(kind, default_radius)?;
            }
        }
        debug!(from_kind = %self.kind, to_kind = %kind, relabel_datasets, "relabel chart kind");
        self.kind = kind;
        self.datasets = datasets;
        Ok(())
    }

    fn dataset_mut(&mut self, label: &str) -> ChartResult<&mut Dataset> {
        self.datasets
            .iter_mut()
            .find(|dataset| dataset.label() == label)
            .ok_or_else(|| ChartError::DatasetNotFound {
                label: label.to_owned(),
            })
    }
}

fn ensure_family(expected: ChartFamily, dataset: &Dataset) -> ChartResult<()> {
    if dataset.family() != expected {
        return Err(ChartError::IncompatibleFamily {
            expected,
            found: dataset.family(),
        });
    }
    Ok(())
}
