use tracing::debug;

use crate::core::{Color, Dataset, DatasetGrouping, Point};
use crate::error::ChartResult;
use crate::extensions::{BackupStore, EditorEvent, SampleGenerator};

use super::{ChartEditor, DatasetBuilder, DatasetValidator, GroupingMode, ValidationContext};

impl<B: BackupStore, G: SampleGenerator> ChartEditor<B, G> {
    /// Validates `candidate` against the current modes and appends it.
    ///
    /// In grouped mode a candidate without a group joins the active group (a new
    /// group is allocated when none is active). In single mode any group id on the
    /// candidate is dropped.
    pub fn add_dataset(&mut self, candidate: Dataset) -> ChartResult<()> {
        let candidate = match self.modes.mode() {
            GroupingMode::Single => candidate.with_grouping(DatasetGrouping::Single),
            GroupingMode::Grouped => {
                let group_id = match self.modes.target_group(&candidate) {
                    Some(group_id) => group_id,
                    None => self.modes.new_group(&self.model),
                };
                candidate.with_grouping(DatasetGrouping::grouped(group_id))
            }
        };

        let accepted = {
            let context = ValidationContext::for_candidate(
                &self.model,
                &self.modes,
                &self.config,
                &candidate,
            );
            DatasetValidator::validate(candidate, &context)?
        };
        let label = accepted.label().to_owned();
        self.model.add_dataset(accepted)?;
        debug!(label = %label, datasets = self.model.len(), "dataset added");
        self.emit_plugin_event(EditorEvent::DatasetAdded { label });
        Ok(())
    }

    /// Builder primed for the current kind, palette position and grouping.
    #[must_use]
    pub fn dataset_builder(&self) -> DatasetBuilder {
        let grouping = match (self.modes.mode(), self.modes.active_group()) {
            (GroupingMode::Grouped, Some(group_id)) => DatasetGrouping::grouped(group_id),
            _ => DatasetGrouping::Single,
        };
        DatasetBuilder::with_config(self.model.kind(), &self.config)
            .palette_offset(self.model.len())
            .grouping(grouping)
    }

    /// Builds a dataset from user rows and adds it.
    pub fn add_built_dataset(&mut self, builder: &DatasetBuilder) -> ChartResult<()> {
        let dataset = builder.build()?;
        self.add_dataset(dataset)
    }

    /// Removes a dataset by label. Absent labels are a no-op.
    pub fn remove_dataset(&mut self, label: &str) -> Option<Dataset> {
        let removed = self.model.remove_dataset(label)?;
        self.emit_plugin_event(EditorEvent::DatasetRemoved {
            label: label.to_owned(),
        });
        Some(removed)
    }

    pub fn update_point(&mut self, label: &str, index: usize, point: Point) -> ChartResult<()> {
        self.model.update_point(label, index, point)?;
        self.emit_plugin_event(EditorEvent::PointUpdated {
            label: label.to_owned(),
            index,
        });
        Ok(())
    }

    pub fn set_point_color(&mut self, label: &str, index: usize, color: Color) -> ChartResult<()> {
        self.model.set_point_color(label, index, color)?;
        self.emit_plugin_event(EditorEvent::PointColorUpdated {
            label: label.to_owned(),
            index,
            color,
        });
        Ok(())
    }
}
