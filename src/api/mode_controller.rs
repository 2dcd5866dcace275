use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Dataset, DatasetGrouping};
use crate::error::{ChartError, ChartResult};

use super::{ChartDataModel, DatasetValidator, EditorConfig, ValidationContext};

/// Whether datasets stand alone or share slice structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    #[default]
    Single,
    Grouped,
}

/// Within grouped mode, whether a group is locked to one chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Uniformity {
    #[default]
    Uniform,
    Mixed,
}

/// Owns grouping and uniformity mode plus the active group selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeController {
    mode: GroupingMode,
    uniformity: Uniformity,
    active_group: Option<String>,
    next_group_seq: u64,
}

impl ModeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    #[must_use]
    pub fn uniformity(&self) -> Uniformity {
        self.uniformity
    }

    #[must_use]
    pub fn active_group(&self) -> Option<&str> {
        self.active_group.as_deref()
    }

    /// Switches grouping mode.
    ///
    /// `single -> grouped` places every existing dataset into one freshly
    /// generated group; `grouped -> single` drops all group ids.
    pub fn set_mode(
        &mut self,
        mode: GroupingMode,
        model: &mut ChartDataModel,
        config: &EditorConfig,
    ) -> ChartResult<()> {
        if mode == self.mode {
            return Ok(());
        }
        match mode {
            GroupingMode::Grouped => {
                let group_id = self.fresh_group_id(model);
                let assignments: IndexMap<String, String> = model
                    .datasets()
                    .iter()
                    .map(|dataset| (dataset.label().to_owned(), group_id.clone()))
                    .collect();
                self.enter_grouped(model, &assignments, &group_id, config)
            }
            GroupingMode::Single => {
                let datasets = model
                    .datasets()
                    .iter()
                    .cloned()
                    .map(|dataset| dataset.with_grouping(DatasetGrouping::Single))
                    .collect();
                model.replace_all(model.kind(), datasets)?;
                debug!("grouping mode -> single");
                self.mode = GroupingMode::Single;
                self.active_group = None;
                Ok(())
            }
        }
    }

    /// Enters grouped mode with caller-chosen groups.
    ///
    /// `assignments` maps dataset labels to group ids; unlisted datasets join a
    /// freshly generated group. The first listed group becomes active.
    pub fn set_mode_with_groups(
        &mut self,
        assignments: &IndexMap<String, String>,
        model: &mut ChartDataModel,
        config: &EditorConfig,
    ) -> ChartResult<()> {
        if let Some((label, _)) = assignments.iter().find(|(_, group_id)| group_id.is_empty()) {
            return Err(ChartError::InvalidData(format!(
                "group id for dataset `{label}` must not be empty"
            )));
        }

        let mut resolved = assignments.clone();
        let mut fallback_group = None;
        for dataset in model.datasets() {
            if !resolved.contains_key(dataset.label()) {
                let group_id = if let Some(group_id) = fallback_group.clone() {
                    group_id
                } else {
                    let group_id = self.fresh_group_id(model);
                    fallback_group = Some(group_id.clone());
                    group_id
                };
                resolved.insert(dataset.label().to_owned(), group_id);
            }
        }

        let active = match assignments.values().next() {
            Some(group_id) => group_id.clone(),
            None => match fallback_group {
                Some(group_id) => group_id,
                None => self.fresh_group_id(model),
            },
        };
        self.enter_grouped(model, &resolved, &active, config)
    }

    /// Relaxing to `mixed` always succeeds; tightening to `uniform` requires every
    /// group to already share one chart type.
    ///
    /// Every group is checked, not only the active one: uniformity applies to the
    /// whole chart, so a mixed group elsewhere would break the uniform lock the
    /// moment it became active.
    pub fn set_uniformity(
        &mut self,
        uniformity: Uniformity,
        model: &ChartDataModel,
    ) -> ChartResult<()> {
        if uniformity == Uniformity::Uniform {
            for (group_id, members) in model.groups() {
                if let Some(first) = members.first() {
                    if members
                        .iter()
                        .any(|member| member.chart_type() != first.chart_type())
                    {
                        return Err(ChartError::MixedTypesPresent {
                            group_id: group_id.to_owned(),
                        });
                    }
                }
            }
        }
        debug!(?uniformity, "set uniformity");
        self.uniformity = uniformity;
        Ok(())
    }

    /// Selects the group whose datasets new candidates are validated against.
    pub fn set_active_group(&mut self, group_id: impl Into<String>) -> ChartResult<()> {
        let group_id = group_id.into();
        if group_id.is_empty() {
            return Err(ChartError::InvalidData(
                "group id must not be empty".to_owned(),
            ));
        }
        debug!(group_id = %group_id, "set active group");
        self.active_group = Some(group_id);
        Ok(())
    }

    /// Allocates a new, empty group and makes it active.
    pub fn new_group(&mut self, model: &ChartDataModel) -> String {
        let group_id = self.fresh_group_id(model);
        self.active_group = Some(group_id.clone());
        group_id
    }

    /// Group a grouped-mode candidate joins: its own group id, else the active one.
    #[must_use]
    pub fn target_group(&self, candidate: &Dataset) -> Option<String> {
        if self.mode != GroupingMode::Grouped {
            return None;
        }
        candidate
            .group_id()
            .map(str::to_owned)
            .or_else(|| self.active_group.clone())
    }

    /// Re-derives mode and active group from datasets installed wholesale.
    pub fn sync_from_model(&mut self, model: &ChartDataModel) {
        let groups = model.groups();
        if groups.is_empty() {
            self.mode = GroupingMode::Single;
            self.active_group = None;
        } else {
            self.mode = GroupingMode::Grouped;
            let keep_active = self
                .active_group
                .as_deref()
                .is_some_and(|active| groups.contains_key(active));
            if !keep_active {
                self.active_group = groups.keys().next().map(|group_id| (*group_id).to_owned());
            }
            let mixed = groups.values().any(|members| {
                members
                    .iter()
                    .any(|member| member.chart_type() != members[0].chart_type())
            });
            if mixed {
                self.uniformity = Uniformity::Mixed;
            }
        }
        debug!(mode = ?self.mode, uniformity = ?self.uniformity, "mode synced from model");
    }

    fn enter_grouped(
        &mut self,
        model: &mut ChartDataModel,
        assignments: &IndexMap<String, String>,
        active: &str,
        config: &EditorConfig,
    ) -> ChartResult<()> {
        let mut assembled: Vec<Dataset> = Vec::with_capacity(model.len());
        for dataset in model.datasets() {
            let Some(group_id) = assignments.get(dataset.label()) else {
                return Err(ChartError::DatasetNotFound {
                    label: dataset.label().to_owned(),
                });
            };
            let candidate = dataset
                .clone()
                .with_grouping(DatasetGrouping::grouped(group_id.clone()));
            let validated = {
                let siblings: Vec<&Dataset> = assembled
                    .iter()
                    .filter(|member| member.group_id() == Some(group_id.as_str()))
                    .collect();
                let context = ValidationContext {
                    family: model.family(),
                    mode: GroupingMode::Grouped,
                    uniformity: self.uniformity,
                    siblings,
                    mixable_kinds: &config.mixable_kinds,
                };
                DatasetValidator::validate(candidate, &context)?
            };
            assembled.push(validated);
        }

        model.replace_all(model.kind(), assembled)?;
        debug!(active_group = active, "grouping mode -> grouped");
        self.mode = GroupingMode::Grouped;
        self.active_group = Some(active.to_owned());
        Ok(())
    }

    fn fresh_group_id(&mut self, model: &ChartDataModel) -> String {
        loop {
            self.next_group_seq += 1;
            let candidate = format!("group-{}", self.next_group_seq);
            if model.group_members(&candidate).is_empty() {
                return candidate;
            }
        }
    }
}
