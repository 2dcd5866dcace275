use tracing::trace;

use crate::core::{ChartFamily, ChartKind, Dataset, DatasetPoints};
use crate::error::{ChartError, ChartResult};

use super::{ChartDataModel, EditorConfig, GroupingMode, ModeController, Uniformity};

/// Everything a candidate dataset is checked against.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    /// Family required by the chart's nominal kind.
    pub family: ChartFamily,
    pub mode: GroupingMode,
    pub uniformity: Uniformity,
    /// Existing members of the group the candidate joins (grouped mode only).
    pub siblings: Vec<&'a Dataset>,
    /// Kinds that may be combined in one group under `mixed` uniformity.
    pub mixable_kinds: &'a [ChartKind],
}

impl<'a> ValidationContext<'a> {
    /// Builds the context for adding `candidate` to `model` under the current modes.
    #[must_use]
    pub fn for_candidate(
        model: &'a ChartDataModel,
        modes: &ModeController,
        config: &'a EditorConfig,
        candidate: &Dataset,
    ) -> Self {
        let siblings = modes
            .target_group(candidate)
            .map(|group_id| model.group_members(&group_id))
            .unwrap_or_default();
        Self {
            family: model.family(),
            mode: modes.mode(),
            uniformity: modes.uniformity(),
            siblings,
            mixable_kinds: &config.mixable_kinds,
        }
    }

    fn group_head(&self) -> Option<&'a Dataset> {
        match self.mode {
            GroupingMode::Grouped => self.siblings.first().copied(),
            GroupingMode::Single => None,
        }
    }
}

/// Structural compatibility checks for candidate datasets.
///
/// Rules run in a fixed order and the first failure wins:
/// 1. family of the candidate equals the chart family
/// 2. grouped: point count equals the group's
/// 3. grouped + categorical: slice labels match position by position
///    (missing labels are adopted from the group)
/// 4. grouped: chart type is locked (uniform) or drawn from the mixable list (mixed)
/// 5. bubble points carry a radius > 0
///
/// The first dataset of a group keeps its own point names as stored slice labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetValidator;

impl DatasetValidator {
    /// Returns the accepted candidate, possibly with adopted slice labels.
    pub fn validate(mut candidate: Dataset, context: &ValidationContext<'_>) -> ChartResult<Dataset> {
        if candidate.family() != context.family {
            return Err(ChartError::IncompatibleFamily {
                expected: context.family,
                found: candidate.family(),
            });
        }

        if let Some(head) = context.group_head() {
            if candidate.point_count() != head.point_count() {
                return Err(ChartError::GroupSizeMismatch {
                    expected: head.point_count(),
                    found: candidate.point_count(),
                });
            }

            if candidate.family() == ChartFamily::Categorical {
                adopt_or_match_slice_labels(&mut candidate, head)?;
            }

            check_group_chart_type(&candidate, head, context)?;
        } else if context.mode == GroupingMode::Grouped && candidate.slice_labels().is_none() {
            // A group head stores its slice labels so later point renames cannot shift them.
            let own_labels = candidate.points().names();
            candidate.set_slice_labels(own_labels)?;
        }

        if let DatasetPoints::Coordinate(points) = candidate.points() {
            if candidate.chart_type().requires_radius() {
                if let Some(index) = points
                    .iter()
                    .position(|point| !point.r.is_some_and(|r| r.is_finite() && r > 0.0))
                {
                    return Err(ChartError::InvalidRadius { index });
                }
            }
        }

        trace!(
            label = candidate.label(),
            chart_type = %candidate.chart_type(),
            siblings = context.siblings.len(),
            "candidate dataset accepted"
        );
        Ok(candidate)
    }
}

/// Validates a whole dataset set, e.g. one read back from persistence.
///
/// Grouped datasets are checked against the members preceding them in their
/// group; a group that already mixes chart types is checked as `mixed`.
pub(super) fn validate_dataset_set(
    family: ChartFamily,
    datasets: Vec<Dataset>,
    mixable_kinds: &[ChartKind],
) -> ChartResult<Vec<Dataset>> {
    let mut accepted: Vec<Dataset> = Vec::with_capacity(datasets.len());
    for candidate in datasets {
        let siblings: Vec<&Dataset> = match candidate.group_id() {
            Some(group_id) => accepted
                .iter()
                .filter(|member| member.group_id() == Some(group_id))
                .collect(),
            None => Vec::new(),
        };
        let uniformity = if siblings
            .iter()
            .any(|member| member.chart_type() != candidate.chart_type())
        {
            Uniformity::Mixed
        } else {
            Uniformity::Uniform
        };
        let mode = if candidate.group_id().is_some() {
            GroupingMode::Grouped
        } else {
            GroupingMode::Single
        };
        let dataset = {
            let context = ValidationContext {
                family,
                mode,
                uniformity,
                siblings,
                mixable_kinds,
            };
            DatasetValidator::validate(candidate, &context)?
        };
        accepted.push(dataset);
    }
    Ok(accepted)
}

fn adopt_or_match_slice_labels(candidate: &mut Dataset, head: &Dataset) -> ChartResult<()> {
    let Some(group_labels) = head.effective_slice_labels() else {
        return Ok(());
    };

    match candidate.slice_labels() {
        None => candidate.set_slice_labels(Some(group_labels)),
        Some(labels) => {
            for (position, (expected, found)) in group_labels.iter().zip(labels).enumerate() {
                if expected != found {
                    return Err(ChartError::SliceLabelMismatch {
                        position,
                        expected: expected.clone(),
                        found: found.clone(),
                    });
                }
            }
            Ok(())
        }
    }
}

fn check_group_chart_type(
    candidate: &Dataset,
    head: &Dataset,
    context: &ValidationContext<'_>,
) -> ChartResult<()> {
    if candidate.chart_type() == head.chart_type() {
        return Ok(());
    }
    match context.uniformity {
        Uniformity::Uniform => Err(ChartError::ChartTypeLockedInUniformGroup {
            locked: head.chart_type(),
            requested: candidate.chart_type(),
        }),
        Uniformity::Mixed => {
            for kind in [head.chart_type(), candidate.chart_type()] {
                if !context.mixable_kinds.contains(&kind) {
                    return Err(ChartError::ChartTypeNotMixable { kind });
                }
            }
            Ok(())
        }
    }
}
