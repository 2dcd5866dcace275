use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{ChartFamily, ChartKind, CoordinatePoint, Dataset, DatasetPoints};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{BackupSnapshot, BackupStore, SampleGenerator};

use super::{
    ChartDataModel, DatasetBuilder, DatasetValidator, EditorConfig, GroupingMode, ModeController,
    Uniformity, ValidationContext,
};

/// Ways a pending family transition can be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionAction {
    Restore,
    LoadSample,
    QuickTransform,
    CreateManually,
    Cancel,
}

impl fmt::Display for ResolutionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Restore => "restore",
            Self::LoadSample => "load-sample",
            Self::QuickTransform => "quick-transform",
            Self::CreateManually => "create-manually",
            Self::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionDirection {
    ToCoordinate,
    ToCategorical,
}

impl TransitionDirection {
    #[must_use]
    pub fn toward(family: ChartFamily) -> Self {
        match family {
            ChartFamily::Coordinate => Self::ToCoordinate,
            ChartFamily::Categorical => Self::ToCategorical,
        }
    }
}

pub type AvailableActions = SmallVec<[ResolutionAction; 5]>;

/// A cross-family kind change waiting for the user to pick a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionProposal {
    pub request_id: u64,
    pub from: ChartKind,
    pub target: ChartKind,
    pub direction: TransitionDirection,
    /// Whether a snapshot for the target family existed when the request was made.
    pub has_backup: bool,
    /// Set once manual entry was started; the proposal stays open meanwhile.
    pub awaiting_manual_entry: bool,
}

impl TransitionProposal {
    #[must_use]
    pub fn available_actions(&self) -> AvailableActions {
        let mut actions = AvailableActions::new();
        if self.has_backup {
            actions.push(ResolutionAction::Restore);
        }
        actions.push(ResolutionAction::LoadSample);
        if self.direction == TransitionDirection::ToCoordinate {
            actions.push(ResolutionAction::QuickTransform);
            actions.push(ResolutionAction::CreateManually);
        }
        actions.push(ResolutionAction::Cancel);
        actions
    }

    #[must_use]
    pub fn is_available(&self, action: ResolutionAction) -> bool {
        self.available_actions().contains(&action)
    }
}

/// Negotiation lifecycle: `Idle -> Proposed -> {Resolved, Cancelled}`.
///
/// `Resolved` and `Cancelled` behave like `Idle` for new requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NegotiationState {
    #[default]
    Idle,
    Proposed(TransitionProposal),
    Resolved {
        request_id: u64,
        action: ResolutionAction,
    },
    Cancelled {
        request_id: u64,
    },
}

/// Outcome of a kind-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindChange {
    Unchanged,
    /// Same-family change applied immediately.
    Relabeled { from: ChartKind, to: ChartKind },
    /// Cross-family change parked until a resolution action runs.
    Proposed(TransitionProposal),
}

/// State machine guarding lossy chart-kind changes across families.
///
/// Whatever family is left behind is snapshotted into the backup store before
/// the model is replaced, so the reverse transition can always offer `restore`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionNegotiator {
    state: NegotiationState,
    next_request_id: u64,
}

impl TransitionNegotiator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> NegotiationState {
        self.state
    }

    #[must_use]
    pub fn pending(&self) -> Option<&TransitionProposal> {
        match &self.state {
            NegotiationState::Proposed(proposal) => Some(proposal),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Handles a user request for `target`.
    ///
    /// A pending proposal is superseded by any new request.
    pub fn request_kind(
        &mut self,
        target: ChartKind,
        model: &mut ChartDataModel,
        modes: &ModeController,
        backup: &dyn BackupStore,
        config: &EditorConfig,
    ) -> ChartResult<KindChange> {
        let from = model.kind();
        if target.family() == from.family() {
            if target != from {
                let relabel_datasets = modes.uniformity() == Uniformity::Uniform;
                model.relabel_kind(target, relabel_datasets, config.default_bubble_radius)?;
            }
            self.supersede_pending();
            if target == from {
                return Ok(KindChange::Unchanged);
            }
            return Ok(KindChange::Relabeled { from, to: target });
        }

        self.supersede_pending();
        self.next_request_id += 1;
        let proposal = TransitionProposal {
            request_id: self.next_request_id,
            from,
            target,
            direction: TransitionDirection::toward(target.family()),
            has_backup: backup.has(target.family()),
            awaiting_manual_entry: false,
        };
        debug!(
            request_id = proposal.request_id,
            from = %from,
            target = %target,
            has_backup = proposal.has_backup,
            "propose chart family transition"
        );
        self.state = NegotiationState::Proposed(proposal);
        Ok(KindChange::Proposed(proposal))
    }

    /// Reinstates the target family's snapshot.
    pub fn restore(
        &mut self,
        model: &mut ChartDataModel,
        backup: &mut dyn BackupStore,
    ) -> ChartResult<()> {
        let proposal = self.require_action(ResolutionAction::Restore)?;
        let family = proposal.target.family();
        let snapshot = backup
            .get(family)
            .ok_or(ChartError::MissingBackup { family })?;
        self.resolve(
            proposal,
            ResolutionAction::Restore,
            snapshot.datasets,
            model,
            backup,
        )
    }

    /// Installs generated sample datasets for the target kind.
    pub fn load_sample(
        &mut self,
        model: &mut ChartDataModel,
        backup: &mut dyn BackupStore,
        generator: &dyn SampleGenerator,
    ) -> ChartResult<()> {
        let proposal = self.require_action(ResolutionAction::LoadSample)?;
        let datasets = generator.generate(proposal.target)?;
        self.resolve(
            proposal,
            ResolutionAction::LoadSample,
            datasets,
            model,
            backup,
        )
    }

    /// Maps every categorical point `{name, value}` to `{x: index, y: value}`;
    /// bubble targets get a radius normalized from `|value|`.
    pub fn quick_transform(
        &mut self,
        model: &mut ChartDataModel,
        backup: &mut dyn BackupStore,
        config: &EditorConfig,
    ) -> ChartResult<()> {
        let proposal = self.require_action(ResolutionAction::QuickTransform)?;
        let datasets = transform_to_coordinate(
            model.datasets(),
            proposal.target,
            config.bubble_radius_range,
        )?;
        self.resolve(
            proposal,
            ResolutionAction::QuickTransform,
            datasets,
            model,
            backup,
        )
    }

    /// Starts manual entry; the proposal stays open until completed or cancelled.
    pub fn begin_manual_entry(&mut self, config: &EditorConfig) -> ChartResult<DatasetBuilder> {
        let proposal = self.require_action(ResolutionAction::CreateManually)?;
        self.state = NegotiationState::Proposed(TransitionProposal {
            awaiting_manual_entry: true,
            ..proposal
        });
        debug!(request_id = proposal.request_id, "begin manual dataset entry");
        Ok(DatasetBuilder::with_config(proposal.target, config))
    }

    /// Abandons manual entry and returns to choosing a resolution.
    pub fn cancel_manual_entry(&mut self) -> ChartResult<()> {
        let proposal = self.require_manual_entry()?;
        self.state = NegotiationState::Proposed(TransitionProposal {
            awaiting_manual_entry: false,
            ..proposal
        });
        Ok(())
    }

    /// Builds the manually entered dataset and installs it as the only dataset.
    ///
    /// Build or validation failures keep the proposal open.
    pub fn complete_manual_entry(
        &mut self,
        builder: &DatasetBuilder,
        model: &mut ChartDataModel,
        backup: &mut dyn BackupStore,
        config: &EditorConfig,
    ) -> ChartResult<()> {
        let proposal = self.require_manual_entry()?;
        let dataset = builder.build()?;
        let context = ValidationContext {
            family: proposal.target.family(),
            mode: GroupingMode::Single,
            uniformity: Uniformity::Uniform,
            siblings: Vec::new(),
            mixable_kinds: &config.mixable_kinds,
        };
        let dataset = DatasetValidator::validate(dataset, &context)?;
        self.resolve(
            proposal,
            ResolutionAction::CreateManually,
            vec![dataset],
            model,
            backup,
        )
    }

    /// Drops the pending proposal; the model is never touched.
    pub fn cancel(&mut self) -> ChartResult<()> {
        let proposal = self.pending().copied().ok_or(ChartError::NoPendingTransition)?;
        debug!(request_id = proposal.request_id, "cancel chart family transition");
        self.state = NegotiationState::Cancelled {
            request_id: proposal.request_id,
        };
        Ok(())
    }

    fn require_action(&self, action: ResolutionAction) -> ChartResult<TransitionProposal> {
        let proposal = self.pending().copied().ok_or(ChartError::NoPendingTransition)?;
        if action == ResolutionAction::Restore && !proposal.has_backup {
            return Err(ChartError::MissingBackup {
                family: proposal.target.family(),
            });
        }
        if !proposal.is_available(action) {
            return Err(ChartError::ActionUnavailable { action });
        }
        Ok(proposal)
    }

    fn require_manual_entry(&self) -> ChartResult<TransitionProposal> {
        let proposal = self.pending().copied().ok_or(ChartError::NoPendingTransition)?;
        if !proposal.awaiting_manual_entry {
            return Err(ChartError::ManualEntryNotStarted);
        }
        Ok(proposal)
    }

    fn supersede_pending(&mut self) {
        if let NegotiationState::Proposed(previous) = self.state {
            warn!(
                request_id = previous.request_id,
                "pending chart family transition superseded"
            );
            self.state = NegotiationState::Cancelled {
                request_id: previous.request_id,
            };
        }
    }

    /// Backs up the family being left, then installs `datasets`.
    ///
    /// The replacement is staged on a copy so a rejected dataset set leaves the
    /// model, the backup store and the proposal untouched.
    fn resolve(
        &mut self,
        proposal: TransitionProposal,
        action: ResolutionAction,
        datasets: Vec<Dataset>,
        model: &mut ChartDataModel,
        backup: &mut dyn BackupStore,
    ) -> ChartResult<()> {
        let mut staged = model.clone();
        staged.replace_all(proposal.target, datasets)?;

        backup.put(BackupSnapshot::capture(model.kind(), model.datasets().to_vec()));
        *model = staged;
        self.state = NegotiationState::Resolved {
            request_id: proposal.request_id,
            action,
        };
        debug!(
            request_id = proposal.request_id,
            %action,
            kind = %model.kind(),
            datasets = model.len(),
            "resolved chart family transition"
        );
        Ok(())
    }
}

/// Deterministic categorical -> coordinate mapping used by `quick_transform`.
pub fn transform_to_coordinate(
    datasets: &[Dataset],
    target: ChartKind,
    radius_range: (f64, f64),
) -> ChartResult<Vec<Dataset>> {
    if target.family() != ChartFamily::Coordinate {
        return Err(ChartError::IncompatibleFamily {
            expected: ChartFamily::Coordinate,
            found: target.family(),
        });
    }
    if datasets.is_empty() {
        return Err(ChartError::NotTransformable(
            "the chart has no datasets".to_owned(),
        ));
    }

    let (min_radius, max_radius) = radius_range;
    datasets
        .iter()
        .map(|dataset| {
            let DatasetPoints::Categorical(points) = dataset.points() else {
                return Err(ChartError::NotTransformable(format!(
                    "dataset `{}` is not categorical",
                    dataset.label()
                )));
            };
            let max_magnitude = points
                .iter()
                .map(|point| OrderedFloat(point.value.abs()))
                .max()
                .map_or(0.0, |value| value.0);

            let coordinates = points
                .iter()
                .enumerate()
                .map(|(index, point)| {
                    let x = index as f64;
                    if target.requires_radius() {
                        let ratio = if max_magnitude > 0.0 {
                            point.value.abs() / max_magnitude
                        } else {
                            0.0
                        };
                        CoordinatePoint::bubble(
                            x,
                            point.value,
                            min_radius + ratio * (max_radius - min_radius),
                        )
                    } else {
                        CoordinatePoint::new(x, point.value)
                    }
                })
                .collect();

            Ok(Dataset::new(
                dataset.label(),
                target,
                DatasetPoints::Coordinate(coordinates),
                dataset.colors().to_vec(),
            )?
            .with_grouping(dataset.grouping().clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::transform_to_coordinate;
    use crate::core::{CategoricalPoint, ChartKind, Color, Dataset, DatasetPoints};

    #[test]
    fn bubble_radius_is_normalized_by_largest_magnitude() {
        let dataset = Dataset::new(
            "sales",
            ChartKind::Bar,
            DatasetPoints::Categorical(vec![
                CategoricalPoint::new("a", 0.0),
                CategoricalPoint::new("b", -5.0),
                CategoricalPoint::new("c", 10.0),
            ]),
            vec![Color::rgb(0.0, 0.0, 0.0); 3],
        )
        .expect("dataset");

        let out = transform_to_coordinate(&[dataset], ChartKind::Bubble, (4.0, 20.0))
            .expect("transform");
        let points = out[0].points().as_coordinate().expect("coordinate points");
        assert_relative_eq!(points[0].r.expect("r"), 4.0);
        assert_relative_eq!(points[1].r.expect("r"), 12.0);
        assert_relative_eq!(points[2].r.expect("r"), 20.0);
        assert_relative_eq!(points[1].y, -5.0);
    }
}
