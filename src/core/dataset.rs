use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::core::{
    CategoricalPoint, ChartFamily, ChartKind, Color, CoordinatePoint, DatasetPoints, Point,
};
use crate::error::{ChartError, ChartResult};

/// Whether a dataset stands alone or shares slice structure with a group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DatasetGrouping {
    #[default]
    Single,
    Grouped { group_id: String },
}

impl DatasetGrouping {
    #[must_use]
    pub fn grouped(group_id: impl Into<String>) -> Self {
        Self::Grouped {
            group_id: group_id.into(),
        }
    }

    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::Single => None,
            Self::Grouped { group_id } => Some(group_id),
        }
    }
}

/// One named series within a chart.
///
/// Construction enforces the per-dataset shape invariants:
/// - points belong to the family of `chart_type`
/// - exactly one color per point
/// - scatter points never carry a radius
///
/// Radius positivity on bubble points is a validation concern and is checked by
/// `DatasetValidator` before a dataset enters a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    label: String,
    chart_type: ChartKind,
    points: DatasetPoints,
    colors: Vec<Color>,
    #[serde(default)]
    grouping: DatasetGrouping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slice_labels: Option<Vec<String>>,
}

impl Dataset {
    pub fn new(
        label: impl Into<String>,
        chart_type: ChartKind,
        points: DatasetPoints,
        colors: Vec<Color>,
    ) -> ChartResult<Self> {
        let mut dataset = Self {
            label: label.into(),
            chart_type,
            points,
            colors,
            grouping: DatasetGrouping::Single,
            slice_labels: None,
        };
        if chart_type == ChartKind::Scatter {
            dataset.strip_radius();
        }
        dataset.check_shape()?;
        Ok(dataset)
    }

    #[must_use]
    pub fn with_grouping(mut self, grouping: DatasetGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_slice_labels(mut self, slice_labels: Vec<String>) -> ChartResult<Self> {
        self.set_slice_labels(Some(slice_labels))?;
        Ok(self)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartKind {
        self.chart_type
    }

    #[must_use]
    pub fn family(&self) -> ChartFamily {
        self.chart_type.family()
    }

    #[must_use]
    pub fn points(&self) -> &DatasetPoints {
        &self.points
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[must_use]
    pub fn grouping(&self) -> &DatasetGrouping {
        &self.grouping
    }

    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.grouping.group_id()
    }

    #[must_use]
    pub fn slice_labels(&self) -> Option<&[String]> {
        self.slice_labels.as_deref()
    }

    /// Slice labels if present, otherwise the categorical point names.
    #[must_use]
    pub fn effective_slice_labels(&self) -> Option<Vec<String>> {
        self.slice_labels.clone().or_else(|| self.points.names())
    }

    pub fn set_grouping(&mut self, grouping: DatasetGrouping) {
        self.grouping = grouping;
    }

    pub fn set_slice_labels(&mut self, slice_labels: Option<Vec<String>>) -> ChartResult<()> {
        if let Some(labels) = &slice_labels {
            if self.family() != ChartFamily::Categorical {
                return Err(ChartError::InvalidData(
                    "slice labels only apply to categorical datasets".to_owned(),
                ));
            }
            if labels.len() != self.points.len() {
                return Err(ChartError::InvalidData(format!(
                    "dataset `{}` has {} points but {} slice labels",
                    self.label,
                    self.points.len(),
                    labels.len()
                )));
            }
        }
        self.slice_labels = slice_labels;
        Ok(())
    }

    /// Replaces a single point in place.
    ///
    /// Slice names are fixed while the dataset belongs to a group; renaming one
    /// fails with `SliceLabelMismatch`. Outside a group a rename also updates the
    /// matching stored slice label.
    pub fn set_point(&mut self, index: usize, point: Point) -> ChartResult<()> {
        let len = self.points.len();
        if index >= len {
            return Err(ChartError::PointIndexOutOfRange { index, len });
        }
        let expected = self.family();
        match (&mut self.points, point) {
            (DatasetPoints::Categorical(points), Point::Categorical(point)) => {
                check_categorical_point(&point)?;
                let previous = &points[index].name;
                if *previous != point.name {
                    if self.grouping.group_id().is_some() {
                        return Err(ChartError::SliceLabelMismatch {
                            position: index,
                            expected: previous.clone(),
                            found: point.name,
                        });
                    }
                    if points.iter().enumerate().any(|(i, p)| i != index && p.name == point.name) {
                        return Err(ChartError::InvalidData(format!(
                            "slice name `{}` appears more than once",
                            point.name
                        )));
                    }
                    if let Some(labels) = &mut self.slice_labels {
                        if labels[index] == *previous {
                            labels[index] = point.name.clone();
                        }
                    }
                }
                points[index] = point;
            }
            (DatasetPoints::Coordinate(points), Point::Coordinate(mut point)) => {
                check_coordinate_point(&point)?;
                match self.chart_type {
                    ChartKind::Bubble => {
                        if !point.r.is_some_and(|r| r > 0.0) {
                            return Err(ChartError::InvalidRadius { index });
                        }
                    }
                    _ => point.r = None,
                }
                points[index] = point;
            }
            (_, point) => {
                return Err(ChartError::IncompatibleFamily {
                    expected,
                    found: point.family(),
                });
            }
        }
        Ok(())
    }

    pub fn set_color(&mut self, index: usize, color: Color) -> ChartResult<()> {
        let len = self.colors.len();
        if index >= len {
            return Err(ChartError::PointIndexOutOfRange { index, len });
        }
        color.validate()?;
        self.colors[index] = color;
        Ok(())
    }

    /// Switches `chart_type` within the current family.
    ///
    /// scatter -> bubble fills every missing radius with `default_radius`;
    /// bubble -> scatter drops radii.
    pub fn relabel(&mut self, kind: ChartKind, default_radius: f64) -> ChartResult<()> {
        if kind.family() != self.family() {
            return Err(ChartError::IncompatibleFamily {
                expected: self.family(),
                found: kind.family(),
            });
        }
        if kind.requires_radius() {
            if let DatasetPoints::Coordinate(points) = &mut self.points {
                for point in points.iter_mut() {
                    if point.r.is_none() {
                        point.r = Some(default_radius);
                    }
                }
            }
        } else {
            self.strip_radius();
        }
        self.chart_type = kind;
        Ok(())
    }

    /// Checks the structural invariants of this dataset.
    ///
    /// Used by constructors and when accepting datasets from deserialized input.
    pub fn check_shape(&self) -> ChartResult<()> {
        if self.label.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "dataset label must not be empty".to_owned(),
            ));
        }
        if self.points.family() != self.chart_type.family() {
            return Err(ChartError::IncompatibleFamily {
                expected: self.chart_type.family(),
                found: self.points.family(),
            });
        }
        if self.colors.len() != self.points.len() {
            return Err(ChartError::InvalidData(format!(
                "dataset `{}` has {} points but {} colors",
                self.label,
                self.points.len(),
                self.colors.len()
            )));
        }
        for color in &self.colors {
            color.validate()?;
        }
        if let Some(labels) = &self.slice_labels {
            if self.family() != ChartFamily::Categorical {
                return Err(ChartError::InvalidData(format!(
                    "dataset `{}` is {} but carries slice labels",
                    self.label, self.chart_type
                )));
            }
            if labels.len() != self.points.len() {
                return Err(ChartError::InvalidData(format!(
                    "dataset `{}` has {} points but {} slice labels",
                    self.label,
                    self.points.len(),
                    labels.len()
                )));
            }
        }
        match &self.points {
            DatasetPoints::Categorical(points) => {
                for point in points {
                    check_categorical_point(point)?;
                }
            }
            DatasetPoints::Coordinate(points) => {
                for point in points {
                    check_coordinate_point(point)?;
                }
                if !self.chart_type.requires_radius() && points.iter().any(|p| p.r.is_some()) {
                    return Err(ChartError::InvalidData(format!(
                        "dataset `{}` is {} but carries point radii",
                        self.label, self.chart_type
                    )));
                }
            }
        }
        if let Some(group_id) = self.group_id() {
            if group_id.is_empty() {
                return Err(ChartError::InvalidData(
                    "group id must not be empty".to_owned(),
                ));
            }
        }
        Ok(())
    }

    fn strip_radius(&mut self) {
        if let DatasetPoints::Coordinate(points) = &mut self.points {
            for point in points.iter_mut() {
                point.r = None;
            }
        }
    }
}

fn check_categorical_point(point: &CategoricalPoint) -> ChartResult<()> {
    ensure_finite(point.value, "categorical value")?;
    Ok(())
}

fn check_coordinate_point(point: &CoordinatePoint) -> ChartResult<()> {
    ensure_finite(point.x, "x")?;
    ensure_finite(point.y, "y")?;
    if let Some(r) = point.r {
        ensure_finite(r, "r")?;
    }
    Ok(())
}
