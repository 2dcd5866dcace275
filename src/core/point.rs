use serde::{Deserialize, Serialize};

use crate::core::ChartFamily;

/// One labeled slice of a categorical dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPoint {
    pub name: String,
    pub value: f64,
}

impl CategoricalPoint {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One point of a coordinate dataset. `r` is only meaningful for bubble charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

impl CoordinatePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, r: None }
    }

    #[must_use]
    pub fn bubble(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r: Some(r) }
    }
}

/// Dataset points, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", content = "values", rename_all = "kebab-case")]
pub enum DatasetPoints {
    Categorical(Vec<CategoricalPoint>),
    Coordinate(Vec<CoordinatePoint>),
}

impl DatasetPoints {
    #[must_use]
    pub fn family(&self) -> ChartFamily {
        match self {
            Self::Categorical(_) => ChartFamily::Categorical,
            Self::Coordinate(_) => ChartFamily::Coordinate,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical(points) => points.len(),
            Self::Coordinate(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice names in order; `None` for coordinate points.
    #[must_use]
    pub fn names(&self) -> Option<Vec<String>> {
        match self {
            Self::Categorical(points) => Some(points.iter().map(|p| p.name.clone()).collect()),
            Self::Coordinate(_) => None,
        }
    }

    #[must_use]
    pub fn as_categorical(&self) -> Option<&[CategoricalPoint]> {
        match self {
            Self::Categorical(points) => Some(points),
            Self::Coordinate(_) => None,
        }
    }

    #[must_use]
    pub fn as_coordinate(&self) -> Option<&[CoordinatePoint]> {
        match self {
            Self::Categorical(_) => None,
            Self::Coordinate(points) => Some(points),
        }
    }
}

/// A single point value for point-level edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Point {
    Categorical(CategoricalPoint),
    Coordinate(CoordinatePoint),
}

impl Point {
    #[must_use]
    pub fn family(&self) -> ChartFamily {
        match self {
            Self::Categorical(_) => ChartFamily::Categorical,
            Self::Coordinate(_) => ChartFamily::Coordinate,
        }
    }
}

impl From<CategoricalPoint> for Point {
    fn from(point: CategoricalPoint) -> Self {
        Self::Categorical(point)
    }
}

impl From<CoordinatePoint> for Point {
    fn from(point: CoordinatePoint) -> Self {
        Self::Coordinate(point)
    }
}
