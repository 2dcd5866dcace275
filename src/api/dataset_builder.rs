use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::parse_numeric_field;
use crate::core::{
    CategoricalPoint, ChartFamily, ChartKind, Color, CoordinatePoint, Dataset, DatasetGrouping,
    DatasetPoints, default_palette,
};
use crate::error::{ChartError, ChartResult};

use super::EditorConfig;

/// One user-entered row, kept as raw text until the dataset is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "kebab-case")]
pub enum DatasetRow {
    Labeled {
        name: String,
        value: String,
        #[serde(default)]
        color: Option<String>,
    },
    Point {
        x: String,
        y: String,
        #[serde(default)]
        r: Option<String>,
        #[serde(default)]
        color: Option<String>,
    },
}

impl DatasetRow {
    #[must_use]
    pub fn labeled(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Labeled {
            name: name.into(),
            value: value.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn point(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::Point {
            x: x.into(),
            y: y.into(),
            r: None,
            color: None,
        }
    }

    #[must_use]
    pub fn bubble(x: impl Into<String>, y: impl Into<String>, r: impl Into<String>) -> Self {
        Self::Point {
            x: x.into(),
            y: y.into(),
            r: Some(r.into()),
            color: None,
        }
    }

    /// Attaches an explicit `#RRGGBB` color to the row.
    #[must_use]
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        match &mut self {
            Self::Labeled { color, .. } | Self::Point { color, .. } => *color = Some(hex.into()),
        }
        self
    }

    #[must_use]
    pub fn family(&self) -> ChartFamily {
        match self {
            Self::Labeled { .. } => ChartFamily::Categorical,
            Self::Point { .. } => ChartFamily::Coordinate,
        }
    }

    fn color(&self) -> Option<&str> {
        match self {
            Self::Labeled { color, .. } | Self::Point { color, .. } => color.as_deref(),
        }
    }
}

/// Builds a dataset from user-entered rows, assigning labels and colors.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBuilder {
    kind: ChartKind,
    label: Option<String>,
    rows: Vec<DatasetRow>,
    grouping: DatasetGrouping,
    palette: Vec<Color>,
    palette_offset: usize,
}

impl DatasetBuilder {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            label: None,
            rows: Vec::new(),
            grouping: DatasetGrouping::Single,
            palette: default_palette(),
            palette_offset: 0,
        }
    }

    /// Builder using the editor's palette.
    #[must_use]
    pub fn with_config(kind: ChartKind, config: &EditorConfig) -> Self {
        Self::new(kind).palette(config.palette.clone())
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn grouping(mut self, grouping: DatasetGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    #[must_use]
    pub fn palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Position of the first palette color used; usually the dataset index.
    #[must_use]
    pub fn palette_offset(mut self, offset: usize) -> Self {
        self.palette_offset = offset;
        self
    }

    #[must_use]
    pub fn row(mut self, row: DatasetRow) -> Self {
        self.rows.push(row);
        self
    }

    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = DatasetRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn push_row(&mut self, row: DatasetRow) {
        self.rows.push(row);
    }

    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn build(&self) -> ChartResult<Dataset> {
        if self.rows.is_empty() {
            return Err(ChartError::InvalidData(
                "dataset needs at least one row".to_owned(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "dataset palette must not be empty".to_owned(),
            ));
        }
        if let Some(row) = self.rows.iter().find(|row| row.family() != self.kind.family()) {
            return Err(ChartError::IncompatibleFamily {
                expected: self.kind.family(),
                found: row.family(),
            });
        }

        let label = match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_owned(),
            _ => format!("Dataset {}", self.palette_offset + 1),
        };

        let points = match self.kind.family() {
            ChartFamily::Categorical => DatasetPoints::Categorical(self.categorical_points()?),
            ChartFamily::Coordinate => DatasetPoints::Coordinate(self.coordinate_points()?),
        };
        let colors = self.colors()?;
        let slice_labels = points.names();

        let mut dataset = Dataset::new(label, self.kind, points, colors)?
            .with_grouping(self.grouping.clone());
        dataset.set_slice_labels(slice_labels)?;
        debug!(
            label = dataset.label(),
            chart_type = %self.kind,
            points = dataset.point_count(),
            "built dataset from rows"
        );
        Ok(dataset)
    }

    fn categorical_points(&self) -> ChartResult<Vec<CategoricalPoint>> {
        let mut seen = HashSet::new();
        let mut points = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let DatasetRow::Labeled { name, value, .. } = row else {
                continue;
            };
            let name = match name.trim() {
                "" => format!("Label {}", index + 1),
                trimmed => trimmed.to_owned(),
            };
            if !seen.insert(name.clone()) {
                return Err(ChartError::InvalidData(format!(
                    "slice name `{name}` appears more than once"
                )));
            }
            let value = parse_numeric_field(value, &format!("value of `{name}`"))?;
            points.push(CategoricalPoint::new(name, value));
        }
        Ok(points)
    }

    fn coordinate_points(&self) -> ChartResult<Vec<CoordinatePoint>> {
        let mut points = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let DatasetRow::Point { x, y, r, .. } = row else {
                continue;
            };
            let x = parse_numeric_field(x, &format!("x of row {}", index + 1))?;
            let y = parse_numeric_field(y, &format!("y of row {}", index + 1))?;
            let point = if self.kind.requires_radius() {
                let radius = r
                    .as_deref()
                    .map(|raw| parse_numeric_field(raw, &format!("r of row {}", index + 1)))
                    .transpose()?;
                match radius {
                    Some(radius) if radius > 0.0 => CoordinatePoint::bubble(x, y, radius),
                    _ => return Err(ChartError::InvalidRadius { index }),
                }
            } else {
                CoordinatePoint::new(x, y)
            };
            points.push(point);
        }
        Ok(points)
    }

    fn colors(&self) -> ChartResult<Vec<Color>> {
        let base = self.palette_offset;
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| match row.color() {
                Some(hex) => Color::from_hex(hex),
                None if self.kind.colors_per_slice() => {
                    Ok(self.palette[(base + index) % self.palette.len()])
                }
                None => Ok(self.palette[base % self.palette.len()]),
            })
            .collect()
    }
}
