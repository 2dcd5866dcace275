use std::fmt;

use serde::{Deserialize, Serialize};

/// Point-schema partition of chart kinds.
///
/// Categorical kinds plot `{name, value}` slices; coordinate kinds plot
/// `{x, y, r?}` points. The two schemas are never interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartFamily {
    Categorical,
    Coordinate,
}

impl ChartFamily {
    /// Returns the opposite family.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Categorical => Self::Coordinate,
            Self::Coordinate => Self::Categorical,
        }
    }
}

impl fmt::Display for ChartFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical => f.write_str("categorical"),
            Self::Coordinate => f.write_str("coordinate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    StackedBar,
    Line,
    Area,
    Pie,
    Doughnut,
    PolarArea,
    Radar,
    Scatter,
    Bubble,
}

impl ChartKind {
    pub const ALL: [ChartKind; 11] = [
        Self::Bar,
        Self::HorizontalBar,
        Self::StackedBar,
        Self::Line,
        Self::Area,
        Self::Pie,
        Self::Doughnut,
        Self::PolarArea,
        Self::Radar,
        Self::Scatter,
        Self::Bubble,
    ];

    /// Single family classifier used for every family comparison in the crate.
    #[must_use]
    pub const fn family(self) -> ChartFamily {
        match self {
            Self::Bar
            | Self::HorizontalBar
            | Self::StackedBar
            | Self::Line
            | Self::Area
            | Self::Pie
            | Self::Doughnut
            | Self::PolarArea
            | Self::Radar => ChartFamily::Categorical,
            Self::Scatter | Self::Bubble => ChartFamily::Coordinate,
        }
    }

    #[must_use]
    pub fn is_categorical(self) -> bool {
        self.family() == ChartFamily::Categorical
    }

    #[must_use]
    pub fn is_coordinate(self) -> bool {
        self.family() == ChartFamily::Coordinate
    }

    /// Returns `true` for kinds whose points carry a radius.
    #[must_use]
    pub fn requires_radius(self) -> bool {
        self == Self::Bubble
    }

    /// Returns `true` for radial kinds that color every slice individually.
    #[must_use]
    pub fn colors_per_slice(self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut | Self::PolarArea)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::HorizontalBar => "horizontal-bar",
            Self::StackedBar => "stacked-bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::PolarArea => "polar-area",
            Self::Radar => "radar",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartFamily, ChartKind};

    #[test]
    fn every_kind_belongs_to_exactly_one_family() {
        let categorical = ChartKind::ALL
            .iter()
            .filter(|kind| kind.is_categorical())
            .count();
        let coordinate = ChartKind::ALL
            .iter()
            .filter(|kind| kind.is_coordinate())
            .count();
        assert_eq!(categorical, 9);
        assert_eq!(coordinate, 2);
    }

    #[test]
    fn opposite_family_round_trips() {
        assert_eq!(
            ChartFamily::Categorical.opposite().opposite(),
            ChartFamily::Categorical
        );
        assert_eq!(ChartFamily::Coordinate.opposite(), ChartFamily::Categorical);
    }
}
