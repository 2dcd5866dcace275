use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, Color, default_palette};
use crate::error::{ChartError, ChartResult};

/// Editor session configuration.
///
/// This type is serializable so host applications can persist/load editor
/// tuning without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Kinds that may be combined inside one group while uniformity is `mixed`.
    #[serde(default = "default_mixable_kinds")]
    pub mixable_kinds: Vec<ChartKind>,
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    /// `(min, max)` radius produced when quick-transforming values into bubbles.
    #[serde(default = "default_bubble_radius_range")]
    pub bubble_radius_range: (f64, f64),
    /// Radius assigned to scatter points relabeled as bubble points.
    #[serde(default = "default_bubble_radius")]
    pub default_bubble_radius: f64,
    #[serde(default = "default_sample_point_count")]
    pub sample_point_count: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mixable_kinds: default_mixable_kinds(),
            palette: default_palette(),
            bubble_radius_range: default_bubble_radius_range(),
            default_bubble_radius: default_bubble_radius(),
            sample_point_count: default_sample_point_count(),
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_mixable_kinds(mut self, kinds: Vec<ChartKind>) -> Self {
        self.mixable_kinds = kinds;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_bubble_radius_range(mut self, min: f64, max: f64) -> Self {
        self.bubble_radius_range = (min, max);
        self
    }

    #[must_use]
    pub fn with_default_bubble_radius(mut self, radius: f64) -> Self {
        self.default_bubble_radius = radius;
        self
    }

    #[must_use]
    pub fn with_sample_point_count(mut self, count: usize) -> Self {
        self.sample_point_count = count;
        self
    }

    #[must_use]
    pub fn is_mixable(&self, kind: ChartKind) -> bool {
        self.mixable_kinds.contains(&kind)
    }

    /// Palette entry for `index`, cycling through the palette.
    #[must_use]
    pub fn palette_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::rgb(0.5, 0.5, 0.5);
        }
        self.palette[index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "editor palette must contain at least one color".to_owned(),
            ));
        }
        for color in &self.palette {
            color.validate()?;
        }
        if let Some(kind) = self.mixable_kinds.iter().find(|kind| kind.is_coordinate()) {
            return Err(ChartError::InvalidData(format!(
                "mixable kinds must be categorical, found `{kind}`"
            )));
        }

        let (min, max) = self.bubble_radius_range;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || max < min {
            return Err(ChartError::InvalidData(
                "bubble radius range must be finite with 0 < min <= max".to_owned(),
            ));
        }
        if !self.default_bubble_radius.is_finite() || self.default_bubble_radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "default bubble radius must be finite and > 0".to_owned(),
            ));
        }
        if self.sample_point_count == 0 {
            return Err(ChartError::InvalidData(
                "sample point count must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse editor config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize editor config json: {e}"))
        })
    }
}

fn default_mixable_kinds() -> Vec<ChartKind> {
    vec![ChartKind::Bar, ChartKind::Line, ChartKind::Area]
}

fn default_bubble_radius_range() -> (f64, f64) {
    (4.0, 20.0)
}

fn default_bubble_radius() -> f64 {
    6.0
}

fn default_sample_point_count() -> usize {
    8
}
