use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidData(format!(
                "color `{input}` must be #RRGGBB or #RRGGBBAA"
            )));
        }

        let channel = |offset: usize| -> ChartResult<f64> {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|e| ChartError::InvalidData(format!("invalid color `{input}`: {e}")))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Formats as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        if byte(self.alpha) == u8::MAX {
            format!(
                "#{:02x}{:02x}{:02x}",
                byte(self.red),
                byte(self.green),
                byte(self.blue)
            )
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.red),
                byte(self.green),
                byte(self.blue),
                byte(self.alpha)
            )
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Default dataset palette.
#[must_use]
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::from_rgb8(0x36, 0xa2, 0xeb),
        Color::from_rgb8(0xff, 0x63, 0x84),
        Color::from_rgb8(0xff, 0x9f, 0x40),
        Color::from_rgb8(0xff, 0xcd, 0x56),
        Color::from_rgb8(0x4b, 0xc0, 0xc0),
        Color::from_rgb8(0x99, 0x66, 0xff),
        Color::from_rgb8(0xc9, 0xcb, 0xcf),
        Color::from_rgb8(0x2e, 0x7d, 0x32),
    ]
}
