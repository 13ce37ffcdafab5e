use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// The all-zero color (transparent black) doubles as "unset" in styles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

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

    /// Builds an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `rgb`, `rrggbb` or `rrggbbaa`, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.trim_start_matches('#');
        let channel = |index: usize, width: usize| -> ChartResult<u8> {
            let raw = digits.get(index * width..(index + 1) * width).ok_or_else(|| {
                ChartError::InvalidData(format!("malformed hex color `{hex}`"))
            })?;
            let value = u8::from_str_radix(raw, 16)
                .map_err(|_| ChartError::InvalidData(format!("malformed hex color `{hex}`")))?;
            Ok(if width == 1 { value * 17 } else { value })
        };
        match digits.len() {
            3 => Ok(Self::from_rgb8(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::from_rgb8(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Ok(Self::from_rgb8(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)
                .with_alpha(channel(3, 2)?)),
            _ => Err(ChartError::InvalidData(format!(
                "malformed hex color `{hex}`"
            ))),
        }
    }

    /// Replaces alpha with an 8-bit value.
    #[must_use]
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self {
            alpha: f64::from(alpha) / 255.0,
            ..self
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::TRANSPARENT
    }

    /// 8-bit channel values, rounded.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let scale = |channel: f64| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            scale(self.red),
            scale(self.green),
            scale(self.blue),
            scale(self.alpha),
        ]
    }

    /// CSS `rgba(...)` form used by the SVG backend.
    #[must_use]
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r},{g},{b},{:.1})", self.alpha.clamp(0.0, 1.0))
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

/// Measured extent of a rendered string, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextBox {
    pub width: i32,
    pub height: i32,
}

/// Font family requested from a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
}

impl Font {
    #[must_use]
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }
}
