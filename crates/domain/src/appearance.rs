//! Appearance — the color a forecast is rendered as on the light.
//!
//! | Directive | When | Hue | Saturation |
//! |-----------|------|-----|------------|
//! | Purple | any `Rain`, `Mist` or `Snow` in the window | 75 | 100 |
//! | Orange/red | warmest sample above 80 °F | 5 | 100 |
//! | Blue | coldest sample below 50 °F | 66 | 100 |
//! | Soft white | anything else | 10 | 20 |
//!
//! Hue and saturation use the 0–100 scale of the `colorControl` capability
//! (hue is a percentage of the color wheel).

use serde::{Deserialize, Serialize};

use crate::forecast::ForecastWindow;
use crate::schedule::ChunkCount;

/// Strictly above this temperature (°F) the forecast counts as hot.
pub const HOT_THRESHOLD_F: f64 = 80.0;
/// Strictly below this temperature (°F) the forecast counts as cold.
pub const COLD_THRESHOLD_F: f64 = 50.0;

/// Hue/saturation pair understood by `colorControl.setColor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Hue, 0–100.
    pub hue: u8,
    /// Saturation, 0–100.
    pub saturation: u8,
}

impl Color {
    /// Hue expressed in degrees (0–360).
    #[must_use]
    pub fn hue_degrees(self) -> f64 {
        f64::from(self.hue) * 3.6
    }
}

/// Color chosen to represent the upcoming weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearanceDirective {
    Purple,
    OrangeRed,
    Blue,
    SoftWhite,
}

impl AppearanceDirective {
    #[must_use]
    pub fn color(self) -> Color {
        let (hue, saturation) = match self {
            Self::Purple => (75, 100),
            Self::OrangeRed => (5, 100),
            Self::Blue => (66, 100),
            Self::SoftWhite => (10, 20),
        };
        Color { hue, saturation }
    }
}

impl std::fmt::Display for AppearanceDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Purple => f.write_str("purple"),
            Self::OrangeRed => f.write_str("orange_red"),
            Self::Blue => f.write_str("blue"),
            Self::SoftWhite => f.write_str("soft_white"),
        }
    }
}

/// Classify the first `chunks` samples of `forecast`.
///
/// Precipitation wins over temperature, and heat wins over cold when the
/// window spans both. A window shorter than `chunks` is classified on what
/// it has; an empty one is soft white.
#[must_use]
pub fn classify(forecast: &ForecastWindow, chunks: ChunkCount) -> AppearanceDirective {
    let samples = forecast.prefix(usize::from(chunks.get()));

    let precipitation = samples
        .iter()
        .filter_map(|sample| sample.condition.as_ref())
        .any(|condition| condition.is_precipitation());
    if precipitation {
        return AppearanceDirective::Purple;
    }

    let (lowest, highest) = samples.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lowest, highest), sample| {
            (
                lowest.min(sample.temperature),
                highest.max(sample.temperature),
            )
        },
    );

    if highest > HOT_THRESHOLD_F {
        AppearanceDirective::OrangeRed
    } else if lowest < COLD_THRESHOLD_F {
        AppearanceDirective::Blue
    } else {
        AppearanceDirective::SoftWhite
    }
}
