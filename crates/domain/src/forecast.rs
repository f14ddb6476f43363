//! Forecast window — ordered 3-hour samples returned by the weather provider.

use serde::{Deserialize, Serialize};

/// Weather condition label attached to a forecast sample.
///
/// Labels are matched case-sensitively; anything not listed is kept verbatim
/// in [`Other`](Self::Other) and treated as neutral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Rain,
    Snow,
    Mist,
    Clear,
    Clouds,
    Drizzle,
    Thunderstorm,
    Other(String),
}

impl Condition {
    /// Whether this condition forces the precipitation color.
    #[must_use]
    pub fn is_precipitation(&self) -> bool {
        matches!(self, Self::Rain | Self::Mist | Self::Snow)
    }

    /// The label as reported by the provider.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for Condition {
    fn from(label: &str) -> Self {
        match label {
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            "Mist" => Self::Mist,
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Condition {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.as_str().to_string()
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One future time-sample of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Temperature in degrees Fahrenheit.
    pub temperature: f64,
    /// Main condition, if the provider reported one.
    pub condition: Option<Condition>,
}

impl ForecastSample {
    #[must_use]
    pub fn new(temperature: f64, condition: impl Into<Condition>) -> Self {
        Self {
            temperature,
            condition: Some(condition.into()),
        }
    }
}

/// Ordered sequence of forecast samples, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastWindow(Vec<ForecastSample>);

impl ForecastWindow {
    #[must_use]
    pub fn new(samples: Vec<ForecastSample>) -> Self {
        Self(samples)
    }

    /// The first `len` samples, or every sample when the window is shorter.
    #[must_use]
    pub fn prefix(&self, len: usize) -> &[ForecastSample] {
        &self.0[..len.min(self.0.len())]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ForecastSample> for ForecastWindow {
    fn from_iter<T: IntoIterator<Item = ForecastSample>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
