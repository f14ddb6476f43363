//! OpenWeather integration configuration.

use serde::Deserialize;

/// Configuration for the OpenWeather forecast client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    /// Base URL of the API, without trailing slash.
    pub base_url: String,
    /// API key sent as the `APPID` query parameter.
    pub api_key: String,
    /// Unit system; the color thresholds assume `imperial` (Fahrenheit).
    pub units: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: String::new(),
            units: "imperial".to_string(),
            timeout_secs: 10,
        }
    }
}
