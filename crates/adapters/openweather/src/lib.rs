//! # weatherbulb-adapter-openweather
//!
//! Forecast adapter over the OpenWeather 5-day / 3-hour forecast API.
//!
//! ## Responsibilities
//! - Implement the [`ForecastProvider`] port
//! - Query `GET {base_url}/forecast?zip=…&units=…&APPID=…`
//! - Map the `list[].main.temp` / `list[].weather[0].main` pairs into a
//!   [`ForecastWindow`], nearest sample first
//!
//! ## Dependency rule
//! Depends on `weatherbulb-app` (for the port trait) and `weatherbulb-domain`.
//! No other adapter depends on this crate.

pub mod config;
pub mod error;

use std::time::Duration;

use serde::Deserialize;

use weatherbulb_app::ports::ForecastProvider;
use weatherbulb_domain::error::WeatherBulbError;
use weatherbulb_domain::forecast::{Condition, ForecastSample, ForecastWindow};
use weatherbulb_domain::id::ZipCode;

pub use config::OpenWeatherConfig;
pub use error::OpenWeatherError;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<WeatherReading>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherReading {
    main: String,
}

impl From<ForecastEntry> for ForecastSample {
    fn from(entry: ForecastEntry) -> Self {
        Self {
            temperature: entry.main.temp,
            condition: entry
                .weather
                .into_iter()
                .next()
                .map(|reading| Condition::from(reading.main)),
        }
    }
}

/// [`ForecastProvider`] backed by the OpenWeather HTTP API.
pub struct OpenWeatherForecastProvider {
    client: reqwest::Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherForecastProvider {
    /// Build the HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OpenWeatherError::Http`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    #[tracing::instrument(skip(self), fields(zip_code = %zip_code))]
    async fn fetch(&self, zip_code: &ZipCode) -> Result<ForecastWindow, OpenWeatherError> {
        let url = format!("{}/forecast", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("zip", zip_code.as_str()),
                ("units", self.config.units.as_str()),
                ("APPID", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenWeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let forecast: ForecastResponse = response.json().await?;
        let window: ForecastWindow = forecast.list.into_iter().map(ForecastSample::from).collect();
        tracing::debug!(samples = window.len(), "fetched forecast");
        Ok(window)
    }
}

impl ForecastProvider for OpenWeatherForecastProvider {
    async fn fetch_forecast(&self, zip_code: &ZipCode) -> Result<ForecastWindow, WeatherBulbError> {
        self.fetch(zip_code).await.map_err(OpenWeatherError::into_domain)
    }
}
