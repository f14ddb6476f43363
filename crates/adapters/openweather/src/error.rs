//! OpenWeather adapter error types.

use weatherbulb_domain::error::WeatherBulbError;

/// Errors specific to the OpenWeather adapter.
#[derive(Debug, thiserror::Error)]
pub enum OpenWeatherError {
    /// Transport failure, timeout or undecodable body. The request URL is
    /// stripped since its query carries the API key.
    #[error("weather request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("weather service answered {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },
}

impl From<reqwest::Error> for OpenWeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl OpenWeatherError {
    /// Convert into a [`WeatherBulbError::Upstream`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> WeatherBulbError {
        WeatherBulbError::Upstream(Box::new(self))
    }
}

impl From<OpenWeatherError> for WeatherBulbError {
    fn from(err: OpenWeatherError) -> Self {
        err.into_domain()
    }
}
