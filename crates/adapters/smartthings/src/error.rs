//! SmartThings adapter error types.

use weatherbulb_domain::error::WeatherBulbError;

/// Errors specific to the SmartThings adapter.
#[derive(Debug, thiserror::Error)]
pub enum SmartThingsError {
    /// Transport failure or timeout.
    #[error("device cloud request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{operation} answered {status}: {body}")]
    Status {
        /// What was being attempted (e.g. `"device commands"`).
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },
}

impl SmartThingsError {
    /// Convert into a [`WeatherBulbError::Upstream`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> WeatherBulbError {
        WeatherBulbError::Upstream(Box::new(self))
    }
}

impl From<SmartThingsError> for WeatherBulbError {
    fn from(err: SmartThingsError) -> Self {
        err.into_domain()
    }
}
