//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use weatherbulb_domain::error::WeatherBulbError;

/// JSON error body returned by the webhook.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything the webhook can answer with instead of an acknowledgment.
#[derive(Debug)]
pub enum ApiError {
    /// The dispatcher rejected the call.
    Domain(WeatherBulbError),
    /// The body is not a lifecycle envelope.
    InvalidPayload(serde_json::Error),
    /// Request verification failed.
    Forbidden,
}

impl From<WeatherBulbError> for ApiError {
    fn from(err: WeatherBulbError) -> Self {
        Self::Domain(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(WeatherBulbError::Configuration(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(err @ WeatherBulbError::Upstream(_)) => {
                tracing::error!(error = %err, "upstream error");
                (StatusCode::BAD_GATEWAY, "upstream error".to_string())
            }
            Self::InvalidPayload(err) => (
                StatusCode::BAD_REQUEST,
                format!("invalid lifecycle payload: {err}"),
            ),
            Self::Forbidden => return (StatusCode::UNAUTHORIZED, "Forbidden").into_response(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
