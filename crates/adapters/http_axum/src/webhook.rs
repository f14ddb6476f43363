//! Lifecycle webhook handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use tracing::Instrument;

use weatherbulb_app::ports::{DeviceCommander, ForecastProvider, ScheduleManager};
use weatherbulb_domain::lifecycle::{LifecycleEvent, LifecycleResponse};

use crate::error::ApiError;
use crate::state::AppState;
use crate::verify::{RequestVerifier, SignedRequest};

const PING: &str = "PING";

/// `POST /`
///
/// Every call except `PING` must pass the request verifier before its
/// payload is looked at.
pub async fn handle<F, D, S, V>(
    State(state): State<AppState<F, D, S, V>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LifecycleResponse>, ApiError>
where
    F: ForecastProvider + 'static,
    D: DeviceCommander + 'static,
    S: ScheduleManager + 'static,
    V: RequestVerifier + 'static,
{
    let envelope: serde_json::Value = serde_json::from_slice(&body)?;
    let lifecycle = envelope
        .get("lifecycle")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();

    if lifecycle != PING {
        let request = SignedRequest {
            method: &method,
            path: uri.path_and_query().map_or("/", |path| path.as_str()),
            headers: &headers,
            body: &body,
        };
        if !state.verifier.verify(&request) {
            tracing::warn!(%lifecycle, "forbidden - failed request verification");
            return Err(ApiError::Forbidden);
        }
    }

    let event: LifecycleEvent = serde_json::from_value(envelope)?;
    let span = tracing::info_span!("lifecycle_call", %lifecycle);
    let response = state.dispatcher.dispatch(event).instrument(span).await?;
    Ok(Json(response))
}
