//! Axum router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use weatherbulb_app::ports::{DeviceCommander, ForecastProvider, ScheduleManager};

use crate::state::AppState;
use crate::verify::RequestVerifier;

/// Build the top-level axum [`Router`].
///
/// Serves the lifecycle webhook at `/` and a health check at `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<F, D, S, V>(state: AppState<F, D, S, V>) -> Router
where
    F: ForecastProvider + 'static,
    D: DeviceCommander + 'static,
    S: ScheduleManager + 'static,
    V: RequestVerifier + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/", post(crate::webhook::handle::<F, D, S, V>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use weatherbulb_app::dispatcher::LifecycleDispatcher;
    use weatherbulb_app::services::actuation_service::ActuationService;
    use weatherbulb_domain::command::DeviceCommand;
    use weatherbulb_domain::error::WeatherBulbError;
    use weatherbulb_domain::forecast::{ForecastSample, ForecastWindow};
    use weatherbulb_domain::id::{AuthToken, DeviceId, InstalledAppId, ZipCode};
    use weatherbulb_domain::schedule::CronSchedule;

    use super::*;
    use crate::verify::tests::{cloud_key, cloud_verifier, signed_headers};
    use crate::verify::{AllowAll, SignedRequest};

    struct StubForecast;
    #[derive(Default)]
    struct StubDevices {
        sent: Mutex<Vec<DeviceId>>,
    }
    struct StubSchedules;
    struct DenyAll;

    impl ForecastProvider for StubForecast {
        async fn fetch_forecast(
            &self,
            _zip_code: &ZipCode,
        ) -> Result<ForecastWindow, WeatherBulbError> {
            Ok(ForecastWindow::new(vec![ForecastSample::new(65.0, "Clouds")]))
        }
    }

    impl DeviceCommander for StubDevices {
        async fn send_commands(
            &self,
            device_id: &DeviceId,
            _token: &AuthToken,
            _commands: &[DeviceCommand],
        ) -> Result<(), WeatherBulbError> {
            self.sent.lock().unwrap().push(device_id.clone());
            Ok(())
        }
    }

    impl ScheduleManager for StubSchedules {
        async fn delete_schedules(
            &self,
            _installed_app_id: &InstalledAppId,
            _token: &AuthToken,
        ) -> Result<(), WeatherBulbError> {
            Ok(())
        }

        async fn create_schedule(
            &self,
            _installed_app_id: &InstalledAppId,
            _token: &AuthToken,
            _schedule: &CronSchedule,
        ) -> Result<(), WeatherBulbError> {
            Ok(())
        }
    }

    impl RequestVerifier for DenyAll {
        fn verify(&self, _request: &SignedRequest<'_>) -> bool {
            false
        }
    }

    fn test_state<V: RequestVerifier + 'static>(
        verifier: V,
    ) -> AppState<StubForecast, StubDevices, StubSchedules, V> {
        AppState::new(
            LifecycleDispatcher::new(ActuationService::new(
                StubForecast,
                StubDevices::default(),
                StubSchedules,
            )),
            verifier,
        )
    }

    fn post_json(body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state(AllowAll));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_echo_ping_challenge() {
        let app = build(test_state(AllowAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "PING",
                "pingData": { "challenge": "a-challenge" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["pingData"]["challenge"], "a-challenge");
    }

    #[tokio::test]
    async fn should_answer_ping_without_verification() {
        let app = build(test_state(DenyAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "PING",
                "pingData": { "challenge": "a-challenge" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_unverified_lifecycle_calls() {
        let app = build(test_state(DenyAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "UNINSTALL",
                "uninstallData": {}
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Forbidden");
    }

    #[tokio::test]
    async fn should_reject_unverified_call_before_reading_payload() {
        let app = build(test_state(DenyAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "INSTALL",
                "installData": { "unexpected": true }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_accept_call_signed_by_cloud_key() {
        let body = serde_json::json!({
            "lifecycle": "UNINSTALL",
            "uninstallData": {}
        })
        .to_string();
        let mut request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body.clone()))
            .unwrap();
        *request.headers_mut() = signed_headers(cloud_key(), body.as_bytes());
        request
            .headers_mut()
            .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());

        let response = build(test_state(cloud_verifier()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_unsigned_call_with_signature_verifier() {
        let response = build(test_state(cloud_verifier()))
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "UNINSTALL",
                "uninstallData": {}
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_return_bad_request_for_unsupported_page() {
        let app = build(test_state(AllowAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "CONFIGURATION",
                "configurationData": {
                    "installedAppId": "app-1",
                    "phase": "PAGE",
                    "pageId": "2",
                    "config": {}
                }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "unsupported page id: 2");
    }

    #[tokio::test]
    async fn should_return_configuration_initialize_data() {
        let app = build(test_state(AllowAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "CONFIGURATION",
                "configurationData": {
                    "installedAppId": "app-1",
                    "phase": "INITIALIZE",
                    "config": {}
                }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["configurationData"]["initialize"]["firstPageId"], "1");
    }

    #[tokio::test]
    async fn should_acknowledge_install() {
        let state = test_state(AllowAll);
        let app = build(state);

        let response = app
            .oneshot(post_json(&serde_json::json!({
                "lifecycle": "INSTALL",
                "installData": {
                    "authToken": "token-1",
                    "installedApp": {
                        "installedAppId": "app-1",
                        "config": {
                            "zipCode": [{ "valueType": "STRING", "stringConfig": { "value": "94040" } }],
                            "colorLight": [{ "valueType": "DEVICE", "deviceConfig": { "deviceId": "bulb-1" } }]
                        }
                    }
                }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({ "statusCode": 200, "installData": {} }));
    }

    #[tokio::test]
    async fn should_acknowledge_unknown_lifecycle() {
        let app = build(test_state(AllowAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({ "lifecycle": "OAUTH_CALLBACK" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({ "statusCode": 200 }));
    }

    #[tokio::test]
    async fn should_reject_malformed_envelope() {
        let app = build(test_state(AllowAll));

        let response = app
            .oneshot(post_json(&serde_json::json!({ "lifecycle": "PING" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
