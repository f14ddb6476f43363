//! # weatherbulbd — weather bulb daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the OpenWeather and SmartThings clients (adapters)
//! - Construct the actuation service and lifecycle dispatcher, injecting the
//!   clients via port traits
//! - Pick the request verifier: HTTP signatures when a public key is
//!   configured, otherwise none
//! - Build the axum router and serve the lifecycle webhook
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! The only crate that sees every adapter. It wires them together and holds
//! no rules of its own.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use weatherbulb_adapter_http_axum::state::AppState;
use weatherbulb_adapter_http_axum::verify::{AllowAll, HttpSignatureVerifier, RequestVerifier};
use weatherbulb_adapter_openweather::OpenWeatherForecastProvider;
use weatherbulb_adapter_smartthings::SmartThingsClient;
use weatherbulb_app::dispatcher::LifecycleDispatcher;
use weatherbulb_app::services::actuation_service::ActuationService;

use crate::config::Config;

type Dispatcher = LifecycleDispatcher<
    OpenWeatherForecastProvider,
    Arc<SmartThingsClient>,
    Arc<SmartThingsClient>,
>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Outbound adapters
    let forecast = OpenWeatherForecastProvider::new(config.openweather.clone())?;
    let cloud = Arc::new(SmartThingsClient::new(config.smartthings.clone())?);

    // Services
    let actuation = ActuationService::new(forecast, Arc::clone(&cloud), cloud);
    let dispatcher = LifecycleDispatcher::new(actuation);

    // HTTP
    let app = match &config.smartthings.public_key_path {
        Some(path) => {
            let verifier = HttpSignatureVerifier::from_file(path)?;
            tracing::info!(path = %path.display(), "verifying request signatures");
            router(dispatcher, verifier)
        }
        None => {
            tracing::warn!("no public key configured, request signature verification is disabled");
            router(dispatcher, AllowAll)
        }
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "weatherbulbd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("weatherbulbd stopped");
    Ok(())
}

fn router<V: RequestVerifier + 'static>(dispatcher: Dispatcher, verifier: V) -> axum::Router {
    weatherbulb_adapter_http_axum::router::build(AppState::new(dispatcher, verifier))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
