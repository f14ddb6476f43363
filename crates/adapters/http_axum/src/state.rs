//! Shared application state for axum handlers.

use std::sync::Arc;

use weatherbulb_app::dispatcher::LifecycleDispatcher;
use weatherbulb_app::ports::{DeviceCommander, ForecastProvider, ScheduleManager};

use crate::verify::RequestVerifier;

/// Application state shared across all axum handlers.
///
/// Generic over the three outbound ports and the request verifier. Cloning
/// only bumps the `Arc` counts, so neither the dispatcher nor the verifier
/// has to be `Clone`.
pub struct AppState<F, D, S, V> {
    /// Routes lifecycle calls.
    pub dispatcher: Arc<LifecycleDispatcher<F, D, S>>,
    /// Checks that a call really comes from the device cloud.
    pub verifier: Arc<V>,
}

impl<F, D, S, V> Clone for AppState<F, D, S, V> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            verifier: Arc::clone(&self.verifier),
        }
    }
}

impl<F, D, S, V> AppState<F, D, S, V>
where
    F: ForecastProvider + 'static,
    D: DeviceCommander + 'static,
    S: ScheduleManager + 'static,
    V: RequestVerifier + 'static,
{
    /// Create a new application state.
    pub fn new(dispatcher: LifecycleDispatcher<F, D, S>, verifier: V) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            verifier: Arc::new(verifier),
        }
    }
}
