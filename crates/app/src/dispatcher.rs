//! Lifecycle dispatcher — routes each webhook call to its handler.
//!
//! Every call is independent: there is no "current lifecycle" kept between
//! calls. Only a configuration request can fail; downstream failures of the
//! actuation are logged and the call is still acknowledged.

use weatherbulb_domain::error::WeatherBulbError;
use weatherbulb_domain::lifecycle::{EventData, InstalledAppEvent, LifecycleEvent, LifecycleResponse};

use crate::ports::{DeviceCommander, ForecastProvider, ScheduleManager};
use crate::services::actuation_service::ActuationService;

/// Routes lifecycle calls to the configuration builder or the actuation service.
pub struct LifecycleDispatcher<F, D, S> {
    actuation: ActuationService<F, D, S>,
}

impl<F, D, S> LifecycleDispatcher<F, D, S>
where
    F: ForecastProvider,
    D: DeviceCommander,
    S: ScheduleManager,
{
    pub fn new(actuation: ActuationService<F, D, S>) -> Self {
        Self { actuation }
    }

    /// Handle one lifecycle call and build its acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherBulbError::Configuration`] when a configuration
    /// request asks for an unknown phase or page, or has no config section.
    #[tracing::instrument(skip_all, fields(lifecycle = event.name()))]
    pub async fn dispatch(
        &self,
        event: LifecycleEvent,
    ) -> Result<LifecycleResponse, WeatherBulbError> {
        match event {
            LifecycleEvent::Ping { ping_data } => {
                tracing::debug!("answering ping challenge");
                Ok(LifecycleResponse::Ping {
                    challenge: ping_data.challenge,
                })
            }
            LifecycleEvent::Configuration { configuration_data } => {
                let response = configuration_data.respond().inspect_err(|err| {
                    tracing::error!(
                        phase = ?configuration_data.phase,
                        page_id = ?configuration_data.page_id,
                        error = %err,
                        "rejected configuration request"
                    );
                })?;
                tracing::debug!(phase = ?configuration_data.phase, "answered configuration request");
                Ok(LifecycleResponse::Configuration(response))
            }
            LifecycleEvent::Install { install_data } => {
                self.actuation
                    .apply_and_reschedule(&install_data.installed_app, &install_data.auth_token)
                    .await;
                Ok(LifecycleResponse::Install)
            }
            LifecycleEvent::Update { update_data } => {
                self.actuation
                    .apply_and_reschedule(&update_data.installed_app, &update_data.auth_token)
                    .await;
                Ok(LifecycleResponse::Update)
            }
            LifecycleEvent::Uninstall { uninstall_data } => {
                tracing::info!(
                    installed_app_id = ?uninstall_data
                        .installed_app
                        .as_ref()
                        .map(|app| app.installed_app_id.as_str()),
                    "app uninstalled"
                );
                Ok(LifecycleResponse::Uninstall)
            }
            LifecycleEvent::Event { event_data } => {
                self.handle_events(&event_data).await;
                Ok(LifecycleResponse::Event)
            }
            LifecycleEvent::Unknown => {
                tracing::warn!("lifecycle not supported");
                Ok(LifecycleResponse::Acknowledged)
            }
        }
    }

    /// Re-apply the color once if any of the events is a timer firing.
    async fn handle_events(&self, event_data: &EventData) {
        let mut timer_fired = false;
        for event in &event_data.events {
            match event {
                InstalledAppEvent::TimerEvent { timer_event } => {
                    tracing::info!(
                        schedule = %timer_event.name,
                        time = ?timer_event.time,
                        "received timer event"
                    );
                    timer_fired = true;
                }
                other => {
                    tracing::warn!(
                        event_type = other.event_type(),
                        "only timer events are supported, ignoring"
                    );
                }
            }
        }

        if !timer_fired {
            return;
        }
        if let Err(err) = self
            .actuation
            .apply_now(&event_data.installed_app, &event_data.auth_token)
            .await
        {
            tracing::error!(
                installed_app_id = %event_data.installed_app.installed_app_id,
                error = %err,
                "failed to apply forecast color"
            );
        }
    }
}
