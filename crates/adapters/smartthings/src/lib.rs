//! # weatherbulb-adapter-smartthings
//!
//! Device cloud adapter over the SmartThings REST API.
//!
//! ## Responsibilities
//! - Implement the [`DeviceCommander`] port: one
//!   `POST /devices/{deviceId}/commands` per batch, commands in order
//! - Implement the [`ScheduleManager`] port:
//!   `DELETE` / `POST /installedapps/{installedAppId}/schedules`
//! - Authenticate every call with the short-lived token of the lifecycle call
//!
//! ## Dependency rule
//! Depends on `weatherbulb-app` (for the port traits) and `weatherbulb-domain`.
//! No other adapter depends on this crate.

pub mod config;
pub mod error;

use std::time::Duration;

use weatherbulb_app::ports::{DeviceCommander, ScheduleManager};
use weatherbulb_domain::command::DeviceCommand;
use weatherbulb_domain::error::WeatherBulbError;
use weatherbulb_domain::id::{AuthToken, DeviceId, InstalledAppId};
use weatherbulb_domain::schedule::CronSchedule;

pub use config::SmartThingsConfig;
pub use error::SmartThingsError;

/// HTTP client for the SmartThings API.
pub struct SmartThingsClient {
    client: reqwest::Client,
    config: SmartThingsConfig,
}

impl SmartThingsClient {
    /// Build the HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SmartThingsError::Http`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: SmartThingsConfig) -> Result<Self, SmartThingsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn schedules_url(&self, installed_app_id: &InstalledAppId) -> String {
        format!(
            "{}/installedapps/{installed_app_id}/schedules",
            self.config.api_url
        )
    }

    async fn check(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<(), SmartThingsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SmartThingsError::Status {
            operation,
            status: status.as_u16(),
            body,
        })
    }

    #[tracing::instrument(skip(self, token, commands), fields(device_id = %device_id, commands = commands.len()))]
    async fn post_commands(
        &self,
        device_id: &DeviceId,
        token: &AuthToken,
        commands: &[DeviceCommand],
    ) -> Result<(), SmartThingsError> {
        let url = format!("{}/devices/{device_id}/commands", self.config.api_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose())
            .json(commands)
            .send()
            .await?;
        Self::check("device commands", response).await?;
        tracing::debug!("device commands accepted");
        Ok(())
    }

    /// A 404 means the app has no schedules yet, which is fine.
    #[tracing::instrument(skip(self, token), fields(installed_app_id = %installed_app_id))]
    async fn delete_all(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
    ) -> Result<(), SmartThingsError> {
        let response = self
            .client
            .delete(self.schedules_url(installed_app_id))
            .bearer_auth(token.expose())
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("no schedules to delete");
            return Ok(());
        }
        Self::check("delete schedules", response).await
    }

    #[tracing::instrument(skip(self, token, schedule), fields(installed_app_id = %installed_app_id, expression = %schedule.cron.expression))]
    async fn create(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
        schedule: &CronSchedule,
    ) -> Result<(), SmartThingsError> {
        let response = self
            .client
            .post(self.schedules_url(installed_app_id))
            .bearer_auth(token.expose())
            .json(schedule)
            .send()
            .await?;
        Self::check("create schedule", response).await
    }
}

impl DeviceCommander for SmartThingsClient {
    async fn send_commands(
        &self,
        device_id: &DeviceId,
        token: &AuthToken,
        commands: &[DeviceCommand],
    ) -> Result<(), WeatherBulbError> {
        self.post_commands(device_id, token, commands)
            .await
            .map_err(SmartThingsError::into_domain)
    }
}

impl ScheduleManager for SmartThingsClient {
    async fn delete_schedules(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
    ) -> Result<(), WeatherBulbError> {
        self.delete_all(installed_app_id, token)
            .await
            .map_err(SmartThingsError::into_domain)
    }

    async fn create_schedule(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
        schedule: &CronSchedule,
    ) -> Result<(), WeatherBulbError> {
        self.create(installed_app_id, token, schedule)
            .await
            .map_err(SmartThingsError::into_domain)
    }
}
