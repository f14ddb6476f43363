//! Actuation service — renders the forecast on the light and keeps the
//! recurring forecast check scheduled.

use weatherbulb_domain::appearance::{AppearanceDirective, classify};
use weatherbulb_domain::command::appearance_commands;
use weatherbulb_domain::error::{ConfigurationError, WeatherBulbError};
use weatherbulb_domain::id::AuthToken;
use weatherbulb_domain::installed_app::{InstalledApp, SCHEDULE_INTERVAL, WeatherBulbSettings};
use weatherbulb_domain::schedule::{CronSchedule, forecast_chunks_for, recurrence_minutes_for};

use crate::ports::{DeviceCommander, ForecastProvider, ScheduleManager};

/// Failure of one actuation step.
#[derive(Debug, thiserror::Error)]
pub enum ActuationError {
    /// The installed app lacks a setting the integration needs.
    #[error("invalid installed app settings: {0}")]
    Settings(#[from] ConfigurationError),

    #[error("failed to fetch forecast: {0}")]
    Forecast(#[source] WeatherBulbError),

    #[error("failed to send device commands: {0}")]
    Command(#[source] WeatherBulbError),

    #[error("failed to delete schedules: {0}")]
    DeleteSchedules(#[source] WeatherBulbError),

    #[error("failed to create schedule: {0}")]
    CreateSchedule(#[source] WeatherBulbError),
}

/// Application service applying the forecast color to a light.
pub struct ActuationService<F, D, S> {
    forecasts: F,
    devices: D,
    schedules: S,
}

impl<F, D, S> ActuationService<F, D, S>
where
    F: ForecastProvider,
    D: DeviceCommander,
    S: ScheduleManager,
{
    /// Create a new service backed by the given collaborators.
    pub fn new(forecasts: F, devices: D, schedules: S) -> Self {
        Self {
            forecasts,
            devices,
            schedules,
        }
    }

    /// Fetch the forecast, classify it and send the resulting color to the
    /// configured light.
    ///
    /// The steps run strictly in order; the first failure aborts the attempt.
    ///
    /// # Errors
    ///
    /// Returns the [`ActuationError`] of the step that failed.
    #[tracing::instrument(
        skip(self, installed_app, token),
        fields(installed_app_id = %installed_app.installed_app_id)
    )]
    pub async fn apply_now(
        &self,
        installed_app: &InstalledApp,
        token: &AuthToken,
    ) -> Result<AppearanceDirective, ActuationError> {
        let settings = WeatherBulbSettings::try_from(installed_app)?;
        let chunks = forecast_chunks_for(&settings.forecast_interval);
        tracing::debug!(
            forecast_interval = %settings.forecast_interval,
            chunks = chunks.get(),
            "resolved forecast lookahead"
        );

        let forecast = self
            .forecasts
            .fetch_forecast(&settings.zip_code)
            .await
            .map_err(ActuationError::Forecast)?;

        let directive = classify(&forecast, chunks);
        tracing::debug!(
            samples = forecast.len(),
            hours = chunks.hours(),
            %directive,
            "classified forecast"
        );

        self.devices
            .send_commands(&settings.device_id, token, &appearance_commands(directive))
            .await
            .map_err(ActuationError::Command)?;
        tracing::info!(device_id = %settings.device_id, %directive, "sent device commands");

        Ok(directive)
    }

    /// Replace the recurring forecast check of the installed app.
    ///
    /// An unset or unknown interval selection schedules every 60 minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ActuationError::DeleteSchedules`] or
    /// [`ActuationError::CreateSchedule`] when the schedule endpoint fails.
    #[tracing::instrument(
        skip(self, installed_app, token),
        fields(installed_app_id = %installed_app.installed_app_id)
    )]
    pub async fn reschedule(
        &self,
        installed_app: &InstalledApp,
        token: &AuthToken,
    ) -> Result<CronSchedule, ActuationError> {
        let label = installed_app
            .string_setting(SCHEDULE_INTERVAL)
            .unwrap_or_default();
        let recurrence = recurrence_minutes_for(label);
        let schedule = recurrence.to_cron();

        self.schedules
            .delete_schedules(&installed_app.installed_app_id, token)
            .await
            .map_err(ActuationError::DeleteSchedules)?;
        self.schedules
            .create_schedule(&installed_app.installed_app_id, token, &schedule)
            .await
            .map_err(ActuationError::CreateSchedule)?;

        tracing::info!(
            minutes = recurrence.minutes(),
            expression = %schedule.cron.expression,
            "created forecast check schedule"
        );
        Ok(schedule)
    }

    /// Reschedule and apply the color right away, without waiting for the
    /// first scheduled run. Both halves always run; failures are logged.
    pub async fn apply_and_reschedule(&self, installed_app: &InstalledApp, token: &AuthToken) {
        let (scheduled, applied) = tokio::join!(
            self.reschedule(installed_app, token),
            self.apply_now(installed_app, token),
        );
        if let Err(err) = scheduled {
            tracing::error!(
                installed_app_id = %installed_app.installed_app_id,
                error = %err,
                "failed to schedule forecast checks"
            );
        }
        if let Err(err) = applied {
            tracing::error!(
                installed_app_id = %installed_app.installed_app_id,
                error = %err,
                "failed to apply forecast color"
            );
        }
    }
}
