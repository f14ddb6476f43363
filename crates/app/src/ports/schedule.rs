//! Schedule port — recurring executions owned by an installed app.

use std::future::Future;
use std::sync::Arc;

use weatherbulb_domain::error::WeatherBulbError;
use weatherbulb_domain::id::{AuthToken, InstalledAppId};
use weatherbulb_domain::schedule::CronSchedule;

/// Manages the schedules the platform fires back as `TIMER_EVENT`s.
pub trait ScheduleManager: Send + Sync {
    /// Remove every schedule of the installed app. Succeeds when there is none.
    fn delete_schedules(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
    ) -> impl Future<Output = Result<(), WeatherBulbError>> + Send;

    /// Create a recurring cron schedule for the installed app.
    fn create_schedule(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
        schedule: &CronSchedule,
    ) -> impl Future<Output = Result<(), WeatherBulbError>> + Send;
}

impl<T: ScheduleManager> ScheduleManager for Arc<T> {
    fn delete_schedules(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
    ) -> impl Future<Output = Result<(), WeatherBulbError>> + Send {
        (**self).delete_schedules(installed_app_id, token)
    }

    fn create_schedule(
        &self,
        installed_app_id: &InstalledAppId,
        token: &AuthToken,
        schedule: &CronSchedule,
    ) -> impl Future<Output = Result<(), WeatherBulbError>> + Send {
        (**self).create_schedule(installed_app_id, token, schedule)
    }
}
