//! In-memory port fakes shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use weatherbulb_domain::command::DeviceCommand;
use weatherbulb_domain::error::WeatherBulbError;
use weatherbulb_domain::forecast::{ForecastSample, ForecastWindow};
use weatherbulb_domain::id::{AuthToken, DeviceId, InstalledAppId, ZipCode};
use weatherbulb_domain::installed_app::InstalledApp;
use weatherbulb_domain::schedule::CronSchedule;

use crate::ports::{DeviceCommander, ForecastProvider, ScheduleManager};
use crate::services::actuation_service::ActuationService;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub &'static str);

fn upstream(message: &'static str) -> WeatherBulbError {
    WeatherBulbError::Upstream(Box::new(FakeError(message)))
}

/// Returns a fixed forecast, or fails when none is set.
#[derive(Default)]
pub struct FakeForecast {
    pub window: Option<ForecastWindow>,
    pub requests: Mutex<Vec<ZipCode>>,
}

impl FakeForecast {
    pub fn returning(samples: &[(f64, &str)]) -> Self {
        Self {
            window: Some(
                samples
                    .iter()
                    .map(|(temperature, condition)| ForecastSample::new(*temperature, *condition))
                    .collect(),
            ),
            requests: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }
}

impl ForecastProvider for FakeForecast {
    async fn fetch_forecast(&self, zip_code: &ZipCode) -> Result<ForecastWindow, WeatherBulbError> {
        self.requests.lock().unwrap().push(zip_code.clone());
        self.window
            .clone()
            .ok_or_else(|| upstream("weather service unavailable"))
    }
}

/// Records every command batch.
#[derive(Default)]
pub struct FakeDevices {
    pub fail: bool,
    pub sent: Mutex<Vec<(DeviceId, Vec<DeviceCommand>)>>,
}

impl DeviceCommander for FakeDevices {
    async fn send_commands(
        &self,
        device_id: &DeviceId,
        _token: &AuthToken,
        commands: &[DeviceCommand],
    ) -> Result<(), WeatherBulbError> {
        if self.fail {
            return Err(upstream("device offline"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((device_id.clone(), commands.to_vec()));
        Ok(())
    }
}

/// Records schedule calls as `delete:<app>` / `create:<app>:<expression>`.
#[derive(Default)]
pub struct FakeSchedules {
    pub fail_delete: bool,
    pub calls: Mutex<Vec<String>>,
}

impl ScheduleManager for FakeSchedules {
    async fn delete_schedules(
        &self,
        installed_app_id: &InstalledAppId,
        _token: &AuthToken,
    ) -> Result<(), WeatherBulbError> {
        if self.fail_delete {
            return Err(upstream("schedules endpoint unavailable"));
        }
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete:{installed_app_id}"));
        Ok(())
    }

    async fn create_schedule(
        &self,
        installed_app_id: &InstalledAppId,
        _token: &AuthToken,
        schedule: &CronSchedule,
    ) -> Result<(), WeatherBulbError> {
        self.calls.lock().unwrap().push(format!(
            "create:{installed_app_id}:{}",
            schedule.cron.expression
        ));
        Ok(())
    }
}

pub type FakeService =
    ActuationService<Arc<FakeForecast>, Arc<FakeDevices>, Arc<FakeSchedules>>;

pub fn service(
    forecast: &Arc<FakeForecast>,
    devices: &Arc<FakeDevices>,
    schedules: &Arc<FakeSchedules>,
) -> FakeService {
    ActuationService::new(
        Arc::clone(forecast),
        Arc::clone(devices),
        Arc::clone(schedules),
    )
}

pub fn installed_app_json(forecast_interval: &str, schedule_interval: &str) -> serde_json::Value {
    serde_json::json!({
        "installedAppId": "app-1",
        "locationId": "location-1",
        "config": {
            "zipCode": [{ "valueType": "STRING", "stringConfig": { "value": "94040" } }],
            "forecastInterval": [
                { "valueType": "STRING", "stringConfig": { "value": forecast_interval } }
            ],
            "scheduleInterval": [
                { "valueType": "STRING", "stringConfig": { "value": schedule_interval } }
            ],
            "colorLight": [
                { "valueType": "DEVICE", "deviceConfig": { "deviceId": "bulb-1", "componentId": "main" } }
            ]
        }
    })
}

pub fn installed_app(forecast_interval: &str, schedule_interval: &str) -> InstalledApp {
    serde_json::from_value(installed_app_json(forecast_interval, schedule_interval)).unwrap()
}

/// Captures formatted log output for the duration of the returned guard.
pub fn capture_logs() -> (Arc<Mutex<Vec<u8>>>, tracing::subscriber::DefaultGuard) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || LogWriter(Arc::clone(&writer)))
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

pub fn logged(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
}

struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
