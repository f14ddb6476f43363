//! Lifecycle envelope — what the device cloud posts to the webhook, and the
//! acknowledgment sent back.
//!
//! Every call carries a `lifecycle` tag and one phase-specific payload
//! (`pingData`, `configurationData`, …). The answer always has a
//! `statusCode` and echoes the phase-specific key.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::configuration::{ConfigurationData, ConfigurationResponse};
use crate::id::AuthToken;
use crate::installed_app::InstalledApp;

/// Inbound lifecycle call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "lifecycle",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum LifecycleEvent {
    /// Liveness/identity check sent while the app is being registered.
    Ping { ping_data: PingData },
    /// The user is going through the settings pages.
    Configuration {
        configuration_data: ConfigurationData,
    },
    /// The user finished configuration and installed the app.
    Install { install_data: InstallData },
    /// The user changed the settings of an installed app.
    Update { update_data: InstallData },
    /// The user removed the app.
    Uninstall { uninstall_data: UninstallData },
    /// A subscribed event or a schedule fired.
    Event { event_data: EventData },
    /// Any lifecycle this integration does not know about.
    #[serde(other)]
    Unknown,
}

impl LifecycleEvent {
    /// Name of the lifecycle, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ping { .. } => "PING",
            Self::Configuration { .. } => "CONFIGURATION",
            Self::Install { .. } => "INSTALL",
            Self::Update { .. } => "UPDATE",
            Self::Uninstall { .. } => "UNINSTALL",
            Self::Event { .. } => "EVENT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingData {
    pub challenge: String,
}

/// Payload of `INSTALL` and `UPDATE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallData {
    pub auth_token: AuthToken,
    #[serde(default)]
    pub refresh_token: Option<AuthToken>,
    pub installed_app: InstalledApp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UninstallData {
    #[serde(default)]
    pub installed_app: Option<InstalledApp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub auth_token: AuthToken,
    pub installed_app: InstalledApp,
    #[serde(default)]
    pub events: Vec<InstalledAppEvent>,
}

/// One event inside an `EVENT` lifecycle call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "eventType",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum InstalledAppEvent {
    TimerEvent { timer_event: TimerEvent },
    DeviceEvent,
    DeviceLifecycleEvent,
    DeviceHealthEvent,
    HubHealthEvent,
    ModeEvent,
    SecurityArmStateEvent,
    #[serde(other)]
    Unsupported,
}

impl InstalledAppEvent {
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TimerEvent { .. } => "TIMER_EVENT",
            Self::DeviceEvent => "DEVICE_EVENT",
            Self::DeviceLifecycleEvent => "DEVICE_LIFECYCLE_EVENT",
            Self::DeviceHealthEvent => "DEVICE_HEALTH_EVENT",
            Self::HubHealthEvent => "HUB_HEALTH_EVENT",
            Self::ModeEvent => "MODE_EVENT",
            Self::SecurityArmStateEvent => "SECURITY_ARM_STATE_EVENT",
            Self::Unsupported => "UNSUPPORTED",
        }
    }
}

/// A schedule of the installed app fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerEvent {
    #[serde(default)]
    pub event_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub expression: Option<String>,
}

/// Acknowledgment returned for a lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleResponse {
    Ping { challenge: String },
    Configuration(ConfigurationResponse),
    Install,
    Update,
    Uninstall,
    Event,
    /// Default acknowledgment for a lifecycle nobody handles.
    Acknowledged,
}

impl LifecycleResponse {
    /// HTTP-like status carried in the body. Always 200: downstream failures
    /// are not reported to the platform.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        200
    }
}

#[derive(Serialize)]
struct Empty {}

impl Serialize for LifecycleResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("statusCode", &self.status_code())?;
        match self {
            Self::Ping { challenge } => {
                map.serialize_entry("pingData", &PingData {
                    challenge: challenge.clone(),
                })?;
            }
            Self::Configuration(data) => map.serialize_entry("configurationData", data)?,
            Self::Install => map.serialize_entry("installData", &Empty {})?,
            Self::Update => map.serialize_entry("updateData", &Empty {})?,
            Self::Uninstall => map.serialize_entry("uninstallData", &Empty {})?,
            Self::Event => map.serialize_entry("eventData", &Empty {})?,
            Self::Acknowledged => {}
        }
        map.end()
    }
}
