//! Installed app — one user's instance of the integration, with the values
//! they entered on the settings page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::id::{DeviceId, InstalledAppId, LocationId, ZipCode};

/// Setting id of the zip code field.
pub const ZIP_CODE: &str = "zipCode";
/// Setting id of the forecast lookahead enum.
pub const FORECAST_INTERVAL: &str = "forecastInterval";
/// Setting id of the schedule interval enum.
pub const SCHEDULE_INTERVAL: &str = "scheduleInterval";
/// Setting id of the device picker.
pub const COLOR_LIGHT: &str = "colorLight";

/// Installed app as delivered inside lifecycle payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledApp {
    pub installed_app_id: InstalledAppId,
    #[serde(default)]
    pub location_id: Option<LocationId>,
    /// Setting id → values, as stored by the platform.
    #[serde(default)]
    pub config: HashMap<String, Vec<ConfigEntry>>,
}

/// One value of a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "valueType", rename_all_fields = "camelCase")]
pub enum ConfigEntry {
    #[serde(rename = "STRING")]
    StringValue { string_config: StringConfig },
    #[serde(rename = "DEVICE")]
    DeviceValue { device_config: DeviceConfig },
    /// Value types this integration never asks for.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringConfig {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    pub device_id: DeviceId,
    #[serde(default)]
    pub component_id: Option<String>,
}

impl InstalledApp {
    /// First string value of setting `id`.
    #[must_use]
    pub fn string_setting(&self, id: &str) -> Option<&str> {
        self.config
            .get(id)?
            .iter()
            .find_map(|entry| match entry {
                ConfigEntry::StringValue { string_config } => Some(string_config.value.as_str()),
                _ => None,
            })
    }

    /// First device value of setting `id`.
    #[must_use]
    pub fn device_setting(&self, id: &str) -> Option<&DeviceConfig> {
        self.config
            .get(id)?
            .iter()
            .find_map(|entry| match entry {
                ConfigEntry::DeviceValue { device_config } => Some(device_config),
                _ => None,
            })
    }
}

/// Typed view over the settings this integration reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherBulbSettings {
    pub zip_code: ZipCode,
    pub device_id: DeviceId,
    /// Raw option id of the lookahead enum; empty when unset.
    pub forecast_interval: String,
    /// Raw option id of the schedule enum; empty when unset.
    pub schedule_interval: String,
}

impl TryFrom<&InstalledApp> for WeatherBulbSettings {
    type Error = ConfigurationError;

    /// Zip code and light are required; interval selections are optional
    /// and resolve to their fallbacks when missing.
    fn try_from(app: &InstalledApp) -> Result<Self, Self::Error> {
        let zip_code = app
            .string_setting(ZIP_CODE)
            .ok_or(ConfigurationError::MissingSetting(ZIP_CODE))?;
        let device = app
            .device_setting(COLOR_LIGHT)
            .ok_or(ConfigurationError::MissingSetting(COLOR_LIGHT))?;

        Ok(Self {
            zip_code: ZipCode::new(zip_code),
            device_id: device.device_id.clone(),
            forecast_interval: app
                .string_setting(FORECAST_INTERVAL)
                .unwrap_or_default()
                .to_string(),
            schedule_interval: app
                .string_setting(SCHEDULE_INTERVAL)
                .unwrap_or_default()
                .to_string(),
        })
    }
}
