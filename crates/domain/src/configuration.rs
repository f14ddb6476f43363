//! Configuration — the declarative settings UI shown while a user installs
//! the integration.
//!
//! The platform first asks for app metadata (`INITIALIZE`) and then for each
//! page by id (`PAGE`). This integration has exactly one page, `"1"`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::id::InstalledAppId;
use crate::installed_app::{COLOR_LIGHT, ConfigEntry, FORECAST_INTERVAL, SCHEDULE_INTERVAL, ZIP_CODE};
use crate::schedule::{FORECAST_INTERVAL_OPTIONS, SCHEDULE_INTERVAL_OPTIONS};

/// Id of the only settings page.
pub const SETTINGS_PAGE_ID: &str = "1";

/// Payload of a `CONFIGURATION` lifecycle call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationData {
    #[serde(default)]
    pub installed_app_id: Option<InstalledAppId>,
    pub phase: ConfigurationPhase,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub previous_page_id: Option<String>,
    /// Values entered so far; the platform always sends the section, even empty.
    #[serde(default)]
    pub config: Option<HashMap<String, Vec<ConfigEntry>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigurationPhase {
    Initialize,
    Page,
    #[serde(other)]
    Unsupported,
}

impl ConfigurationData {
    /// Build the answer for this configuration request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingConfig`] when the request has no
    /// `config` section, [`ConfigurationError::UnsupportedPhase`] for an
    /// unknown phase, and [`ConfigurationError::UnsupportedPage`] when a page
    /// other than [`SETTINGS_PAGE_ID`] is requested.
    pub fn respond(&self) -> Result<ConfigurationResponse, ConfigurationError> {
        if self.config.is_none() {
            return Err(ConfigurationError::MissingConfig);
        }
        match self.phase {
            ConfigurationPhase::Initialize => {
                Ok(ConfigurationResponse::Initialize(InitializeSetting::default()))
            }
            ConfigurationPhase::Page => {
                settings_page(self.page_id.as_deref().unwrap_or_default())
                    .map(ConfigurationResponse::Page)
            }
            ConfigurationPhase::Unsupported => Err(ConfigurationError::UnsupportedPhase),
        }
    }
}

/// Answer to a configuration request, keyed by phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigurationResponse {
    Initialize(InitializeSetting),
    Page(Page),
}

/// App metadata returned during the `INITIALIZE` phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeSetting {
    pub name: String,
    pub description: String,
    pub id: String,
    pub first_page_id: String,
}

impl Default for InitializeSetting {
    fn default() -> Self {
        Self {
            name: "Weather bulb color".to_string(),
            description: "Bulb color by current temp".to_string(),
            id: "app".to_string(),
            first_page_id: SETTINGS_PAGE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_id: String,
    pub name: String,
    pub next_page_id: Option<String>,
    pub previous_page_id: Option<String>,
    pub complete: bool,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub settings: Vec<Setting>,
}

/// One input on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required: bool,
    #[serde(flatten)]
    pub kind: SettingKind,
}

/// Input type and its type-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettingKind {
    Number,
    Enum {
        multiple: bool,
        options: Vec<EnumOption>,
    },
    Device {
        multiple: bool,
        capabilities: Vec<String>,
        permissions: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub id: String,
    pub name: String,
}

fn enum_options(options: &[(&str, &str)]) -> Vec<EnumOption> {
    options
        .iter()
        .map(|(id, name)| EnumOption {
            id: (*id).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// The settings page with id `page_id`.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnsupportedPage`] for any id other than
/// [`SETTINGS_PAGE_ID`].
pub fn settings_page(page_id: &str) -> Result<Page, ConfigurationError> {
    if page_id != SETTINGS_PAGE_ID {
        return Err(ConfigurationError::UnsupportedPage(page_id.to_string()));
    }

    let forecast = Section {
        name: "For the temperature at this US zip code".to_string(),
        settings: vec![
            Setting {
                id: ZIP_CODE.to_string(),
                name: "What 5-digit US Zip Code?".to_string(),
                description: "Enter Zip Code".to_string(),
                required: true,
                kind: SettingKind::Number,
            },
            Setting {
                id: FORECAST_INTERVAL.to_string(),
                name: "How many hours in the future to check?".to_string(),
                description: "Tap to set".to_string(),
                required: true,
                kind: SettingKind::Enum {
                    multiple: false,
                    options: enum_options(&FORECAST_INTERVAL_OPTIONS),
                },
            },
            Setting {
                id: SCHEDULE_INTERVAL.to_string(),
                name: "How often to check forecast?".to_string(),
                description: "Tap to set".to_string(),
                required: true,
                kind: SettingKind::Enum {
                    multiple: false,
                    options: enum_options(&SCHEDULE_INTERVAL_OPTIONS),
                },
            },
        ],
    };

    let light = Section {
        name: "Set the color of this light".to_string(),
        settings: vec![Setting {
            id: COLOR_LIGHT.to_string(),
            name: "Which color light?".to_string(),
            description: "Tap to set".to_string(),
            required: true,
            kind: SettingKind::Device {
                multiple: false,
                capabilities: strings(&["colorControl", "switch", "switchLevel"]),
                permissions: strings(&["r", "x"]),
            },
        }],
    };

    Ok(Page {
        page_id: SETTINGS_PAGE_ID.to_string(),
        name: "Bulb color by temperature".to_string(),
        next_page_id: None,
        previous_page_id: None,
        complete: true,
        sections: vec![forecast, light],
    })
}
