//! Device commands sent to the color light.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::appearance::AppearanceDirective;

/// Brightness (percent) the light is set to together with its color.
pub const BRIGHTNESS_LEVEL: u8 = 20;

/// A single capability command addressed to a device component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCommand {
    pub component: String,
    pub capability: String,
    pub command: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl DeviceCommand {
    /// Command for the `main` component of a device.
    #[must_use]
    pub fn main(capability: &str, command: &str, arguments: Vec<Value>) -> Self {
        Self {
            component: "main".to_string(),
            capability: capability.to_string(),
            command: command.to_string(),
            arguments,
        }
    }
}

impl std::fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.capability, self.command)
    }
}

/// Ordered batch rendering `directive` on the light: switch on, dim to
/// [`BRIGHTNESS_LEVEL`], then set the color.
#[must_use]
pub fn appearance_commands(directive: AppearanceDirective) -> Vec<DeviceCommand> {
    let color = directive.color();
    vec![
        DeviceCommand::main("switch", "on", Vec::new()),
        DeviceCommand::main(
            "switchLevel",
            "setLevel",
            vec![Value::from(BRIGHTNESS_LEVEL)],
        ),
        DeviceCommand::main(
            "colorControl",
            "setColor",
            vec![serde_json::json!({
                "hue": color.hue,
                "saturation": color.saturation,
            })],
        ),
    ]
}
