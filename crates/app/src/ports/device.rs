//! Device port — actuation of devices on the device cloud.

use std::future::Future;
use std::sync::Arc;

use weatherbulb_domain::command::DeviceCommand;
use weatherbulb_domain::error::WeatherBulbError;
use weatherbulb_domain::id::{AuthToken, DeviceId};

/// Sends command batches to devices.
pub trait DeviceCommander: Send + Sync {
    /// Deliver `commands` to `device_id` as one request, preserving order.
    fn send_commands(
        &self,
        device_id: &DeviceId,
        token: &AuthToken,
        commands: &[DeviceCommand],
    ) -> impl Future<Output = Result<(), WeatherBulbError>> + Send;
}

impl<T: DeviceCommander> DeviceCommander for Arc<T> {
    fn send_commands(
        &self,
        device_id: &DeviceId,
        token: &AuthToken,
        commands: &[DeviceCommand],
    ) -> impl Future<Output = Result<(), WeatherBulbError>> + Send {
        (**self).send_commands(device_id, token, commands)
    }
}
