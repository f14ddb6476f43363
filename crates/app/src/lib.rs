//! # weatherbulb-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ForecastProvider` — fetch the forecast for a zip code
//!   - `DeviceCommander` — send an ordered command batch to a device
//!   - `ScheduleManager` — replace the recurring schedule of an installed app
//! - Define **driving/inbound** use-cases:
//!   - `ActuationService` — apply the forecast color now, and (re)schedule
//!   - `LifecycleDispatcher` — route a lifecycle call to its handler
//! - Orchestrate domain objects without knowing *how* HTTP works
//!
//! ## Dependency rule
//! Depends on `weatherbulb-domain` only (plus `tokio` for joining futures).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dispatcher;
pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
