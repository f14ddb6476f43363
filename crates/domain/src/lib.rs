//! # weatherbulb-domain
//!
//! Pure domain model for the weatherbulb integration.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, the auth token, error conventions
//! - Define **forecasts** (ordered 3-hour samples with temperature + condition)
//! - Define the **appearance** classifier mapping a forecast to a light color
//! - Define the **schedule policy** translating user-facing interval labels
//!   into chunk counts and cron recurrences
//! - Define the **lifecycle envelope** delivered by the device cloud webhook
//!   and the response shapes sent back
//! - Define the **installed app** configuration and the settings page schema
//! - Define the **device commands** sent to the light
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod appearance;
pub mod command;
pub mod configuration;
pub mod forecast;
pub mod installed_app;
pub mod lifecycle;
pub mod schedule;
