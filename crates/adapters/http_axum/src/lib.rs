//! # weatherbulb-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the single **lifecycle webhook** (`POST /`) the device cloud calls
//! - Gate every non-`PING` call behind a [`RequestVerifier`](verify::RequestVerifier)
//! - Map the JSON envelope into a `LifecycleEvent` and hand it to the
//!   `LifecycleDispatcher` (driving adapter)
//! - Map dispatcher results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `weatherbulb-app` (for port traits and services) and
//! `weatherbulb-domain` (for the envelope types). Never leaks axum types
//! into the domain.

pub mod error;
pub mod router;
pub mod state;
pub mod verify;
pub mod webhook;
