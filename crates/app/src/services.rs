//! Application services — use-case orchestration.

pub mod actuation_service;
