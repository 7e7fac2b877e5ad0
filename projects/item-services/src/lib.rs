//! Library crate entry point.
//! Exposes the modules of both services for the binaries and integration tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod metered;
pub mod metrics;
pub mod telemetry;
