//! # warden-common
//!
//! Shared utilities: environment-sourced configuration and tracing setup.

pub mod config;
pub mod telemetry;

pub use config::{AppConfig, ConfigError, DivorcePolicy, RegistrationConfig};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
