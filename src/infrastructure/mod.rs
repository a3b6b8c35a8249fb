//! Infrastructure layer module
//!
//! Adapters around the analysis pipeline:
//! - Configuration loading (figment)
//! - Logging (tracing-subscriber, tracing-appender)
//! - Captured job snapshots read by the CLI

pub mod config;
pub mod logging;
pub mod snapshot;
