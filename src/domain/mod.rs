//! Domain layer for the Jobsight analysis pipeline
//!
//! This module contains the domain models, errors, and the ports through
//! which the pipeline talks to its external collaborators.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AnalysisError, AnalysisResult};
