//! Infrastructure layer providing external service integrations.
//!
//! This module contains the file-backed pieces of the application: schema
//! persistence, build configuration and the export pipeline.

pub mod persistence;
pub mod config;
pub mod export;

pub use persistence::*;
pub use config::*;
pub use export::*;
