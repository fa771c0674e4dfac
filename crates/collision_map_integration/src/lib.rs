//! Export format registration for collision_map
//!
//! Formats are what a host application offers in its export menu. The
//! built-in Butano collision header is always available; extra variants
//! (other namespaces, includes or extensions) come from TOML files in the
//! user config directory.

pub mod format;
pub mod format_meta;
pub mod manager;
pub mod prelude;
pub mod registry;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading format configuration.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Could not read {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid format file {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid format file {}: {message}", path.display())]
    ValidationError { path: PathBuf, message: String },
}

impl IntegrationError {
    /// File the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            IntegrationError::IoError { path, .. }
            | IntegrationError::ParseError { path, .. }
            | IntegrationError::ValidationError { path, .. } => path,
        }
    }
}
