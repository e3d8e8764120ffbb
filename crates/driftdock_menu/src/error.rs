//! Menu motion error types

use driftdock_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up the menu motion controller
#[derive(Error, Debug)]
pub enum MenuError {
    /// Runtime requirement missing (e.g. no UI executor on this thread)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Config file could not be read
    #[error("Failed to read motion config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for a motion config
    #[error("Failed to parse motion config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("Failed to serialize motion config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for menu motion operations
pub type Result<T> = std::result::Result<T, MenuError>;
