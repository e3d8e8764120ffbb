//! Core runtime error types

use thiserror::Error;

/// Errors raised by the core runtime
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No executor has been installed on the calling thread
    #[error("No UI executor is installed on this thread")]
    NoExecutor,
}

/// Result type for core runtime operations
pub type Result<T> = std::result::Result<T, CoreError>;
