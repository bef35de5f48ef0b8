//! Error types for the edit pipeline.

use thiserror::Error;
use pixl_ops::OpsError;

/// Error type for edit controller operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// A transform or geometry request arrived before any image was loaded.
    #[error("no image loaded")]
    NoImageLoaded,

    /// The worker engine failed to initialize; carries the original reason.
    #[error("worker unavailable: {0}")]
    WorkerUnavailable(String),

    /// The worker thread is gone (channel closed).
    #[error("worker disconnected")]
    Disconnected,

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Pixel operation failed.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// Buffer shape error.
    #[error(transparent)]
    Core(#[from] pixl_core::Error),
}

/// Result type for edit controller operations.
pub type EditResult<T> = Result<T, EditError>;
