//! Table error types.

use thiserror::Error;

/// Errors raised by table operations that act on a named column or load
/// configuration. Rendering itself never fails.
#[derive(Debug, Error)]
pub enum TableError {
    /// No rendered column has the given id.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Column resizing was requested on a table built without it.
    #[error("column resizing is disabled for this table")]
    ResizeDisabled,

    /// `drag_resize`/`end_resize` was called without `begin_resize`.
    #[error("no column resize in progress")]
    NoResizeInProgress,

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
