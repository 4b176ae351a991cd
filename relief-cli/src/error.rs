//! CLI error type.

use relief_api::ResponseError;
use relief_table::TableError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(#[from] TableError),

    /// Loading the reports failed.
    #[error("Could not load reports: {0}")]
    Request(#[from] ResponseError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
