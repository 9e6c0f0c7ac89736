use thiserror::Error;

/// Error taxonomy of the table engine. Every variant is recoverable at the
/// originating user action; a failed operation leaves core state exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid CSV format: no rows could be imported")]
    InvalidFormat,

    #[error("no row with id {0}")]
    NotFound(i64),
}
