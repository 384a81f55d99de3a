use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid JSON document: {0}")]
    InvalidJson(String),

    #[error("unknown side: {0} (expected \"left\" or \"right\")")]
    UnknownSide(String),
}
