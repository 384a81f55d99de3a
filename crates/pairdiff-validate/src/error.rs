use pairdiff_store::{ComparisonFailure, StoreError};
use pairdiff_types::{Side, TypeError};

/// Errors surfaced by [`crate::Validator`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidateError {
    /// A write carried an empty or whitespace-only payload. Never cached.
    #[error("a payload is required to be present on the request to have it set on memory")]
    RequiredPayload { side: Side, id: String },

    /// A comparison-stage failure, fresh or replayed from the cache.
    #[error(transparent)]
    Comparison(#[from] ComparisonFailure),

    /// Anything not anticipated by the comparison pipeline.
    #[error("an unexpected error happened: {0}")]
    Unexpected(String),
}

impl From<StoreError> for ValidateError {
    fn from(err: StoreError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

/// Result alias for validator operations.
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Failure to turn a raw payload into a tree.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid transport encoding: {0}")]
    Transport(#[from] base64::DecodeError),

    #[error("decoded payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Json(#[from] TypeError),
}
