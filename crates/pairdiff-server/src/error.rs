use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tracing::{error, warn};

use pairdiff_store::ComparisonFailure;
use pairdiff_types::Side;
use pairdiff_validate::ValidateError;

use crate::response::ResponseBody;

const UNEXPECTED_MESSAGE: &str = "a generic error happened inside the server which has not been predicted";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error("the {side} payload is invalid and cannot be deserialized")]
    InvalidBody { side: Side, cause: String },

    #[error("the {side} payload exceeds the maximum accepted size")]
    PayloadTooLarge { side: Side, cause: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Map a failure to read a side's request body.
    pub fn from_body_rejection(side: Side, rejection: BytesRejection) -> Self {
        let cause = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge { side, cause }
        } else {
            Self::InvalidBody { side, cause }
        }
    }

    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validate(ValidateError::RequiredPayload { .. }) => StatusCode::PRECONDITION_FAILED,
            Self::Validate(ValidateError::Comparison(failure)) => match failure {
                ComparisonFailure::Deserialization { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ComparisonFailure::MissingInMemory { .. }
                | ComparisonFailure::SizeMismatch { .. }
                | ComparisonFailure::ContentMismatch(_) => StatusCode::PRECONDITION_FAILED,
            },
            Self::InvalidBody { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Validate(ValidateError::Unexpected(_))
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body: a stable message plus structured detail where useful.
    pub fn body(&self) -> ResponseBody {
        match self {
            Self::Validate(ValidateError::Comparison(ComparisonFailure::ContentMismatch(diff))) => {
                let body = ResponseBody::message(self.to_string());
                match serde_json::to_value(diff) {
                    Ok(detail) => body.with_detail(detail),
                    Err(_) => body,
                }
            }
            Self::Validate(ValidateError::Comparison(ComparisonFailure::Deserialization {
                cause,
                ..
            }))
            | Self::InvalidBody { cause, .. }
            | Self::PayloadTooLarge { cause, .. } => {
                ResponseBody::message(self.to_string()).with_detail(cause.clone().into())
            }
            _ if self.status().is_server_error() => {
                ResponseBody::message(UNEXPECTED_MESSAGE).with_detail(self.to_string().into())
            }
            _ => ResponseBody::message(self.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_payload_is_precondition_failed() {
        let err = ServerError::from(ValidateError::RequiredPayload {
            side: Side::Left,
            id: "1".into(),
        });
        assert_eq!(err.status(), StatusCode::PRECONDITION_FAILED);
        assert_eq!(
            err.body().message,
            "a payload is required to be present on the request to have it set on memory"
        );
        assert!(err.body().detail.is_none());
    }

    #[test]
    fn deserialization_is_unprocessable_with_cause() {
        let err = ServerError::from(ValidateError::from(ComparisonFailure::Deserialization {
            side: Side::Right,
            cause: "boom".into(),
        }));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = err.body();
        assert_eq!(body.message, "the right payload is invalid and cannot be deserialized");
        assert_eq!(body.detail, Some(json!("boom")));
    }

    #[test]
    fn content_mismatch_carries_diff_detail() {
        let err = ServerError::from(ValidateError::from(ComparisonFailure::ContentMismatch(
            Default::default(),
        )));
        assert_eq!(err.status(), StatusCode::PRECONDITION_FAILED);
        let body = err.body();
        assert_eq!(body.message, "both payloads contains different content/values");
        assert_eq!(body.detail, Some(json!({})));
    }

    #[test]
    fn unexpected_is_internal_server_error() {
        let err = ServerError::from(ValidateError::Unexpected("lock".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().message, UNEXPECTED_MESSAGE);
    }

    #[test]
    fn payload_too_large_keeps_json_shape() {
        let err = ServerError::PayloadTooLarge {
            side: Side::Right,
            cause: "length limit exceeded".into(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = err.body();
        assert_eq!(body.message, "the right payload exceeds the maximum accepted size");
        assert_eq!(body.detail, Some(json!("length limit exceeded")));
    }

    #[test]
    fn invalid_body_names_side() {
        let err = ServerError::InvalidBody {
            side: Side::Left,
            cause: "utf8".into(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.body().message, "the left payload is invalid and cannot be deserialized");
    }
}
