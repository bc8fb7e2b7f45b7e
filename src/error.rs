//! Error types for extraction and the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// A fault while turning a single pattern match into a relationship.
///
/// These never abort extraction; the offending match is logged and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A capture group the pattern relies on did not participate in the match.
    #[error("pattern '{pattern}' produced no capture group {group}")]
    MissingCapture {
        pattern: &'static str,
        group: usize,
    },
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request did not carry any text to parse.
    #[error("Text not provided")]
    TextMissing,

    /// `text` was present and truthy but not a string.
    #[error("Text must be a string")]
    TextNotString,

    /// The body claimed to be JSON but did not parse.
    #[error("Malformed JSON body")]
    MalformedBody { details: String },

    /// Any other body rejection (e.g. over the size limit), keeping its status.
    #[error("Request rejected")]
    Rejected { status: StatusCode, details: String },

    /// Extraction failed unexpectedly.
    #[error("Failed to parse text")]
    Internal { details: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TextMissing | Self::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            Self::TextNotString => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            details: match self {
                Self::TextMissing | Self::TextNotString => None,
                Self::MalformedBody { details }
                | Self::Rejected { details, .. }
                | Self::Internal { details } => Some(details),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::TextMissing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal {
                details: "boom".into()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::TextNotString.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Rejected {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                details: "too big".into()
            }
            .status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_missing_capture_message() {
        let err = ExtractionError::MissingCapture {
            pattern: "arrow",
            group: 2,
        };
        assert_eq!(err.to_string(), "pattern 'arrow' produced no capture group 2");
    }
}
