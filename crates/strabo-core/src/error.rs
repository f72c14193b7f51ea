//! Request-time error types.
//!
//! This module provides [`VersioningError`], the error type for client
//! failures raised while resolving a request's API version. Both variants are
//! client errors that must stop the request before it reaches route matching
//! or handler logic; they are surfaced directly as the HTTP response.
//!
//! Unparseable version signals (a malformed header, a malformed media type,
//! an unknown vendor name) are deliberately *not* errors; they are "no
//! signal" and fall through to default-version resolution.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`VersioningError`].
pub type VersioningResult<T> = Result<T, VersioningError>;

/// Errors raised while resolving a request's API version.
///
/// # Example
///
/// ```
/// use strabo_core::VersioningError;
/// use http::StatusCode;
///
/// let err = VersioningError::invalid_version(9, &[1, 2]);
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert!(err.to_string().contains("Valid values: 1,2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersioningError {
    /// An explicitly requested version is not in the allow-list.
    #[error("Invalid api-version! Valid values: {}", format_versions(.valid))]
    InvalidVersion {
        /// The version the caller asked for.
        requested: u64,
        /// The versions the policy accepts, in ascending order.
        valid: Vec<u64>,
    },

    /// An `OPTIONS` preflight request did not name the method it probes for.
    #[error("Malformed preflight request: {message}")]
    MalformedPreflight {
        /// Human-readable description of what was missing.
        message: String,
    },
}

fn format_versions(valid: &[u64]) -> String {
    valid
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl VersioningError {
    /// Creates an invalid-version error carrying the allow-list.
    #[must_use]
    pub fn invalid_version(requested: u64, valid: &[u64]) -> Self {
        Self::InvalidVersion {
            requested,
            valid: valid.to_vec(),
        }
    }

    /// Creates a malformed-preflight error.
    #[must_use]
    pub fn malformed_preflight(message: impl Into<String>) -> Self {
        Self::MalformedPreflight {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Both variants are client errors and map to `400 Bad Request`.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidVersion { .. } | Self::MalformedPreflight { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidVersion { .. } => "INVALID_API_VERSION",
            Self::MalformedPreflight { .. } => "MALFORMED_PREFLIGHT",
        }
    }

    /// Converts this error to a serializable envelope for the response body.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.error_details(),
            },
        }
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidVersion { requested, valid } => Some(serde_json::json!({
                "requested": requested,
                "valid_versions": valid,
            })),
            Self::MalformedPreflight { .. } => None,
        }
    }
}

/// Serializable error envelope for HTTP responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
