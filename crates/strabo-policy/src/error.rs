//! Policy configuration error types.

use thiserror::Error;

/// Errors raised while validating a version policy.
///
/// A `PolicyError` is fatal: it must prevent the server from starting (or
/// the versioning layer from being installed). It is never recovered at
/// request time.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// A required policy field was not provided.
    #[error("missing required policy field: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// A policy field has an invalid value.
    #[error("invalid policy value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: &'static str,
        /// Explanation of why the value is invalid.
        reason: String,
    },

    /// JSON parsing error.
    #[error("failed to parse JSON policy: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("failed to parse TOML policy: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PolicyError {
    /// Creates a missing-field error.
    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
