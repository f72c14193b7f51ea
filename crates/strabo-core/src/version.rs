//! The resolved API version.
//!
//! [`ApiVersion`] is the integer a request resolves to after extraction,
//! validation, and default substitution. It is attached to the lifecycle of
//! one request and discarded when the request completes. A request in passive
//! mode with no version signal resolves to *no* version, which callers model
//! as `Option<ApiVersion>`; absent is deliberately distinct from zero and
//! from the configured default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An API version number resolved for a single request.
///
/// Versions are non-negative integers. Version `0` is a legal version.
///
/// # Example
///
/// ```
/// use strabo_core::ApiVersion;
///
/// let v = ApiVersion::new(2);
/// assert_eq!(v.get(), 2);
/// assert_eq!(v.to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiVersion(u64);

impl ApiVersion {
    /// Creates a version from its integer value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the integer value of this version.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses a version from a string of ASCII digits.
    ///
    /// The entire string must consist of one or more ASCII digits. Anything
    /// else (empty input, signs, whitespace, non-digit characters, or a
    /// value too large for `u64`) yields `None`. This is the wire rule for
    /// the custom version header: a value that is not all-digits is not an
    /// error, it is simply no signal.
    ///
    /// # Example
    ///
    /// ```
    /// use strabo_core::ApiVersion;
    ///
    /// assert_eq!(ApiVersion::from_digits("2"), Some(ApiVersion::new(2)));
    /// assert_eq!(ApiVersion::from_digits("0"), Some(ApiVersion::new(0)));
    /// assert_eq!(ApiVersion::from_digits("v2"), None);
    /// assert_eq!(ApiVersion::from_digits(""), None);
    /// assert_eq!(ApiVersion::from_digits(" 2"), None);
    /// ```
    #[must_use]
    pub fn from_digits(value: &str) -> Option<Self> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        value.parse::<u64>().ok().map(Self)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ApiVersion {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
