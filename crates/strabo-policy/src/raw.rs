//! Raw, unvalidated policy configuration.
//!
//! [`RawPolicy`] mirrors the configuration surface as it arrives from a file
//! or an embedding application: every field optional, nothing normalized.
//! Validation happens in one place, [`VersionPolicy::from_raw`].
//!
//! [`VersionPolicy::from_raw`]: crate::VersionPolicy::from_raw

use crate::error::PolicyError;
use crate::policy::VersionPolicy;
use serde::{Deserialize, Serialize};

/// Unvalidated version-policy configuration.
///
/// Field types are strict: `valid_versions` and `default_version` only
/// deserialize from exact non-negative integers; fractional numbers and
/// numeric strings are rejected by serde before validation even runs.
///
/// # Example
///
/// ```
/// use strabo_policy::RawPolicy;
///
/// let raw = RawPolicy::from_toml_str(
///     "valid_versions = [1, 2]\ndefault_version = 2\nvendor_name = \"acme\"",
/// ).unwrap();
/// let policy = raw.into_policy().unwrap();
/// assert_eq!(policy.default_version().get(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawPolicy {
    /// Allowed API versions.
    #[serde(default)]
    pub valid_versions: Option<Vec<u64>>,

    /// Version substituted when a request carries no usable signal.
    #[serde(default)]
    pub default_version: Option<u64>,

    /// Vendor token expected inside the Accept-header subtype.
    #[serde(default)]
    pub vendor_name: Option<String>,

    /// Name of the custom version header. Defaults to `api-version`.
    #[serde(default)]
    pub version_header: Option<String>,

    /// Whether unversioned requests bypass resolution. Defaults to `false`.
    #[serde(default)]
    pub passive_mode: Option<bool>,

    /// URL prefix under which version segments are inserted. Defaults to `/`.
    #[serde(default)]
    pub base_path: Option<String>,
}

impl RawPolicy {
    /// Parses a raw policy from a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parses a raw policy from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, PolicyError> {
        Ok(toml::from_str(input)?)
    }

    /// Validates this configuration into a [`VersionPolicy`].
    pub fn into_policy(self) -> Result<VersionPolicy, PolicyError> {
        VersionPolicy::from_raw(self)
    }
}
