//! The validated version policy.
//!
//! [`VersionPolicy`] is the normalized form of the versioning configuration.
//! Construction goes through [`PolicyBuilder`] or [`RawPolicy`], both of
//! which apply the same rules in the same order: `valid_versions` first,
//! then `default_version`, `vendor_name`, `version_header`, `passive_mode`,
//! and `base_path`. The first violated rule wins.
//!
//! [`RawPolicy`]: crate::RawPolicy

use crate::error::PolicyError;
use crate::raw::RawPolicy;
use http::header::HeaderName;
use std::collections::BTreeSet;
use strabo_core::ApiVersion;

/// Default name for the custom version request/response header.
pub const DEFAULT_VERSION_HEADER: &str = "api-version";

/// Default base path.
pub const DEFAULT_BASE_PATH: &str = "/";

/// Immutable version policy, built once at startup.
///
/// Invariant: `default_version` is always a member of `valid_versions`.
/// Configurations violating this are rejected by validation before any
/// request is served.
#[derive(Debug, Clone)]
pub struct VersionPolicy {
    /// Allowed API versions.
    valid_versions: BTreeSet<u64>,
    /// Version substituted when a request carries no usable signal.
    default_version: ApiVersion,
    /// Vendor token expected inside the Accept-header subtype.
    vendor_name: String,
    /// Name of the custom version header, also used on responses.
    version_header: HeaderName,
    /// When set, unversioned requests bypass resolution entirely.
    passive_mode: bool,
    /// URL prefix under which version segments are inserted.
    base_path: BasePath,
}

impl VersionPolicy {
    /// Returns a new policy builder.
    #[must_use]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Validates a raw configuration, producing a normalized policy.
    pub fn from_raw(raw: RawPolicy) -> Result<Self, PolicyError> {
        let versions = raw
            .valid_versions
            .ok_or(PolicyError::missing_field("valid_versions"))?;
        if versions.is_empty() {
            return Err(PolicyError::invalid_value(
                "valid_versions",
                "must contain at least one version",
            ));
        }
        let valid_versions: BTreeSet<u64> = versions.into_iter().collect();

        let default_version = raw
            .default_version
            .ok_or(PolicyError::missing_field("default_version"))?;
        if !valid_versions.contains(&default_version) {
            return Err(PolicyError::invalid_value(
                "default_version",
                format!("{default_version} is not one of the valid versions"),
            ));
        }

        let vendor_name = raw
            .vendor_name
            .ok_or(PolicyError::missing_field("vendor_name"))?
            .trim()
            .to_string();
        if vendor_name.is_empty() {
            return Err(PolicyError::invalid_value(
                "vendor_name",
                "must not be empty",
            ));
        }

        let header = raw
            .version_header
            .map_or_else(|| DEFAULT_VERSION_HEADER.to_string(), |h| h.trim().to_string());
        if header.is_empty() {
            return Err(PolicyError::invalid_value(
                "version_header",
                "must not be empty",
            ));
        }
        // Checked here so the response annotator can never fail per request.
        let version_header = HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            PolicyError::invalid_value("version_header", format!("'{header}' is not a valid header name"))
        })?;

        let passive_mode = raw.passive_mode.unwrap_or(false);

        let base_path = BasePath::parse(
            raw.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH),
        )?;

        Ok(Self {
            valid_versions,
            default_version: ApiVersion::new(default_version),
            vendor_name,
            version_header,
            passive_mode,
            base_path,
        })
    }

    /// Returns `true` if `version` is in the allow-list.
    #[must_use]
    pub fn contains(&self, version: u64) -> bool {
        self.valid_versions.contains(&version)
    }

    /// Returns the allowed versions in ascending order.
    #[must_use]
    pub fn valid_versions(&self) -> Vec<u64> {
        self.valid_versions.iter().copied().collect()
    }

    /// Returns the default version.
    #[must_use]
    pub const fn default_version(&self) -> ApiVersion {
        self.default_version
    }

    /// Returns the configured vendor name.
    #[must_use]
    pub fn vendor_name(&self) -> &str {
        &self.vendor_name
    }

    /// Returns the name of the custom version header.
    #[must_use]
    pub const fn version_header(&self) -> &HeaderName {
        &self.version_header
    }

    /// Returns `true` if passive mode is enabled.
    #[must_use]
    pub const fn passive_mode(&self) -> bool {
        self.passive_mode
    }

    /// Returns the configured base path.
    #[must_use]
    pub const fn base_path(&self) -> &BasePath {
        &self.base_path
    }
}

/// The URL prefix under which version segments are inserted.
///
/// Always normalized to start and end with `/`. The leading segment may be a
/// `{placeholder}` that is substituted per request with the literal first
/// segment of the incoming path (e.g. a tenant identifier). Exactly one such
/// segment is supported and it must be the leading one; nested multi-segment
/// templated prefixes are rejected at validation.
///
/// # Example
///
/// ```
/// use strabo_policy::BasePath;
///
/// let fixed = BasePath::parse("/api").unwrap();
/// assert_eq!(fixed.as_str(), "/api/");
/// assert_eq!(fixed.resolve("/api/users").as_deref(), Some("/api/"));
///
/// let templated = BasePath::parse("/{tenant}/api/").unwrap();
/// assert_eq!(templated.resolve("/acme/api/users").as_deref(), Some("/acme/api/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath {
    /// Normalized template, always `/`-prefixed and `/`-terminated.
    template: String,
    /// Whether the leading segment is a placeholder.
    templated: bool,
}

impl BasePath {
    /// Parses and normalizes a base path.
    pub fn parse(raw: &str) -> Result<Self, PolicyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PolicyError::invalid_value(
                "base_path",
                "must not be empty",
            ));
        }
        if !trimmed.starts_with('/') {
            return Err(PolicyError::invalid_value(
                "base_path",
                format!("'{trimmed}' must start with '/'"),
            ));
        }

        let mut template = trimmed.to_string();
        if !template.ends_with('/') {
            template.push('/');
        }

        let placeholders: Vec<usize> = template
            .split('/')
            .filter(|s| !s.is_empty())
            .enumerate()
            .filter(|(_, s)| s.starts_with('{') && s.ends_with('}'))
            .map(|(i, _)| i)
            .collect();
        let templated = match placeholders.as_slice() {
            [] => false,
            [0] => true,
            _ => {
                return Err(PolicyError::invalid_value(
                    "base_path",
                    "supports a single dynamic segment and it must be the leading one",
                ))
            }
        };

        Ok(Self {
            template,
            templated,
        })
    }

    /// Returns the normalized base-path template.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns `true` if the leading segment is a placeholder.
    #[must_use]
    pub const fn is_templated(&self) -> bool {
        self.templated
    }

    /// Resolves the base path against an incoming request path.
    ///
    /// For a fixed base path this is the template itself. For a templated
    /// base path the placeholder is replaced verbatim with the first segment
    /// of `path`; a path with no first segment cannot resolve and yields
    /// `None`. The result always ends with `/`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<String> {
        if !self.templated {
            return Some(self.template.clone());
        }

        let first_segment = path.split('/').find(|s| !s.is_empty())?;
        let rest = &self.template[self.template[1..].find('/')? + 1..];
        Some(format!("/{first_segment}{rest}"))
    }
}

/// Fluent builder for [`VersionPolicy`].
///
/// # Example
///
/// ```
/// use strabo_policy::VersionPolicy;
///
/// let policy = VersionPolicy::builder()
///     .valid_versions([0, 1, 2])
///     .default_version(1)
///     .vendor_name("mysuperapi")
///     .version_header("myversion")
///     .passive_mode(true)
///     .base_path("/api")
///     .build()
///     .unwrap();
///
/// assert_eq!(policy.base_path().as_str(), "/api/");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    raw: RawPolicy,
}

impl PolicyBuilder {
    /// Sets the allowed versions.
    #[must_use]
    pub fn valid_versions<I>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.raw.valid_versions = Some(versions.into_iter().collect());
        self
    }

    /// Sets the default version.
    #[must_use]
    pub fn default_version(mut self, version: u64) -> Self {
        self.raw.default_version = Some(version);
        self
    }

    /// Sets the vendor name.
    #[must_use]
    pub fn vendor_name(mut self, vendor: impl Into<String>) -> Self {
        self.raw.vendor_name = Some(vendor.into());
        self
    }

    /// Sets the custom version header name.
    #[must_use]
    pub fn version_header(mut self, header: impl Into<String>) -> Self {
        self.raw.version_header = Some(header.into());
        self
    }

    /// Enables or disables passive mode.
    #[must_use]
    pub fn passive_mode(mut self, passive: bool) -> Self {
        self.raw.passive_mode = Some(passive);
        self
    }

    /// Sets the base path.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.raw.base_path = Some(base_path.into());
        self
    }

    /// Validates the configuration and builds the policy.
    pub fn build(self) -> Result<VersionPolicy, PolicyError> {
        VersionPolicy::from_raw(self.raw)
    }
}
