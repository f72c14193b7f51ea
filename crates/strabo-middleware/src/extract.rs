//! Version signal extraction.
//!
//! Two independent signals are understood: a custom request header carrying
//! bare digits, and a vendor media type in the `accept` header of the form
//! `application/vnd.<vendor>.v<digits>+json`. The custom header wins when
//! both are present and well-formed. A malformed signal is indistinguishable
//! from an absent one; the caller falls back to its default in both cases.

use http::header::{HeaderMap, HeaderName, ACCEPT};
use strabo_core::ApiVersion;

/// Extracts a version from the custom version header.
///
/// The value must consist entirely of ASCII digits. Signs, whitespace,
/// fractional values, and anything non-numeric yield `None`.
#[must_use]
pub fn version_from_header(headers: &HeaderMap, name: &HeaderName) -> Option<ApiVersion> {
    let value = headers.get(name)?.to_str().ok()?;
    ApiVersion::from_digits(value)
}

/// Extracts a version from a vendor media type in the `accept` header.
///
/// Only the first media range is considered, and only when the header
/// contains exactly one. The subtype must read `vnd.<facets>.v<digits>`,
/// where the facets joined by `.` must match `vendor` exactly. The `vnd`
/// tree prefix is matched case-insensitively; the vendor facets are
/// case-sensitive.
#[must_use]
pub fn version_from_accept(headers: &HeaderMap, vendor: &str) -> Option<ApiVersion> {
    let value = headers.get(ACCEPT)?.to_str().ok()?;
    // A list of media ranges carries no single version signal.
    if value.contains(',') {
        return None;
    }
    let media_type = value.split(';').next()?.trim();
    let (_type, subtype) = media_type.split_once('/')?;
    let subtype = subtype.split('+').next()?;

    let facets: Vec<&str> = subtype.split('.').collect();
    if facets.len() < 3 {
        return None;
    }
    if !facets[0].eq_ignore_ascii_case("vnd") {
        return None;
    }
    let version_facet = facets[facets.len() - 1].strip_prefix('v')?;
    if facets[1..facets.len() - 1].join(".") != vendor {
        return None;
    }
    ApiVersion::from_digits(version_facet)
}

/// Resolves the version signal for a request, if any.
///
/// The custom header takes precedence over the `accept` header.
#[must_use]
pub fn resolve_signal(
    headers: &HeaderMap,
    version_header: &HeaderName,
    vendor: &str,
) -> Option<ApiVersion> {
    version_from_header(headers, version_header)
        .or_else(|| version_from_accept(headers, vendor))
}
