//! Route table for Strabo.
//!
//! This crate provides the synchronous route-table lookup the versioning
//! layer probes before rewriting a request: `match(method, path)` returning a
//! descriptor that still knows the **registered path template**. The rewriter
//! only redirects a request when the matched template is genuinely
//! version-prefixed, so the template must survive registration, which is the
//! one structural requirement a general-purpose dispatch router rarely meets.
//!
//! # Features
//!
//! - **Template preservation**: every match reports the template it was
//!   registered under (e.g. `/v2/users/{id}`)
//! - **Path parameters**: named segments (`/users/{id}`)
//! - **Wildcards**: trailing catch-all segments (`/files/*rest`), matching
//!   zero or more segments
//! - **Priority**: static segments beat parameters beat wildcards
//! - **Method-based registration**: one operation id per HTTP method
//!
//! Optional (`{name?}`) and counted (`{name*2}`) parameter forms are not
//! supported; a named parameter always matches exactly one segment.
//!
//! # Example
//!
//! ```rust
//! use strabo_router::{Operations, RouteTable};
//! use http::Method;
//!
//! let mut table = RouteTable::new();
//! table.insert("/v1/users", Operations::new().get("listUsersV1"));
//! table.insert("/v1/users/{id}", Operations::new().get("getUserV1"));
//!
//! let matched = table.match_route(&Method::GET, "/v1/users/123").unwrap();
//! assert_eq!(matched.template, "/v1/users/{id}");
//! assert_eq!(matched.operation_id, "getUserV1");
//! assert_eq!(matched.params.get("id"), Some("123"));
//! ```

#![doc(html_root_url = "https://docs.rs/strabo-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod params;
mod route;
mod table;

pub use params::Params;
pub use route::{Operations, Route, Segment};
pub use table::RouteTable;

/// A matched route: its registered template, operation id, and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The path template the route was registered under.
    pub template: &'a str,
    /// The operation id registered for the request method.
    pub operation_id: &'a str,
    /// Parameters extracted from the path.
    pub params: Params,
}
