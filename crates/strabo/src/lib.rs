//! # Strabo
//!
//! **Request-time API version resolution and URL rewriting for HTTP services**
//!
//! Strabo is a middleware layer that sits in front of a host routing layer
//! and lets one public URL space serve several API versions:
//!
//! - **Version resolution** – a custom header (`api-version: 2`) or a vendor
//!   media type (`accept: application/vnd.acme.v2+json`), with the header
//!   taking precedence and a configured default filling the gaps
//! - **Allow-list enforcement** – unknown versions are rejected with a `400`
//!   error envelope before any handler runs
//! - **Path rewriting** – requests are transparently redirected to
//!   version-prefixed internal routes (`/users` → `/v2/users`) when one
//!   exists, preserving query strings byte for byte
//! - **Response annotation** – every versioned response carries the resolved
//!   version in the version header
//! - **Passive mode** – unversioned traffic can opt out of the whole scheme
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use strabo::prelude::*;
//!
//! let policy = VersionPolicy::builder()
//!     .valid_versions([1, 2])
//!     .default_version(1)
//!     .vendor_name("acme")
//!     .build()
//!     .unwrap();
//!
//! let mut routes = RouteTable::new();
//! routes.insert("/v1/users", Operations::new().get("listUsersV1"));
//! routes.insert("/v2/users", Operations::new().get("listUsersV2"));
//!
//! let versioning = VersioningMiddleware::new(Arc::new(policy), Arc::new(routes));
//! ```
//!
//! ## Architecture
//!
//! The versioning stage runs before routing and annotates after:
//!
//! ```text
//! Request → [resolve → validate → rewrite] → host routing → handler
//!                                                              ↓
//! Response ←───────────────── [annotate] ←────────────────────┘
//! ```

#![doc(html_root_url = "https://docs.rs/strabo/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use strabo_core as core;

// Re-export policy types
pub use strabo_policy as policy;

// Re-export router types
pub use strabo_router as router;

// Re-export middleware types
pub use strabo_middleware as middleware;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use strabo::prelude::*;
/// ```
pub mod prelude {
    pub use strabo_core::{ApiVersion, ErrorEnvelope, VersioningError, VersioningResult};

    pub use strabo_policy::{BasePath, PolicyError, RawPolicy, VersionPolicy};

    pub use strabo_router::{Operations, Params, RouteMatch, RouteTable};

    pub use strabo_middleware::stages::VersioningMiddleware;
    pub use strabo_middleware::{
        BoxFuture, Middleware, Next, Request, RequestState, Response, ResponseExt,
    };
}
