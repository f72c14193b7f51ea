//! # Strabo Middleware
//!
//! The middleware seam and the API version resolution stage.
//!
//! Strabo sits in front of a host HTTP routing layer. For every request it
//! resolves the API version the caller wants, rewrites the routing path to a
//! version-prefixed internal path, and annotates the outgoing response with
//! the resolved version:
//!
//! ```text
//! Request → [resolve → validate → rewrite] → host routing → handler
//!                                                              ↓
//! Response ←───────────────── [annotate] ←────────────────────┘
//! ```
//!
//! The host owns connection handling, route dispatch, and response
//! transmission; this crate only decides a version number, computes a
//! rewritten path, and hands control back through [`Next`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use strabo_middleware::stages::VersioningMiddleware;
//! use strabo_policy::VersionPolicy;
//! use strabo_router::{Operations, RouteTable};
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

#![doc(html_root_url = "https://docs.rs/strabo-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod extract;
pub mod middleware;
pub mod stages;
pub mod state;
pub mod types;

pub use middleware::{BoxFuture, Middleware, Next};
pub use state::RequestState;
pub use types::{Request, Response, ResponseExt};
