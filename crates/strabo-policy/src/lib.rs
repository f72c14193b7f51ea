//! # Strabo Policy
//!
//! Typed configuration for the Strabo API versioning layer.
//!
//! A [`VersionPolicy`] is validated and normalized **once at startup** and is
//! read-only shared state for the lifetime of the server. A configuration
//! that violates any rule is rejected with a [`PolicyError`] before any
//! request is served; none of the rules are re-checked at request time.
//!
//! There are two ways to build a policy, both funneled through the same
//! validation:
//!
//! ```
//! use strabo_policy::VersionPolicy;
//!
//! // Fluent builder
//! let policy = VersionPolicy::builder()
//!     .valid_versions([1, 2])
//!     .default_version(1)
//!     .vendor_name("acme")
//!     .build()
//!     .unwrap();
//! assert!(policy.contains(2));
//!
//! // Raw configuration (JSON or TOML)
//! use strabo_policy::RawPolicy;
//!
//! let raw = RawPolicy::from_json_str(
//!     r#"{"valid_versions": [1, 2], "default_version": 1, "vendor_name": "acme"}"#,
//! ).unwrap();
//! let policy = raw.into_policy().unwrap();
//! assert_eq!(policy.default_version().get(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/strabo-policy/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod policy;
pub mod raw;

pub use error::PolicyError;
pub use policy::{BasePath, PolicyBuilder, VersionPolicy};
pub use raw::RawPolicy;
