//! # Strabo Core
//!
//! Shared types for the Strabo API versioning layer.
//!
//! This crate defines the two things every other Strabo crate agrees on:
//!
//! - [`ApiVersion`]: the integer version resolved for a single request
//! - [`VersioningError`]: the client errors the versioning layer can raise,
//!   with their HTTP status mapping and serializable error envelope
//!
//! Resolution itself lives in `strabo-middleware`; configuration validation
//! lives in `strabo-policy`.

#![doc(html_root_url = "https://docs.rs/strabo-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod version;

pub use error::{ErrorDetail, ErrorEnvelope, VersioningError, VersioningResult};
pub use version::ApiVersion;
