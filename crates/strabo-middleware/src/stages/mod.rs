//! Built-in middleware stages.
//!
//! The pipeline ships a single stage, [`VersioningMiddleware`], which runs
//! before host routing and carries the whole resolve / validate / rewrite /
//! annotate sequence.

pub mod versioning;

pub use versioning::VersioningMiddleware;
