//! Request-scoped state.
//!
//! [`RequestState`] is the mutable bag that travels with one request through
//! the middleware chain and into the host handler. It is created per request
//! and discarded when the request completes; it is never shared or cached
//! across requests, because concurrent requests may resolve to different
//! versions at the same time.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use strabo_core::ApiVersion;

/// State scoped to a single request.
///
/// The resolved version is a tri-state: in passive mode with no version
/// signal it stays *absent* (deliberately not zero and not the configured
/// default), which downstream code observes as `None`.
///
/// # Example
///
/// ```
/// use strabo_middleware::RequestState;
/// use strabo_core::ApiVersion;
///
/// let mut state = RequestState::new();
/// assert!(state.resolved_version().is_none());
///
/// state.set_resolved_version(ApiVersion::new(2));
/// assert_eq!(state.resolved_version(), Some(ApiVersion::new(2)));
/// ```
#[derive(Debug, Default)]
pub struct RequestState {
    /// The version resolved for this request, if any.
    resolved_version: Option<ApiVersion>,

    /// Type-erased extension data for handler code.
    extensions: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RequestState {
    /// Creates fresh state for one request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resolved version, if one was resolved.
    #[must_use]
    pub const fn resolved_version(&self) -> Option<ApiVersion> {
        self.resolved_version
    }

    /// Records the resolved version.
    ///
    /// This should only be called by the versioning stage.
    pub fn set_resolved_version(&mut self, version: ApiVersion) {
        self.resolved_version = Some(version);
    }

    /// Stores a typed extension value.
    pub fn set_extension<T: Send + Sync + 'static>(&mut self, value: T) {
        self.extensions.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Retrieves a typed extension value.
    #[must_use]
    pub fn get_extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Retrieves a typed extension value mutably.
    pub fn get_extension_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.extensions
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Removes and returns a typed extension value.
    pub fn remove_extension<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.extensions
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|b| *b)
    }
}
