//! The route table.

use crate::route::{Operations, Route};
use crate::RouteMatch;
use http::Method;

/// An ordered collection of registered routes.
///
/// Lookup is a synchronous, pure-data scan: routes whose segments match the
/// path are ranked by specificity (static segments beat parameters beat
/// wildcards, compared left to right) and the best-ranked route that carries
/// an operation for the request method wins. The table is built once during
/// setup and is read-only afterwards.
///
/// # Example
///
/// ```rust
/// use strabo_router::{Operations, RouteTable};
/// use http::Method;
///
/// let mut table = RouteTable::new();
/// table.insert("/users/me", Operations::new().get("getCurrentUser"));
/// table.insert("/users/{id}", Operations::new().get("getUser"));
///
/// // The static template wins for "/users/me"
/// let m = table.match_route(&Method::GET, "/users/me").unwrap();
/// assert_eq!(m.operation_id, "getCurrentUser");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template with its operations.
    ///
    /// Inserting an already-registered template merges the operations into
    /// the existing route.
    pub fn insert(&mut self, template: &str, operations: Operations) {
        if let Some(route) = self.routes.iter_mut().find(|r| r.template() == template) {
            route.merge_operations(operations);
        } else {
            self.routes.push(Route::new(template, operations));
        }
    }

    /// Convenience: registers a single-method route.
    ///
    /// # Example
    ///
    /// ```rust
    /// use strabo_router::RouteTable;
    /// use http::Method;
    ///
    /// let mut table = RouteTable::new();
    /// table.route(&Method::GET, "/health", "healthCheck");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn route(&mut self, method: &Method, template: &str, operation_id: impl Into<String>) {
        self.insert(template, Operations::new().on(method.clone(), operation_id));
    }

    /// Matches a method and path against the table.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut candidates: Vec<(&Route, crate::Params)> = self
            .routes
            .iter()
            .filter_map(|route| route.match_segments(&segments).map(|params| (route, params)))
            .collect();
        candidates.sort_by_key(|(route, _)| route.specificity());

        candidates.into_iter().find_map(|(route, params)| {
            route.operations().lookup(method).map(|operation_id| RouteMatch {
                template: route.template(),
                operation_id,
                params,
            })
        })
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
