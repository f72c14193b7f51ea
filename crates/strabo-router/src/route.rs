//! Route templates and per-method operation registration.

use crate::params::Params;
use http::Method;

/// One segment of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal segment (e.g. `users`).
    Static(String),
    /// Named parameter segment (e.g. `{id}`).
    Param(String),
    /// Trailing catch-all segment (e.g. `*rest`). Must be last; matches
    /// zero or more segments.
    Wildcard(String),
}

impl Segment {
    /// Matching priority: lower ranks win when several routes match a path.
    const fn rank(&self) -> u8 {
        match self {
            Self::Static(_) => 0,
            Self::Param(_) => 1,
            Self::Wildcard(_) => 2,
        }
    }
}

/// Maps HTTP methods to operation ids for a single template.
///
/// # Example
///
/// ```rust
/// use strabo_router::Operations;
/// use http::Method;
///
/// let ops = Operations::new()
///     .get("listUsers")
///     .post("createUser")
///     .on(Method::PATCH, "patchUser");
///
/// assert_eq!(ops.lookup(&Method::GET), Some("listUsers"));
/// assert_eq!(ops.lookup(&Method::PATCH), Some("patchUser"));
/// assert_eq!(ops.lookup(&Method::DELETE), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operations {
    entries: Vec<(Method, String)>,
}

impl Operations {
    /// Creates an empty operation set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation for an arbitrary method.
    ///
    /// Registering the same method twice replaces the earlier operation.
    #[must_use]
    pub fn on(mut self, method: Method, operation_id: impl Into<String>) -> Self {
        self.set(method, operation_id.into());
        self
    }

    /// Registers a GET operation.
    #[must_use]
    pub fn get(self, operation_id: impl Into<String>) -> Self {
        self.on(Method::GET, operation_id)
    }

    /// Registers a POST operation.
    #[must_use]
    pub fn post(self, operation_id: impl Into<String>) -> Self {
        self.on(Method::POST, operation_id)
    }

    /// Registers a PUT operation.
    #[must_use]
    pub fn put(self, operation_id: impl Into<String>) -> Self {
        self.on(Method::PUT, operation_id)
    }

    /// Registers a DELETE operation.
    #[must_use]
    pub fn delete(self, operation_id: impl Into<String>) -> Self {
        self.on(Method::DELETE, operation_id)
    }

    /// Returns the operation id registered for a method.
    #[must_use]
    pub fn lookup(&self, method: &Method) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, op)| op.as_str())
    }

    /// Merges another operation set into this one; `other` wins on conflict.
    pub fn merge(&mut self, other: Self) {
        for (method, op) in other.entries {
            self.set(method, op);
        }
    }

    fn set(&mut self, method: Method, operation_id: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(m, _)| *m == method) {
            entry.1 = operation_id;
        } else {
            self.entries.push((method, operation_id));
        }
    }
}

/// A registered route: its template, parsed segments, and operations.
#[derive(Debug, Clone)]
pub struct Route {
    template: String,
    segments: Vec<Segment>,
    operations: Operations,
}

impl Route {
    /// Parses a template into a route.
    ///
    /// # Panics
    ///
    /// Panics if a wildcard segment is not the last segment; that is a
    /// registration-time programming error.
    #[must_use]
    pub fn new(template: impl Into<String>, operations: Operations) -> Self {
        let template = template.into();
        let segments = parse_template(&template);
        Self {
            template,
            segments,
            operations,
        }
    }

    /// Returns the template this route was registered under.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the registered operations.
    #[must_use]
    pub const fn operations(&self) -> &Operations {
        &self.operations
    }

    /// Merges more operations into this route.
    pub fn merge_operations(&mut self, operations: Operations) {
        self.operations.merge(operations);
    }

    /// Specificity key: per-segment ranks, compared lexicographically.
    pub(crate) fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::rank).collect()
    }

    /// Matches this route against already-split path segments.
    ///
    /// Returns extracted parameters on a match. A wildcard consumes zero or
    /// more remaining segments, joined back with `/`.
    #[must_use]
    pub fn match_segments(&self, path: &[&str]) -> Option<Params> {
        let mut params = Params::new();
        let mut remaining = path;

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(literal) => {
                    if remaining.first() != Some(&literal.as_str()) {
                        return None;
                    }
                    remaining = &remaining[1..];
                }
                Segment::Param(name) => {
                    let value = remaining.first()?;
                    params.insert(name.as_str(), *value);
                    remaining = &remaining[1..];
                }
                Segment::Wildcard(name) => {
                    debug_assert_eq!(i, self.segments.len() - 1);
                    params.insert(name.as_str(), remaining.join("/"));
                    return Some(params);
                }
            }
        }

        remaining.is_empty().then_some(params)
    }
}

/// Splits a template into segments, classifying each one.
fn parse_template(template: &str) -> Vec<Segment> {
    let segments: Vec<Segment> = template
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Segment::Param(name.to_string())
            } else if let Some(name) = s.strip_prefix('*') {
                Segment::Wildcard(name.to_string())
            } else {
                Segment::Static(s.to_string())
            }
        })
        .collect();

    let wildcard_positions: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| matches!(s, Segment::Wildcard(_)))
        .map(|(i, _)| i)
        .collect();
    assert!(
        wildcard_positions
            .iter()
            .all(|&i| i == segments.len() - 1),
        "wildcard must be the last segment in template '{template}'"
    );

    segments
}
