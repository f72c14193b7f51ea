//! Extracted path parameters.

use smallvec::SmallVec;

/// Parameters stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Parameters extracted from a matched path.
///
/// Stored as (name, value) pairs with a small-vector optimization; routes
/// rarely carry more than a few parameters.
///
/// # Example
///
/// ```rust
/// use strabo_router::Params;
///
/// let mut params = Params::new();
/// params.insert("tenant", "acme");
/// assert_eq!(params.get("tenant"), Some("acme"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    pairs: SmallVec<[(Box<str>, Box<str>); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn insert(&mut self, name: impl Into<Box<str>>, value: impl Into<Box<str>>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| &**v)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (&**n, &**v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
        assert_eq!(params.get("x"), None);
    }

    #[test]
    fn test_insert_and_get() {
        let mut params = Params::new();
        params.insert("userId", "123");
        params.insert("postId", "456");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("userId"), Some("123"));
        assert_eq!(params.get("postId"), Some("456"));
        assert_eq!(params.get("other"), None);
    }

    #[test]
    fn test_iter_insertion_order() {
        let mut params = Params::new();
        params.insert("a", "1");
        params.insert("b", "2");

        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("a", "1"), ("b", "2")]);
    }
}
