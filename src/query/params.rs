//! Ordered parameter container
//!
//! `Params` holds the optional named options of a node (`boost`, `analyzer`,
//! `minimum_should_match`, ...). Keys are never validated, so options the
//! node types don't model explicitly still reach the engine untouched.

use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;

use super::expr::Expr;

/// Insertion-ordered key/value container with override-on-merge semantics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(IndexMap<String, Expr>);

impl Params {
    /// Create an empty container
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert a parameter, returning the previous value for the key
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Expr>) -> Option<Expr> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder form of [`Params::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merge another container into this one; its values win on shared keys
    pub fn merge(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    /// Builder form of [`Params::merge`]
    pub fn merged(mut self, other: Params) -> Self {
        self.merge(other);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Expr> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a parameter, preserving the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Expr> {
        self.0.shift_remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> Iter<'_, String, Expr> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Expr>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Expr>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Expr);
    type IntoIter = IntoIter<String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Expr);
    type IntoIter = Iter<'a, String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`Params`] from named arguments
///
/// ```
/// use searchdsl::params;
///
/// let p = params! { "boost" => 2.0, "analyzer" => "english" };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::query::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::query::Params::new();
        $(params.insert($key, $value);)+
        params
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let p = params! { "b" => 1, "a" => 2, "c" => 3 };
        let keys: Vec<&str> = p.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_merge_overrides_and_keeps_position() {
        let mut p = params! { "boost" => 1.0, "analyzer" => "standard" };
        p.merge(params! { "boost" => 3.0, "fuzziness" => "AUTO" });

        let keys: Vec<&str> = p.keys().collect();
        assert_eq!(keys, vec!["boost", "analyzer", "fuzziness"]);
        assert_eq!(p.get("boost"), Some(&Expr::Float(3.0)));
    }

    #[test]
    fn test_empty() {
        let p = Params::new();
        assert!(p.is_empty());
        assert!(params! {}.is_empty());
        assert!(!params! { "x" => true }.is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut p = params! { "a" => 1, "b" => 2, "c" => 3 };
        assert_eq!(p.remove("b"), Some(Expr::Int(2)));
        let keys: Vec<&str> = p.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_from_iterator() {
        let p: Params = vec![("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(p.len(), 2);
        assert!(p.contains_key("y"));
    }
}
