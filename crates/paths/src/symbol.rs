//! Opaque node identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// An opaque, hashable and totally ordered node identifier.
///
/// Cloning is cheap (reference-counted), so contexts built from symbols can
/// be copied into count tables without reallocating the names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Creates a symbol from any string-like name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the symbol's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for Symbol {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn equality_is_by_name() {
        assert_eq!(Symbol::from("a"), Symbol::new(String::from("a")));
        assert_ne!(Symbol::from("a"), Symbol::from("b"));
    }

    #[test]
    fn ordering_follows_names() {
        let set: BTreeSet<Symbol> = ["c", "a", "b"].into_iter().map(Symbol::from).collect();
        let names: Vec<&str> = set.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn borrow_lookup_by_str() {
        let set: BTreeSet<Symbol> = ["x"].into_iter().map(Symbol::from).collect();
        assert!(set.contains("x"));
    }

    #[test]
    fn display_and_serialize() {
        let s = Symbol::from("node-1");
        assert_eq!(s.to_string(), "node-1");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"node-1\"");
    }

    #[test]
    fn trait_assertions() {
        fn assert_send_sync<T: Send + Sync>() {}
        fn assert_hash<T: std::hash::Hash + Ord>() {}
        assert_send_sync::<Symbol>();
        assert_hash::<Symbol>();
    }
}
