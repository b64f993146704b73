//! First-order successor relation observed in a set of paths.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

use crate::symbol::Symbol;

/// The first-order network underlying a set of paths.
///
/// Each symbol maps to the set of symbols observed to follow it directly.
/// Symbols that only ever end a path are part of the vocabulary but have no
/// successors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    successors: BTreeMap<Symbol, BTreeSet<Symbol>>,
    vocabulary: BTreeSet<Symbol>,
}

impl Topology {
    /// Builds the topology from a sequence of paths.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a [Symbol]>) -> Self {
        let mut topo = Self::default();
        for path in paths {
            topo.vocabulary.extend(path.iter().cloned());
            for pair in path.windows(2) {
                topo.successors
                    .entry(pair[0].clone())
                    .or_default()
                    .insert(pair[1].clone());
            }
        }
        topo
    }

    /// Number of distinct successors of `symbol` (0 if it has none).
    pub fn out_degree<Q>(&self, symbol: &Q) -> usize
    where
        Symbol: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.successors.get(symbol).map_or(0, BTreeSet::len)
    }

    /// Number of distinct symbols.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.successors.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> Vec<Symbol> {
        names.iter().copied().map(Symbol::from).collect()
    }

    #[test]
    fn toy_topology() {
        let paths = [path(&["a", "c", "d"]), path(&["b", "c", "e"])];
        let topo = Topology::from_paths(paths.iter().map(Vec::as_slice));
        assert_eq!(topo.out_degree("a"), 1);
        assert_eq!(topo.out_degree("b"), 1);
        assert_eq!(topo.out_degree("c"), 2);
        assert_eq!(topo.out_degree("d"), 0);
        assert_eq!(topo.vocabulary_size(), 5);
        assert_eq!(topo.edge_count(), 4);
    }

    #[test]
    fn repeated_edges_counted_once() {
        let paths = [path(&["a", "b", "a", "b"])];
        let topo = Topology::from_paths(paths.iter().map(Vec::as_slice));
        assert_eq!(topo.out_degree("a"), 1);
        assert_eq!(topo.out_degree("b"), 1);
        assert_eq!(topo.edge_count(), 2);
    }

    #[test]
    fn single_symbol_path_has_no_edges() {
        let paths = [path(&["z"])];
        let topo = Topology::from_paths(paths.iter().map(Vec::as_slice));
        assert_eq!(topo.vocabulary_size(), 1);
        assert_eq!(topo.out_degree("z"), 0);
        assert_eq!(topo.edge_count(), 0);
    }
}
