//! Weighted collections of observed paths.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::PathsError;
use crate::symbol::Symbol;
use crate::topology::Topology;

/// A mapping from distinct paths to non-negative occurrence weights.
///
/// Iteration order is the lexicographic order of the paths, so every
/// computation driven by a store is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathStore {
    paths: BTreeMap<Vec<Symbol>, f64>,
}

/// Checks that a weight is finite and non-negative.
fn validate_weight(weight: f64) -> Result<(), PathsError> {
    if !weight.is_finite() {
        return Err(PathsError::NonFiniteWeight { weight });
    }
    if weight < 0.0 {
        return Err(PathsError::NegativeWeight { weight });
    }
    Ok(())
}

impl PathStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `(path, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns the first [`PathsError`] raised by [`PathStore::add`].
    pub fn from_paths<P, I, S>(paths: P) -> Result<Self, PathsError>
    where
        P: IntoIterator<Item = (I, f64)>,
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut store = Self::new();
        for (path, weight) in paths {
            store.add(path, weight)?;
        }
        Ok(store)
    }

    /// Inserts a path or increments the weight of an identical stored path.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PathsError::EmptyPath`] | `path` yields no symbols |
    /// | [`PathsError::NegativeWeight`] | `count < 0` |
    /// | [`PathsError::NonFiniteWeight`] | `count` is NaN or infinite |
    pub fn add<I, S>(&mut self, path: I, count: f64) -> Result<(), PathsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        validate_weight(count)?;
        let path: Vec<Symbol> = path.into_iter().map(Into::into).collect();
        if path.is_empty() {
            return Err(PathsError::EmptyPath);
        }
        *self.paths.entry(path).or_insert(0.0) += count;
        Ok(())
    }

    /// Returns a new store with every weight multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`PathsError::InvalidScaleFactor`] unless `factor` is finite
    /// and strictly positive.
    pub fn scale(&self, factor: f64) -> Result<Self, PathsError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PathsError::InvalidScaleFactor { factor });
        }
        let paths = self
            .paths
            .iter()
            .map(|(path, &w)| (path.clone(), w * factor))
            .collect();
        Ok(Self { paths })
    }

    /// Number of `(context, next)` windows available at order `k`.
    ///
    /// A path of length `L` contributes `max(0, L - k)` windows, independent
    /// of its weight. Fitting at order `k` discards the first `k` symbols of
    /// every path, so this count shrinks as the order grows.
    pub fn total_transitions(&self, k: usize) -> usize {
        self.paths.keys().map(|p| p.len().saturating_sub(k)).sum()
    }

    /// Weighted number of windows at order `k` (the effective sample size).
    pub fn weighted_transitions(&self, k: usize) -> f64 {
        self.paths
            .iter()
            .map(|(p, &w)| w * p.len().saturating_sub(k) as f64)
            .sum()
    }

    /// Number of distinct stored paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no path is stored.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates over `(path, weight)` pairs in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&[Symbol], f64)> {
        self.paths.iter().map(|(p, &w)| (p.as_slice(), w))
    }

    /// Returns the stored weight of `path`, or 0.0 if it was never added.
    pub fn weight(&self, path: &[Symbol]) -> f64 {
        self.paths.get(path).copied().unwrap_or(0.0)
    }

    /// Sum of all path weights.
    pub fn total_weight(&self) -> f64 {
        self.paths.values().sum()
    }

    /// Length of the longest stored path, or 0 for an empty store.
    pub fn max_path_len(&self) -> usize {
        self.paths.keys().map(Vec::len).max().unwrap_or(0)
    }

    /// Distinct symbols appearing in any stored path, in sorted order.
    pub fn vocabulary(&self) -> Vec<Symbol> {
        let set: BTreeSet<&Symbol> = self.paths.keys().flatten().collect();
        set.into_iter().cloned().collect()
    }

    /// First-order successor relation of all paths with positive weight.
    pub fn topology(&self) -> Topology {
        Topology::from_paths(
            self.paths
                .iter()
                .filter(|&(_, &w)| w > 0.0)
                .map(|(p, _)| p.as_slice()),
        )
    }
}

impl std::ops::Add for &PathStore {
    type Output = PathStore;

    /// Merges two stores, summing the weights of identical paths.
    fn add(self, rhs: &PathStore) -> PathStore {
        let mut paths = self.paths.clone();
        for (path, &w) in &rhs.paths {
            *paths.entry(path.clone()).or_insert(0.0) += w;
        }
        PathStore { paths }
    }
}
