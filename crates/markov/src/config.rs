//! Configuration for transition estimation.

/// Configuration for [`TransitionEstimator`](crate::TransitionEstimator).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use pathorder_markov::EstimatorConfig;
///
/// let config = EstimatorConfig::new()
///     .with_parallel(true)
///     .with_parallel_threshold(256);
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug)]
pub struct EstimatorConfig {
    parallel: bool,
    parallel_threshold: usize,
}

impl EstimatorConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `parallel = false`, `parallel_threshold = 1024`.
    pub fn new() -> Self {
        Self {
            parallel: false,
            parallel_threshold: 1024,
        }
    }

    /// Enables or disables parallel window counting across paths.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the minimum number of distinct paths before counting runs in
    /// parallel. Smaller stores are always counted sequentially.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    // --- Accessors ---

    /// Returns whether parallel counting is enabled.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the minimum store size for parallel counting.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns `true` if a store with `n_paths` distinct paths should be
    /// counted in parallel.
    pub(crate) fn use_parallel(&self, n_paths: usize) -> bool {
        self.parallel && n_paths >= self.parallel_threshold
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EstimatorConfig::new();
        assert!(!cfg.parallel());
        assert_eq!(cfg.parallel_threshold(), 1024);
        assert!(!cfg.use_parallel(1_000_000));
    }

    #[test]
    fn builder_chain() {
        let cfg = EstimatorConfig::new()
            .with_parallel(true)
            .with_parallel_threshold(10);
        assert!(cfg.parallel());
        assert!(!cfg.use_parallel(9));
        assert!(cfg.use_parallel(10));
    }

    #[test]
    fn default_matches_new() {
        let a = EstimatorConfig::default();
        let b = EstimatorConfig::new();
        assert_eq!(a.parallel(), b.parallel());
        assert_eq!(a.parallel_threshold(), b.parallel_threshold());
    }
}
