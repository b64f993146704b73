//! Result types handed to presentation layers.

use serde::Serialize;

/// Outcome of a likelihood-ratio test between a null model of order
/// `null_order` (projected to `alt_order`) and a fitted alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// Order of the null model before projection.
    pub null_order: usize,
    /// Order of the alternative model.
    pub alt_order: usize,
    /// Log-likelihood of the projected null model.
    pub null_log_likelihood: f64,
    /// Log-likelihood of the alternative model.
    pub alt_log_likelihood: f64,
    /// Degrees of freedom of the null model.
    pub null_dof: usize,
    /// Degrees of freedom of the alternative model.
    pub alt_dof: usize,
    /// `-2 (ln L_null - ln L_alt)`, never negative.
    pub statistic: f64,
    /// `alt_dof - null_dof`, always positive.
    pub df_diff: usize,
    /// Probability of a statistic at least this large under the null.
    pub p_value: f64,
    /// Weighted number of windows both likelihoods were computed over.
    pub observations: f64,
}

impl TestResult {
    /// Returns `true` if the null hypothesis is rejected at level `alpha`.
    pub fn rejects_null(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Outcome of iterative order selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSelection {
    /// The selected order.
    pub order: usize,
    /// Significance level used for every test.
    pub significance_level: f64,
    /// Tests performed, in increasing order.
    pub tests: Vec<TestResult>,
}

/// Per-layer statistics of a multi-order model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    /// Layer order.
    pub order: usize,
    /// Number of contexts with a distribution.
    pub contexts: usize,
    /// Weighted number of windows at this order.
    pub observations: f64,
    /// Free parameters of the layer.
    pub degrees_of_freedom: usize,
    /// Log-likelihood of the layer over its own windows.
    pub log_likelihood: f64,
    /// Akaike Information Criterion.
    pub aic: f64,
    /// Bayesian Information Criterion.
    pub bic: f64,
}
