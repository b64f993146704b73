//! Configuration for multi-order model selection.

use pathorder_markov::{DofAssumption, EstimatorConfig};

use crate::error::SelectError;

/// Configuration for [`select_order_with`](crate::select_order_with).
///
/// # Example
///
/// ```
/// use pathorder_select::SelectionConfig;
///
/// let config = SelectionConfig::new()
///     .with_max_order(4)
///     .with_significance_level(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SelectionConfig {
    max_order: usize,
    significance_level: f64,
    assumption: DofAssumption,
    estimator: EstimatorConfig,
}

impl SelectionConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_order = 3`, `significance_level = 0.01`,
    /// `assumption = Paths`, default [`EstimatorConfig`].
    pub fn new() -> Self {
        Self {
            max_order: 3,
            significance_level: 0.01,
            assumption: DofAssumption::Paths,
            estimator: EstimatorConfig::new(),
        }
    }

    /// Sets the highest order considered.
    pub fn with_max_order(mut self, max_order: usize) -> Self {
        self.max_order = max_order;
        self
    }

    /// Sets the significance level of each likelihood-ratio test.
    pub fn with_significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    /// Sets the degrees-of-freedom assumption.
    pub fn with_assumption(mut self, assumption: DofAssumption) -> Self {
        self.assumption = assumption;
        self
    }

    /// Sets the estimator configuration used to fit every layer.
    pub fn with_estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    // --- Accessors ---

    /// Returns the highest order considered.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Returns the significance level.
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Returns the degrees-of-freedom assumption.
    pub fn assumption(&self) -> DofAssumption {
        self.assumption
    }

    /// Returns the estimator configuration.
    pub fn estimator(&self) -> &EstimatorConfig {
        &self.estimator
    }

    /// Validates this configuration.
    ///
    /// Checks that `max_order >= 1` and that the significance level lies in
    /// the open interval (0, 1).
    pub fn validate(&self) -> Result<(), SelectError> {
        if self.max_order == 0 {
            return Err(SelectError::InvalidMaxOrder {
                max_order: self.max_order,
            });
        }
        validate_significance(self.significance_level)
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that `alpha` is a usable significance level.
fn validate_significance(alpha: f64) -> Result<(), SelectError> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(SelectError::InvalidSignificance { alpha });
    }
    Ok(())
}
