//! Statistical helper functions for multi-order model selection.
//!
//! Chi-squared tail probabilities for likelihood-ratio tests (Wilks'
//! theorem) and information criteria for comparing fitted layers.

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Error type for the pathorder-stats crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Returned when a chi-squared distribution cannot be built for `df`.
    ///
    /// The `reason` field is a `String` because statrs errors do not
    /// implement `Clone`.
    #[error("invalid chi-squared degrees of freedom {df}: {reason}")]
    InvalidDegreesOfFreedom {
        /// The rejected degrees of freedom.
        df: f64,
        /// Description from statrs.
        reason: String,
    },
}

/// Upper-tail probability `P(X >= statistic)` of a chi-squared
/// distribution with `df` degrees of freedom.
///
/// Non-positive statistics return 1.0. The tail is evaluated directly, so
/// very large statistics keep their small positive p-values.
///
/// # Errors
///
/// Returns [`StatsError::InvalidDegreesOfFreedom`] when `df` is not finite
/// and positive.
pub fn chi_squared_sf(statistic: f64, df: f64) -> Result<f64, StatsError> {
    let dist = ChiSquared::new(df).map_err(|e| StatsError::InvalidDegreesOfFreedom {
        df,
        reason: e.to_string(),
    })?;
    if statistic <= 0.0 {
        return Ok(1.0);
    }
    Ok(dist.sf(statistic))
}

/// Akaike Information Criterion: `2 * dof - 2 * log_likelihood`.
pub fn aic(log_likelihood: f64, dof: usize) -> f64 {
    2.0 * dof as f64 - 2.0 * log_likelihood
}

/// Bayesian Information Criterion: `dof * ln(n) - 2 * log_likelihood`.
///
/// `n` is the effective number of observations. The penalty is dropped
/// when `n <= 1`.
pub fn bic(log_likelihood: f64, dof: usize, n: f64) -> f64 {
    let penalty = if n > 1.0 { dof as f64 * n.ln() } else { 0.0 };
    penalty - 2.0 * log_likelihood
}
