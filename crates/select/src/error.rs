//! Error types for the pathorder-select crate.

use pathorder_markov::MarkovError;
use pathorder_stats::StatsError;

/// Broad classification of a [`SelectError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied inconsistent or out-of-range arguments.
    InvalidArgument,
    /// A model gives zero probability to an observed transition.
    DegenerateLikelihood,
    /// An internal consistency check failed; indicates a defect.
    ModelingInvariantViolation,
}

/// Error type for all fallible operations in the pathorder-select crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SelectError {
    /// Returned when the null order is not strictly below the alternative.
    #[error("invalid orders: null order {null_order} must be below alternative order {alt_order}")]
    InvalidOrders {
        /// Order of the null model.
        null_order: usize,
        /// Order of the alternative model.
        alt_order: usize,
    },

    /// Returned when a multi-order model is requested without layers.
    #[error("invalid max order: {max_order} (must be >= 1)")]
    InvalidMaxOrder {
        /// The rejected maximum order.
        max_order: usize,
    },

    /// Returned when the significance level is outside (0, 1).
    #[error("invalid significance level: {alpha} (must be in (0, 1))")]
    InvalidSignificance {
        /// The rejected level.
        alpha: f64,
    },

    /// Returned when the alternative has no more free parameters than the
    /// null model, so the chi-squared test is undefined.
    #[error("likelihood-ratio test undefined: degrees of freedom difference is {df_diff} (must be > 0)")]
    NonPositiveDfDiff {
        /// `dof(alternative) - dof(null)`.
        df_diff: i64,
    },

    /// Returned when a layer outside `1..=max_order` is requested.
    #[error("no layer of order {order} (max order is {max_order})")]
    MissingLayer {
        /// The requested order.
        order: usize,
        /// The multi-order model's maximum order.
        max_order: usize,
    },

    /// Returned when the likelihood-ratio statistic is negative, which can
    /// only happen if the null model is not nested in the alternative.
    #[error("modeling invariant violated: negative likelihood-ratio statistic {statistic}")]
    ModelingInvariantViolation {
        /// The offending statistic.
        statistic: f64,
    },

    /// Returned when the chi-squared distribution cannot be constructed.
    #[error("chi-squared distribution failed: {0}")]
    Distribution(#[from] StatsError),

    /// Propagated from model estimation or likelihood evaluation.
    #[error(transparent)]
    Markov(#[from] MarkovError),
}

impl SelectError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOrders { .. }
            | Self::InvalidMaxOrder { .. }
            | Self::InvalidSignificance { .. }
            | Self::NonPositiveDfDiff { .. }
            | Self::MissingLayer { .. } => ErrorKind::InvalidArgument,
            Self::Markov(MarkovError::DegenerateLikelihood { .. }) => {
                ErrorKind::DegenerateLikelihood
            }
            Self::Markov(_) => ErrorKind::InvalidArgument,
            Self::ModelingInvariantViolation { .. } | Self::Distribution(_) => {
                ErrorKind::ModelingInvariantViolation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathorder_paths::Symbol;

    #[test]
    fn error_invalid_orders() {
        let e = SelectError::InvalidOrders {
            null_order: 2,
            alt_order: 1,
        };
        assert_eq!(
            e.to_string(),
            "invalid orders: null order 2 must be below alternative order 1"
        );
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn error_invalid_significance() {
        let e = SelectError::InvalidSignificance { alpha: 1.5 };
        assert_eq!(
            e.to_string(),
            "invalid significance level: 1.5 (must be in (0, 1))"
        );
    }

    #[test]
    fn error_non_positive_df_diff() {
        let e = SelectError::NonPositiveDfDiff { df_diff: -2 };
        assert_eq!(
            e.to_string(),
            "likelihood-ratio test undefined: degrees of freedom difference is -2 (must be > 0)"
        );
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn error_modeling_invariant_violation() {
        let e = SelectError::ModelingInvariantViolation { statistic: -0.5 };
        assert_eq!(
            e.to_string(),
            "modeling invariant violated: negative likelihood-ratio statistic -0.5"
        );
        assert_eq!(e.kind(), ErrorKind::ModelingInvariantViolation);
    }

    #[test]
    fn degenerate_likelihood_kind() {
        let e: SelectError = MarkovError::DegenerateLikelihood {
            context: vec![Symbol::from("c")],
            next: Symbol::from("a"),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::DegenerateLikelihood);
        assert!(e.to_string().starts_with("degenerate likelihood"));
    }

    #[test]
    fn markov_order_error_is_invalid_argument() {
        let e: SelectError = MarkovError::InvalidOrder {
            reason: "x".to_string(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn distribution_error_kind() {
        let e: SelectError = StatsError::InvalidDegreesOfFreedom {
            df: 0.0,
            reason: "x".to_string(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::ModelingInvariantViolation);
        assert!(e.to_string().starts_with("chi-squared distribution failed"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<SelectError>();
    }
}
