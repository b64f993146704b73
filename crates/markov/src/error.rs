//! Error types for the pathorder-markov crate.

use pathorder_paths::Symbol;

/// Joins context symbols with commas for error messages.
pub(crate) fn join_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Error type for all fallible operations in the pathorder-markov crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkovError {
    /// Returned when a requested order is inconsistent with its inputs.
    #[error("invalid order: {reason}")]
    InvalidOrder {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a context does not have exactly `order` symbols.
    #[error("context length mismatch: expected {expected} symbols, got {got}")]
    ContextLength {
        /// The model order.
        expected: usize,
        /// Length of the supplied context.
        got: usize,
    },

    /// Returned when a model assigns zero probability to an observed
    /// transition, which would make the log-likelihood `-inf`.
    #[error(
        "degenerate likelihood: model assigns zero probability to observed transition [{}] -> {next}",
        join_symbols(.context)
    )]
    DegenerateLikelihood {
        /// The context of the offending window.
        context: Vec<Symbol>,
        /// The observed next symbol.
        next: Symbol,
    },

    /// Returned when a transition distribution is not a probability vector.
    #[error("invalid distribution: {reason}")]
    InvalidDistribution {
        /// Description of the problem.
        reason: String,
    },
}
