//! Error types for the pathorder-paths crate.

/// Error type for all fallible operations in the pathorder-paths crate.
///
/// Every variant signals an invalid argument; the store is left untouched
/// when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathsError {
    /// Returned when a path without symbols is added.
    #[error("path is empty")]
    EmptyPath,

    /// Returned when a path weight is negative.
    #[error("negative path weight: {weight}")]
    NegativeWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// Returned when a path weight is NaN or infinite.
    #[error("non-finite path weight: {weight}")]
    NonFiniteWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// Returned when a scale factor is not finite and positive.
    #[error("invalid scale factor: {factor} (must be finite and > 0)")]
    InvalidScaleFactor {
        /// The rejected factor.
        factor: f64,
    },
}
