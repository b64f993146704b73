//! Higher-order Markov chain models for path data.
//!
//! This crate estimates k-th order transition models from weighted paths,
//! projects lower-order models into higher-order context spaces, and scores
//! models by log-likelihood and degrees of freedom.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  PathStore   │────▶│  transition    │────▶│   likelihood     │
//!  │  (windows)   │     │  (estimate P)  │     │  (ln L, dof)     │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//!                              │
//!                              ▼
//!                       ┌────────────────┐
//!                       │   simulate     │
//!                       │  (draw walks)  │
//!                       └────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use pathorder_markov::{fit, fit_null, likelihood};
//! use pathorder_paths::PathStore;
//!
//! let store = PathStore::from_paths([
//!     (vec!["a", "c", "d"], 2.0),
//!     (vec!["b", "c", "e"], 2.0),
//! ])
//! .unwrap();
//!
//! let first = fit(&store, 1);
//! let null = fit_null(&first, 2).unwrap();
//! assert!((likelihood(&first, &store).unwrap() - 0.0625).abs() < 1e-12);
//! assert!((likelihood(&null, &store).unwrap() - 0.0625).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
pub mod likelihood;
pub mod simulate;
pub mod transition;

pub use config::EstimatorConfig;
pub use error::MarkovError;
pub use likelihood::{
    DofAssumption, degrees_of_freedom, likelihood, log_likelihood, log_likelihood_over,
};
pub use simulate::simulate_walk;
pub use transition::{
    Context, Distribution, ModelOrigin, PROB_TOLERANCE, TransitionEstimator, TransitionModel,
    fit, fit_null,
};
