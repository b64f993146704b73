//! # pathorder-select
//!
//! Likelihood-ratio testing between nested Markov models of path data and
//! iterative selection of the lowest sufficient order.
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["ModelSelector::new(&store, j, k)?"] -->|".fit_null()?"| B["NullFitted"]
//!     B -->|".fit_alternative()"| C["AlternativeFitted"]
//!     C -->|".test()?"| D["TestResult"]
//!     E["select_order(&store, max_order, alpha)?"] -->|"k = 1, 2, ..."| A
//!     F["MultiOrderModel::fit(&store, max_order)?"] --> G[".summary() / .multi_order_log_likelihood()"]
//! ```
//!
//! ## Two Usage Paths
//!
//! **Single test** (known pair of orders):
//! ```
//! use pathorder_paths::PathStore;
//! use pathorder_select::likelihood_ratio_test;
//!
//! let store = PathStore::from_paths([
//!     (vec!["a", "c", "d"], 2.0),
//!     (vec!["b", "c", "e"], 2.0),
//! ])
//! .unwrap();
//! let result = likelihood_ratio_test(&store, 1, 2).unwrap();
//! assert!(result.p_value < 0.05);
//! ```
//!
//! **Order selection** (unknown order):
//! ```
//! use pathorder_paths::PathStore;
//! use pathorder_select::select_order;
//!
//! let store = PathStore::from_paths([
//!     (vec!["a", "c", "d"], 4.0),
//!     (vec!["b", "c", "e"], 4.0),
//! ])
//! .unwrap();
//! assert_eq!(select_order(&store, 2, 0.05).unwrap(), 2);
//! ```
//!
//! ## Glossary
//!
//! | Symbol | Field | Meaning |
//! |--------|-------|---------|
//! | ln L_0 | [`TestResult::null_log_likelihood`] | Log-likelihood of the projected null model |
//! | ln L_1 | [`TestResult::alt_log_likelihood`] | Log-likelihood of the fitted alternative |
//! | x | [`TestResult::statistic`] | `-2 (ln L_0 - ln L_1)` |
//! | df | [`TestResult::df_diff`] | Degrees of freedom gained by the alternative |
//! | p | [`TestResult::p_value`] | `P(chi2(df) >= x)` |

mod config;
mod error;
mod lrt;
mod multi_order;
mod result;

pub use config::SelectionConfig;
pub use error::{ErrorKind, SelectError};
pub use lrt::{AlternativeFitted, ModelSelector, NullFitted, Unfitted, likelihood_ratio_test};
pub use multi_order::{MultiOrderModel, select_order, select_order_with};
pub use result::{LayerSummary, OrderSelection, TestResult};
