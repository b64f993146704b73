//! Weighted path storage for multi-order Markov modelling.
//!
//! A [`PathStore`] holds observed symbol sequences ("paths") together with
//! their occurrence weights. Every model in the workspace is fitted against
//! a store, and every likelihood is evaluated over one.
//!
//! # Quick start
//!
//! ```rust
//! use pathorder_paths::PathStore;
//!
//! let mut store = PathStore::new();
//! store.add(["a", "c", "d"], 2.0).unwrap();
//! store.add(["b", "c", "e"], 2.0).unwrap();
//!
//! assert_eq!(store.total_transitions(1), 4);
//! assert_eq!(store.total_transitions(2), 2);
//! assert_eq!(store.topology().out_degree("c"), 2);
//! ```

pub mod error;
pub mod store;
pub mod symbol;
pub mod topology;

pub use error::PathsError;
pub use store::PathStore;
pub use symbol::Symbol;
pub use topology::Topology;
