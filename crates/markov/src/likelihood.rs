//! Likelihoods and degrees of freedom of transition models.
//!
//! All likelihoods are accumulated in log space. A model that gives zero
//! probability to an observed transition yields
//! [`MarkovError::DegenerateLikelihood`] instead of `-inf`.

use pathorder_paths::{PathStore, Topology};

use crate::error::MarkovError;
use crate::transition::{ModelOrigin, TransitionModel};

/// How the number of possible next symbols of a context is counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DofAssumption {
    /// Next symbols are constrained by the first-order topology: a context
    /// can only continue to successors of its final symbol.
    #[default]
    Paths,
    /// Any symbol of the vocabulary can follow any context.
    Ngrams,
}

/// Log-likelihood of `store` under `model`, over the windows of length
/// `model.order() + 1`.
///
/// # Errors
///
/// Returns [`MarkovError::DegenerateLikelihood`] if an observed window has
/// an undefined context or a zero-probability next symbol.
pub fn log_likelihood(model: &TransitionModel, store: &PathStore) -> Result<f64, MarkovError> {
    log_likelihood_over(model, store, model.order())
}

/// Log-likelihood of `store` under `model`, restricted to the sample space
/// of order `sample_order`.
///
/// Windows have length `sample_order + 1`, so the first `sample_order`
/// symbols of every path are never predicted. The model is read at the
/// trailing `model.order()` symbols of each window's context. Models of
/// different orders evaluated with the same `sample_order` are scored on
/// identical observations and their likelihoods are comparable.
///
/// Paths with zero weight carry no observations and are skipped.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`MarkovError::InvalidOrder`] | `sample_order < model.order()` |
/// | [`MarkovError::DegenerateLikelihood`] | an observed transition has probability 0 |
pub fn log_likelihood_over(
    model: &TransitionModel,
    store: &PathStore,
    sample_order: usize,
) -> Result<f64, MarkovError> {
    let k = model.order();
    if sample_order < k {
        return Err(MarkovError::InvalidOrder {
            reason: format!("sample order {sample_order} is below model order {k}"),
        });
    }

    let mut ll = 0.0;
    for (path, weight) in store.iter() {
        if weight <= 0.0 {
            continue;
        }
        for window in path.windows(sample_order + 1) {
            let context = &window[sample_order - k..sample_order];
            let next = &window[sample_order];
            let p = model.prob(context, next);
            if p <= 0.0 {
                return Err(MarkovError::DegenerateLikelihood {
                    context: context.to_vec(),
                    next: next.clone(),
                });
            }
            ll += weight * p.ln();
        }
    }
    Ok(ll)
}

/// Likelihood of `store` under `model`: `exp(log_likelihood)`.
///
/// Underflows to 0.0 for realistic sample sizes; statistical tests work
/// with [`log_likelihood`] instead.
pub fn likelihood(model: &TransitionModel, store: &PathStore) -> Result<f64, MarkovError> {
    log_likelihood(model, store).map(f64::exp)
}

/// Number of free parameters of `model`.
///
/// Each defined context with `d >= 1` possible next symbols contributes
/// `d - 1` parameters, because its probabilities sum to one. Only contexts
/// present in the model count. Under [`DofAssumption::Paths`], `d` is the
/// out-degree of the context's final symbol in `topology`; under
/// [`DofAssumption::Ngrams`] (and for the empty order-0 context) it is the
/// vocabulary size.
///
/// A projection has no parameters of its own: it reports the degrees of
/// freedom of its source model.
pub fn degrees_of_freedom(
    model: &TransitionModel,
    topology: &Topology,
    assumption: DofAssumption,
) -> usize {
    if let ModelOrigin::Projected(source) = model.origin() {
        return degrees_of_freedom(source, topology, assumption);
    }
    model
        .contexts()
        .map(|context| {
            let d = match (assumption, context.last()) {
                (DofAssumption::Paths, Some(last)) => topology.out_degree(last),
                _ => topology.vocabulary_size(),
            };
            d.saturating_sub(1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{fit, fit_null};
    use approx::assert_relative_eq;
    use pathorder_paths::Symbol;

    fn toy() -> PathStore {
        PathStore::from_paths([(vec!["a", "c", "d"], 2.0), (vec!["b", "c", "e"], 2.0)]).unwrap()
    }

    #[test]
    fn toy_first_order_likelihood() {
        let store = toy();
        let model = fit(&store, 1);
        assert_relative_eq!(likelihood(&model, &store).unwrap(), 0.0625, epsilon = 1e-12);
        assert_relative_eq!(
            log_likelihood(&model, &store).unwrap(),
            4.0 * 0.5_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn toy_second_order_likelihood_is_one() {
        let store = toy();
        let model = fit(&store, 2);
        assert_relative_eq!(likelihood(&model, &store).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn toy_null_likelihood_equals_first_order() {
        let store = toy();
        let null = fit_null(&fit(&store, 1), 2).unwrap();
        assert_relative_eq!(likelihood(&null, &store).unwrap(), 0.0625, epsilon = 1e-12);
    }

    #[test]
    fn over_matches_projection() {
        let store = toy();
        let first = fit(&store, 1);
        let null = fit_null(&first, 2).unwrap();
        assert_relative_eq!(
            log_likelihood(&null, &store).unwrap(),
            log_likelihood_over(&first, &store, 2).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn over_rejects_low_sample_order() {
        let store = toy();
        let model = fit(&store, 2);
        assert!(matches!(
            log_likelihood_over(&model, &store, 1),
            Err(MarkovError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn degenerate_likelihood_is_reported() {
        let store = toy();
        let model = fit(&store, 1);
        let other = PathStore::from_paths([(vec!["c", "a"], 1.0)]).unwrap();
        match log_likelihood(&model, &other) {
            Err(MarkovError::DegenerateLikelihood { context, next }) => {
                assert_eq!(context, vec![Symbol::from("c")]);
                assert_eq!(next, Symbol::from("a"));
            }
            other => panic!("expected DegenerateLikelihood, got {other:?}"),
        }
    }

    #[test]
    fn undefined_context_is_degenerate() {
        let model = fit(&toy(), 1);
        let other = PathStore::from_paths([(vec!["d", "a"], 1.0)]).unwrap();
        assert!(matches!(
            log_likelihood(&model, &other),
            Err(MarkovError::DegenerateLikelihood { .. })
        ));
    }

    #[test]
    fn zero_weight_paths_are_ignored() {
        let mut store = toy();
        let model = fit(&store, 1);
        store.add(["q", "r"], 0.0).unwrap();
        assert_relative_eq!(
            log_likelihood(&model, &store).unwrap(),
            4.0 * 0.5_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_sample_space_has_zero_log_likelihood() {
        let store = toy();
        let model = fit(&store, 3);
        assert_eq!(log_likelihood(&model, &store).unwrap(), 0.0);
    }

    #[test]
    fn dof_toy_paths_assumption() {
        let store = toy();
        let topo = store.topology();
        assert_eq!(
            degrees_of_freedom(&fit(&store, 1), &topo, DofAssumption::Paths),
            1
        );
        assert_eq!(
            degrees_of_freedom(&fit(&store, 2), &topo, DofAssumption::Paths),
            2
        );
    }

    #[test]
    fn dof_toy_ngrams_assumption() {
        let store = toy();
        let topo = store.topology();
        // Three order-1 contexts, five symbols: 3 * (5 - 1).
        assert_eq!(
            degrees_of_freedom(&fit(&store, 1), &topo, DofAssumption::Ngrams),
            12
        );
    }

    #[test]
    fn dof_order_zero_uses_vocabulary() {
        let store = toy();
        let topo = store.topology();
        assert_eq!(
            degrees_of_freedom(&fit(&store, 0), &topo, DofAssumption::Paths),
            4
        );
    }

    #[test]
    fn dof_projection_inherits_source() {
        let store = toy();
        let topo = store.topology();
        let first = fit(&store, 1);
        let null = fit_null(&first, 2).unwrap();
        assert_eq!(
            degrees_of_freedom(&null, &topo, DofAssumption::Paths),
            degrees_of_freedom(&first, &topo, DofAssumption::Paths)
        );
    }
}
