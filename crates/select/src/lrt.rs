//! Likelihood-ratio test between nested Markov models.
//!
//! The test runs as a typestate chain so that the null model is always
//! fitted and projected before the alternative, and the statistic can only
//! be computed once both exist:
//!
//! ```text
//! ModelSelector<Unfitted> ──fit_null()?──▶ ModelSelector<NullFitted>
//!        ──fit_alternative()──▶ ModelSelector<AlternativeFitted> ──test()?──▶ TestResult
//! ```

use pathorder_markov::{
    DofAssumption, TransitionEstimator, TransitionModel, degrees_of_freedom, fit_null,
    log_likelihood,
};
use pathorder_paths::PathStore;
use tracing::{debug, info};

use crate::error::SelectError;
use crate::result::TestResult;

/// Relative tolerance below zero for the likelihood-ratio statistic.
///
/// Statistics in `[-tol * (1 + |ln L_null|), 0)` are rounding noise and are
/// clamped to zero.
const STATISTIC_TOLERANCE: f64 = 1e-9;

/// Marker: no model fitted yet.
#[derive(Debug, Clone)]
pub struct Unfitted;

/// Marker: the null model has been fitted and projected.
#[derive(Debug, Clone)]
pub struct NullFitted {
    null: TransitionModel,
}

/// Marker: both models are available.
#[derive(Debug, Clone)]
pub struct AlternativeFitted {
    null: TransitionModel,
    alt: TransitionModel,
}

/// Likelihood-ratio test of order `null_order` against `alt_order`.
///
/// # Example
///
/// ```
/// use pathorder_paths::PathStore;
/// use pathorder_select::ModelSelector;
///
/// let store = PathStore::from_paths([
///     (vec!["a", "c", "d"], 2.0),
///     (vec!["b", "c", "e"], 2.0),
/// ])
/// .unwrap();
///
/// let result = ModelSelector::new(&store, 1, 2)
///     .unwrap()
///     .fit_null()
///     .unwrap()
///     .fit_alternative()
///     .test()
///     .unwrap();
/// assert_eq!(result.df_diff, 1);
/// assert!(result.rejects_null(0.05));
/// ```
#[derive(Debug, Clone)]
pub struct ModelSelector<'a, S> {
    store: &'a PathStore,
    null_order: usize,
    alt_order: usize,
    estimator: TransitionEstimator,
    assumption: DofAssumption,
    state: S,
}

impl<'a, S> ModelSelector<'a, S> {
    /// Returns the order of the null model before projection.
    pub fn null_order(&self) -> usize {
        self.null_order
    }

    /// Returns the order of the alternative model.
    pub fn alt_order(&self) -> usize {
        self.alt_order
    }

    /// Returns the degrees-of-freedom assumption.
    pub fn assumption(&self) -> DofAssumption {
        self.assumption
    }

    fn advance<T>(self, state: T) -> ModelSelector<'a, T> {
        ModelSelector {
            store: self.store,
            null_order: self.null_order,
            alt_order: self.alt_order,
            estimator: self.estimator,
            assumption: self.assumption,
            state,
        }
    }
}

impl<'a> ModelSelector<'a, Unfitted> {
    /// Prepares a test of `null_order` against `alt_order` on `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidOrders`] unless `null_order < alt_order`.
    pub fn new(store: &'a PathStore, null_order: usize, alt_order: usize) -> Result<Self, SelectError> {
        if null_order >= alt_order {
            return Err(SelectError::InvalidOrders {
                null_order,
                alt_order,
            });
        }
        Ok(Self {
            store,
            null_order,
            alt_order,
            estimator: TransitionEstimator::default(),
            assumption: DofAssumption::default(),
            state: Unfitted,
        })
    }

    /// Uses `estimator` to fit both models.
    pub fn with_estimator(mut self, estimator: TransitionEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Sets the degrees-of-freedom assumption.
    pub fn with_assumption(mut self, assumption: DofAssumption) -> Self {
        self.assumption = assumption;
        self
    }

    /// Fits the model of order `null_order` and projects it to `alt_order`.
    pub fn fit_null(self) -> Result<ModelSelector<'a, NullFitted>, SelectError> {
        let lower = self.estimator.fit(self.store, self.null_order);
        let null = fit_null(&lower, self.alt_order)?;
        Ok(self.advance(NullFitted { null }))
    }
}

impl<'a> ModelSelector<'a, NullFitted> {
    /// Returns the projected null model.
    pub fn null_model(&self) -> &TransitionModel {
        &self.state.null
    }

    /// Fits the alternative model of order `alt_order`.
    pub fn fit_alternative(self) -> ModelSelector<'a, AlternativeFitted> {
        let alt = self.estimator.fit(self.store, self.alt_order);
        debug!(order = self.alt_order, contexts = alt.len(), "fitted alternative model");
        let null = self.state.null.clone();
        self.advance(AlternativeFitted { null, alt })
    }
}

impl ModelSelector<'_, AlternativeFitted> {
    /// Returns the projected null model.
    pub fn null_model(&self) -> &TransitionModel {
        &self.state.null
    }

    /// Returns the fitted alternative model.
    pub fn alternative_model(&self) -> &TransitionModel {
        &self.state.alt
    }

    /// Runs the likelihood-ratio test.
    ///
    /// Both likelihoods are computed over the windows of length
    /// `alt_order + 1`. The statistic `-2 (ln L_null - ln L_alt)` is
    /// compared against a chi-squared distribution with
    /// `dof(alt) - dof(null)` degrees of freedom.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SelectError::Markov`] | a model assigns probability 0 to an observed transition |
    /// | [`SelectError::ModelingInvariantViolation`] | the statistic is negative beyond rounding |
    /// | [`SelectError::NonPositiveDfDiff`] | the alternative adds no degrees of freedom |
    pub fn test(&self) -> Result<TestResult, SelectError> {
        let AlternativeFitted { null, alt } = &self.state;

        let null_ll = log_likelihood(null, self.store)?;
        let alt_ll = log_likelihood(alt, self.store)?;

        let statistic = likelihood_ratio_statistic(null_ll, alt_ll)?;

        let topology = self.store.topology();
        let null_dof = degrees_of_freedom(null, &topology, self.assumption);
        let alt_dof = degrees_of_freedom(alt, &topology, self.assumption);
        if alt_dof <= null_dof {
            return Err(SelectError::NonPositiveDfDiff {
                df_diff: alt_dof as i64 - null_dof as i64,
            });
        }
        let df_diff = alt_dof - null_dof;

        let p_value = pathorder_stats::chi_squared_sf(statistic, df_diff as f64)?;

        info!(
            null_order = self.null_order,
            alt_order = self.alt_order,
            statistic,
            df_diff,
            p_value,
            "likelihood-ratio test"
        );

        Ok(TestResult {
            null_order: self.null_order,
            alt_order: self.alt_order,
            null_log_likelihood: null_ll,
            alt_log_likelihood: alt_ll,
            null_dof,
            alt_dof,
            statistic,
            df_diff,
            p_value,
            observations: self.store.weighted_transitions(self.alt_order),
        })
    }
}

/// `-2 (ln L_null - ln L_alt)`, with rounding noise below zero clamped.
///
/// # Errors
///
/// Returns [`SelectError::ModelingInvariantViolation`] when the statistic
/// is negative beyond [`STATISTIC_TOLERANCE`] relative to `ln L_null`.
pub(crate) fn likelihood_ratio_statistic(null_ll: f64, alt_ll: f64) -> Result<f64, SelectError> {
    let raw = -2.0 * (null_ll - alt_ll);
    if raw < -STATISTIC_TOLERANCE * (1.0 + null_ll.abs()) {
        return Err(SelectError::ModelingInvariantViolation { statistic: raw });
    }
    Ok(raw.max(0.0))
}

/// Tests order `null_order` against `alt_order` with default settings.
///
/// Shorthand for the full [`ModelSelector`] chain.
pub fn likelihood_ratio_test(
    store: &PathStore,
    null_order: usize,
    alt_order: usize,
) -> Result<TestResult, SelectError> {
    ModelSelector::new(store, null_order, alt_order)?
        .fit_null()?
        .fit_alternative()
        .test()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn toy(weight: f64) -> PathStore {
        PathStore::from_paths([(vec!["a", "c", "d"], weight), (vec!["b", "c", "e"], weight)])
            .unwrap()
    }

    #[test]
    fn statistic_clamps_round_off() {
        let ll = -1000.0;
        let statistic = likelihood_ratio_statistic(ll, ll - 1e-10).unwrap();
        assert_eq!(statistic, 0.0);
        assert_relative_eq!(
            likelihood_ratio_statistic(-3.0, -1.0).unwrap(),
            4.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn statistic_rejects_better_null() {
        let err = likelihood_ratio_statistic(-1.0, -2.0).unwrap_err();
        assert!(matches!(
            err,
            SelectError::ModelingInvariantViolation { statistic } if (statistic + 2.0).abs() < 1e-12
        ));
        assert_eq!(err.kind(), crate::ErrorKind::ModelingInvariantViolation);
    }

    #[test]
    fn rejects_invalid_orders() {
        let store = toy(2.0);
        assert!(matches!(
            ModelSelector::new(&store, 2, 2),
            Err(SelectError::InvalidOrders {
                null_order: 2,
                alt_order: 2
            })
        ));
        assert!(matches!(
            ModelSelector::new(&store, 3, 1),
            Err(SelectError::InvalidOrders { .. })
        ));
    }

    #[test]
    fn toy_first_against_second_order() {
        let result = likelihood_ratio_test(&toy(2.0), 1, 2).unwrap();
        assert_relative_eq!(result.null_log_likelihood, 4.0 * 0.5f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(result.alt_log_likelihood, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.statistic, 8.0 * 2f64.ln(), epsilon = 1e-9);
        assert_eq!(result.null_dof, 1);
        assert_eq!(result.alt_dof, 2);
        assert_eq!(result.df_diff, 1);
        assert_relative_eq!(result.p_value, 0.0185, epsilon = 5e-4);
        assert_relative_eq!(result.observations, 4.0);
    }

    #[test]
    fn more_observations_lower_p_value() {
        let single = likelihood_ratio_test(&toy(2.0), 1, 2).unwrap();
        let doubled = likelihood_ratio_test(&toy(4.0), 1, 2).unwrap();
        assert_relative_eq!(doubled.statistic, 2.0 * single.statistic, epsilon = 1e-9);
        assert!(doubled.p_value < single.p_value);
        assert!(doubled.rejects_null(0.01));
    }

    #[test]
    fn typestate_exposes_models() {
        let store = toy(2.0);
        let null_fitted = ModelSelector::new(&store, 1, 2).unwrap().fit_null().unwrap();
        assert_eq!(null_fitted.null_model().order(), 2);
        assert!(null_fitted.null_model().is_projection());

        let both = null_fitted.fit_alternative();
        assert_eq!(both.alternative_model().order(), 2);
        assert!(!both.alternative_model().is_projection());
        assert_eq!(both.null_order(), 1);
        assert_eq!(both.alt_order(), 2);
    }

    #[test]
    fn ngram_assumption_counts_vocabulary() {
        let store = toy(2.0);
        let result = ModelSelector::new(&store, 1, 2)
            .unwrap()
            .with_assumption(DofAssumption::Ngrams)
            .fit_null()
            .unwrap()
            .fit_alternative()
            .test();
        // V = 5: order 1 has contexts a, b, c (12); order 2 has (a,c), (b,c) (8).
        assert!(matches!(
            result,
            Err(SelectError::NonPositiveDfDiff { df_diff: -4 })
        ));
    }

    #[test]
    fn identical_structure_has_no_dof_gain() {
        // A single chain: every context continues one way at every order.
        let store = PathStore::from_paths([(vec!["a", "b", "c", "d"], 3.0)]).unwrap();
        let result = likelihood_ratio_test(&store, 1, 2);
        assert!(matches!(
            result,
            Err(SelectError::NonPositiveDfDiff { df_diff: 0 })
        ));
    }
}
