//! Multi-order models and iterative order selection.

use std::collections::BTreeMap;

use pathorder_markov::{
    DofAssumption, MarkovError, TransitionEstimator, TransitionModel, degrees_of_freedom,
    log_likelihood,
};
use pathorder_paths::PathStore;
use tracing::{debug, info};

use crate::config::SelectionConfig;
use crate::error::SelectError;
use crate::lrt::ModelSelector;
use crate::result::{LayerSummary, OrderSelection};

/// A stack of fitted transition models of orders `1..=max_order`.
///
/// Layer `k` is the maximum-likelihood order-`k` model of the store it was
/// fitted on. All layers are estimated in one pass over the paths.
#[derive(Debug, Clone)]
pub struct MultiOrderModel {
    max_order: usize,
    layers: BTreeMap<usize, TransitionModel>,
}

impl MultiOrderModel {
    /// Fits layers `1..=max_order` with the default estimator.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidMaxOrder`] if `max_order == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use pathorder_paths::PathStore;
    /// use pathorder_select::MultiOrderModel;
    ///
    /// let store = PathStore::from_paths([(vec!["a", "b", "c"], 1.0)]).unwrap();
    /// let model = MultiOrderModel::fit(&store, 2).unwrap();
    /// assert_eq!(model.layers().len(), 2);
    /// ```
    pub fn fit(store: &PathStore, max_order: usize) -> Result<Self, SelectError> {
        Self::fit_with(store, max_order, &TransitionEstimator::default())
    }

    /// Fits layers `1..=max_order` with `estimator`.
    pub fn fit_with(
        store: &PathStore,
        max_order: usize,
        estimator: &TransitionEstimator,
    ) -> Result<Self, SelectError> {
        if max_order == 0 {
            return Err(SelectError::InvalidMaxOrder { max_order });
        }
        let layers = estimator
            .fit_orders(store, 1..=max_order)
            .into_iter()
            .map(|model| (model.order(), model))
            .collect();
        debug!(max_order, "fitted multi-order model");
        Ok(Self { max_order, layers })
    }

    /// Returns the highest layer order.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Returns all layers keyed by order.
    pub fn layers(&self) -> &BTreeMap<usize, TransitionModel> {
        &self.layers
    }

    /// Returns the layer of order `order`, if present.
    pub fn layer(&self, order: usize) -> Option<&TransitionModel> {
        self.layers.get(&order)
    }

    fn require_layer(&self, order: usize) -> Result<&TransitionModel, SelectError> {
        self.layer(order).ok_or(SelectError::MissingLayer {
            order,
            max_order: self.max_order,
        })
    }

    /// Log-likelihood of `store` under the layer of order `order`.
    pub fn layer_log_likelihood(&self, order: usize, store: &PathStore) -> Result<f64, SelectError> {
        Ok(log_likelihood(self.require_layer(order)?, store)?)
    }

    /// Log-likelihood of every transition of `store` under the whole stack.
    ///
    /// The `i`-th transition of a path (predicting symbol `i`, `i >= 1`)
    /// is scored by layer `min(i, max_order)`, so the first symbols of a
    /// path are predicted by the lower layers and every transition counts
    /// exactly once. The first symbol itself is not scored.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::Markov`] with a degenerate-likelihood error if
    /// a layer gives probability 0 to a transition.
    pub fn multi_order_log_likelihood(&self, store: &PathStore) -> Result<f64, SelectError> {
        let mut ll = 0.0;
        for (path, weight) in store.iter() {
            if weight <= 0.0 {
                continue;
            }
            for i in 1..path.len() {
                let order = i.min(self.max_order);
                let layer = self.require_layer(order)?;
                let context = &path[i - order..i];
                let next = &path[i];
                let p = layer.prob(context, next);
                if p <= 0.0 {
                    return Err(MarkovError::DegenerateLikelihood {
                        context: context.to_vec(),
                        next: next.clone(),
                    }
                    .into());
                }
                ll += weight * p.ln();
            }
        }
        Ok(ll)
    }

    /// Per-layer statistics, including information criteria.
    pub fn summary(
        &self,
        store: &PathStore,
        assumption: DofAssumption,
    ) -> Result<Vec<LayerSummary>, SelectError> {
        let topology = store.topology();
        self.layers
            .iter()
            .map(|(&order, layer)| -> Result<LayerSummary, SelectError> {
                let ll = log_likelihood(layer, store)?;
                let dof = degrees_of_freedom(layer, &topology, assumption);
                let observations = store.weighted_transitions(order);
                Ok(LayerSummary {
                    order,
                    contexts: layer.len(),
                    observations,
                    degrees_of_freedom: dof,
                    log_likelihood: ll,
                    aic: pathorder_stats::aic(ll, dof),
                    bic: pathorder_stats::bic(ll, dof, observations),
                })
            })
            .collect()
    }
}

/// Selects the lowest sufficient Markov order for `store`.
///
/// Shorthand for [`select_order_with`] using `max_order` and `alpha` and
/// defaults otherwise; returns only the selected order.
pub fn select_order(store: &PathStore, max_order: usize, alpha: f64) -> Result<usize, SelectError> {
    let config = SelectionConfig::new()
        .with_max_order(max_order)
        .with_significance_level(alpha);
    select_order_with(store, &config).map(|selection| selection.order)
}

/// Selects the lowest sufficient Markov order for `store`.
///
/// Starting at `k = 1`, tests order `k` against `k + 1` and moves up while
/// the null is rejected at the configured significance level. Selection
/// stops at `k` when:
///
/// - the test does not reject (`p >= alpha`),
/// - `k` reaches the configured maximum order,
/// - the store has no windows of length `k + 2`,
/// - order `k + 1` adds no degrees of freedom over order `k`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SelectError::InvalidMaxOrder`] | `max_order == 0` |
/// | [`SelectError::InvalidSignificance`] | `alpha` outside (0, 1) |
/// | [`SelectError::Markov`] | a model assigns probability 0 to an observed transition |
/// | [`SelectError::ModelingInvariantViolation`] | a test statistic is negative beyond rounding |
#[tracing::instrument(skip(store, config), fields(max_order = config.max_order()))]
pub fn select_order_with(
    store: &PathStore,
    config: &SelectionConfig,
) -> Result<OrderSelection, SelectError> {
    config.validate()?;
    let alpha = config.significance_level();
    let estimator = TransitionEstimator::new(config.estimator().clone());

    let mut order = 1;
    let mut tests = Vec::new();
    while order < config.max_order() {
        if store.weighted_transitions(order + 1) <= 0.0 {
            debug!(order, "no observations at the next order");
            break;
        }
        let outcome = ModelSelector::new(store, order, order + 1)?
            .with_estimator(estimator.clone())
            .with_assumption(config.assumption())
            .fit_null()?
            .fit_alternative()
            .test();
        let result = match outcome {
            Ok(result) => result,
            Err(SelectError::NonPositiveDfDiff { df_diff }) => {
                debug!(order, df_diff, "next order adds no degrees of freedom");
                break;
            }
            Err(e) => return Err(e),
        };
        let rejected = result.rejects_null(alpha);
        tests.push(result);
        if !rejected {
            break;
        }
        order += 1;
    }

    info!(order, tests = tests.len(), "selected order");
    Ok(OrderSelection {
        order,
        significance_level: alpha,
        tests,
    })
}
