//! Transition models of arbitrary order and their estimation from paths.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use pathorder_paths::{PathStore, Symbol};
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use crate::config::EstimatorConfig;
use crate::error::{MarkovError, join_symbols};

/// An ordered sequence of `k` symbols preceding a transition.
pub type Context = Vec<Symbol>;

/// Probabilities (or raw counts, while estimating) of each next symbol.
pub type Distribution = BTreeMap<Symbol, f64>;

type CountTable = BTreeMap<Context, Distribution>;

/// Tolerance used when checking that distributions sum to one.
pub const PROB_TOLERANCE: f64 = 1e-9;

/// How a [`TransitionModel`] came to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOrigin {
    /// Maximum-likelihood estimate from a path store.
    Fitted,
    /// Lower-order model re-expressed in a higher-order context space.
    ///
    /// The projection's probabilities are tied to the source model, so it
    /// has exactly the source's free parameters.
    Projected(Box<TransitionModel>),
}

/// A k-th order Markov model: context of `k` symbols to next-symbol
/// distribution.
///
/// Only contexts with at least one outgoing transition have an entry.
/// Transitions out of an absent context are undefined rather than
/// zero-probability.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionModel {
    order: usize,
    rows: BTreeMap<Context, Distribution>,
    origin: ModelOrigin,
}

impl TransitionModel {
    /// Constructs a model directly from its rows.
    pub(crate) fn from_rows(
        order: usize,
        rows: BTreeMap<Context, Distribution>,
        origin: ModelOrigin,
    ) -> Self {
        Self {
            order,
            rows,
            origin,
        }
    }

    /// Returns the model order (context length).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns how the model was built.
    pub fn origin(&self) -> &ModelOrigin {
        &self.origin
    }

    /// Returns the lower-order source model of a projection.
    pub fn source(&self) -> Option<&TransitionModel> {
        match &self.origin {
            ModelOrigin::Fitted => None,
            ModelOrigin::Projected(source) => Some(source),
        }
    }

    /// Returns `true` if the model is a null projection.
    pub fn is_projection(&self) -> bool {
        matches!(self.origin, ModelOrigin::Projected(_))
    }

    /// Number of contexts with a defined distribution.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no context has a defined distribution.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the defined contexts in lexicographic order.
    pub fn contexts(&self) -> impl Iterator<Item = &[Symbol]> {
        self.rows.keys().map(Vec::as_slice)
    }

    /// Iterates over `(context, distribution)` rows in lexicographic order.
    pub fn rows(&self) -> impl Iterator<Item = (&[Symbol], &Distribution)> {
        self.rows.iter().map(|(c, d)| (c.as_slice(), d))
    }

    /// Returns the next-symbol distribution of `context`, if defined.
    pub fn distribution(&self, context: &[Symbol]) -> Option<&Distribution> {
        self.rows.get(context)
    }

    /// Probability of `next` following `context`; 0.0 when undefined.
    pub fn prob(&self, context: &[Symbol], next: &Symbol) -> f64 {
        self.rows
            .get(context)
            .and_then(|d| d.get(next))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of `(context, next)` pairs with positive probability.
    pub fn transition_count(&self) -> usize {
        self.rows
            .values()
            .map(|d| d.values().filter(|&&p| p > 0.0).count())
            .sum()
    }

    /// Validates that every row is a probability distribution.
    ///
    /// Checks context lengths, that all values are finite and in `[0, 1]`,
    /// and that each row sums to 1.0 within [`PROB_TOLERANCE`].
    pub fn validate(&self) -> Result<(), MarkovError> {
        for (context, dist) in &self.rows {
            if context.len() != self.order {
                return Err(MarkovError::ContextLength {
                    expected: self.order,
                    got: context.len(),
                });
            }
            let mut sum = 0.0;
            for (next, &p) in dist {
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(MarkovError::InvalidDistribution {
                        reason: format!("P({next} | {context:?}) = {p} is outside [0, 1]"),
                    });
                }
                sum += p;
            }
            if (sum - 1.0).abs() > PROB_TOLERANCE {
                return Err(MarkovError::InvalidDistribution {
                    reason: format!("row {context:?} sums to {sum}, expected 1.0"),
                });
            }
        }
        Ok(())
    }

    /// Samples the next symbol after `context`, using the cumulative
    /// distribution of its row.
    ///
    /// Returns `None` if the context has no distribution. Falls back to the
    /// row's last symbol if rounding prevents a match.
    pub fn sample(&self, context: &[Symbol], rng: &mut impl rand::Rng) -> Option<Symbol> {
        let dist = self.rows.get(context)?;
        let u: f64 = rng.random();
        let mut cumulative = 0.0;
        for (next, &p) in dist {
            cumulative += p;
            if cumulative >= u {
                return Some(next.clone());
            }
        }
        dist.keys().next_back().cloned()
    }
}

/// Serializes as `{order, origin, source_order, rows}`, where `rows` maps
/// each comma-joined context (`"a,c"`, or `""` at order 0) to its
/// next-symbol distribution.
impl Serialize for TransitionModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let origin = match self.origin {
            ModelOrigin::Fitted => "fitted",
            ModelOrigin::Projected(_) => "projected",
        };
        let rows: BTreeMap<String, &Distribution> = self
            .rows
            .iter()
            .map(|(context, dist)| (join_symbols(context), dist))
            .collect();

        let mut state = serializer.serialize_struct("TransitionModel", 4)?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("origin", origin)?;
        state.serialize_field("source_order", &self.source().map(TransitionModel::order))?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}

/// Builds [`TransitionModel`]s from a [`PathStore`] by relative frequency.
#[derive(Debug, Clone, Default)]
pub struct TransitionEstimator {
    config: EstimatorConfig,
}

impl TransitionEstimator {
    /// Creates an estimator with the given configuration.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Returns the estimator configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Fits the maximum-likelihood model of order `order`.
    ///
    /// Every sliding window of length `order + 1` of every path adds the
    /// path weight to the count of `(first order symbols, last symbol)`.
    /// Each context's counts are then normalised to relative frequencies.
    /// Paths shorter than `order + 1` contribute nothing.
    pub fn fit(&self, store: &PathStore, order: usize) -> TransitionModel {
        self.fit_orders(store, order..=order)
            .pop()
            .unwrap_or_else(|| TransitionModel::from_rows(order, BTreeMap::new(), ModelOrigin::Fitted))
    }

    /// Fits one model per order in `orders` with a single pass over the
    /// paths.
    ///
    /// Each position of each path is visited once and counted for every
    /// order whose context fits before it. The returned models equal
    /// independent calls to [`TransitionEstimator::fit`].
    pub fn fit_orders(&self, store: &PathStore, orders: RangeInclusive<usize>) -> Vec<TransitionModel> {
        if orders.is_empty() {
            return Vec::new();
        }
        let (lo, hi) = (*orders.start(), *orders.end());
        let tables = self.count_windows(store, lo, hi);
        tables
            .into_iter()
            .zip(lo..=hi)
            .map(|(table, order)| {
                let model =
                    TransitionModel::from_rows(order, normalize(table), ModelOrigin::Fitted);
                debug!(
                    order,
                    contexts = model.len(),
                    transitions = model.transition_count(),
                    "fitted transition model"
                );
                model
            })
            .collect()
    }

    /// Counts weighted windows for orders `lo..=hi`.
    fn count_windows(&self, store: &PathStore, lo: usize, hi: usize) -> Vec<CountTable> {
        let n_tables = hi - lo + 1;
        let weighted: Vec<(&[Symbol], f64)> = store.iter().filter(|&(_, w)| w > 0.0).collect();

        if self.config.use_parallel(weighted.len()) {
            debug!(n_paths = weighted.len(), "counting windows in parallel");
            weighted
                .par_iter()
                .fold(
                    || vec![CountTable::new(); n_tables],
                    |mut tables, &(path, weight)| {
                        count_path(path, weight, lo, hi, &mut tables);
                        tables
                    },
                )
                .reduce(|| vec![CountTable::new(); n_tables], merge_tables)
        } else {
            let mut tables = vec![CountTable::new(); n_tables];
            for &(path, weight) in &weighted {
                count_path(path, weight, lo, hi, &mut tables);
            }
            tables
        }
    }
}

/// Adds the windows of one path to the count tables of orders `lo..=hi`.
fn count_path(path: &[Symbol], weight: f64, lo: usize, hi: usize, tables: &mut [CountTable]) {
    for (i, next) in path.iter().enumerate().skip(lo) {
        for k in lo..=hi.min(i) {
            *tables[k - lo]
                .entry(path[i - k..i].to_vec())
                .or_default()
                .entry(next.clone())
                .or_insert(0.0) += weight;
        }
    }
}

/// Sums the counts of `b` into `a`.
fn merge_tables(mut a: Vec<CountTable>, b: Vec<CountTable>) -> Vec<CountTable> {
    for (into, from) in a.iter_mut().zip(b) {
        for (context, nexts) in from {
            let row = into.entry(context).or_default();
            for (next, count) in nexts {
                *row.entry(next).or_insert(0.0) += count;
            }
        }
    }
    a
}

/// Converts counts to relative frequencies, dropping empty contexts.
fn normalize(table: CountTable) -> BTreeMap<Context, Distribution> {
    table
        .into_iter()
        .filter_map(|(context, nexts)| {
            let total: f64 = nexts.values().sum();
            if total <= 0.0 {
                return None;
            }
            let dist = nexts
                .into_iter()
                .filter(|&(_, c)| c > 0.0)
                .map(|(next, c)| (next, c / total))
                .collect();
            Some((context, dist))
        })
        .collect()
}

/// Fits an order-`order` model with the default [`EstimatorConfig`].
pub fn fit(store: &PathStore, order: usize) -> TransitionModel {
    TransitionEstimator::default().fit(store, order)
}

/// Projects a lower-order model into the context space of order `order`.
///
/// For every order-`order` context the projection assigns the lower
/// model's distribution for the context's trailing `lower.order()`
/// symbols, ignoring the leading ones. This is the null hypothesis "no
/// correlation beyond the lower order" in the higher-order parameter space.
///
/// The materialised contexts are all sequences the lower model can
/// generate: sequences whose successive `lower.order() + 1` windows have
/// positive probability and whose trailing symbols form a defined lower
/// context. An order-0 source yields every sequence over its support.
///
/// # Errors
///
/// Returns [`MarkovError::InvalidOrder`] unless `lower.order() < order`.
pub fn fit_null(lower: &TransitionModel, order: usize) -> Result<TransitionModel, MarkovError> {
    let j = lower.order();
    if j >= order {
        return Err(MarkovError::InvalidOrder {
            reason: format!("null order {j} must be below target order {order}"),
        });
    }

    let mut frontier: Vec<Context> = if j == 0 {
        vec![Vec::new()]
    } else {
        lower.contexts().map(<[Symbol]>::to_vec).collect()
    };

    for _ in j..order {
        let mut extended = Vec::new();
        for seq in &frontier {
            let Some(dist) = lower.distribution(&seq[seq.len() - j..]) else {
                continue;
            };
            for (symbol, &p) in dist {
                if p > 0.0 {
                    let mut next = seq.clone();
                    next.push(symbol.clone());
                    extended.push(next);
                }
            }
        }
        frontier = extended;
    }

    let rows: BTreeMap<Context, Distribution> = frontier
        .into_iter()
        .filter_map(|context| {
            let dist = lower.distribution(&context[order - j..])?.clone();
            Some((context, dist))
        })
        .collect();

    debug!(
        source_order = j,
        order,
        contexts = rows.len(),
        "projected null model"
    );

    Ok(TransitionModel::from_rows(
        order,
        rows,
        ModelOrigin::Projected(Box::new(lower.clone())),
    ))
}
