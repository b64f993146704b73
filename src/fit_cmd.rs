//! Fit command: per-layer statistics of a multi-order model.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use pathorder_markov::{DofAssumption, TransitionEstimator, TransitionModel, fit_null};
use pathorder_paths::{PathStore, Symbol};
use pathorder_select::{LayerSummary, MultiOrderModel};

use crate::cli::FitArgs;
use crate::{config, convert, output};

#[derive(Serialize)]
struct FitReport<'a> {
    max_order: usize,
    paths: usize,
    max_path_len: usize,
    vocabulary: Vec<Symbol>,
    edges: usize,
    layers: Vec<LayerSummary>,
    multi_order_log_likelihood: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrices: Option<&'a BTreeMap<usize, TransitionModel>>,
    /// Order `k` maps to the order `k - 1` layer projected to `k`.
    #[serde(skip_serializing_if = "Option::is_none")]
    null_matrices: Option<BTreeMap<usize, TransitionModel>>,
}

/// Run the fit command.
pub fn run(args: FitArgs) -> Result<()> {
    let _cmd = info_span!("fit").entered();
    let config = config::load(&args.input.config)?;
    let store = convert::build_store(&config.paths, args.input.scale)?;
    let assumption = convert::parse_assumption(&config.model.assumption)?;
    let max_order = args.max_order.unwrap_or(config.model.max_order);
    info!(paths = store.len(), max_order, "fitting multi-order model");

    let estimator = TransitionEstimator::new(convert::build_estimator_config(&config.model));
    let model = MultiOrderModel::fit_with(&store, max_order, &estimator)
        .context("failed to fit multi-order model")?;
    let report = build_report(&store, &model, assumption, args.matrices)?;
    output::write_json(&report, args.input.output.as_deref())
}

fn build_report<'a>(
    store: &PathStore,
    model: &'a MultiOrderModel,
    assumption: DofAssumption,
    matrices: bool,
) -> Result<FitReport<'a>> {
    let layers = model
        .summary(store, assumption)
        .context("failed to summarize layers")?;
    let multi_order_log_likelihood = model
        .multi_order_log_likelihood(store)
        .context("failed to compute multi-order likelihood")?;

    let null_matrices = if matrices {
        let mut nulls = BTreeMap::new();
        for (&order, layer) in model.layers().range(1..model.max_order()) {
            let projected = fit_null(layer, order + 1)
                .with_context(|| format!("failed to project order {order} to {}", order + 1))?;
            nulls.insert(order + 1, projected);
        }
        Some(nulls)
    } else {
        None
    };

    Ok(FitReport {
        max_order: model.max_order(),
        paths: store.len(),
        max_path_len: store.max_path_len(),
        vocabulary: store.vocabulary(),
        edges: store.topology().edge_count(),
        layers,
        multi_order_log_likelihood,
        matrices: matrices.then(|| model.layers()),
        null_matrices,
    })
}
