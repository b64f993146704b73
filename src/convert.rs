//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};

use pathorder_markov::{DofAssumption, EstimatorConfig};
use pathorder_paths::{PathStore, Symbol};
use pathorder_select::SelectionConfig;

use crate::config::{ModelToml, PathToml};

/// Parses a degrees-of-freedom assumption name into the enum variant.
pub fn parse_assumption(s: &str) -> Result<DofAssumption> {
    match s.to_lowercase().as_str() {
        "paths" => Ok(DofAssumption::Paths),
        "ngrams" => Ok(DofAssumption::Ngrams),
        other => bail!("unknown dof assumption: {other:?}"),
    }
}

/// Parses a comma-separated context such as `"a,b"`.
///
/// An empty string is the empty (order-0) context.
pub fn parse_context(s: &str) -> Vec<Symbol> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Symbol::from)
        .collect()
}

/// Builds a [`PathStore`] from TOML path entries, optionally rescaled.
pub fn build_store(paths: &[PathToml], scale: Option<f64>) -> Result<PathStore> {
    if paths.is_empty() {
        bail!("no paths: add at least one [[paths]] entry to the config");
    }
    let mut store = PathStore::new();
    for (i, path) in paths.iter().enumerate() {
        store
            .add(&path.nodes, path.count)
            .with_context(|| format!("invalid path entry #{}", i + 1))?;
    }
    match scale {
        Some(factor) => store.scale(factor).context("invalid --scale factor"),
        None => Ok(store),
    }
}

/// Builds an [`EstimatorConfig`] from the TOML model configuration.
pub fn build_estimator_config(model: &ModelToml) -> EstimatorConfig {
    EstimatorConfig::new()
        .with_parallel(model.parallel)
        .with_parallel_threshold(model.parallel_threshold)
}

/// Builds a validated [`SelectionConfig`], applying CLI overrides.
pub fn build_selection_config(
    model: &ModelToml,
    max_order: Option<usize>,
    alpha: Option<f64>,
) -> Result<SelectionConfig> {
    let cfg = SelectionConfig::new()
        .with_max_order(max_order.unwrap_or(model.max_order))
        .with_significance_level(alpha.unwrap_or(model.significance_level))
        .with_assumption(parse_assumption(&model.assumption)?)
        .with_estimator(build_estimator_config(model));
    cfg.validate().context("invalid selection settings")?;
    Ok(cfg)
}
