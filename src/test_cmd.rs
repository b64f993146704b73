//! Test command: one likelihood-ratio test between two orders.

use anyhow::{Context, Result};
use tracing::info_span;

use pathorder_markov::TransitionEstimator;
use pathorder_select::ModelSelector;

use crate::cli::TestArgs;
use crate::{config, convert, output};

/// Run the test command.
pub fn run(args: TestArgs) -> Result<()> {
    let _cmd = info_span!("test", null = args.null_order, alt = args.alt_order).entered();
    let config = config::load(&args.input.config)?;
    let store = convert::build_store(&config.paths, args.input.scale)?;
    let assumption = convert::parse_assumption(&config.model.assumption)?;
    let estimator = TransitionEstimator::new(convert::build_estimator_config(&config.model));

    let result = ModelSelector::new(&store, args.null_order, args.alt_order)?
        .with_estimator(estimator)
        .with_assumption(assumption)
        .fit_null()?
        .fit_alternative()
        .test()
        .with_context(|| {
            format!(
                "likelihood-ratio test of order {} against {} failed",
                args.null_order, args.alt_order
            )
        })?;

    output::write_json(&result, args.input.output.as_deref())
}
