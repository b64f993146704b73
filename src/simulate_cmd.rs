//! Simulate command: draw a random walk from a fitted model.

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, info_span};

use pathorder_markov::{TransitionEstimator, simulate_walk};
use pathorder_paths::Symbol;

use crate::cli::SimulateArgs;
use crate::{config, convert, output};

#[derive(Serialize)]
struct WalkReport {
    order: usize,
    seed: Option<u64>,
    walk: Vec<Symbol>,
}

/// Run the simulate command.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate", order = args.order).entered();
    let config = config::load(&args.input.config)?;
    let store = convert::build_store(&config.paths, args.input.scale)?;
    let estimator = TransitionEstimator::new(convert::build_estimator_config(&config.model));
    let model = estimator.fit(&store, args.order);

    let start = match args.start.as_deref() {
        Some(s) => convert::parse_context(s),
        None => match model.contexts().next() {
            Some(context) => context.to_vec(),
            None => bail!("no order-{} context observed; cannot start a walk", args.order),
        },
    };

    let seed = args.seed.or(config.model.seed);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let walk = simulate_walk(&model, &start, args.steps, &mut rng)?;
    info!(length = walk.len(), "walk simulated");

    let report = WalkReport {
        order: args.order,
        seed,
        walk,
    };
    output::write_json(&report, args.input.output.as_deref())
}
