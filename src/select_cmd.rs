//! Select command: iterated likelihood-ratio tests up to a maximum order.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use pathorder_select::select_order_with;

use crate::cli::SelectArgs;
use crate::{config, convert, output};

/// Run the select command.
pub fn run(args: SelectArgs) -> Result<()> {
    let _cmd = info_span!("select").entered();
    let config = config::load(&args.input.config)?;
    let store = convert::build_store(&config.paths, args.input.scale)?;
    let selection_cfg =
        convert::build_selection_config(&config.model, args.max_order, args.alpha)?;

    let selection = select_order_with(&store, &selection_cfg).context("order selection failed")?;
    info!(order = selection.order, "optimal order");

    output::write_json(&selection, args.input.output.as_deref())
}
