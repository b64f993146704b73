mod cli;
mod config;
mod convert;
mod fit_cmd;
mod logging;
mod output;
mod select_cmd;
mod simulate_cmd;
mod test_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Fit(args) => fit_cmd::run(args),
        Command::Test(args) => test_cmd::run(args),
        Command::Select(args) => select_cmd::run(args),
        Command::Simulate(args) => simulate_cmd::run(args),
    }
}
