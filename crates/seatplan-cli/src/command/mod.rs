use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};
use seatplan_optimizer::SeatingSolver;

use self::{serve::ServeArg, solve::SolveArg};
use crate::logging;

mod serve;
mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Number of worker threads per solve (defaults to the number of cores)
    #[arg(long, global = true)]
    threads: Option<NonZeroUsize>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Serve seating requests over HTTP
    Serve(#[clap(flatten)] ServeArg),
    /// Solve a seating request read from a JSON file
    Solve(#[clap(flatten)] SolveArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init();
    let solver = args
        .threads
        .map_or_else(SeatingSolver::default, SeatingSolver::with_workers);
    match args.mode {
        Mode::Serve(arg) => serve::run(&arg, solver)?,
        Mode::Solve(arg) => solve::run(&arg, solver)?,
    }
    Ok(())
}
