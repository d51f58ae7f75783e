mod query;
mod report;
mod session;
mod summary;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Summary(args) => summary::run_summary(args, ctx),
        Command::Reactions(args) => query::run_reactions(args, ctx),
        Command::RestingSets(args) => query::run_resting_sets(args, ctx),
        Command::Complexes(args) => query::run_complexes(args, ctx),
        Command::Report(args) => report::run_report(args, ctx),
    }
}
