use std::io::Write;

use anyhow::Result;
use kinda_system::System;

use super::session::{LOAD_STEPS, load_system};
use crate::cli::SummaryArgs;
use crate::display::{Context, Progress, print_summary};
use crate::io::create_output;

pub fn run_summary(args: SummaryArgs, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, LOAD_STEPS);
    let system = load_system(&args.session, &mut progress)?;
    progress.finish();

    let rows = summary_rows(&system);
    if ctx.interactive {
        print_summary(&rows);
    }
    if ctx.plain_output() {
        let mut out = create_output(None)?;
        for (key, value) in &rows {
            writeln!(out, "{key}\t{value}")?;
        }
        out.flush()?;
    }
    Ok(())
}

fn summary_rows(system: &System) -> Vec<(&'static str, String)> {
    let network = system.network();
    let params = system.kinda_params();
    let stats = system.statistics();

    vec![
        ("Complexes", network.complexes().len().to_string()),
        ("Resting sets", network.resting_sets().len().to_string()),
        ("Detailed reactions", network.detailed_reactions().len().to_string()),
        ("Condensed reactions", network.condensed_reactions().len().to_string()),
        ("Spurious resting sets", system.spurious_resting_sets().len().to_string()),
        (
            "Spurious reactions",
            system.spurious_condensed_reactions().len().to_string(),
        ),
        (
            "Unregistered resting sets",
            system.unregistered_resting_sets().len().to_string(),
        ),
        ("Resting set statistics", stats.resting_sets.len().to_string()),
        ("Reaction statistics", stats.reactions.len().to_string()),
        (
            "Unimolecular reactions",
            if params.enable_unimolecular_reactions {
                "kept"
            } else {
                "excluded"
            }
            .to_string(),
        ),
        ("Max concentration (M)", format!("{:e}", params.max_concentration)),
    ]
}
