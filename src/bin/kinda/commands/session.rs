use anyhow::{Context, Result, bail};

use kinda_system::io::{import_stats, read_network};
use kinda_system::{PrecomputedStatistics, StatsTable, System, analyze};

use crate::cli::SessionOptions;
use crate::config::build_config;
use crate::display::Progress;
use crate::io::{describe, open_input, stdin_is_tty};

pub const LOAD_STEPS: u8 = 2;

/// Reads the network and statistics documents and runs the analysis pipeline.
pub fn load_system(opts: &SessionOptions, progress: &mut Progress) -> Result<System> {
    if opts.network.is_none() && stdin_is_tty() {
        bail!(
            "No network file specified and stdin is a terminal.\n\nUsage: kinda <COMMAND> --network <FILE> or pipe a network document via stdin."
        );
    }

    progress.step("Reading inputs");
    let config = build_config(opts.config.as_deref(), &opts.overrides)?;

    let network_name = describe(opts.network.as_deref());
    let entities = read_network(open_input(opts.network.as_deref())?)
        .with_context(|| format!("Failed to read network document: {network_name}"))?;

    let mut details = vec![format!(
        "Network {network_name}: {} complexes, {} resting sets, {} condensed reactions",
        entities.complexes.len(),
        entities.resting_sets.len(),
        entities.condensed_reactions.len()
    )];

    let table = match opts.stats.as_deref() {
        Some(path) => {
            let table = import_stats(open_input(Some(path))?).with_context(|| {
                format!("Failed to read statistics document: {}", path.display())
            })?;
            details.push(format!(
                "Statistics {}: {} resting sets, {} reactions",
                path.display(),
                table.resting_sets.len(),
                table.reactions.len()
            ));
            table
        }
        None => {
            details.push("No statistics attached".to_string());
            StatsTable::new()
        }
    };
    if let Some(path) = &opts.config {
        details.push(format!("Configuration {}", path.display()));
    }
    progress.complete_step("Reading inputs", &details);

    progress.step("Reconciling network");
    let system = analyze(entities, None, &PrecomputedStatistics::new(table), &config)
        .context("Analysis failed")?;

    let network = system.network();
    progress.complete_step(
        "Reconciling network",
        &[
            format!(
                "Known: {} resting sets, {} condensed reactions",
                network.resting_sets().len(),
                network.condensed_reactions().len()
            ),
            format!(
                "Spurious: {} resting sets, {} condensed reactions",
                system.spurious_resting_sets().len(),
                system.spurious_condensed_reactions().len()
            ),
        ],
    );

    Ok(system)
}
