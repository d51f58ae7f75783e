use anyhow::{Context as _, Result};
use kinda_system::ReactionQuery;
use kinda_system::io::{ReportOptions, write_report};

use super::session::{LOAD_STEPS, load_system};
use crate::cli::ReportArgs;
use crate::display::{Context, Progress};
use crate::io::{create_output, describe};
use crate::util::convert::{provenance_label, report_productivity};

pub fn run_report(args: ReportArgs, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, LOAD_STEPS + 1);
    let system = load_system(&args.session, &mut progress)?;

    progress.step("Writing report");
    let options = report_options(&args);
    let target = describe(args.output.as_deref());
    let out = create_output(args.output.as_deref())?;
    write_report(out, &system, &options)
        .with_context(|| format!("Failed to write report: {target}"))?;

    progress.complete_step(
        "Writing report",
        &[
            format!(
                "Rates in /{}/{} ({} entities)",
                options.molarity,
                options.time,
                provenance_label(options.resting_sets)
            ),
            format!("Report → {target}"),
        ],
    );
    progress.finish();

    Ok(())
}

fn report_options(args: &ReportArgs) -> ReportOptions {
    let mut reactions = ReactionQuery::new().provenance(args.provenance.into());
    reactions.productivity = report_productivity(args.productivity);
    if args.any_arity {
        reactions = reactions.any_arity();
    }

    ReportOptions {
        reactions,
        resting_sets: args.provenance.into(),
        molarity: args.units.molarity,
        time: args.units.time,
        prefix: args.prefix.clone(),
    }
}
