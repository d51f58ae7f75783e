use std::io::Write;

use anyhow::Result;
use kinda_system::{
    Complex, ComplexQuery, CondensedReaction, Match, Provenance, ReactionQuery, RestingSet,
    RestingSetQuery, System,
};

use super::session::{LOAD_STEPS, load_system};
use crate::cli::{ComplexesArgs, ReactionFilter, ReactionsArgs, RestingSetFilter, RestingSetsArgs};
use crate::display::{Context, Progress, print_complexes, print_reactions, print_resting_sets};
use crate::io::create_output;
use crate::util::convert::productivity;
use crate::util::text::sci;

pub fn run_reactions(args: ReactionsArgs, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, LOAD_STEPS + 1);
    let system = load_system(&args.session, &mut progress)?;

    progress.step("Querying condensed reactions");
    let query = reaction_query(&system, &args.filter)?;
    let found = if args.one {
        single(system.find_reaction(&query)?)
    } else {
        (system.query_reactions(&query), None)
    };
    progress.complete_step("Querying condensed reactions", &details(&query, &found));
    progress.finish();

    let (reactions, _) = found;
    if ctx.interactive {
        print_reactions(&system, &reactions);
    }
    if ctx.plain_output() {
        let mut out = create_output(None)?;
        for rxn in &reactions {
            writeln!(out, "{}", reaction_line(&system, rxn))?;
        }
        out.flush()?;
    }
    Ok(())
}

pub fn run_resting_sets(args: RestingSetsArgs, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, LOAD_STEPS + 1);
    let system = load_system(&args.session, &mut progress)?;

    progress.step("Querying resting sets");
    let query = resting_set_query(&system, &args.filter)?;
    let found = if args.one {
        single(system.find_resting_set(&query)?)
    } else {
        (system.query_resting_sets(&query), None)
    };
    progress.complete_step("Querying resting sets", &details(&query, &found));
    progress.finish();

    let (resting_sets, _) = found;
    if ctx.interactive {
        print_resting_sets(&system, &resting_sets);
    }
    if ctx.plain_output() {
        let mut out = create_output(None)?;
        for rs in &resting_sets {
            writeln!(out, "{}", resting_set_line(&system, rs))?;
        }
        out.flush()?;
    }
    Ok(())
}

pub fn run_complexes(args: ComplexesArgs, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, LOAD_STEPS + 1);
    let system = load_system(&args.session, &mut progress)?;

    progress.step("Querying complexes");
    let mut query = ComplexQuery::new();
    query.name = args.name.clone();
    let found = if args.one {
        single(system.find_complex(&query)?)
    } else {
        (system.query_complexes(&query), None)
    };
    progress.complete_step("Querying complexes", &details(&query, &found));
    progress.finish();

    let (complexes, _) = found;
    if ctx.interactive {
        print_complexes(&complexes);
    }
    if ctx.plain_output() {
        let mut out = create_output(None)?;
        for complex in &complexes {
            writeln!(out, "{}", complex_line(complex))?;
        }
        out.flush()?;
    }
    Ok(())
}

/// A singular lookup as a one-element list, plus the match count when ambiguous.
fn single<T>(found: Match<T>) -> (Vec<T>, Option<usize>) {
    let ambiguous = found.is_ambiguous().then(|| found.count());
    (vec![found.into_inner()], ambiguous)
}

fn details<T>(query: &dyn std::fmt::Display, found: &(Vec<T>, Option<usize>)) -> Vec<String> {
    let mut lines = vec![format!("Filter: {query}")];
    match found {
        (_, Some(count)) => lines.push(format!("{count} matched, showing the first")),
        (items, None) => lines.push(format!("{} matched", items.len())),
    }
    lines
}

/// Looks up a resting set of either provenance by its exact name.
fn resting_set_named(system: &System, name: &str) -> Result<RestingSet> {
    let query = RestingSetQuery::new()
        .name(name)
        .provenance(Provenance::Any);
    let rs = system
        .find_resting_set(&query)?
        .strict("resting set", &query)?;
    Ok(rs.clone())
}

fn reaction_query(system: &System, filter: &ReactionFilter) -> Result<ReactionQuery> {
    let reactants = filter
        .reactants
        .iter()
        .map(|name| resting_set_named(system, name))
        .collect::<Result<Vec<_>>>()?;
    let products = filter
        .products
        .iter()
        .map(|name| resting_set_named(system, name))
        .collect::<Result<Vec<_>>>()?;

    let mut query = ReactionQuery::new()
        .reactants(reactants)
        .products(products)
        .arity((!filter.any_arity).then_some(filter.arity))
        .provenance(filter.provenance.into());
    query.productivity = productivity(filter.productive, filter.unproductive);
    Ok(query)
}

fn resting_set_query(system: &System, filter: &RestingSetFilter) -> Result<RestingSetQuery> {
    let mut query = RestingSetQuery::new().provenance(filter.provenance.into());

    if let Some(name) = &filter.name {
        query = query.name(name);
    }
    if let Some(name) = &filter.complex {
        let complex = system
            .find_complex(&ComplexQuery::new().name(name))?
            .strict("complex", name)?;
        query = query.complex(complex.clone());
    }
    if let Some(name) = &filter.complex_name {
        query = query.complex_name(name);
    }
    for strand in &filter.strands {
        query = query.strand(strand);
    }
    Ok(query)
}

fn origin(spurious: bool) -> &'static str {
    if spurious { "spurious" } else { "known" }
}

fn reaction_line(system: &System, rxn: &CondensedReaction) -> String {
    let spurious = system.spurious_condensed_reactions().contains(rxn);
    match system.statistics().reactions.get(rxn) {
        Some(stats) => format!(
            "{rxn}\t{}\tk1={}\tk2={}",
            origin(spurious),
            sci(stats.k1),
            sci(stats.k2)
        ),
        None => format!("{rxn}\t{}", origin(spurious)),
    }
}

fn resting_set_line(system: &System, rs: &RestingSet) -> String {
    let spurious = system.spurious_resting_sets().contains(rs);
    let complexes = rs
        .complexes()
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(",");
    match system.statistics().resting_sets.get(rs) {
        Some(stats) => format!(
            "{}\t{}\t{complexes}\tprob={:.6}",
            rs.name,
            origin(spurious),
            stats.conformation_probability()
        ),
        None => format!("{}\t{}\t{complexes}", rs.name, origin(spurious)),
    }
}

fn complex_line(complex: &Complex) -> String {
    format!(
        "{}\t{}\t{}",
        complex.name,
        complex.strands.join("+"),
        complex.structure
    )
}
