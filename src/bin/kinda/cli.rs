use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kinda_system::io::{Molarity, TimeUnit};

#[derive(Parser)]
#[command(
    name = "kinda",
    about = "Reconcile and query DNA strand-displacement reaction networks",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize the reconciled network and attached statistics
    #[command(visible_alias = "s")]
    Summary(SummaryArgs),

    /// List condensed reactions matching filters
    #[command(visible_alias = "r")]
    Reactions(ReactionsArgs),

    /// List resting sets matching filters
    #[command(visible_alias = "rs")]
    RestingSets(RestingSetsArgs),

    /// List complexes matching filters
    #[command(visible_alias = "c")]
    Complexes(ComplexesArgs),

    /// Write a two-step rate report for condensed reactions
    Report(ReportArgs),
}

impl Command {
    pub fn session(&self) -> &SessionOptions {
        match self {
            Command::Summary(args) => &args.session,
            Command::Reactions(args) => &args.session,
            Command::RestingSets(args) => &args.session,
            Command::Complexes(args) => &args.session,
            Command::Report(args) => &args.session,
        }
    }
}

/// Input options shared by all commands.
#[derive(Args)]
pub struct SessionOptions {
    /// Network document (JSON; stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub network: Option<PathBuf>,

    /// Statistics document (JSON) to attach to the network
    #[arg(short, long, value_name = "FILE")]
    pub stats: Option<PathBuf>,

    /// Configuration overrides (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub overrides: ConfigOptions,
}

/// Command-line overrides of the `[kinda]` configuration group.
#[derive(Args)]
#[command(next_help_heading = "Configuration")]
pub struct ConfigOptions {
    /// Keep condensed reactions that do not have exactly two reactants
    #[arg(long = "unimolecular")]
    pub enable_unimolecular_reactions: bool,

    /// Default maximum resting-set concentration (M)
    #[arg(long, value_name = "MOLAR")]
    pub max_concentration: Option<f64>,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub session: SessionOptions,
}

#[derive(Args)]
pub struct ReactionsArgs {
    #[command(flatten)]
    pub session: SessionOptions,

    #[command(flatten)]
    pub filter: ReactionFilter,

    /// Print a single reaction (the first match)
    #[arg(long)]
    pub one: bool,
}

/// Condensed reaction filters.
#[derive(Args)]
#[command(next_help_heading = "Reaction Filters")]
pub struct ReactionFilter {
    /// Resting set that must appear among the reactants, repeatable
    #[arg(long = "reactant", value_name = "NAME", action = clap::ArgAction::Append)]
    pub reactants: Vec<String>,

    /// Resting set that must appear among the products, repeatable
    #[arg(long = "product", value_name = "NAME", action = clap::ArgAction::Append)]
    pub products: Vec<String>,

    /// Exact number of reactants
    #[arg(long, value_name = "N", default_value = "2", conflicts_with = "any_arity")]
    pub arity: usize,

    /// Disable the reactant count filter
    #[arg(long)]
    pub any_arity: bool,

    /// Keep only reactions that change composition
    #[arg(long, conflicts_with = "unproductive")]
    pub productive: bool,

    /// Keep only reactions whose reactants and products contain each other
    #[arg(long)]
    pub unproductive: bool,

    /// Known, spurious, or both
    #[arg(long, value_name = "ORIGIN", default_value = "any")]
    pub provenance: Provenance,
}

#[derive(Args)]
pub struct RestingSetsArgs {
    #[command(flatten)]
    pub session: SessionOptions,

    #[command(flatten)]
    pub filter: RestingSetFilter,

    /// Print a single resting set (the first match)
    #[arg(long)]
    pub one: bool,
}

/// Resting set filters.
#[derive(Args)]
#[command(next_help_heading = "Resting Set Filters")]
pub struct RestingSetFilter {
    /// Resting set name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Known complex that must belong to the resting set
    #[arg(long, value_name = "NAME")]
    pub complex: Option<String>,

    /// Name of some complex in the resting set (known or not)
    #[arg(long, value_name = "NAME")]
    pub complex_name: Option<String>,

    /// Strand the resting set must contain, repeatable
    #[arg(long = "strand", value_name = "NAME", action = clap::ArgAction::Append)]
    pub strands: Vec<String>,

    /// Known, spurious, or both
    #[arg(long, value_name = "ORIGIN", default_value = "known")]
    pub provenance: Provenance,
}

#[derive(Args)]
pub struct ComplexesArgs {
    #[command(flatten)]
    pub session: SessionOptions,

    /// Complex name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Print a single complex (the first match)
    #[arg(long)]
    pub one: bool,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub session: SessionOptions,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub units: UnitOptions,

    /// Name intermediates PREFIX0, PREFIX1, ... instead of after their reaction
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Entities to report: known, spurious, or both
    #[arg(long, value_name = "ORIGIN", default_value = "known")]
    pub provenance: Provenance,

    /// Reactions to report by productivity
    #[arg(long, value_name = "KIND", default_value = "productive")]
    pub productivity: ReactionKind,

    /// Include reactions that do not have exactly two reactants
    #[arg(long)]
    pub any_arity: bool,
}

/// Rate constant units.
#[derive(Args)]
#[command(next_help_heading = "Units")]
pub struct UnitOptions {
    /// Concentration unit (M, mM, uM, nM)
    #[arg(long, value_name = "UNIT", default_value = "M")]
    pub molarity: Molarity,

    /// Time unit (s, m, h)
    #[arg(long, value_name = "UNIT", default_value = "s")]
    pub time: TimeUnit,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum Provenance {
    /// Given or enumerated entities
    Known,
    /// Entities only seen by the statistics step
    Spurious,
    /// Both
    #[default]
    Any,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum ReactionKind {
    /// Reactions that change composition
    #[default]
    Productive,
    /// Reactions whose reactants and products contain each other
    Unproductive,
    /// Every reaction
    All,
}

pub fn parse() -> Cli {
    Cli::parse()
}
