//! Plain-text rate report.
//!
//! Every condensed reaction `A + B -> C` is written as a pair of elementary
//! reactions through an intermediate species:
//!
//! ```text
//! reaction [k1 =        0.002 +/-       0.0001 /nM/s] A + B -> A_B_to_C
//! reaction [k2 =          0.5 +/-         0.01 /s  ] A_B_to_C -> C
//! ```
//!
//! Reactions whose rates were never observed are written commented out.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use super::error::Error;
use crate::analysis::{Provenance, ReactionQuery, RestingSetQuery, System};
use crate::model::reaction::CondensedReaction;
use crate::model::resting_set::RestingSet;

/// Concentration unit of reported rate constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Molarity {
    #[default]
    M,
    MilliM,
    MicroM,
    NanoM,
}

impl Molarity {
    /// Size of one unit, in molar.
    pub fn in_molar(self) -> f64 {
        match self {
            Molarity::M => 1.0,
            Molarity::MilliM => 1e-3,
            Molarity::MicroM => 1e-6,
            Molarity::NanoM => 1e-9,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Molarity::M => "M",
            Molarity::MilliM => "mM",
            Molarity::MicroM => "uM",
            Molarity::NanoM => "nM",
        }
    }
}

impl FromStr for Molarity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Molarity::M),
            "mM" => Ok(Molarity::MilliM),
            "uM" => Ok(Molarity::MicroM),
            "nM" => Ok(Molarity::NanoM),
            other => Err(Error::UnsupportedUnit {
                quantity: "molarity",
                unit: other.to_string(),
                supported: "M, mM, uM, nM",
            }),
        }
    }
}

impl fmt::Display for Molarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Time unit of reported rate constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub fn in_seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(TimeUnit::Seconds),
            "m" => Ok(TimeUnit::Minutes),
            "h" => Ok(TimeUnit::Hours),
            other => Err(Error::UnsupportedUnit {
                quantity: "time",
                unit: other.to_string(),
                supported: "s, m, h",
            }),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Condensed reactions to report.
    pub reactions: ReactionQuery,
    /// Resting sets to report probabilities for.
    pub resting_sets: Provenance,
    pub molarity: Molarity,
    pub time: TimeUnit,
    /// Names intermediates `prefix0`, `prefix1`, ... instead of after the reaction.
    pub prefix: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            reactions: ReactionQuery::new()
                .provenance(Provenance::Known)
                .productive(),
            resting_sets: Provenance::Known,
            molarity: Molarity::default(),
            time: TimeUnit::default(),
            prefix: None,
        }
    }
}

impl ReportOptions {
    /// Converts a rate in /M^(order)/s to the configured units.
    fn convert(&self, rate: f64, order: usize) -> f64 {
        rate * self.time.in_seconds() * self.molarity.in_molar().powi(order as i32)
    }

    fn unit_label(&self, order: usize) -> String {
        let mut label = format!("/{}", self.molarity).repeat(order);
        label.push('/');
        label.push_str(self.time.symbol());
        label
    }

    fn intermediate(&self, index: usize, rxn: &CondensedReaction) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{index}"),
            None => format!(
                "{}_to_{}",
                sorted_names(rxn.reactants()),
                sorted_names(rxn.products())
            ),
        }
    }
}

/// Writes the rate report for `system`.
pub fn write_report<W: Write>(
    mut writer: W,
    system: &System,
    options: &ReportOptions,
) -> Result<(), Error> {
    writeln!(writer)?;
    writeln!(writer, "# Condensed reactions")?;
    for (index, rxn) in system.query_reactions(&options.reactions).into_iter().enumerate() {
        let inter = options.intermediate(index, rxn);
        let reactants = join_names(rxn.reactants());
        let products = join_names(rxn.products());

        let Ok(stats) = system.stats(rxn) else {
            writeln!(writer, "# reaction {reactants} -> {products}: no statistics")?;
            continue;
        };

        let order = rxn.arity().saturating_sub(1);
        let marker = if stats.is_observed() { "" } else { "# " };
        writeln!(
            writer,
            "{marker}reaction [k1 = {:>12} +/- {:>12} {:<4}] {reactants} -> {inter}",
            general(options.convert(stats.k1, order)),
            general(options.convert(stats.k1_error, order)),
            options.unit_label(order),
        )?;
        writeln!(
            writer,
            "{marker}reaction [k2 = {:>12} +/- {:>12} {:<4}] {inter} -> {products}",
            general(options.convert(stats.k2, 0)),
            general(options.convert(stats.k2_error, 0)),
            options.unit_label(0),
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "# Resting macrostate probabilities")?;
    let query = RestingSetQuery::new().provenance(options.resting_sets);
    for rs in system.query_resting_sets(&query) {
        match system.stats(rs) {
            Ok(stats) => writeln!(
                writer,
                "# {:<20} [Prob = {:>12} +/- {:>12}; Depletion = {:>12}]",
                rs.name,
                general(stats.conformation_probability()),
                general(stats.null_conformation_probability_error),
                general(stats.temporary_depletion),
            )?,
            Err(_) => writeln!(writer, "# {:<20} [no statistics]", rs.name)?,
        }
    }

    writer.flush()?;
    Ok(())
}

fn join_names(side: &[RestingSet]) -> String {
    side.iter()
        .map(|rs| rs.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ")
}

fn sorted_names(side: &[RestingSet]) -> String {
    let mut names: Vec<&str> = side.iter().map(|rs| rs.name.as_str()).collect();
    names.sort_unstable();
    names.join("_")
}

/// Formats `value` with six significant digits, switching to exponent
/// notation for very small or large magnitudes and dropping trailing zeros.
fn general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }

    let sci = format!("{value:.5e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (5 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
