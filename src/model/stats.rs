use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::reaction::CondensedReaction;
use super::resting_set::RestingSet;

pub const DEFAULT_MAX_CONCENTRATION: f64 = 1e-7;

fn default_max_concentration() -> f64 {
    DEFAULT_MAX_CONCENTRATION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingSetStats {
    /// Probability of observing none of the resting set's listed conformations.
    pub null_conformation_probability: f64,
    #[serde(default)]
    pub null_conformation_probability_error: f64,
    #[serde(default)]
    pub temporary_depletion: f64,
    /// Upper bound on the resting set's concentration, in molar.
    #[serde(default = "default_max_concentration")]
    pub max_concentration: f64,
}

impl Default for RestingSetStats {
    fn default() -> Self {
        Self {
            null_conformation_probability: 0.0,
            null_conformation_probability_error: 0.0,
            temporary_depletion: 0.0,
            max_concentration: DEFAULT_MAX_CONCENTRATION,
        }
    }
}

impl RestingSetStats {
    /// Probability that the resting set is found in one of its listed conformations.
    #[inline]
    pub fn conformation_probability(&self) -> f64 {
        1.0 - self.null_conformation_probability
    }
}

/// Two-step rate estimate for a condensed reaction.
///
/// `k1` is the collision rate into the intermediate (units of /M^(n-1)/s for
/// `n` reactants) and `k2` the first-order rate out of it (/s).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionStats {
    pub k1: f64,
    #[serde(default)]
    pub k1_error: f64,
    pub k2: f64,
    #[serde(default)]
    pub k2_error: f64,
}

impl ReactionStats {
    #[inline]
    pub fn is_observed(&self) -> bool {
        self.k1 > 0.0 && self.k2 > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    pub resting_sets: BTreeMap<RestingSet, RestingSetStats>,
    pub reactions: BTreeMap<CondensedReaction, ReactionStats>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resting_sets.is_empty() && self.reactions.is_empty()
    }
}

/// Entity kinds that carry an externally produced statistics record.
pub trait Analyzed: Ord + fmt::Display + Sized {
    /// Entity kind, as used in lookup reports.
    const KIND: &'static str;

    type Stats;

    fn stats_in<'t>(table: &'t StatsTable, key: &Self) -> Option<&'t Self::Stats>;
}

impl Analyzed for RestingSet {
    const KIND: &'static str = "resting set";

    type Stats = RestingSetStats;

    fn stats_in<'t>(table: &'t StatsTable, key: &Self) -> Option<&'t RestingSetStats> {
        table.resting_sets.get(key)
    }
}

impl Analyzed for CondensedReaction {
    const KIND: &'static str = "condensed reaction";

    type Stats = ReactionStats;

    fn stats_in<'t>(table: &'t StatsTable, key: &Self) -> Option<&'t ReactionStats> {
        table.reactions.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::complex::Complex;

    #[test]
    fn resting_set_stats_defaults_max_concentration_when_absent() {
        let stats: RestingSetStats =
            serde_json::from_str(r#"{"null_conformation_probability":0.25}"#).unwrap();
        assert_eq!(stats.max_concentration, DEFAULT_MAX_CONCENTRATION);
        assert_eq!(stats.temporary_depletion, 0.0);
        assert!((stats.conformation_probability() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn reaction_stats_observed_requires_both_rates() {
        let mut stats = ReactionStats {
            k1: 1e6,
            k2: 0.0,
            ..Default::default()
        };
        assert!(!stats.is_observed());
        stats.k2 = 0.5;
        assert!(stats.is_observed());
    }

    #[test]
    fn analyzed_dispatches_to_matching_table() {
        let r = RestingSet::new("R", [Complex::new("c", ["s"], ".")]);
        let rxn = CondensedReaction::new([r.clone(), r.clone()], [r.clone()]);

        let mut table = StatsTable::new();
        assert!(table.is_empty());
        table.resting_sets.insert(r.clone(), RestingSetStats::default());

        assert!(RestingSet::stats_in(&table, &r).is_some());
        assert!(CondensedReaction::stats_in(&table, &rxn).is_none());
    }
}
