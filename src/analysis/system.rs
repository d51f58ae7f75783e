use std::collections::BTreeSet;

use toml::Table;
use tracing::{debug, info, warn};

use super::config::{Config, KindaParams};
use super::error::QueryError;
use super::partition::partition;
use super::query::{ComplexQuery, Match, Provenance, ReactionQuery, RestingSetQuery, single};
use super::registry::Network;
use crate::model::complex::Complex;
use crate::model::reaction::{CondensedReaction, DetailedReaction};
use crate::model::resting_set::RestingSet;
use crate::model::stats::{Analyzed, StatsTable};

/// Query-able registry of a reaction network and its statistics.
///
/// Holds the known entities of a [`Network`], the spurious resting sets and
/// condensed reactions discovered by statistics assignment, and the
/// statistics records for both. Entity membership is fixed once
/// [`with_statistics`](Self::with_statistics) has run; only each resting
/// set's `max_concentration` may change afterwards.
#[derive(Debug, Clone)]
pub struct System {
    config: Config,
    network: Network,
    spurious_resting_sets: BTreeSet<RestingSet>,
    spurious_condensed_reactions: BTreeSet<CondensedReaction>,
    unregistered_resting_sets: BTreeSet<RestingSet>,
    stats: StatsTable,
}

impl System {
    /// Creates a system with no statistics. Every statistics lookup reports
    /// [`QueryError::NotFound`] until [`with_statistics`](Self::with_statistics) is called.
    pub fn new(network: Network, config: Config) -> Self {
        Self {
            config,
            network,
            spurious_resting_sets: BTreeSet::new(),
            spurious_condensed_reactions: BTreeSet::new(),
            unregistered_resting_sets: BTreeSet::new(),
            stats: StatsTable::new(),
        }
    }

    /// Attaches the output of statistics assignment.
    ///
    /// Entities with a record but absent from the network become spurious.
    /// Every resting-set record gets the configured default `max_concentration`.
    ///
    /// A spurious reaction may reference a resting set that is neither known
    /// nor has a record. Such resting sets are reported and kept apart in
    /// [`unregistered_resting_sets`](Self::unregistered_resting_sets).
    pub fn with_statistics(mut self, table: StatsTable) -> Self {
        let resting_sets = partition(self.network.resting_sets(), &table.resting_sets);
        let reactions = partition(self.network.condensed_reactions(), &table.reactions);

        for rs in &resting_sets.unobserved {
            warn!(resting_set = %rs, "known resting set has no statistics");
        }
        for rxn in &reactions.unobserved {
            warn!(reaction = %rxn, "known condensed reaction has no statistics");
        }

        let unregistered: BTreeSet<RestingSet> = reactions
            .spurious
            .iter()
            .flat_map(|rxn| rxn.participants())
            .filter(|rs| {
                !self.network.resting_sets().contains(*rs) && !resting_sets.spurious.contains(*rs)
            })
            .cloned()
            .collect();
        for rs in &unregistered {
            warn!(
                resting_set = %rs,
                "spurious reaction references a resting set that is neither known nor has statistics"
            );
        }

        info!(
            spurious_resting_sets = resting_sets.spurious.len(),
            spurious_condensed_reactions = reactions.spurious.len(),
            "statistics attached"
        );

        self.spurious_resting_sets = resting_sets.spurious;
        self.spurious_condensed_reactions = reactions.spurious;
        self.unregistered_resting_sets = unregistered;
        self.stats = table;

        let c_max = self.config.kinda.max_concentration;
        for stats in self.stats.resting_sets.values_mut() {
            stats.max_concentration = c_max;
        }

        self
    }

    #[inline]
    pub fn has_statistics(&self) -> bool {
        !self.stats.is_empty()
    }

    /// The merged configuration this system was built with.
    pub fn initialization_params(&self) -> &Config {
        &self.config
    }

    pub fn kinda_params(&self) -> &KindaParams {
        &self.config.kinda
    }

    pub fn peppercorn_params(&self) -> &Table {
        &self.config.peppercorn
    }

    pub fn multistrand_params(&self) -> &Table {
        &self.config.multistrand
    }

    pub fn nupack_params(&self) -> &Table {
        &self.config.nupack
    }

    /// The known (given or enumerated) entities.
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn statistics(&self) -> &StatsTable {
        &self.stats
    }

    pub fn complexes(&self) -> &BTreeSet<Complex> {
        self.network.complexes()
    }

    /// Known and spurious resting sets.
    pub fn resting_sets(&self) -> impl Iterator<Item = &RestingSet> {
        self.network
            .resting_sets()
            .union(&self.spurious_resting_sets)
    }

    pub fn detailed_reactions(&self) -> &BTreeSet<DetailedReaction> {
        self.network.detailed_reactions()
    }

    /// Known and spurious condensed reactions.
    pub fn condensed_reactions(&self) -> impl Iterator<Item = &CondensedReaction> {
        self.network
            .condensed_reactions()
            .union(&self.spurious_condensed_reactions)
    }

    pub fn spurious_resting_sets(&self) -> &BTreeSet<RestingSet> {
        &self.spurious_resting_sets
    }

    pub fn spurious_condensed_reactions(&self) -> &BTreeSet<CondensedReaction> {
        &self.spurious_condensed_reactions
    }

    /// Resting sets referenced by spurious reactions but absent from both the
    /// known and the spurious resting sets. Empty when the statistics table
    /// covers every participant.
    pub fn unregistered_resting_sets(&self) -> &BTreeSet<RestingSet> {
        &self.unregistered_resting_sets
    }

    /// Condensed reactions matching every predicate of `query`, in entity order.
    pub fn query_reactions(&self, query: &ReactionQuery) -> Vec<&CondensedReaction> {
        let found: Vec<_> = select(
            self.network.condensed_reactions(),
            &self.spurious_condensed_reactions,
            query.provenance,
        )
        .filter(|rxn| query.matches(rxn))
        .collect();
        debug!(query = %query, matches = found.len(), "reaction query");
        found
    }

    /// Exactly one condensed reaction matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if nothing matches. Several matches
    /// are not an error; see [`Match::Ambiguous`].
    pub fn find_reaction(
        &self,
        query: &ReactionQuery,
    ) -> Result<Match<&CondensedReaction>, QueryError> {
        single("reaction", query, self.query_reactions(query))
    }

    pub fn query_resting_sets(&self, query: &RestingSetQuery) -> Vec<&RestingSet> {
        let found: Vec<_> = select(
            self.network.resting_sets(),
            &self.spurious_resting_sets,
            query.provenance,
        )
        .filter(|rs| query.matches(rs))
        .collect();
        debug!(query = %query, matches = found.len(), "resting set query");
        found
    }

    /// Exactly one resting set matching `query`; same reporting as
    /// [`find_reaction`](Self::find_reaction).
    pub fn find_resting_set(
        &self,
        query: &RestingSetQuery,
    ) -> Result<Match<&RestingSet>, QueryError> {
        single("resting set", query, self.query_resting_sets(query))
    }

    pub fn query_complexes(&self, query: &ComplexQuery) -> Vec<&Complex> {
        self.network
            .complexes()
            .iter()
            .filter(|c| query.matches(c))
            .collect()
    }

    pub fn find_complex(&self, query: &ComplexQuery) -> Result<Match<&Complex>, QueryError> {
        single("complex", query, self.query_complexes(query))
    }

    /// Statistics record of a known or spurious resting set or condensed reaction.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] if the entity has no record, including
    /// before statistics have been attached.
    pub fn stats<K: Analyzed>(&self, entity: &K) -> Result<&K::Stats, QueryError> {
        K::stats_in(&self.stats, entity).ok_or_else(|| {
            warn!(kind = K::KIND, entity = %entity, "statistics not found");
            QueryError::not_found(K::KIND, format!("statistics for {entity}"))
        })
    }

    pub fn max_concentration(&self, rs: &RestingSet) -> Result<f64, QueryError> {
        self.stats(rs).map(|s| s.max_concentration)
    }

    pub fn set_max_concentration(&mut self, rs: &RestingSet, value: f64) -> Result<(), QueryError> {
        match self.stats.resting_sets.get_mut(rs) {
            Some(stats) => {
                stats.max_concentration = value;
                Ok(())
            }
            None => Err(QueryError::not_found(
                RestingSet::KIND,
                format!("statistics for {rs}"),
            )),
        }
    }
}

fn select<'a, T: Ord>(
    known: &'a BTreeSet<T>,
    spurious: &'a BTreeSet<T>,
    provenance: Provenance,
) -> Box<dyn Iterator<Item = &'a T> + 'a> {
    match provenance {
        Provenance::Known => Box::new(known.iter()),
        Provenance::Spurious => Box::new(spurious.iter()),
        Provenance::Any => Box::new(known.union(spurious)),
    }
}
