//! JSON statistics documents.
//!
//! A statistics document carries its own entity definitions, since spurious
//! resting sets and reactions are by nature absent from the network:
//!
//! ```json
//! {
//!   "complexes": [{ "name": "c1", "strands": ["s1"], "structure": "." }],
//!   "resting_sets": [
//!     { "name": "R1", "complexes": ["c1"],
//!       "stats": { "null_conformation_probability": 0.02 } }
//!   ],
//!   "reactions": [
//!     { "reactants": ["R1", "R1"], "products": ["R1"],
//!       "stats": { "k1": 1.2e6, "k2": 0.4 } }
//!   ]
//! }
//! ```
//!
//! Resting sets without a `stats` object only define names for reactions.

use std::collections::BTreeSet;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::error::Error;
use super::network::{ReactionEntry, RestingSetEntry, index_unique};
use crate::analysis::System;
use crate::model::complex::Complex;
use crate::model::reaction::CondensedReaction;
use crate::model::resting_set::RestingSet;
use crate::model::stats::{ReactionStats, RestingSetStats, StatsTable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDocument {
    #[serde(default)]
    pub complexes: Vec<Complex>,
    #[serde(default)]
    pub resting_sets: Vec<RestingSetRecord>,
    #[serde(default)]
    pub reactions: Vec<ReactionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingSetRecord {
    #[serde(flatten)]
    pub resting_set: RestingSetEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<RestingSetStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    #[serde(flatten)]
    pub reaction: ReactionEntry,
    pub stats: ReactionStats,
}

/// Reads a statistics document into a table ready for
/// [`PrecomputedStatistics`](crate::PrecomputedStatistics).
pub fn import_stats<R: Read>(reader: R) -> Result<StatsTable, Error> {
    let doc: StatsDocument = serde_json::from_reader(reader)?;
    doc.resolve()
}

/// Writes every statistics record of `system`, known and spurious.
pub fn export_stats<W: Write>(writer: W, system: &System) -> Result<(), Error> {
    let doc = StatsDocument::from_table(system.statistics())?;
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

impl StatsDocument {
    pub fn resolve(&self) -> Result<StatsTable, Error> {
        let complexes = index_unique("complex", &self.complexes, |c| &c.name)?;

        let mut table = StatsTable::new();
        let mut resting_sets = Vec::with_capacity(self.resting_sets.len());
        for record in &self.resting_sets {
            let rs = record.resting_set.resolve(&complexes)?;
            if let Some(stats) = &record.stats {
                table.resting_sets.insert(rs.clone(), stats.clone());
            }
            resting_sets.push(rs);
        }

        let by_name = index_unique("resting set", &resting_sets, |rs| &rs.name)?;
        for record in &self.reactions {
            let rxn: CondensedReaction = record.reaction.resolve(&by_name, "resting set")?;
            table.reactions.insert(rxn, record.stats.clone());
        }

        Ok(table)
    }

    pub fn from_table(table: &StatsTable) -> Result<Self, Error> {
        let mut resting_sets: BTreeSet<&RestingSet> = table.resting_sets.keys().collect();
        resting_sets.extend(table.reactions.keys().flat_map(|rxn| rxn.participants()));

        let complexes: Vec<Complex> = resting_sets
            .iter()
            .flat_map(|rs| rs.complexes())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        index_unique("complex", &complexes, |c| &c.name)?;
        let named: Vec<&RestingSet> = resting_sets.iter().copied().collect();
        index_unique("resting set", &named, |rs| &rs.name)?;

        Ok(Self {
            complexes,
            resting_sets: resting_sets
                .into_iter()
                .map(|rs| RestingSetRecord {
                    resting_set: rs.into(),
                    stats: table.resting_sets.get(rs).cloned(),
                })
                .collect(),
            reactions: table
                .reactions
                .iter()
                .map(|(rxn, stats)| ReactionRecord {
                    reaction: rxn.into(),
                    stats: stats.clone(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Config, Network, build_network};
    use crate::io::network::read_network;

    const NETWORK: &str = r#"{
        "complexes": [
            { "name": "c1", "strands": ["s1"], "structure": "." },
            { "name": "c2", "strands": ["s2"], "structure": "." }
        ],
        "resting_sets": [
            { "name": "R1", "complexes": ["c1"] },
            { "name": "R2", "complexes": ["c2"] }
        ],
        "condensed_reactions": [
            { "reactants": ["R1", "R1"], "products": ["R2"] }
        ]
    }"#;

    const STATS: &str = r#"{
        "complexes": [
            { "name": "c1", "strands": ["s1"], "structure": "." },
            { "name": "c2", "strands": ["s2"], "structure": "." },
            { "name": "c9", "strands": ["s1", "s2"], "structure": "(+)" }
        ],
        "resting_sets": [
            { "name": "R1", "complexes": ["c1"],
              "stats": { "null_conformation_probability": 0.1, "temporary_depletion": 0.01 } },
            { "name": "R2", "complexes": ["c2"] },
            { "name": "R9", "complexes": ["c9"],
              "stats": { "null_conformation_probability": 0.3 } }
        ],
        "reactions": [
            { "reactants": ["R1", "R1"], "products": ["R2"],
              "stats": { "k1": 2.0e6, "k2": 0.5 } },
            { "reactants": ["R1", "R9"], "products": ["R9", "R1"],
              "stats": { "k1": 10.0, "k2": 0.01 } }
        ]
    }"#;

    fn network() -> Network {
        build_network(read_network(NETWORK.as_bytes()).unwrap(), None, &Config::default()).unwrap()
    }

    #[test]
    fn imports_records_and_skips_definition_only_resting_sets() {
        let table = import_stats(STATS.as_bytes()).unwrap();
        assert_eq!(table.resting_sets.len(), 2);
        assert_eq!(table.reactions.len(), 2);

        let r1 = RestingSet::new("R1", [Complex::new("c1", ["s1"], ".")]);
        let stats = &table.resting_sets[&r1];
        assert_eq!(stats.null_conformation_probability, 0.1);
        assert_eq!(stats.temporary_depletion, 0.01);
    }

    #[test]
    fn imported_resting_sets_match_network_entities() {
        let table = import_stats(STATS.as_bytes()).unwrap();
        let system = System::new(network(), Config::default()).with_statistics(table);

        let names: Vec<_> = system
            .spurious_resting_sets()
            .iter()
            .map(|rs| rs.name.as_str())
            .collect();
        assert_eq!(names, ["R9"]);
        assert_eq!(system.spurious_condensed_reactions().len(), 1);

        let known = system.network().condensed_reactions().first().unwrap();
        assert_eq!(system.stats(known).unwrap().k1, 2.0e6);
    }

    #[test]
    fn definition_only_participants_of_spurious_reactions_are_unregistered() {
        let doc = r#"{
            "complexes": [
                { "name": "c1", "strands": ["s1"], "structure": "." },
                { "name": "c9", "strands": ["s9"], "structure": "." }
            ],
            "resting_sets": [
                { "name": "R1", "complexes": ["c1"],
                  "stats": { "null_conformation_probability": 0.1 } },
                { "name": "R9", "complexes": ["c9"] }
            ],
            "reactions": [
                { "reactants": ["R1", "R9"], "products": ["R9", "R1"],
                  "stats": { "k1": 3.0, "k2": 0.2 } }
            ]
        }"#;
        let table = import_stats(doc.as_bytes()).unwrap();
        let system = System::new(network(), Config::default()).with_statistics(table);

        let unregistered: Vec<_> = system
            .unregistered_resting_sets()
            .iter()
            .map(|rs| rs.name.as_str())
            .collect();
        assert_eq!(unregistered, ["R9"]);
        assert!(system.spurious_resting_sets().is_empty());
        assert_eq!(system.spurious_condensed_reactions().len(), 1);
    }

    #[test]
    fn reactions_require_defined_resting_sets() {
        let doc = r#"{
            "reactions": [{ "reactants": ["R1"], "products": ["R1"], "stats": { "k1": 1, "k2": 1 } }]
        }"#;
        assert!(matches!(
            import_stats(doc.as_bytes()),
            Err(Error::UnknownReference { kind: "resting set", .. })
        ));
    }

    #[test]
    fn exported_statistics_import_to_the_same_table() {
        let table = import_stats(STATS.as_bytes()).unwrap();
        let system = System::new(network(), Config::default()).with_statistics(table);

        let mut buf = Vec::new();
        export_stats(&mut buf, &system).unwrap();
        let reimported = import_stats(buf.as_slice()).unwrap();

        assert_eq!(&reimported, system.statistics());
    }
}
