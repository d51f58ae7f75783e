//! Entity reconciliation and query engine for DNA strand-displacement reaction
//! networks.
//!
//! A session starts from caller-supplied complexes, resting sets and reactions,
//! optionally expands them through an external reaction enumerator, and then
//! attaches statistics produced by an external simulation step. Entities that
//! only show up during statistics assignment are kept apart as *spurious*, so
//! queries can distinguish the designed network from leak pathways.
//!
//! # Features
//!
//! - **Reconciliation** — Deduplicates input and closes it under derivation:
//!   complexes of resting sets and reactions, resting sets of condensed reactions
//! - **Spurious partitioning** — Separates statistics records of entities the
//!   network never contained
//! - **Queries** — Filter reactions by participants, arity, productivity and
//!   provenance; resting sets by complex, strands or name
//! - **I/O** — JSON network and statistics documents, and a plain-text rate
//!   report with unit conversion
//!
//! # Quick Start
//!
//! ```
//! use kinda_system::{
//!     Complex, CondensedReaction, Config, Entities, PrecomputedStatistics, ReactionQuery,
//!     ReactionStats, RestingSet, StatsTable, analyze,
//! };
//!
//! let gate = RestingSet::new("Gate", [Complex::new("gate", ["t", "b"], "(+)")]);
//! let signal = RestingSet::new("Signal", [Complex::new("signal", ["i"], ".")]);
//! let output = RestingSet::new("Output", [Complex::new("output", ["t"], ".")]);
//!
//! let displacement = CondensedReaction::new([gate.clone(), signal], [output]);
//! let leak = CondensedReaction::new([gate.clone(), gate.clone()], [gate.clone(), gate.clone()]);
//!
//! let mut table = StatsTable::new();
//! table.reactions.insert(displacement.clone(), ReactionStats { k1: 3e6, k2: 0.2, ..Default::default() });
//! table.reactions.insert(leak.clone(), ReactionStats { k1: 1.0, k2: 0.01, ..Default::default() });
//!
//! let input = Entities {
//!     condensed_reactions: vec![displacement.clone()],
//!     ..Entities::new()
//! };
//! let system = analyze(input, None, &PrecomputedStatistics::new(table), &Config::default())?;
//!
//! // The leak was never part of the network, so it is spurious.
//! assert!(system.spurious_condensed_reactions().contains(&leak));
//!
//! let unproductive = system.query_reactions(&ReactionQuery::new().reactant(gate).unproductive());
//! assert_eq!(unproductive, vec![&leak]);
//!
//! assert_eq!(system.stats(&displacement)?.k1, 3e6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Network and statistics documents, rate reports
//! - [`analyze`] — Full session pipeline
//! - [`Config`] — Session and backend parameters
//!
//! # Data Types
//!
//! ## Entities
//!
//! - [`Complex`] — Strand list with secondary structure
//! - [`RestingSet`] — Group of complexes treated as one species
//! - [`Reaction`] — Multiset reaction over complexes ([`DetailedReaction`]) or
//!   resting sets ([`CondensedReaction`])
//!
//! ## Session
//!
//! - [`Network`] — Known, reconciled entities
//! - [`System`] — Network plus statistics and spurious entities
//! - [`StatsTable`] — Statistics records by resting set and condensed reaction
//!
//! ## Queries
//!
//! - [`ReactionQuery`], [`RestingSetQuery`], [`ComplexQuery`] — Filter builders
//! - [`Match`] — Unique or ambiguous singular lookup result

mod analysis;
mod model;

pub mod io;

pub use model::complex::Complex;
pub use model::reaction::{CondensedReaction, DetailedReaction, Reaction};
pub use model::resting_set::RestingSet;
pub use model::stats::{
    Analyzed, DEFAULT_MAX_CONCENTRATION, ReactionStats, RestingSetStats, StatsTable,
};

pub use analysis::{
    ComplexQuery, Config, ConfigOverrides, Entities, Enumerator, ExternalError, KindaOverrides,
    KindaParams, Match, Network, Partition, PrecomputedStatistics, Productivity, Provenance,
    QueryError, ReactionQuery, RestingSetQuery, StatisticsBackend, System, analyze,
    build_network, partition,
};

pub use analysis::Error as AnalysisError;
