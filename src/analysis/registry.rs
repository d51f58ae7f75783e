//! Reconciliation of caller-supplied and enumerated entities.
//!
//! The [`Network`] produced here is the "known" half of the registry: every
//! complex, resting set and reaction that was given or enumerated. It is
//! closed under derivation, so every complex referenced by a resting set or
//! detailed reaction is present, and every resting set referenced by a
//! condensed reaction is present.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::config::Config;
use super::error::{Error, ExternalError};
use crate::model::complex::Complex;
use crate::model::reaction::{CondensedReaction, DetailedReaction};
use crate::model::resting_set::RestingSet;

/// Four raw entity collections, as supplied by a caller or returned by an
/// [`Enumerator`]. May contain duplicates and need not be closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entities {
    pub complexes: Vec<Complex>,
    pub resting_sets: Vec<RestingSet>,
    pub detailed_reactions: Vec<DetailedReaction>,
    pub condensed_reactions: Vec<CondensedReaction>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }
}

/// External reaction enumeration step.
///
/// Implementations receive the seed complexes and detailed reactions together
/// with the `peppercorn` parameter table, and return the complete enumerated
/// network. The returned collections replace the caller's input wholesale.
pub trait Enumerator {
    fn enumerate(
        &self,
        complexes: &[Complex],
        detailed_reactions: &[DetailedReaction],
        params: &toml::Table,
    ) -> Result<Entities, ExternalError>;
}

/// Reconciled, deduplicated set of known entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    complexes: BTreeSet<Complex>,
    resting_sets: BTreeSet<RestingSet>,
    detailed_reactions: BTreeSet<DetailedReaction>,
    condensed_reactions: BTreeSet<CondensedReaction>,
}

impl Network {
    /// Builds a closed network from raw collections by set union.
    ///
    /// Resting sets referenced by condensed reactions are added to the
    /// resting sets; complexes referenced by resting sets and detailed
    /// reactions are added to the complexes. Nothing is ever removed.
    pub fn from_entities(entities: Entities) -> Self {
        let Entities {
            complexes,
            resting_sets,
            detailed_reactions,
            condensed_reactions,
        } = entities;

        let condensed_reactions: BTreeSet<CondensedReaction> =
            condensed_reactions.into_iter().collect();
        let detailed_reactions: BTreeSet<DetailedReaction> =
            detailed_reactions.into_iter().collect();

        let mut resting_sets: BTreeSet<RestingSet> = resting_sets.into_iter().collect();
        resting_sets.extend(
            condensed_reactions
                .iter()
                .flat_map(|rxn| rxn.participants())
                .cloned(),
        );

        let mut complexes: BTreeSet<Complex> = complexes.into_iter().collect();
        complexes.extend(resting_sets.iter().flat_map(|rs| rs.complexes()).cloned());
        complexes.extend(
            detailed_reactions
                .iter()
                .flat_map(|rxn| rxn.participants())
                .cloned(),
        );

        Self {
            complexes,
            resting_sets,
            detailed_reactions,
            condensed_reactions,
        }
    }

    /// Copies the network back into raw collections.
    ///
    /// Rebuilding from the result with [`from_entities`](Self::from_entities)
    /// yields an identical network.
    pub fn to_entities(&self) -> Entities {
        Entities {
            complexes: self.complexes.iter().cloned().collect(),
            resting_sets: self.resting_sets.iter().cloned().collect(),
            detailed_reactions: self.detailed_reactions.iter().cloned().collect(),
            condensed_reactions: self.condensed_reactions.iter().cloned().collect(),
        }
    }

    /// Drops every condensed reaction whose reactant count is not exactly two.
    ///
    /// Returns the number of reactions removed. Resting sets and complexes
    /// referenced only by the removed reactions stay in the network.
    pub fn exclude_unimolecular(&mut self) -> usize {
        let before = self.condensed_reactions.len();
        self.condensed_reactions.retain(|rxn| rxn.arity() == 2);
        before - self.condensed_reactions.len()
    }

    #[inline]
    pub fn complexes(&self) -> &BTreeSet<Complex> {
        &self.complexes
    }

    #[inline]
    pub fn resting_sets(&self) -> &BTreeSet<RestingSet> {
        &self.resting_sets
    }

    #[inline]
    pub fn detailed_reactions(&self) -> &BTreeSet<DetailedReaction> {
        &self.detailed_reactions
    }

    #[inline]
    pub fn condensed_reactions(&self) -> &BTreeSet<CondensedReaction> {
        &self.condensed_reactions
    }
}

/// Builds the reconciled [`Network`] for an analysis session.
///
/// Without an enumerator, the caller's collections are reconciled by set
/// union. With one, the enumerator is seeded with the reconciled complexes
/// and the given detailed reactions, and its output replaces the working
/// collections entirely. In both cases unimolecular condensed reactions are
/// then dropped unless `config.kinda.enable_unimolecular_reactions` is set.
///
/// # Errors
///
/// Returns [`Error::Enumeration`] if the enumerator fails. Reconciliation
/// itself cannot fail.
pub fn build_network(
    input: Entities,
    enumerator: Option<&dyn Enumerator>,
    config: &Config,
) -> Result<Network, Error> {
    let mut network = Network::from_entities(input);

    if let Some(enumerator) = enumerator {
        let seed_complexes: Vec<Complex> = network.complexes.iter().cloned().collect();
        let seed_reactions: Vec<DetailedReaction> =
            network.detailed_reactions.iter().cloned().collect();
        debug!(
            complexes = seed_complexes.len(),
            detailed_reactions = seed_reactions.len(),
            "seeding enumerator"
        );

        let enumerated = enumerator
            .enumerate(&seed_complexes, &seed_reactions, &config.peppercorn)
            .map_err(Error::enumeration)?;
        network = Network::from_entities(enumerated);
    }

    if !config.kinda.enable_unimolecular_reactions {
        let removed = network.exclude_unimolecular();
        if removed > 0 {
            debug!(removed, "excluded non-bimolecular condensed reactions");
        }
    }

    info!(
        complexes = network.complexes.len(),
        resting_sets = network.resting_sets.len(),
        detailed_reactions = network.detailed_reactions.len(),
        condensed_reactions = network.condensed_reactions.len(),
        enumerated = enumerator.is_some(),
        "network reconciled"
    );

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn complex(name: &str) -> Complex {
        Complex::new(name, [format!("{name}_strand")], ".")
    }

    struct Fixture {
        c1: Complex,
        c2: Complex,
        c3: Complex,
        r1: RestingSet,
        r2: RestingSet,
        bimolecular: CondensedReaction,
        unimolecular: CondensedReaction,
    }

    fn fixture() -> Fixture {
        let (c1, c2, c3) = (complex("c1"), complex("c2"), complex("c3"));
        let r1 = RestingSet::new("R1", [c1.clone()]);
        let r2 = RestingSet::new("R2", [c2.clone(), c3.clone()]);
        let bimolecular = CondensedReaction::new([r1.clone(), r1.clone()], [r2.clone()]);
        let unimolecular = CondensedReaction::new([r2.clone()], [r1.clone()]);
        Fixture {
            c1,
            c2,
            c3,
            r1,
            r2,
            bimolecular,
            unimolecular,
        }
    }

    fn permissive() -> Config {
        let mut config = Config::default();
        config.kinda.enable_unimolecular_reactions = true;
        config
    }

    struct StubEnumerator {
        output: Entities,
        seen: RefCell<Option<(Vec<Complex>, Vec<DetailedReaction>)>>,
    }

    impl Enumerator for StubEnumerator {
        fn enumerate(
            &self,
            complexes: &[Complex],
            detailed_reactions: &[DetailedReaction],
            _params: &toml::Table,
        ) -> Result<Entities, ExternalError> {
            *self.seen.borrow_mut() = Some((complexes.to_vec(), detailed_reactions.to_vec()));
            Ok(self.output.clone())
        }
    }

    struct FailingEnumerator;

    impl Enumerator for FailingEnumerator {
        fn enumerate(
            &self,
            _complexes: &[Complex],
            _detailed_reactions: &[DetailedReaction],
            _params: &toml::Table,
        ) -> Result<Entities, ExternalError> {
            Err("complex size limit exceeded".into())
        }
    }

    #[test]
    fn derives_resting_sets_and_complexes_from_condensed_reactions() {
        let f = fixture();
        let input = Entities {
            condensed_reactions: vec![f.bimolecular.clone()],
            ..Entities::new()
        };

        let network = build_network(input, None, &Config::default()).unwrap();

        assert_eq!(
            network.resting_sets().iter().collect::<Vec<_>>(),
            vec![&f.r1, &f.r2]
        );
        assert_eq!(
            network.complexes().iter().collect::<Vec<_>>(),
            vec![&f.c1, &f.c2, &f.c3]
        );
    }

    #[test]
    fn derives_complexes_from_detailed_reactions() {
        let f = fixture();
        let extra = complex("c4");
        let input = Entities {
            complexes: vec![f.c1.clone()],
            detailed_reactions: vec![DetailedReaction::new([f.c1.clone()], [extra.clone()])],
            ..Entities::new()
        };

        let network = build_network(input, None, &Config::default()).unwrap();
        assert!(network.complexes().contains(&extra));
        assert_eq!(network.detailed_reactions().len(), 1);
    }

    #[test]
    fn closure_holds_after_build() {
        let f = fixture();
        let input = Entities {
            complexes: vec![f.c1.clone()],
            resting_sets: vec![f.r1.clone()],
            detailed_reactions: vec![DetailedReaction::new([f.c2.clone()], [f.c3.clone()])],
            condensed_reactions: vec![f.bimolecular.clone(), f.unimolecular.clone()],
        };

        let network = build_network(input, None, &permissive()).unwrap();

        for rs in network.resting_sets() {
            for c in rs.complexes() {
                assert!(network.complexes().contains(c));
            }
        }
        for rxn in network.detailed_reactions() {
            assert!(rxn.participants().all(|c| network.complexes().contains(c)));
        }
        for rxn in network.condensed_reactions() {
            assert!(rxn.participants().all(|rs| network.resting_sets().contains(rs)));
        }
    }

    #[test]
    fn duplicates_are_collapsed() {
        let f = fixture();
        let input = Entities {
            complexes: vec![f.c1.clone(), f.c1.clone()],
            resting_sets: vec![f.r1.clone(), f.r1.clone()],
            condensed_reactions: vec![f.bimolecular.clone(), f.bimolecular.clone()],
            ..Entities::new()
        };

        let network = build_network(input, None, &Config::default()).unwrap();
        assert_eq!(network.complexes().len(), 3);
        assert_eq!(network.resting_sets().len(), 2);
        assert_eq!(network.condensed_reactions().len(), 1);
    }

    #[test]
    fn unimolecular_reactions_excluded_by_default() {
        let f = fixture();
        let input = Entities {
            condensed_reactions: vec![f.bimolecular.clone(), f.unimolecular.clone()],
            ..Entities::new()
        };

        let network = build_network(input, None, &Config::default()).unwrap();

        assert!(network.condensed_reactions().iter().all(|r| r.arity() == 2));
        assert_eq!(
            network.condensed_reactions().iter().collect::<Vec<_>>(),
            vec![&f.bimolecular]
        );
        // Resting sets referenced only by dropped reactions are kept.
        assert!(network.resting_sets().contains(&f.r2));
    }

    #[test]
    fn unimolecular_filter_removes_exactly_non_bimolecular() {
        let f = fixture();
        let trimolecular = CondensedReaction::new(
            [f.r1.clone(), f.r1.clone(), f.r2.clone()],
            [f.r2.clone()],
        );
        let raw = vec![
            f.bimolecular.clone(),
            f.unimolecular.clone(),
            trimolecular.clone(),
        ];
        let input = Entities {
            condensed_reactions: raw.clone(),
            ..Entities::new()
        };

        let unfiltered = build_network(input.clone(), None, &permissive()).unwrap();
        let filtered = build_network(input, None, &Config::default()).unwrap();

        let removed: BTreeSet<_> = unfiltered
            .condensed_reactions()
            .difference(filtered.condensed_reactions())
            .cloned()
            .collect();
        let expected: BTreeSet<_> = raw.into_iter().filter(|r| r.arity() != 2).collect();
        assert_eq!(removed, expected);
        assert!(removed.contains(&trimolecular));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let f = fixture();
        let input = Entities {
            complexes: vec![f.c1.clone()],
            resting_sets: vec![f.r1.clone()],
            detailed_reactions: vec![DetailedReaction::new([f.c1.clone()], [f.c2.clone()])],
            condensed_reactions: vec![f.bimolecular.clone(), f.unimolecular.clone()],
        };

        let first = build_network(input, None, &Config::default()).unwrap();
        let second = build_network(first.to_entities(), None, &Config::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn enumeration_replaces_input() {
        let f = fixture();
        let enumerated = Entities {
            complexes: vec![f.c2.clone(), f.c3.clone()],
            resting_sets: vec![f.r2.clone()],
            detailed_reactions: vec![],
            condensed_reactions: vec![],
        };
        let enumerator = StubEnumerator {
            output: enumerated,
            seen: RefCell::new(None),
        };
        let input = Entities {
            complexes: vec![f.c1.clone()],
            resting_sets: vec![f.r1.clone()],
            ..Entities::new()
        };

        let network = build_network(input, Some(&enumerator), &Config::default()).unwrap();

        assert!(!network.complexes().contains(&f.c1));
        assert!(!network.resting_sets().contains(&f.r1));
        assert_eq!(
            network.resting_sets().iter().collect::<Vec<_>>(),
            vec![&f.r2]
        );
    }

    #[test]
    fn enumerator_is_seeded_with_derived_complexes_and_given_reactions() {
        let f = fixture();
        let detailed = DetailedReaction::new([f.c2.clone()], [f.c3.clone()]);
        let enumerator = StubEnumerator {
            output: Entities::new(),
            seen: RefCell::new(None),
        };
        let input = Entities {
            resting_sets: vec![f.r1.clone()],
            detailed_reactions: vec![detailed.clone()],
            ..Entities::new()
        };

        build_network(input, Some(&enumerator), &Config::default()).unwrap();

        let (complexes, reactions) = enumerator.seen.borrow_mut().take().unwrap();
        assert_eq!(complexes, vec![f.c1, f.c2, f.c3]);
        assert_eq!(reactions, vec![detailed]);
    }

    #[test]
    fn enumerated_output_is_also_filtered() {
        let f = fixture();
        let enumerator = StubEnumerator {
            output: Entities {
                condensed_reactions: vec![f.bimolecular.clone(), f.unimolecular.clone()],
                ..Entities::new()
            },
            seen: RefCell::new(None),
        };

        let network = build_network(Entities::new(), Some(&enumerator), &Config::default()).unwrap();
        assert_eq!(network.condensed_reactions().len(), 1);
    }

    #[test]
    fn enumeration_failure_is_reported() {
        let result = build_network(Entities::new(), Some(&FailingEnumerator), &Config::default());
        match result {
            Err(Error::Enumeration(msg)) => assert!(msg.contains("size limit")),
            other => panic!("expected enumeration error, got {other:?}"),
        }
    }
}
