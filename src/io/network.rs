//! JSON network documents.
//!
//! Complexes are spelled out in full; resting sets and reactions refer to
//! their participants by name:
//!
//! ```json
//! {
//!   "complexes": [{ "name": "c1", "strands": ["s1"], "structure": "." }],
//!   "resting_sets": [{ "name": "R1", "complexes": ["c1"] }],
//!   "detailed_reactions": [{ "reactants": ["c1", "c1"], "products": ["c1"] }],
//!   "condensed_reactions": [{ "reactants": ["R1", "R1"], "products": ["R1"] }]
//! }
//! ```

use std::collections::HashMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::error::Error;
use crate::analysis::{Entities, Network};
use crate::model::complex::Complex;
use crate::model::reaction::{CondensedReaction, DetailedReaction, Reaction};
use crate::model::resting_set::RestingSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub complexes: Vec<Complex>,
    #[serde(default)]
    pub resting_sets: Vec<RestingSetEntry>,
    #[serde(default)]
    pub detailed_reactions: Vec<ReactionEntry>,
    #[serde(default)]
    pub condensed_reactions: Vec<ReactionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingSetEntry {
    pub name: String,
    pub complexes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionEntry {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

impl ReactionEntry {
    fn describe(&self) -> String {
        format!(
            "reaction {} -> {}",
            self.reactants.join(" + "),
            self.products.join(" + ")
        )
    }
}

/// Reads a network document and resolves its name references.
pub fn read_network<R: Read>(reader: R) -> Result<Entities, Error> {
    let doc: NetworkDocument = serde_json::from_reader(reader)?;
    doc.resolve()
}

/// Writes the known entities of `network` as a network document.
///
/// # Errors
///
/// Returns [`Error::DuplicateName`] if two distinct complexes or resting sets
/// share a name, since the document could not be read back.
pub fn write_network<W: Write>(writer: W, network: &Network) -> Result<(), Error> {
    let doc = NetworkDocument::from_network(network)?;
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

impl NetworkDocument {
    pub fn resolve(&self) -> Result<Entities, Error> {
        let complexes = index_unique("complex", &self.complexes, |c| &c.name)?;

        let resting_sets = self
            .resting_sets
            .iter()
            .map(|entry| entry.resolve(&complexes))
            .collect::<Result<Vec<_>, _>>()?;
        let by_name = index_unique("resting set", &resting_sets, |rs| &rs.name)?;

        let detailed_reactions = self
            .detailed_reactions
            .iter()
            .map(|entry| entry.resolve(&complexes, "complex"))
            .collect::<Result<Vec<DetailedReaction>, _>>()?;

        let condensed_reactions = self
            .condensed_reactions
            .iter()
            .map(|entry| entry.resolve(&by_name, "resting set"))
            .collect::<Result<Vec<CondensedReaction>, _>>()?;

        Ok(Entities {
            complexes: self.complexes.clone(),
            resting_sets,
            detailed_reactions,
            condensed_reactions,
        })
    }

    pub fn from_network(network: &Network) -> Result<Self, Error> {
        let complexes: Vec<Complex> = network.complexes().iter().cloned().collect();
        index_unique("complex", &complexes, |c| &c.name)?;
        let resting_sets: Vec<&RestingSet> = network.resting_sets().iter().collect();
        index_unique("resting set", &resting_sets, |rs| &rs.name)?;

        Ok(Self {
            complexes,
            resting_sets: resting_sets.into_iter().map(Into::into).collect(),
            detailed_reactions: network.detailed_reactions().iter().map(Into::into).collect(),
            condensed_reactions: network.condensed_reactions().iter().map(Into::into).collect(),
        })
    }
}

impl RestingSetEntry {
    pub(super) fn resolve(&self, complexes: &HashMap<&str, &Complex>) -> Result<RestingSet, Error> {
        let members = self
            .complexes
            .iter()
            .map(|name| {
                lookup(complexes, "complex", name, || {
                    format!("resting set '{}'", self.name)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RestingSet::new(self.name.clone(), members))
    }
}

impl From<&RestingSet> for RestingSetEntry {
    fn from(rs: &RestingSet) -> Self {
        Self {
            name: rs.name.clone(),
            complexes: rs.complexes().iter().map(|c| c.name.clone()).collect(),
        }
    }
}

impl ReactionEntry {
    pub(super) fn resolve<T: Clone + Ord>(
        &self,
        index: &HashMap<&str, &T>,
        kind: &'static str,
    ) -> Result<Reaction<T>, Error> {
        let side = |names: &[String]| {
            names
                .iter()
                .map(|n| lookup(index, kind, n, || self.describe()))
                .collect::<Result<Vec<T>, Error>>()
        };
        Ok(Reaction::new(side(&self.reactants)?, side(&self.products)?))
    }
}

impl From<&DetailedReaction> for ReactionEntry {
    fn from(rxn: &DetailedReaction) -> Self {
        Self {
            reactants: rxn.reactants().iter().map(|c| c.name.clone()).collect(),
            products: rxn.products().iter().map(|c| c.name.clone()).collect(),
        }
    }
}

impl From<&CondensedReaction> for ReactionEntry {
    fn from(rxn: &CondensedReaction) -> Self {
        Self {
            reactants: rxn.reactants().iter().map(|rs| rs.name.clone()).collect(),
            products: rxn.products().iter().map(|rs| rs.name.clone()).collect(),
        }
    }
}

/// Indexes `items` by name, rejecting repeated names.
pub(super) fn index_unique<'a, T>(
    kind: &'static str,
    items: &'a [T],
    name: impl Fn(&T) -> &String,
) -> Result<HashMap<&'a str, &'a T>, Error> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        let key = name(item).as_str();
        if index.insert(key, item).is_some() {
            return Err(Error::DuplicateName {
                kind,
                name: key.to_string(),
            });
        }
    }
    Ok(index)
}

fn lookup<T: Clone>(
    index: &HashMap<&str, &T>,
    kind: &'static str,
    name: &str,
    context: impl FnOnce() -> String,
) -> Result<T, Error> {
    index
        .get(name)
        .map(|item| (*item).clone())
        .ok_or_else(|| Error::unknown_reference(kind, name, context()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Config, build_network};

    const DOC: &str = r#"{
        "complexes": [
            { "name": "c1", "strands": ["s1"], "structure": "." },
            { "name": "c2", "strands": ["s2"], "structure": "." },
            { "name": "c3", "strands": ["s1", "s2"], "structure": "(+)" }
        ],
        "resting_sets": [
            { "name": "R1", "complexes": ["c1"] },
            { "name": "R2", "complexes": ["c2", "c3"] }
        ],
        "detailed_reactions": [
            { "reactants": ["c1", "c2"], "products": ["c3"] }
        ],
        "condensed_reactions": [
            { "reactants": ["R1", "R1"], "products": ["R2"] }
        ]
    }"#;

    #[test]
    fn reads_and_resolves_references() {
        let entities = read_network(DOC.as_bytes()).unwrap();

        assert_eq!(entities.complexes.len(), 3);
        assert_eq!(entities.resting_sets.len(), 2);
        assert_eq!(entities.resting_sets[1].complexes().len(), 2);
        assert_eq!(entities.detailed_reactions[0].to_string(), "c1 + c2 -> c3");
        assert_eq!(entities.condensed_reactions[0].to_string(), "R1 + R1 -> R2");
        assert_eq!(entities.condensed_reactions[0].reactants()[0], entities.resting_sets[0]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let entities = read_network(r#"{ "complexes": [] }"#.as_bytes()).unwrap();
        assert_eq!(entities, Entities::new());
    }

    #[test]
    fn unknown_complex_in_resting_set() {
        let doc = r#"{ "resting_sets": [{ "name": "R1", "complexes": ["ghost"] }] }"#;
        match read_network(doc.as_bytes()) {
            Err(Error::UnknownReference { kind, name, context }) => {
                assert_eq!(kind, "complex");
                assert_eq!(name, "ghost");
                assert_eq!(context, "resting set 'R1'");
            }
            other => panic!("expected unknown reference, got {other:?}"),
        }
    }

    #[test]
    fn unknown_resting_set_in_reaction() {
        let doc = r#"{
            "complexes": [{ "name": "c1", "strands": ["s"] }],
            "resting_sets": [{ "name": "R1", "complexes": ["c1"] }],
            "condensed_reactions": [{ "reactants": ["R1", "R9"], "products": ["R1"] }]
        }"#;
        assert!(matches!(
            read_network(doc.as_bytes()),
            Err(Error::UnknownReference { kind: "resting set", .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let doc = r#"{ "complexes": [
            { "name": "c1", "strands": ["a"] },
            { "name": "c1", "strands": ["b"] }
        ] }"#;
        assert!(matches!(
            read_network(doc.as_bytes()),
            Err(Error::DuplicateName { kind: "complex", .. })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            read_network("{ not json".as_bytes()),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn written_network_reads_back_identically() {
        let entities = read_network(DOC.as_bytes()).unwrap();
        let network = build_network(entities, None, &Config::default()).unwrap();

        let mut buf = Vec::new();
        write_network(&mut buf, &network).unwrap();
        let reread = build_network(read_network(buf.as_slice()).unwrap(), None, &Config::default())
            .unwrap();

        assert_eq!(network, reread);
    }

    #[test]
    fn writing_rejects_distinct_complexes_sharing_a_name() {
        let mut entities = read_network(DOC.as_bytes()).unwrap();
        let renamed = Complex::new("c1", ["other"], "..");
        entities.complexes.push(renamed);
        let network = build_network(entities, None, &Config::default()).unwrap();

        let mut buf = Vec::new();
        match write_network(&mut buf, &network) {
            Err(Error::DuplicateName { kind, name }) => {
                assert_eq!(kind, "complex");
                assert_eq!(name, "c1");
            }
            other => panic!("expected DuplicateName, got {other:?}"),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn writing_rejects_distinct_resting_sets_sharing_a_name() {
        let mut entities = read_network(DOC.as_bytes()).unwrap();
        let extra = entities.complexes[0].clone();
        let first = entities.resting_sets[0].name.clone();
        let widened = RestingSet::new(first.clone(), [extra, Complex::new("cx", ["x"], ".")]);
        entities.resting_sets.push(widened);
        let network = build_network(entities, None, &Config::default()).unwrap();

        assert!(matches!(
            write_network(Vec::new(), &network),
            Err(Error::DuplicateName { kind: "resting set", name }) if name == first
        ));
    }
}
