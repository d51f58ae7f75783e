use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::complex::Complex;

/// A macrostate of kinetically equivalent complexes.
///
/// Constituent complexes are kept sorted and deduplicated so two resting sets
/// built from the same complexes in a different order compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RestingSetRepr")]
pub struct RestingSet {
    pub name: String,
    complexes: Vec<Complex>,
}

#[derive(Deserialize)]
struct RestingSetRepr {
    name: String,
    complexes: Vec<Complex>,
}

impl From<RestingSetRepr> for RestingSet {
    fn from(repr: RestingSetRepr) -> Self {
        RestingSet::new(repr.name, repr.complexes)
    }
}

impl RestingSet {
    pub fn new(name: impl Into<String>, complexes: impl IntoIterator<Item = Complex>) -> Self {
        let mut complexes: Vec<Complex> = complexes.into_iter().collect();
        complexes.sort();
        complexes.dedup();
        Self {
            name: name.into(),
            complexes,
        }
    }

    #[inline]
    pub fn complexes(&self) -> &[Complex] {
        &self.complexes
    }

    #[inline]
    pub fn contains(&self, complex: &Complex) -> bool {
        self.complexes.binary_search(complex).is_ok()
    }

    /// Union of the strands of every constituent complex.
    pub fn strands(&self) -> BTreeSet<&str> {
        self.complexes
            .iter()
            .flat_map(|c| c.strands.iter().map(String::as_str))
            .collect()
    }

    pub fn has_complex_named(&self, name: &str) -> bool {
        self.complexes.iter().any(|c| c.name == name)
    }
}

impl fmt::Display for RestingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
