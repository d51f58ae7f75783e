//! Filter builders for querying a [`System`](super::System).
//!
//! Each query is a struct of optional predicates. An absent predicate does no
//! filtering; present predicates are combined with AND. Queries never mutate
//! the system and can be reused across calls.

use std::fmt;

use crate::model::complex::Complex;
use crate::model::reaction::CondensedReaction;
use crate::model::resting_set::RestingSet;

use super::error::QueryError;

/// Which partition of the registry a query draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provenance {
    /// Given or enumerated entities only.
    Known,
    /// Entities discovered only during statistics assignment.
    Spurious,
    /// Both known and spurious entities.
    #[default]
    Any,
}

impl From<Option<bool>> for Provenance {
    /// Maps a tri-state "spurious" flag: `Some(true)` → spurious only,
    /// `Some(false)` → known only, `None` → both.
    fn from(spurious: Option<bool>) -> Self {
        match spurious {
            Some(true) => Provenance::Spurious,
            Some(false) => Provenance::Known,
            None => Provenance::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Productivity {
    /// Reactions that change composition.
    Productive,
    /// Reactions whose reactants and products contain each other.
    Unproductive,
}

/// Filter over condensed reactions.
///
/// The default query keeps bimolecular reactions of any provenance and
/// productivity.
///
/// ```
/// use kinda_system::{Provenance, ReactionQuery};
///
/// let q = ReactionQuery::new().productive().provenance(Provenance::Known);
/// assert_eq!(q.arity, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionQuery {
    /// Resting sets that must all appear among the reactants (multiset containment).
    pub reactants: Vec<RestingSet>,
    /// Resting sets that must all appear among the products (multiset containment).
    pub products: Vec<RestingSet>,
    /// Exact reactant count; `None` disables the filter.
    pub arity: Option<usize>,
    pub productivity: Option<Productivity>,
    pub provenance: Provenance,
}

impl Default for ReactionQuery {
    fn default() -> Self {
        Self {
            reactants: Vec::new(),
            products: Vec::new(),
            arity: Some(2),
            productivity: None,
            provenance: Provenance::Any,
        }
    }
}

impl ReactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reactant(mut self, rs: RestingSet) -> Self {
        self.reactants.push(rs);
        self
    }

    pub fn reactants(mut self, rs: impl IntoIterator<Item = RestingSet>) -> Self {
        self.reactants.extend(rs);
        self
    }

    pub fn product(mut self, rs: RestingSet) -> Self {
        self.products.push(rs);
        self
    }

    pub fn products(mut self, rs: impl IntoIterator<Item = RestingSet>) -> Self {
        self.products.extend(rs);
        self
    }

    pub fn arity(mut self, arity: Option<usize>) -> Self {
        self.arity = arity;
        self
    }

    pub fn any_arity(self) -> Self {
        self.arity(None)
    }

    pub fn productive(mut self) -> Self {
        self.productivity = Some(Productivity::Productive);
        self
    }

    pub fn unproductive(mut self) -> Self {
        self.productivity = Some(Productivity::Unproductive);
        self
    }

    pub fn provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Tests every predicate except provenance, which selects the base set.
    pub fn matches(&self, rxn: &CondensedReaction) -> bool {
        let productivity_ok = match self.productivity {
            None => true,
            Some(Productivity::Unproductive) => rxn.is_unproductive(),
            Some(Productivity::Productive) => !rxn.is_unproductive(),
        };

        productivity_ok
            && self.arity.is_none_or(|n| rxn.arity() == n)
            && rxn.has_reactants(&self.reactants)
            && rxn.has_products(&self.products)
    }
}

impl fmt::Display for ReactionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.reactants.is_empty() {
            parts.push(format!("reactants ⊇ [{}]", join_names(&self.reactants)));
        }
        if !self.products.is_empty() {
            parts.push(format!("products ⊇ [{}]", join_names(&self.products)));
        }
        if let Some(n) = self.arity {
            parts.push(format!("arity = {n}"));
        }
        match self.productivity {
            Some(Productivity::Productive) => parts.push("productive".into()),
            Some(Productivity::Unproductive) => parts.push("unproductive".into()),
            None => {}
        }
        parts.push(provenance_label(self.provenance).into());
        write!(f, "{}", parts.join(", "))
    }
}

/// Filter over resting sets.
///
/// Unlike [`ReactionQuery`], the default provenance is [`Provenance::Known`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingSetQuery {
    /// Keep resting sets containing exactly this complex.
    pub complex: Option<Complex>,
    /// Keep resting sets whose strands include all of these.
    pub strands: Vec<String>,
    pub name: Option<String>,
    /// Keep resting sets containing some complex with this name.
    pub complex_name: Option<String>,
    pub provenance: Provenance,
}

impl Default for RestingSetQuery {
    fn default() -> Self {
        Self {
            complex: None,
            strands: Vec::new(),
            name: None,
            complex_name: None,
            provenance: Provenance::Known,
        }
    }
}

impl RestingSetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complex(mut self, complex: Complex) -> Self {
        self.complex = Some(complex);
        self
    }

    pub fn strand(mut self, strand: impl Into<String>) -> Self {
        self.strands.push(strand.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn complex_name(mut self, name: impl Into<String>) -> Self {
        self.complex_name = Some(name.into());
        self
    }

    pub fn provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn matches(&self, rs: &RestingSet) -> bool {
        if let Some(c) = &self.complex {
            if !rs.contains(c) {
                return false;
            }
        }
        if !self.strands.is_empty() {
            let strands = rs.strands();
            if !self.strands.iter().all(|s| strands.contains(s.as_str())) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if &rs.name != name {
                return false;
            }
        }
        if let Some(name) = &self.complex_name {
            if !rs.has_complex_named(name) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for RestingSetQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(c) = &self.complex {
            parts.push(format!("complex = {c}"));
        }
        if !self.strands.is_empty() {
            parts.push(format!("strands ⊇ [{}]", self.strands.join(", ")));
        }
        if let Some(name) = &self.name {
            parts.push(format!("name = {name:?}"));
        }
        if let Some(name) = &self.complex_name {
            parts.push(format!("complex name = {name:?}"));
        }
        parts.push(provenance_label(self.provenance).into());
        write!(f, "{}", parts.join(", "))
    }
}

/// Filter over complexes. Complexes are never spurious.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexQuery {
    pub name: Option<String>,
}

impl ComplexQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn matches(&self, complex: &Complex) -> bool {
        self.name.as_ref().is_none_or(|n| &complex.name == n)
    }
}

impl fmt::Display for ComplexQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "name = {name:?}"),
            None => write!(f, "any complex"),
        }
    }
}

fn join_names(items: &[RestingSet]) -> String {
    items
        .iter()
        .map(|rs| rs.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn provenance_label(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Known => "known",
        Provenance::Spurious => "spurious",
        Provenance::Any => "known or spurious",
    }
}

/// Outcome of a singular lookup that found at least one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<T> {
    Unique(T),
    /// Several entities matched; `first` is the smallest under the entity
    /// ordering, so the pick is stable for the same registry.
    Ambiguous { first: T, count: usize },
}

impl<T> Match<T> {
    /// Returns the matched entity, ignoring ambiguity.
    pub fn into_inner(self) -> T {
        match self {
            Match::Unique(v) | Match::Ambiguous { first: v, .. } => v,
        }
    }

    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Match::Ambiguous { .. })
    }

    /// Number of entities that matched.
    pub fn count(&self) -> usize {
        match self {
            Match::Unique(_) => 1,
            Match::Ambiguous { count, .. } => *count,
        }
    }

    /// Converts an ambiguous match into [`QueryError::AmbiguousMatch`].
    pub fn strict(self, kind: &'static str, criteria: &dyn fmt::Display) -> Result<T, QueryError> {
        match self {
            Match::Unique(v) => Ok(v),
            Match::Ambiguous { count, .. } => {
                Err(QueryError::ambiguous(kind, criteria.to_string(), count))
            }
        }
    }
}

/// Reduces an ordered candidate list to a single [`Match`].
///
/// `criteria` is only rendered when reporting an error or ambiguity.
pub(crate) fn single<T>(
    kind: &'static str,
    criteria: &dyn fmt::Display,
    candidates: Vec<T>,
) -> Result<Match<T>, QueryError> {
    let count = candidates.len();
    let mut iter = candidates.into_iter();
    match (iter.next(), count) {
        (None, _) => {
            tracing::warn!(kind, criteria = %criteria, "no match");
            Err(QueryError::not_found(kind, criteria.to_string()))
        }
        (Some(v), 1) => Ok(Match::Unique(v)),
        (Some(first), count) => {
            tracing::warn!(kind, criteria = %criteria, count, "ambiguous match");
            Ok(Match::Ambiguous { first, count })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complex(name: &str, strands: &[&str]) -> Complex {
        Complex::new(name, strands.iter().copied(), ".")
    }

    fn rs(name: &str, complexes: Vec<Complex>) -> RestingSet {
        RestingSet::new(name, complexes)
    }

    #[test]
    fn provenance_from_tristate() {
        assert_eq!(Provenance::from(Some(true)), Provenance::Spurious);
        assert_eq!(Provenance::from(Some(false)), Provenance::Known);
        assert_eq!(Provenance::from(None), Provenance::Any);
    }

    #[test]
    fn default_reaction_query_is_bimolecular_any_provenance() {
        let q = ReactionQuery::default();
        assert_eq!(q.arity, Some(2));
        assert_eq!(q.productivity, None);
        assert_eq!(q.provenance, Provenance::Any);
        assert!(q.reactants.is_empty() && q.products.is_empty());
    }

    #[test]
    fn reaction_query_combines_predicates() {
        let a = rs("A", vec![complex("a", &["s1"])]);
        let b = rs("B", vec![complex("b", &["s2"])]);
        let c = rs("C", vec![complex("c", &["s1", "s2"])]);
        let productive = CondensedReaction::new([a.clone(), b.clone()], [c.clone()]);
        let unproductive = CondensedReaction::new([a.clone(), b.clone()], [a.clone(), b.clone()]);

        let q = ReactionQuery::new().reactant(a.clone()).productive();
        assert!(q.matches(&productive));
        assert!(!q.matches(&unproductive));

        let q = ReactionQuery::new().unproductive();
        assert!(q.matches(&unproductive));
        assert!(!q.matches(&productive));

        let q = ReactionQuery::new().product(c.clone()).arity(Some(1));
        assert!(!q.matches(&productive));

        let q = ReactionQuery::new().product(c).any_arity();
        assert!(q.matches(&productive));
    }

    #[test]
    fn resting_set_query_predicates() {
        let gate = rs(
            "Gate",
            vec![
                complex("gate", &["top", "bottom"]),
                complex("gate_alt", &["top", "bottom"]),
            ],
        );

        assert!(RestingSetQuery::new().matches(&gate));
        assert!(RestingSetQuery::new().name("Gate").matches(&gate));
        assert!(!RestingSetQuery::new().name("gate").matches(&gate));
        assert!(RestingSetQuery::new().strand("top").strand("bottom").matches(&gate));
        assert!(!RestingSetQuery::new().strand("fuel").matches(&gate));
        assert!(RestingSetQuery::new().complex_name("gate_alt").matches(&gate));
        assert!(
            RestingSetQuery::new()
                .complex(Complex::new("gate", ["top", "bottom"], "."))
                .matches(&gate)
        );
        assert!(
            !RestingSetQuery::new()
                .complex(Complex::new("gate", ["top"], "."))
                .matches(&gate)
        );
    }

    #[test]
    fn complex_query_filters_by_name() {
        let c = Complex::new("fuel", ["f"], ".");
        assert!(ComplexQuery::new().matches(&c));
        assert!(ComplexQuery::new().name("fuel").matches(&c));
        assert!(!ComplexQuery::new().name("waste").matches(&c));
    }

    #[test]
    fn single_reports_each_outcome() {
        let criteria = ComplexQuery::new();

        let none: Vec<u8> = vec![];
        assert!(matches!(
            single("complex", &criteria, none),
            Err(QueryError::NotFound { kind: "complex", .. })
        ));

        assert_eq!(single("complex", &criteria, vec![7]).unwrap(), Match::Unique(7));

        let m = single("complex", &criteria, vec![3, 5]).unwrap();
        assert!(m.is_ambiguous());
        assert_eq!(m.count(), 2);
        assert_eq!(m.into_inner(), 3);
    }

    #[test]
    fn strict_rejects_ambiguity() {
        let criteria = ComplexQuery::new();
        let m = Match::Ambiguous { first: 1, count: 4 };
        assert!(matches!(
            m.strict("complex", &criteria),
            Err(QueryError::AmbiguousMatch { count: 4, .. })
        ));
        assert_eq!(Match::Unique(9).strict("complex", &criteria), Ok(9));
    }

    #[test]
    fn display_describes_criteria() {
        let a = rs("A", vec![complex("a", &["s"])]);
        let q = ReactionQuery::new().reactant(a).unproductive().provenance(Provenance::Known);
        assert_eq!(q.to_string(), "reactants ⊇ [A], arity = 2, unproductive, known");
        assert_eq!(
            RestingSetQuery::new().name("R1").to_string(),
            "name = \"R1\", known"
        );
    }
}
