use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::complex::Complex;
use super::resting_set::RestingSet;

/// A reaction between participants of a single kind.
///
/// Reactants and products are multisets: both sides are stored sorted, so
/// `A + B -> C` and `B + A -> C` are the same reaction while `A + A -> B`
/// keeps its repeated reactant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(
    from = "ReactionRepr<T>",
    bound(deserialize = "T: Ord + Deserialize<'de>")
)]
pub struct Reaction<T> {
    reactants: Vec<T>,
    products: Vec<T>,
}

/// An elementary reaction between complexes.
pub type DetailedReaction = Reaction<Complex>;

/// A reaction between resting sets, aggregating detailed reactions.
pub type CondensedReaction = Reaction<RestingSet>;

#[derive(Deserialize)]
struct ReactionRepr<T> {
    reactants: Vec<T>,
    products: Vec<T>,
}

impl<T: Ord> From<ReactionRepr<T>> for Reaction<T> {
    fn from(repr: ReactionRepr<T>) -> Self {
        Reaction::new(repr.reactants, repr.products)
    }
}

impl<T: Ord> Reaction<T> {
    pub fn new(
        reactants: impl IntoIterator<Item = T>,
        products: impl IntoIterator<Item = T>,
    ) -> Self {
        let mut reactants: Vec<T> = reactants.into_iter().collect();
        let mut products: Vec<T> = products.into_iter().collect();
        reactants.sort();
        products.sort();
        Self {
            reactants,
            products,
        }
    }

    #[inline]
    pub fn reactants(&self) -> &[T] {
        &self.reactants
    }

    #[inline]
    pub fn products(&self) -> &[T] {
        &self.products
    }

    /// Number of reactants, counting repeats.
    #[inline]
    pub fn arity(&self) -> usize {
        self.reactants.len()
    }

    /// Every participant on both sides, in reactant-then-product order.
    pub fn participants(&self) -> impl Iterator<Item = &T> {
        self.reactants.iter().chain(self.products.iter())
    }

    /// Returns `true` if every element of `wanted` appears among the reactants,
    /// at least as many times as it appears in `wanted`.
    pub fn has_reactants<'a>(&self, wanted: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        contains_all(&self.reactants, wanted)
    }

    /// Product-side counterpart of [`has_reactants`](Self::has_reactants).
    pub fn has_products<'a>(&self, wanted: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        contains_all(&self.products, wanted)
    }

    /// A reaction is unproductive when its reactants and products contain
    /// each other, i.e. it leaves the composition unchanged.
    pub fn is_unproductive(&self) -> bool {
        self.has_products(&self.reactants) && self.has_reactants(&self.products)
    }
}

fn contains_all<'a, T: Ord + 'a>(pool: &[T], wanted: impl IntoIterator<Item = &'a T>) -> bool {
    let mut remaining: BTreeMap<&T, usize> = BTreeMap::new();
    for item in pool {
        *remaining.entry(item).or_insert(0) += 1;
    }

    wanted.into_iter().all(|item| match remaining.get_mut(item) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    })
}

impl<T: fmt::Display> fmt::Display for Reaction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, &self.reactants)?;
        write!(f, " -> ")?;
        write_side(f, &self.products)
    }
}

fn write_side<T: fmt::Display>(f: &mut fmt::Formatter<'_>, side: &[T]) -> fmt::Result {
    for (i, item) in side.iter().enumerate() {
        if i > 0 {
            write!(f, " + ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
