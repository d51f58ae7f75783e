use std::collections::{BTreeMap, BTreeSet};

/// Split of the entities observed by statistics assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Observed entities that are part of the known network.
    pub known: BTreeSet<T>,
    /// Observed entities absent from the known network.
    pub spurious: BTreeSet<T>,
    /// Known entities the statistics step produced no record for.
    pub unobserved: BTreeSet<T>,
}

/// Partitions the key set of `observed` against `known`.
///
/// Pure set algebra: `spurious = keys(observed) - known`, `known` is the
/// intersection. Calling it twice with the same inputs yields the same result.
pub fn partition<T: Ord + Clone, V>(known: &BTreeSet<T>, observed: &BTreeMap<T, V>) -> Partition<T> {
    let mut result = Partition {
        known: BTreeSet::new(),
        spurious: BTreeSet::new(),
        unobserved: BTreeSet::new(),
    };

    for key in observed.keys() {
        if known.contains(key) {
            result.known.insert(key.clone());
        } else {
            result.spurious.insert(key.clone());
        }
    }

    result.unobserved = known
        .iter()
        .filter(|k| !observed.contains_key(*k))
        .cloned()
        .collect();

    result
}
