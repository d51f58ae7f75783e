//! Value types describing a strand-displacement reaction network.
//!
//! - [`complex`] – Named molecular structures built from strands.
//! - [`resting_set`] – Macrostates grouping kinetically equivalent complexes.
//! - [`reaction`] – Detailed (complex-level) and condensed (resting-set-level) reactions.
//! - [`stats`] – Statistics records attached to resting sets and condensed reactions.
//!
//! These types carry identity only. Reconciliation, classification and
//! retrieval live in [`crate::analysis`].

pub mod complex;
pub mod reaction;
pub mod resting_set;
pub mod stats;
