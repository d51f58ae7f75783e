//! Configuration for network reconciliation and downstream analysis.
//!
//! A [`Config`] is built once from [`Config::default`] and optional
//! [`ConfigOverrides`], then passed by reference into every stage of the
//! pipeline. Nothing reads configuration from global state.
//!
//! # Overview
//!
//! - [`Config`] — Fully merged configuration
//! - [`KindaParams`] — Settings consumed by this crate
//! - [`ConfigOverrides`] — Partial configuration, usually parsed from TOML
//!
//! The three backend groups (`peppercorn`, `multistrand`, `nupack`) are
//! free-form tables. They are handed to the enumerator and statistics backend
//! verbatim and echoed by [`System::initialization_params`](super::System::initialization_params).

use serde::Deserialize;
use toml::{Table, Value};

use super::error::Error;
use crate::model::stats::DEFAULT_MAX_CONCENTRATION;

/// Main configuration for a reaction-network analysis session.
///
/// # Examples
///
/// ```
/// use kinda_system::{Config, KindaParams};
///
/// // Unimolecular condensed reactions are excluded by default
/// let default = Config::default();
/// assert!(!default.kinda.enable_unimolecular_reactions);
///
/// // Keep them, and raise the concentration ceiling
/// let custom = Config {
///     kinda: KindaParams {
///         enable_unimolecular_reactions: true,
///         max_concentration: 1e-6,
///     },
///     ..Default::default()
/// };
/// assert_eq!(custom.kinda.max_concentration, 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Settings for reconciliation and partitioning.
    pub kinda: KindaParams,

    /// Parameters forwarded to the reaction enumerator.
    pub peppercorn: Table,

    /// Parameters forwarded to the kinetic simulation backend.
    pub multistrand: Table,

    /// Parameters forwarded to the thermodynamic backend.
    pub nupack: Table,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindaParams {
    /// Keep condensed reactions whose reactant count is not exactly two.
    pub enable_unimolecular_reactions: bool,

    /// Default `max_concentration` assigned to every resting set with statistics (molar).
    pub max_concentration: f64,
}

impl Default for KindaParams {
    fn default() -> Self {
        Self {
            enable_unimolecular_reactions: false,
            max_concentration: DEFAULT_MAX_CONCENTRATION,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kinda: KindaParams::default(),
            peppercorn: default_peppercorn_params(),
            multistrand: default_multistrand_params(),
            nupack: default_nupack_params(),
        }
    }
}

fn default_peppercorn_params() -> Table {
    let mut t = Table::new();
    t.insert("max_complex_size".into(), Value::Integer(6));
    t.insert("max_complex_count".into(), Value::Integer(1000));
    t.insert("max_reaction_count".into(), Value::Integer(5000));
    t.insert("release_cutoff".into(), Value::Integer(8));
    t
}

fn default_multistrand_params() -> Table {
    let mut t = Table::new();
    t.insert("dangles".into(), Value::String("some".into()));
    t.insert("temperature".into(), Value::Float(25.0));
    t.insert("sodium".into(), Value::Float(1.0));
    t.insert("magnesium".into(), Value::Float(0.0));
    t
}

fn default_nupack_params() -> Table {
    let mut t = Table::new();
    t.insert("material".into(), Value::String("dna".into()));
    t.insert("dangles".into(), Value::String("some".into()));
    t.insert("temperature".into(), Value::Float(25.0));
    t
}

/// Partial configuration. Absent fields keep their defaults; backend tables
/// are merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub kinda: KindaOverrides,
    #[serde(default)]
    pub peppercorn: Table,
    #[serde(default)]
    pub multistrand: Table,
    #[serde(default)]
    pub nupack: Table,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindaOverrides {
    pub enable_unimolecular_reactions: Option<bool>,
    pub max_concentration: Option<f64>,
}

impl Config {
    /// Parses [`ConfigOverrides`] from TOML and merges them over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the document is not valid TOML or
    /// contains unknown `[kinda]` keys.
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        let overrides: ConfigOverrides = toml::from_str(toml)?;
        Ok(Self::default().merge(overrides))
    }

    /// Applies `overrides` on top of `self`, field by field.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(v) = overrides.kinda.enable_unimolecular_reactions {
            self.kinda.enable_unimolecular_reactions = v;
        }
        if let Some(v) = overrides.kinda.max_concentration {
            self.kinda.max_concentration = v;
        }
        self.peppercorn.extend(overrides.peppercorn);
        self.multistrand.extend(overrides.multistrand);
        self.nupack.extend(overrides.nupack);
        self
    }
}
