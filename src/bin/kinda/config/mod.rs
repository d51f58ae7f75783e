use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use kinda_system::{Config, ConfigOverrides, KindaOverrides};

use crate::cli::ConfigOptions;

/// Defaults, then the TOML file, then command-line flags.
pub fn build_config(path: Option<&Path>, flags: &ConfigOptions) -> Result<Config> {
    let base = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("Failed to read configuration file: {}", p.display()))?;
            Config::from_toml_str(&text)
                .with_context(|| format!("Invalid configuration file: {}", p.display()))?
        }
        None => Config::default(),
    };

    Ok(base.merge(flag_overrides(flags)))
}

fn flag_overrides(flags: &ConfigOptions) -> ConfigOverrides {
    ConfigOverrides {
        kinda: KindaOverrides {
            enable_unimolecular_reactions: flags.enable_unimolecular_reactions.then_some(true),
            max_concentration: flags.max_concentration,
        },
        ..Default::default()
    }
}
