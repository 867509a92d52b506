//! TOML-backed configuration store.
//!
//! ```toml
//! [[configuration]]
//! module_name = "storefront"
//! is_default = true
//!
//! [[configuration.generator]]
//! type = "custom"
//! change_freq = "monthly"
//!
//! [[configuration.generator.custom_url]]
//! loc = "/about-us"
//! lastmod = "2024-05-01"
//! ```

use super::ConfigurationStore;
use crate::{config::parse_toml, debug, model::SiteMapConfiguration};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Reads configurations from a TOML file on every lookup.
#[derive(Debug, Clone)]
pub struct TomlConfigurationStore {
    path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigurationFile {
    #[serde(default)]
    configuration: Vec<SiteMapConfiguration>,
}

impl TomlConfigurationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationStore for TomlConfigurationStore {
    fn find_active_configurations(&self) -> Result<Vec<SiteMapConfiguration>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let file: ConfigurationFile = parse_toml(&content, &self.path)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;

        let total = file.configuration.len();
        let active: Vec<_> = file
            .configuration
            .into_iter()
            .filter(|config| config.active)
            .collect();
        debug!("store"; "{} of {} configurations active in {}", active.len(), total, self.path.display());

        Ok(active)
    }
}
