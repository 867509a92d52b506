//! Configuration sources and artifact storage.
//!
//! Both sides of a run that live outside this crate are reached through a
//! trait here:
//!
//! - [`ConfigurationStore`] supplies the candidate sitemap configurations
//! - [`ArtifactStore`] receives the finished files

mod artifact;
mod file;

pub use artifact::{ArtifactStore, DirectoryStore, WorkingDirStore};
pub use file::TomlConfigurationStore;

use crate::model::SiteMapConfiguration;
use anyhow::Result;

/// Source of sitemap configurations.
pub trait ConfigurationStore: Send + Sync {
    /// All active sitemap configurations, in the store's own order.
    ///
    /// Selection of the one configuration used for a run depends on this
    /// order, so implementations must return it deterministically.
    fn find_active_configurations(&self) -> Result<Vec<SiteMapConfiguration>>;
}

/// Configurations held in memory, typically wired by the host application.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigurationStore {
    configurations: Vec<SiteMapConfiguration>,
}

impl InMemoryConfigurationStore {
    pub fn new(configurations: Vec<SiteMapConfiguration>) -> Self {
        Self { configurations }
    }

    pub fn push(&mut self, configuration: SiteMapConfiguration) {
        self.configurations.push(configuration);
    }
}

impl FromIterator<SiteMapConfiguration> for InMemoryConfigurationStore {
    fn from_iter<I: IntoIterator<Item = SiteMapConfiguration>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ConfigurationStore for InMemoryConfigurationStore {
    fn find_active_configurations(&self) -> Result<Vec<SiteMapConfiguration>> {
        Ok(self
            .configurations
            .iter()
            .filter(|config| config.active)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_filters_inactive() {
        let store: InMemoryConfigurationStore = [
            SiteMapConfiguration::new("old").with_active(false),
            SiteMapConfiguration::new("current"),
            SiteMapConfiguration::new("next"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = store
            .find_active_configurations()
            .unwrap()
            .into_iter()
            .map(|config| config.module_name)
            .collect();
        assert_eq!(names, ["current", "next"]);
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryConfigurationStore::default();
        assert!(store.find_active_configurations().unwrap().is_empty());
    }
}
