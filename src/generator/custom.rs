//! Custom URL generator.
//!
//! Emits the entries listed in a `custom` generator configuration, for pages
//! that no content domain knows about (landing pages, legal pages, ...).

use super::SiteMapGenerator;
use crate::{
    builder::SiteMapBuilder,
    debug,
    model::{GeneratorType, SiteMapGeneratorConfiguration},
};
use anyhow::Result;

/// Handles [`GeneratorType::Custom`] configurations.
///
/// Entries without their own `change_freq` or `priority` inherit the
/// configuration's values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomUrlGenerator;

impl SiteMapGenerator for CustomUrlGenerator {
    fn name(&self) -> &str {
        "custom"
    }

    fn can_handle(&self, config: &SiteMapGeneratorConfiguration) -> bool {
        config.generator_type == GeneratorType::Custom
    }

    fn add_site_map_entries(
        &self,
        config: &SiteMapGeneratorConfiguration,
        builder: &mut SiteMapBuilder<'_>,
    ) -> Result<()> {
        for entry in &config.custom_urls {
            let mut entry = entry.clone();
            entry.change_freq.get_or_insert(config.change_freq);
            entry.priority.get_or_insert(config.priority);
            builder.add_url_entry(entry)?;
        }
        debug!("custom"; "added {} custom urls", config.custom_urls.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SitemapSettings,
        core::{BaseUrl, ChangeFrequency, Priority},
        model::{SiteMapConfiguration, SiteMapUrlEntry},
        store::WorkingDirStore,
    };
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_can_handle_only_custom() {
        let generator = CustomUrlGenerator;
        assert!(generator.can_handle(&SiteMapGeneratorConfiguration::new(GeneratorType::Custom)));
        assert!(!generator.can_handle(&SiteMapGeneratorConfiguration::new(GeneratorType::Page)));
    }

    #[test]
    fn test_entries_inherit_configuration_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = SitemapSettings::default()
            .with_base_url(BaseUrl::parse("https://shop.example").unwrap());
        let configuration = SiteMapConfiguration::new("store");
        let mut builder =
            SiteMapBuilder::new(&configuration, &settings, dir.path(), &WorkingDirStore).unwrap();

        let config = SiteMapGeneratorConfiguration::new(GeneratorType::Custom)
            .with_change_freq(ChangeFrequency::Monthly)
            .with_priority(Priority::from_tenths(3).unwrap())
            .with_custom_url(SiteMapUrlEntry::new("/about-us"))
            .with_custom_url(
                SiteMapUrlEntry::new("/sale").with_change_freq(ChangeFrequency::Hourly),
            );

        CustomUrlGenerator
            .add_site_map_entries(&config, &mut builder)
            .unwrap();
        let artifacts = builder.persist_site_map().unwrap();

        assert_eq!(artifacts.url_count(), 2);
        let xml = fs::read_to_string(&artifacts.files[0].path).unwrap();
        assert!(xml.contains("<loc>https://shop.example/about-us</loc>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<changefreq>hourly</changefreq>"));
        assert_eq!(xml.matches("<priority>0.3</priority>").count(), 2);
    }
}
