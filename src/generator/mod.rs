//! Generators that produce sitemap URL entries.
//!
//! Each generator covers one content domain (categories, products, static
//! pages, ...) and is registered with the service in a fixed order. For every
//! generator configuration the service asks the registered generators in
//! that order and the first one whose [`can_handle`] accepts it is invoked:
//!
//! ```text
//! [category, product, custom]    config(type = product)
//!    │ can_handle? no
//!    └──────► product: can_handle? yes ──► add_site_map_entries(config, builder)
//! ```
//!
//! [`can_handle`]: SiteMapGenerator::can_handle

mod custom;

pub use custom::CustomUrlGenerator;

use crate::{builder::SiteMapBuilder, model::SiteMapGeneratorConfiguration};
use anyhow::Result;

/// Capability contract for one content domain.
pub trait SiteMapGenerator: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether this generator produces entries for `config`.
    ///
    /// Must be a pure predicate; it is called while scanning for a generator.
    fn can_handle(&self, config: &SiteMapGeneratorConfiguration) -> bool;

    /// Add this domain's entries for `config` to `builder`.
    ///
    /// Errors abort the run. Builder errors may be forwarded with `?`; the
    /// service reports them as themselves rather than as generator failures.
    fn add_site_map_entries(
        &self,
        config: &SiteMapGeneratorConfiguration,
        builder: &mut SiteMapBuilder<'_>,
    ) -> Result<()>;
}

/// First generator in registration order that accepts `config`.
pub fn select_generator<'a>(
    generators: &'a [Box<dyn SiteMapGenerator>],
    config: &SiteMapGeneratorConfiguration,
) -> Option<&'a dyn SiteMapGenerator> {
    generators
        .iter()
        .find(|generator| generator.can_handle(config))
        .map(|generator| &**generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeneratorType;

    struct Accepts {
        name: &'static str,
        types: &'static [GeneratorType],
    }

    impl SiteMapGenerator for Accepts {
        fn name(&self) -> &str {
            self.name
        }

        fn can_handle(&self, config: &SiteMapGeneratorConfiguration) -> bool {
            self.types.contains(&config.generator_type)
        }

        fn add_site_map_entries(
            &self,
            _config: &SiteMapGeneratorConfiguration,
            _builder: &mut SiteMapBuilder<'_>,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn generators() -> Vec<Box<dyn SiteMapGenerator>> {
        vec![
            Box::new(Accepts {
                name: "catalog",
                types: &[GeneratorType::Category, GeneratorType::Product],
            }),
            Box::new(Accepts {
                name: "products",
                types: &[GeneratorType::Product],
            }),
        ]
    }

    #[test]
    fn test_select_first_match_wins() {
        let generators = generators();
        let config = SiteMapGeneratorConfiguration::new(GeneratorType::Product);
        let selected = select_generator(&generators, &config).unwrap();
        assert_eq!(selected.name(), "catalog");
    }

    #[test]
    fn test_select_none() {
        let generators = generators();
        let config = SiteMapGeneratorConfiguration::new(GeneratorType::Page);
        assert!(select_generator(&generators, &config).is_none());
        assert!(select_generator(&[], &config).is_none());
    }
}
