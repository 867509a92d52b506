//! Sitemap generation service.
//!
//! One run, strictly in order:
//!
//! 1. fetch active configurations from the [`ConfigurationStore`]
//! 2. pick one: first flagged `is_default`, else the first returned
//! 3. for each generator configuration, invoke the first registered
//!    generator that accepts it
//! 4. persist through the builder (entry files, index, artifact store)
//!
//! A missing configuration is reported in the outcome; a configuration no
//! generator accepts is logged, recorded and skipped. Everything else that
//! fails aborts the run, after removing the working files written so far.
//!
//! The service holds no per-run state and runs take `&self`, but concurrent
//! runs sharing a working directory write the same file names. Serialize them
//! or give each its own working directory.


use crate::{
    builder::SiteMapBuilder,
    config::SitemapSettings,
    debug,
    error::{Result, SitemapError},
    generator::{SiteMapGenerator, select_generator},
    log,
    model::{
        NotGeneratedReason, SiteMapArtifacts, SiteMapConfiguration, SiteMapOutcome,
        UnhandledConfiguration,
    },
    store::{ArtifactStore, ConfigurationStore, DirectoryStore, WorkingDirStore},
};
use std::path::PathBuf;

pub struct SiteMapService {
    store: Box<dyn ConfigurationStore>,
    generators: Vec<Box<dyn SiteMapGenerator>>,
    artifacts: Box<dyn ArtifactStore>,
    settings: SitemapSettings,
}

impl SiteMapService {
    /// Create a service with its generators in priority order.
    ///
    /// Files are promoted into `settings.output_dir` when set and left in the
    /// working directory otherwise.
    pub fn new(
        store: impl ConfigurationStore + 'static,
        generators: Vec<Box<dyn SiteMapGenerator>>,
        settings: SitemapSettings,
    ) -> Self {
        let artifacts: Box<dyn ArtifactStore> = match &settings.output_dir {
            Some(dir) => Box::new(DirectoryStore::new(dir)),
            None => Box::new(WorkingDirStore),
        };
        Self {
            store: Box::new(store),
            generators,
            artifacts,
            settings,
        }
    }

    /// Register a generator after the existing ones.
    pub fn with_generator(mut self, generator: impl SiteMapGenerator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    pub fn with_artifact_store(mut self, artifacts: impl ArtifactStore + 'static) -> Self {
        self.artifacts = Box::new(artifacts);
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings.working_dir = Some(dir.into());
        self
    }

    pub fn generators(&self) -> &[Box<dyn SiteMapGenerator>] {
        &self.generators
    }

    pub fn settings(&self) -> &SitemapSettings {
        &self.settings
    }

    /// Run one generation.
    pub fn generate_site_map(&self) -> Result<SiteMapOutcome> {
        self.settings.validate()?;

        let Some(configuration) = self.find_active_configuration()? else {
            log!("warning"; "no sitemap generated since no active configuration was found");
            return Ok(SiteMapOutcome::NotGenerated(
                NotGeneratedReason::NoConfiguration,
            ));
        };
        configuration.validate()?;
        debug!("sitemap"; "using configuration `{}`", configuration.module_name);

        let working_dir = self.settings.working_dir();
        let mut builder = SiteMapBuilder::new(
            &configuration,
            &self.settings,
            &working_dir,
            &*self.artifacts,
        )?;

        let unhandled = match self.add_entries(&configuration, &mut builder) {
            Ok(unhandled) => unhandled,
            Err(err) => {
                log!("error"; "sitemap generation aborted: {}", err);
                builder.discard();
                return Err(err);
            }
        };

        let artifacts = builder.persist_site_map()?;
        log!(
            "sitemap";
            "{} urls in {} files for `{}`",
            artifacts.url_count(),
            artifacts.files.len(),
            artifacts.configuration
        );

        Ok(SiteMapOutcome::Generated(SiteMapArtifacts {
            unhandled,
            ..artifacts
        }))
    }

    /// The configuration a run would use, if any.
    pub fn find_active_configuration(&self) -> Result<Option<SiteMapConfiguration>> {
        let configurations = self
            .store
            .find_active_configurations()
            .map_err(SitemapError::Store)?;
        Ok(select_configuration(configurations))
    }

    /// Invoke the selected generator for every enabled generator configuration.
    fn add_entries(
        &self,
        configuration: &SiteMapConfiguration,
        builder: &mut SiteMapBuilder<'_>,
    ) -> Result<Vec<UnhandledConfiguration>> {
        let mut unhandled = Vec::new();

        for (position, generator_config) in configuration.generators.iter().enumerate() {
            if generator_config.disabled {
                debug!("sitemap"; "skipping disabled {} configuration", generator_config.generator_type);
                continue;
            }

            let Some(generator) = select_generator(&self.generators, generator_config) else {
                log!(
                    "warning";
                    "no sitemap generator found to process {} configuration of `{}`",
                    generator_config.generator_type,
                    configuration.module_name
                );
                unhandled.push(UnhandledConfiguration {
                    position,
                    generator_type: generator_config.generator_type,
                });
                continue;
            };

            let before = builder.url_count();
            generator
                .add_site_map_entries(generator_config, builder)
                .map_err(|err| match err.downcast::<SitemapError>() {
                    Ok(err) => err,
                    Err(source) => SitemapError::Generator {
                        generator: generator.name().to_string(),
                        source,
                    },
                })?;
            debug!(
                "sitemap";
                "{} added {} urls for {}",
                generator.name(),
                builder.url_count() - before,
                generator_config.generator_type
            );
        }

        Ok(unhandled)
    }
}

/// First default-flagged configuration, else the first one.
pub fn select_configuration(
    configurations: Vec<SiteMapConfiguration>,
) -> Option<SiteMapConfiguration> {
    let default = configurations.iter().position(|config| config.is_default);
    configurations.into_iter().nth(default.unwrap_or(0))
}
