//! storemap - sitemap generation for storefronts.
//!
//! A [`SiteMapService`] picks the active [`SiteMapConfiguration`] from a
//! [`ConfigurationStore`], hands each of its generator configurations to the
//! first registered [`SiteMapGenerator`] that accepts it, and persists the
//! collected entries as numbered sitemap files plus an index.
//!
//! ```ignore
//! let service = SiteMapService::new(
//!     TomlConfigurationStore::new("sitemaps.toml"),
//!     vec![Box::new(CategoryGenerator::new(catalog)), Box::new(CustomUrlGenerator)],
//!     SitemapSettings::load(Path::new("sitemap.toml"))?,
//! );
//!
//! match service.generate_site_map()? {
//!     SiteMapOutcome::Generated(artifacts) => println!("{}", artifacts.index_path.display()),
//!     SiteMapOutcome::NotGenerated(reason) => eprintln!("{}", reason.error_code()),
//! }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod logger;
pub mod model;
pub mod service;
pub mod store;
pub mod utils;

pub use builder::SiteMapBuilder;
pub use config::{ConfigError, SitemapSettings};
pub use error::{Result, SitemapError};
pub use generator::{CustomUrlGenerator, SiteMapGenerator};
pub use model::{
    GeneratorType, NotGeneratedReason, SiteMapArtifacts, SiteMapConfiguration, SiteMapFile,
    SiteMapGeneratorConfiguration, SiteMapOutcome, SiteMapUrlEntry,
};
pub use service::SiteMapService;
pub use store::{
    ArtifactStore, ConfigurationStore, DirectoryStore, InMemoryConfigurationStore,
    TomlConfigurationStore, WorkingDirStore,
};
