//! Sitemap domain model.
//!
//! | Type                            | Role                                         |
//! |---------------------------------|----------------------------------------------|
//! | `SiteMapConfiguration`          | One sitemap setup, selected once per run     |
//! | `SiteMapGeneratorConfiguration` | Per-content-type settings inside a setup     |
//! | `SiteMapUrlEntry`               | One `<url>` produced by a generator          |
//! | `SiteMapOutcome`                | Result of a generation run                   |

mod configuration;
mod entry;
mod outcome;

pub use configuration::{
    DEFAULT_FILE_NAME_PATTERN, DEFAULT_INDEX_FILE_NAME, FILE_NUMBER_PLACEHOLDER, GeneratorType,
    MAX_URLS_PER_FILE, SiteMapConfiguration, SiteMapGeneratorConfiguration,
};
pub use entry::SiteMapUrlEntry;
pub use outcome::{
    NotGeneratedReason, SiteMapArtifacts, SiteMapFile, SiteMapOutcome, UnhandledConfiguration,
};
