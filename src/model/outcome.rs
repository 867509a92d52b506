//! Generation run results.

use super::GeneratorType;
use std::path::PathBuf;

/// Outcome of one generation run.
///
/// Expected conditions that stop a run early are reported here; unexpected
/// failures are returned as [`SitemapError`](crate::SitemapError).
#[derive(Debug)]
pub enum SiteMapOutcome {
    Generated(SiteMapArtifacts),
    NotGenerated(NotGeneratedReason),
}

impl SiteMapOutcome {
    pub const fn has_error(&self) -> bool {
        matches!(self, Self::NotGenerated(_))
    }

    pub const fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Generated(_) => None,
            Self::NotGenerated(reason) => Some(reason.error_code()),
        }
    }

    pub const fn artifacts(&self) -> Option<&SiteMapArtifacts> {
        match self {
            Self::Generated(artifacts) => Some(artifacts),
            Self::NotGenerated(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotGeneratedReason {
    /// The configuration store returned no active sitemap configuration.
    NoConfiguration,
}

impl NotGeneratedReason {
    pub const fn error_code(self) -> &'static str {
        match self {
            Self::NoConfiguration => "No SiteMap Configuration Found",
        }
    }
}

/// Files produced by a successful run, at their committed locations.
#[derive(Debug, Clone)]
pub struct SiteMapArtifacts {
    /// Module name of the configuration the run used.
    pub configuration: String,
    pub index_path: PathBuf,
    pub index_location: String,
    /// Entry files in the order they were written.
    pub files: Vec<SiteMapFile>,
    /// Generator configurations no registered generator accepted.
    pub unhandled: Vec<UnhandledConfiguration>,
}

impl SiteMapArtifacts {
    pub fn url_count(&self) -> usize {
        self.files.iter().map(|file| file.url_count).sum()
    }
}

/// One written `<urlset>` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMapFile {
    pub name: String,
    pub path: PathBuf,
    /// Location recorded in the index.
    pub location: String,
    pub url_count: usize,
    pub byte_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnhandledConfiguration {
    /// Position of the generator configuration within its sitemap configuration.
    pub position: usize,
    pub generator_type: GeneratorType,
}
