//! Error types for sitemap generation.
//!
//! Conditions a run absorbs (no configuration, no generator for a
//! configuration) never surface here; see
//! [`SiteMapOutcome`](crate::model::SiteMapOutcome). Everything in
//! [`SitemapError`] aborts the run.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = SitemapError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to load sitemap configurations")]
    Store(#[source] anyhow::Error),

    #[error("sitemap generator `{generator}` failed")]
    Generator {
        generator: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid sitemap entry `{loc}`: {reason}")]
    InvalidEntry { loc: String, reason: String },

    #[error("sitemap entry `{loc}` needs {size} bytes, more than a {limit}-byte file can hold")]
    EntryTooLarge {
        loc: String,
        size: usize,
        limit: usize,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SitemapError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(path.into(), err)
    }
}
