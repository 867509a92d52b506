//! Service settings for sitemap generation, loadable from TOML.
//!
//! # Keys
//!
//! | Key              | Purpose                                        | Default            |
//! |------------------|------------------------------------------------|--------------------|
//! | `working_dir`    | Directory the files are built in               | platform temp dir  |
//! | `output_dir`     | Durable directory files are promoted into      | none               |
//! | `base_url`       | Site root for relative locations and the index | none               |
//! | `max_file_bytes` | Uncompressed size ceiling per sitemap file     | 52,428,800         |
//! | `minify`         | Strip indentation from written XML             | `false`            |
//!
//! Per-sitemap limits (entries per file, file names) live on the
//! [`SiteMapConfiguration`](crate::model::SiteMapConfiguration) instead,
//! since they travel with the configuration the store hands out.

mod error;

pub use error::ConfigError;

use crate::{core::BaseUrl, log};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Protocol ceiling for an uncompressed sitemap file (50 MiB).
pub const MAX_FILE_BYTES: usize = 52_428_800;

/// Smallest accepted `max_file_bytes`; leaves room for the envelope and a few URLs.
pub const MIN_FILE_BYTES: usize = 1024;

// ============================================================================
// settings
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SitemapSettings {
    /// Directory sitemap files are written to while building.
    pub working_dir: Option<PathBuf>,
    /// Durable directory the finished files are promoted into.
    pub output_dir: Option<PathBuf>,
    /// Site root used for relative entry locations and index records.
    pub base_url: Option<BaseUrl>,
    /// Maximum uncompressed size of one sitemap file in bytes.
    pub max_file_bytes: usize,
    /// Write XML without indentation.
    pub minify: bool,
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self {
            working_dir: None,
            output_dir: None,
            base_url: None,
            max_file_bytes: MAX_FILE_BYTES,
            minify: false,
        }
    }
}

impl SitemapSettings {
    /// Load settings from a TOML file, warning about unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let settings: Self = parse_toml(&content, path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_bytes > MAX_FILE_BYTES {
            return Err(ConfigError::validation(
                "max_file_bytes",
                format!("{} exceeds the protocol limit of {MAX_FILE_BYTES}", self.max_file_bytes),
            ));
        }
        if self.max_file_bytes < MIN_FILE_BYTES {
            return Err(ConfigError::validation(
                "max_file_bytes",
                format!("{} is below the minimum of {MIN_FILE_BYTES}", self.max_file_bytes),
            ));
        }
        if let (Some(working), Some(output)) = (&self.working_dir, &self.output_dir)
            && working == output
        {
            return Err(ConfigError::validation(
                "output_dir",
                "must differ from working_dir",
            ));
        }
        Ok(())
    }

    /// Directory files are built in; the platform temp dir unless overridden.
    pub fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn with_max_file_bytes(mut self, bytes: usize) -> Self {
        self.max_file_bytes = bytes;
        self
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }
}

// ============================================================================
// toml helpers
// ============================================================================

/// Parse TOML content, logging a warning for every key that was ignored.
pub(crate) fn parse_toml<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, ConfigError> {
    let mut ignored = Vec::new();
    let deserializer = toml::Deserializer::new(content);
    let value = serde_ignored::deserialize(deserializer, |field: serde_ignored::Path| {
        ignored.push(field.to_string());
    })?;

    if !ignored.is_empty() {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, ignored.join(", "));
    }

    Ok(value)
}
