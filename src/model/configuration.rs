//! Sitemap and generator configurations.

use super::SiteMapUrlEntry;
use crate::config::ConfigError;
use crate::core::{ChangeFrequency, Priority};
use serde::Deserialize;
use std::fmt;

/// Protocol ceiling for `<url>` elements in one sitemap file.
pub const MAX_URLS_PER_FILE: usize = 50_000;

pub const DEFAULT_INDEX_FILE_NAME: &str = "sitemap.xml";
pub const DEFAULT_FILE_NAME_PATTERN: &str = "sitemap{n}.xml";

/// Replaced by the 1-based file number in `file_name_pattern`.
pub const FILE_NUMBER_PLACEHOLDER: &str = "{n}";

// ============================================================================
// SiteMapConfiguration
// ============================================================================

/// One sitemap setup as handed out by a configuration store.
///
/// Generator configurations are owned by their sitemap configuration and are
/// processed in the order they appear here.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteMapConfiguration {
    pub module_name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default = "default_max_urls_per_file")]
    pub max_urls_per_file: usize,
    #[serde(default = "default_index_file_name")]
    pub index_file_name: String,
    #[serde(default = "default_file_name_pattern")]
    pub file_name_pattern: String,
    #[serde(default, rename = "generator")]
    pub generators: Vec<SiteMapGeneratorConfiguration>,
}

fn default_active() -> bool {
    true
}

fn default_max_urls_per_file() -> usize {
    MAX_URLS_PER_FILE
}

fn default_index_file_name() -> String {
    DEFAULT_INDEX_FILE_NAME.to_string()
}

fn default_file_name_pattern() -> String {
    DEFAULT_FILE_NAME_PATTERN.to_string()
}

impl SiteMapConfiguration {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            is_default: false,
            active: true,
            max_urls_per_file: MAX_URLS_PER_FILE,
            index_file_name: default_index_file_name(),
            file_name_pattern: default_file_name_pattern(),
            generators: Vec::new(),
        }
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_max_urls_per_file(mut self, max: usize) -> Self {
        self.max_urls_per_file = max;
        self
    }

    pub fn with_generator(mut self, generator: SiteMapGeneratorConfiguration) -> Self {
        self.generators.push(generator);
        self
    }

    /// Name of the `number`-th (1-based) sitemap entry file.
    pub fn file_name(&self, number: usize) -> String {
        self.file_name_pattern
            .replace(FILE_NUMBER_PLACEHOLDER, &number.to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_urls_per_file == 0 || self.max_urls_per_file > MAX_URLS_PER_FILE {
            return Err(ConfigError::validation(
                "max_urls_per_file",
                format!(
                    "{} must be between 1 and {MAX_URLS_PER_FILE}",
                    self.max_urls_per_file
                ),
            ));
        }
        if !self.file_name_pattern.contains(FILE_NUMBER_PLACEHOLDER) {
            return Err(ConfigError::validation(
                "file_name_pattern",
                format!(
                    "`{}` must contain `{FILE_NUMBER_PLACEHOLDER}`",
                    self.file_name_pattern
                ),
            ));
        }
        for (field, name) in [
            ("index_file_name", self.index_file_name.as_str()),
            ("file_name_pattern", self.file_name_pattern.as_str()),
        ] {
            if !is_plain_file_name(name) {
                return Err(ConfigError::validation(
                    field,
                    format!("`{name}` must be a plain file name"),
                ));
            }
        }
        if let Some(number) = self.file_number_of(&self.index_file_name) {
            return Err(ConfigError::validation(
                "index_file_name",
                format!("collides with sitemap file {number}"),
            ));
        }
        Ok(())
    }

    /// The file number `name` would be written under, if the pattern produces it.
    fn file_number_of(&self, name: &str) -> Option<usize> {
        let (prefix, _) = self.file_name_pattern.split_once(FILE_NUMBER_PLACEHOLDER)?;
        let rest = name.strip_prefix(prefix)?;
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let number = rest[..digits].parse().ok().filter(|&n| n > 0)?;
        (self.file_name(number) == name).then_some(number)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

// ============================================================================
// SiteMapGeneratorConfiguration
// ============================================================================

/// Content domain a generator configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorType {
    Category,
    Product,
    Sku,
    Page,
    Custom,
}

impl GeneratorType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Product => "product",
            Self::Sku => "sku",
            Self::Page => "page",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for GeneratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one content type within a sitemap configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteMapGeneratorConfiguration {
    #[serde(rename = "type")]
    pub generator_type: GeneratorType,
    #[serde(default)]
    pub change_freq: ChangeFrequency,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub disabled: bool,
    /// Entries emitted verbatim by the custom URL generator.
    #[serde(default, rename = "custom_url")]
    pub custom_urls: Vec<SiteMapUrlEntry>,
}

impl SiteMapGeneratorConfiguration {
    pub fn new(generator_type: GeneratorType) -> Self {
        Self {
            generator_type,
            change_freq: ChangeFrequency::default(),
            priority: Priority::default(),
            disabled: false,
            custom_urls: Vec::new(),
        }
    }

    pub fn with_change_freq(mut self, change_freq: ChangeFrequency) -> Self {
        self.change_freq = change_freq;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_custom_url(mut self, entry: SiteMapUrlEntry) -> Self {
        self.custom_urls.push(entry);
        self
    }
}
