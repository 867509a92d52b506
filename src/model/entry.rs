//! Sitemap URL entries.

use crate::core::{ChangeFrequency, Priority};
use crate::utils::date::DateTimeUtc;
use serde::Deserialize;

/// One `<url>` element.
///
/// `loc` may be relative; the builder resolves it against the site's base
/// URL before writing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteMapUrlEntry {
    pub loc: String,
    pub lastmod: Option<DateTimeUtc>,
    pub change_freq: Option<ChangeFrequency>,
    pub priority: Option<Priority>,
}

impl SiteMapUrlEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            change_freq: None,
            priority: None,
        }
    }

    pub fn with_lastmod(mut self, lastmod: DateTimeUtc) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    pub fn with_change_freq(mut self, change_freq: ChangeFrequency) -> Self {
        self.change_freq = Some(change_freq);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}
