//! Sitemap `<changefreq>` values.

use serde::Deserialize;
use std::fmt;

/// How frequently the page behind a URL is likely to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serde_name() {
        #[derive(Deserialize)]
        struct Doc {
            freq: ChangeFrequency,
        }
        for freq in [
            ChangeFrequency::Always,
            ChangeFrequency::Hourly,
            ChangeFrequency::Daily,
            ChangeFrequency::Weekly,
            ChangeFrequency::Monthly,
            ChangeFrequency::Yearly,
            ChangeFrequency::Never,
        ] {
            let doc: Doc = toml::from_str(&format!("freq = \"{freq}\"")).unwrap();
            assert_eq!(doc.freq, freq);
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Doc {
            freq: ChangeFrequency,
        }
        assert!(toml::from_str::<Doc>("freq = \"sometimes\"").is_err());
    }
}
