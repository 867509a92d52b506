//! Sitemap `<priority>` values.

use serde::{Deserialize, Deserializer, de};
use std::fmt;

/// Relative priority of a URL within a site, `0.0` to `1.0` in tenths.
///
/// Stored as tenths so values compare and render exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Self = Self(0);
    pub const DEFAULT: Self = Self(5);
    pub const MAX: Self = Self(10);

    /// Create from tenths (`5` is `0.5`). Returns `None` above `10`.
    pub const fn from_tenths(tenths: u8) -> Option<Self> {
        if tenths <= 10 { Some(Self(tenths)) } else { None }
    }

    /// Create from a float, rounded to the nearest tenth.
    #[allow(clippy::cast_possible_truncation)] // Bounded by the range check
    #[allow(clippy::cast_sign_loss)]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !(0.0..=1.0).contains(&value) {
            return None;
        }
        Some(Self((value * 10.0).round() as u8))
    }

    pub const fn tenths(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Float(f64),
            Text(String),
        }

        let value = match Raw::deserialize(deserializer)? {
            Raw::Float(v) => v,
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("priority `{s}` is not a number")))?,
        };
        Self::from_f64(value)
            .ok_or_else(|| de::Error::custom(format!("priority {value} is outside 0.0..=1.0")))
    }
}
