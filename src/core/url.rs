//! Absolute URL handling for sitemap locations.
//!
//! - Entry and index locations are always absolute `http(s)` URLs
//! - Relative locations are resolved against the site's [`BaseUrl`]
//! - Output is the `url` crate's serialization (percent-encoded, ASCII)

use serde::{Deserialize, Deserializer, de};
use std::fmt;
use url::Url;

/// Longest `<loc>` value the sitemap protocol accepts.
pub const MAX_LOCATION_LEN: usize = 2048;

/// Site root that relative locations are resolved against.
///
/// Invariants:
/// - Scheme is `http` or `https`
/// - Path always ends with `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut url = Url::parse(raw.trim()).map_err(|e| format!("`{raw}` is not a URL: {e}"))?;
        if !is_web_scheme(&url) {
            return Err(format!("`{raw}` must use http or https"));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self(url))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Join a path below the base, ignoring any leading `/`.
    ///
    /// `https://shop.example/eu/` + `/sitemap1.xml` -> `https://shop.example/eu/sitemap1.xml`
    pub fn join(&self, path: &str) -> Result<String, String> {
        self.0
            .join(path.trim_start_matches('/'))
            .map(String::from)
            .map_err(|e| format!("cannot join `{path}` onto {}: {e}", self.0))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

#[inline]
fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Resolve an entry location into the absolute form written to `<loc>`.
///
/// Absolute `http(s)` locations are kept, anything else is joined onto
/// `base`. Fails when no base is available for a relative location or when
/// the result exceeds [`MAX_LOCATION_LEN`].
pub fn resolve_location(loc: &str, base: Option<&BaseUrl>) -> Result<String, String> {
    let trimmed = loc.trim();
    if trimmed.is_empty() {
        return Err("location is empty".to_string());
    }

    let resolved = match Url::parse(trimmed) {
        Ok(url) if is_web_scheme(&url) => String::from(url),
        Ok(url) => return Err(format!("unsupported scheme `{}`", url.scheme())),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base.join(trimmed)?,
            None => return Err("relative location requires a base_url".to_string()),
        },
        Err(e) => return Err(e.to_string()),
    };

    if resolved.len() > MAX_LOCATION_LEN {
        return Err(format!(
            "location is {} characters, limit is {MAX_LOCATION_LEN}",
            resolved.len()
        ));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let base = BaseUrl::parse("https://shop.example/eu").unwrap();
        assert_eq!(base.as_str(), "https://shop.example/eu/");
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(BaseUrl::parse("ftp://shop.example/").is_err());
        assert!(BaseUrl::parse("not a url").is_err());
    }

    #[test]
    fn test_join_ignores_leading_slash() {
        let base = BaseUrl::parse("https://shop.example/eu/").unwrap();
        assert_eq!(
            base.join("/sitemap1.xml").unwrap(),
            "https://shop.example/eu/sitemap1.xml"
        );
        assert_eq!(
            base.join("sitemap1.xml").unwrap(),
            "https://shop.example/eu/sitemap1.xml"
        );
    }

    #[test]
    fn test_resolve_absolute_location_kept() {
        let resolved = resolve_location("https://other.example/a?b=c&d=e", None).unwrap();
        assert_eq!(resolved, "https://other.example/a?b=c&d=e");
    }

    #[test]
    fn test_resolve_relative_location() {
        let base = BaseUrl::parse("https://shop.example/").unwrap();
        assert_eq!(
            resolve_location("/hats/fedora", Some(&base)).unwrap(),
            "https://shop.example/hats/fedora"
        );
    }

    #[test]
    fn test_resolve_relative_without_base_fails() {
        assert!(resolve_location("/hats", None).is_err());
    }

    #[test]
    fn test_resolve_encodes_non_ascii() {
        let base = BaseUrl::parse("https://shop.example/").unwrap();
        assert_eq!(
            resolve_location("/café", Some(&base)).unwrap(),
            "https://shop.example/caf%C3%A9"
        );
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        assert!(resolve_location("   ", None).is_err());
        assert!(resolve_location("mailto:sales@shop.example", None).is_err());

        let long = format!("https://shop.example/{}", "a".repeat(MAX_LOCATION_LEN));
        assert!(resolve_location(&long, None).is_err());
    }
}
