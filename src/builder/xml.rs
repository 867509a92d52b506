//! Sitemap XML rendering.
//!
//! # Entry file
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://shop.example/hats/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! # Index file
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <sitemap>
//!     <loc>https://shop.example/sitemap1.xml</loc>
//!     <lastmod>2025-01-01T08:00:00Z</lastmod>
//!   </sitemap>
//! </sitemapindex>
//! ```
//!
//! Files are assembled from separately rendered fragments so the builder can
//! measure each `<url>` before deciding which file it goes into.

use crate::{model::SiteMapUrlEntry, utils::date::DateTimeUtc};
use quick_xml::escape::escape;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// One `<sitemap>` record of the index.
#[derive(Debug, Clone)]
pub struct IndexRecord<'a> {
    pub loc: &'a str,
    pub lastmod: DateTimeUtc,
}

/// Opening of an entry file, up to and including `<urlset>`.
pub fn urlset_header(minify: bool) -> String {
    finish(
        format!("{XML_DECL}<urlset xmlns=\"{SITEMAP_NS}\">\n"),
        minify,
    )
}

/// Closing of an entry file.
pub fn urlset_footer(minify: bool) -> String {
    finish("</urlset>\n".to_string(), minify)
}

/// A single `<url>` element. `entry.loc` must already be resolved.
pub fn render_url(entry: &SiteMapUrlEntry, minify: bool) -> String {
    let mut xml = String::with_capacity(128);

    xml.push_str("  <url>\n    <loc>");
    xml.push_str(&escape(entry.loc.as_str()));
    xml.push_str("</loc>\n");
    if let Some(lastmod) = entry.lastmod {
        xml.push_str("    <lastmod>");
        xml.push_str(&lastmod.to_w3c());
        xml.push_str("</lastmod>\n");
    }
    if let Some(change_freq) = entry.change_freq {
        xml.push_str("    <changefreq>");
        xml.push_str(change_freq.as_str());
        xml.push_str("</changefreq>\n");
    }
    if let Some(priority) = entry.priority {
        xml.push_str("    <priority>");
        xml.push_str(&priority.to_string());
        xml.push_str("</priority>\n");
    }
    xml.push_str("  </url>\n");

    finish(xml, minify)
}

/// The complete index file.
pub fn render_index(records: &[IndexRecord<'_>], minify: bool) -> String {
    let mut xml = String::with_capacity(256 + records.len() * 128);

    xml.push_str(XML_DECL);
    xml.push_str("<sitemapindex xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for record in records {
        xml.push_str("  <sitemap>\n    <loc>");
        xml.push_str(&escape(record.loc));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(&record.lastmod.to_w3c());
        xml.push_str("</lastmod>\n  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    finish(xml, minify)
}

#[inline]
fn finish(xml: String, minify: bool) -> String {
    if minify { minify_xml(&xml) } else { xml }
}

/// Strip indentation and line breaks between elements.
pub fn minify_xml(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChangeFrequency, Priority};
    use quick_xml::{Reader, events::Event};

    /// Parse `xml` and count start tags named `name`; panics if malformed.
    fn count_elements(xml: &str, name: &[u8]) -> usize {
        let mut reader = Reader::from_str(xml);
        let mut count = 0;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == name => count += 1,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => panic!("malformed xml: {err}\n{xml}"),
            }
        }
        count
    }

    fn urlset(entries: &[SiteMapUrlEntry], minify: bool) -> String {
        let mut xml = urlset_header(minify);
        for entry in entries {
            xml.push_str(&render_url(entry, minify));
        }
        xml.push_str(&urlset_footer(minify));
        xml
    }

    #[test]
    fn test_urlset_empty() {
        let xml = urlset(&[], false);

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert_eq!(count_elements(&xml, b"url"), 0);
    }

    #[test]
    fn test_url_all_fields() {
        let entry = SiteMapUrlEntry::new("https://shop.example/hats/")
            .with_lastmod(DateTimeUtc::from_ymd(2025, 1, 1))
            .with_change_freq(ChangeFrequency::Weekly)
            .with_priority(Priority::from_tenths(8).unwrap());
        let xml = render_url(&entry, false);

        assert!(xml.contains("<loc>https://shop.example/hats/</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn test_url_optional_fields_omitted() {
        let xml = render_url(&SiteMapUrlEntry::new("https://shop.example/"), false);

        assert!(xml.contains("<loc>https://shop.example/</loc>"));
        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<priority>"));
    }

    #[test]
    fn test_url_escapes_special_chars() {
        let xml = render_url(
            &SiteMapUrlEntry::new("https://shop.example/search?q=a&b='c'"),
            false,
        );
        assert!(xml.contains("<loc>https://shop.example/search?q=a&amp;b=&apos;c&apos;</loc>"));
    }

    #[test]
    fn test_urlset_structure() {
        let entries = [
            SiteMapUrlEntry::new("https://shop.example/"),
            SiteMapUrlEntry::new("https://shop.example/hats/"),
            SiteMapUrlEntry::new("https://shop.example/search?q=a&b=c"),
        ];
        let xml = urlset(&entries, false);

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
        assert_eq!(count_elements(&xml, b"url"), 3);
    }

    #[test]
    fn test_minified_urlset_is_single_line() {
        let entries = [
            SiteMapUrlEntry::new("https://shop.example/"),
            SiteMapUrlEntry::new("https://shop.example/hats/"),
        ];
        let xml = urlset(&entries, true);

        assert!(!xml.contains('\n'));
        assert!(xml.contains("<url><loc>https://shop.example/</loc></url>"));
        assert_eq!(count_elements(&xml, b"url"), 2);
    }

    #[test]
    fn test_index() {
        let lastmod = DateTimeUtc::new(2025, 1, 1, 8, 0, 0);
        let records = [
            IndexRecord {
                loc: "https://shop.example/sitemap1.xml",
                lastmod,
            },
            IndexRecord {
                loc: "https://shop.example/sitemap2.xml",
                lastmod,
            },
        ];
        let xml = render_index(&records, false);

        assert!(xml.contains(&format!(r#"<sitemapindex xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("<loc>https://shop.example/sitemap2.xml</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01T08:00:00Z</lastmod>"));
        assert_eq!(count_elements(&xml, b"sitemap"), 2);
    }

    #[test]
    fn test_minify_xml() {
        assert_eq!(
            minify_xml("<root>\n\n  <item>Hello</item>\n</root>"),
            "<root><item>Hello</item></root>"
        );
        assert_eq!(minify_xml("  <tag>  content  </tag>  "), "<tag>  content  </tag>");
    }
}
