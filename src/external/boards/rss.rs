//! Minimal RSS item extraction shared by the feed-backed boards.
//!
//! Job feeds are flat `<item>` lists with no namespaces worth honoring, so a
//! regex pass is enough and avoids carrying an XML parser for two adapters.

use regex::Regex;
use std::sync::OnceLock;

/// One `<item>` from a feed, tags decoded and trimmed.
#[derive(Debug, Clone)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: Option<String>,
}

fn item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<item>(.*?)</item>").unwrap())
}

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}[^>]*>(.*?)</{tag}>")).unwrap()
}

fn extract_tag(block: &str, re: &Regex) -> Option<String> {
    re.captures(block).map(|c| {
        let raw = c[1].trim();
        let raw = raw
            .strip_prefix("<![CDATA[")
            .and_then(|s| s.strip_suffix("]]>"))
            .unwrap_or(raw);
        decode_entities(raw.trim())
    })
}

/// Splits a feed document into its items. Malformed items are skipped, a
/// document with no `<item>` tags yields an empty list.
pub fn parse_items(xml: &str) -> Vec<RssItem> {
    static TITLE: OnceLock<Regex> = OnceLock::new();
    static LINK: OnceLock<Regex> = OnceLock::new();
    static DESC: OnceLock<Regex> = OnceLock::new();
    static DATE: OnceLock<Regex> = OnceLock::new();

    let title_re = TITLE.get_or_init(|| tag_regex("title"));
    let link_re = LINK.get_or_init(|| tag_regex("link"));
    let desc_re = DESC.get_or_init(|| tag_regex("description"));
    let date_re = DATE.get_or_init(|| tag_regex("pubDate"));

    item_regex()
        .captures_iter(xml)
        .filter_map(|cap| {
            let block = &cap[1];
            let title = extract_tag(block, title_re)?;
            let link = extract_tag(block, link_re)?;
            Some(RssItem {
                title,
                link,
                description: extract_tag(block, desc_re).unwrap_or_default(),
                pub_date: extract_tag(block, date_re).filter(|d| !d.is_empty()),
            })
        })
        .collect()
}

/// Removes HTML tags from feed descriptions.
pub fn strip_html(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
    re.replace_all(text, "").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
<channel>
<title>Job Feed</title>
<item>
<title>Rust Developer - Ferrous Ltd - Pune</title>
<link>https://example.com/jobs/42?from=rss&amp;ref=1</link>
<description><![CDATA[<b>Company:</b> Ferrous Ltd<br>Location: Pune]]></description>
<pubDate>Mon, 12 May 2025 08:00:00 GMT</pubDate>
</item>
<item>
<title>Backend Engineer</title>
<link>https://example.com/jobs/43</link>
<description>Plain text description</description>
</item>
</channel>
</rss>"#;

    #[test]
    fn parses_items_with_cdata_and_entities() {
        let items = parse_items(FEED);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Rust Developer - Ferrous Ltd - Pune");
        assert_eq!(items[0].link, "https://example.com/jobs/42?from=rss&ref=1");
        assert!(items[0].description.contains("Ferrous Ltd"));
        assert_eq!(
            items[0].pub_date.as_deref(),
            Some("Mon, 12 May 2025 08:00:00 GMT")
        );

        assert_eq!(items[1].title, "Backend Engineer");
        assert!(items[1].pub_date.is_none());
    }

    #[test]
    fn empty_document_yields_no_items() {
        assert!(parse_items("<rss></rss>").is_empty());
        assert!(parse_items("not xml at all").is_empty());
    }

    #[test]
    fn item_without_link_is_skipped() {
        let xml = "<item><title>No link here</title></item>";
        assert!(parse_items(xml).is_empty());
    }

    #[test]
    fn strips_html_tags() {
        assert_eq!(
            strip_html("<p><b>Senior</b> Rust role.</p> Apply now."),
            "Senior Rust role. Apply now."
        );
        assert_eq!(strip_html("no markup"), "no markup");
    }
}
