//! Pulls news items out of an RSS payload.
//!
//! This is deliberately not a feed parser: it only recognizes the `<item>`,
//! `<title>`, `<link>`, `<pubDate>` and `<source>` shapes the news search
//! endpoint emits, and anything it cannot match is treated as missing.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::NewsItem;

/// Number of news items kept per lookup
pub const MAX_NEWS_ITEMS: usize = 5;

static ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item(?:\s[^>]*)?>(.*?)</item>").unwrap());
static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| tag_regex("title"));
static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| tag_regex("link"));
static PUB_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| tag_regex("pubDate"));
static SOURCE_REGEX: LazyLock<Regex> = LazyLock::new(|| tag_regex("source"));

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")).unwrap()
}

/// Up to `limit` items, in document order
pub fn extract_items(xml: &str, limit: usize) -> Vec<NewsItem> {
    ITEM_REGEX
        .captures_iter(xml)
        .take(limit)
        .map(|item| {
            let body = item.get(1).map_or("", |m| m.as_str());
            NewsItem {
                title: extract_field(body, &TITLE_REGEX),
                link: extract_field(body, &LINK_REGEX),
                source: extract_field(body, &SOURCE_REGEX),
                pub_date: extract_field(body, &PUB_DATE_REGEX),
            }
        })
        .collect()
}

fn extract_field(body: &str, regex: &Regex) -> String {
    regex
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| clean_text(m.as_str()))
        .unwrap_or_default()
}

fn clean_text(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
    {
        Some(cdata) => cdata.trim().to_string(),
        None => decode_entities(trimmed),
    }
}

fn decode_entities(text: &str) -> String {
    // &amp; last so that "&amp;lt;" stays "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
