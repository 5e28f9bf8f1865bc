//! Link collection from the search-results page.

use crate::selectors::SelectorTable;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::warn;
use url::Url;

/// Extracts detail-page addresses from search-results markup.
///
/// Relative hrefs are resolved against `base`, query strings are stripped to
/// form the canonical key, and duplicates across overlapping selectors are
/// collapsed. Links are returned in first-seen document order. An empty
/// result is not an error; the caller decides how to react.
pub fn collect_event_links(html: &str, base: &Url, table: &SelectorTable) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for candidate in &table.event_links {
        let selector = match Selector::parse(candidate) {
            Ok(s) => s,
            Err(_) => {
                warn!(selector = %candidate, "Skipping unparseable link selector");
                continue;
            }
        };
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.contains(&table.link_path_hint) {
                continue;
            }
            let Some(canonical) = canonicalize(base, href) else {
                continue;
            };
            if seen.insert(canonical.clone()) {
                links.push(canonical);
            }
        }
    }

    links
}

/// Resolves an href to absolute form and strips its query string.
fn canonicalize(base: &Url, href: &str) -> Option<String> {
    let mut resolved = base.join(href).ok()?;
    resolved.set_query(None);
    Some(resolved.to_string())
}
