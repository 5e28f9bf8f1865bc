//! Two-tier event extraction from a detail page.
//!
//! The structured-data tier is tried first; the fallback tier runs when no
//! JSON-LD event block exists or the block carries no title. The tiers are a
//! fallback chain, not exception control flow: each either yields a record or
//! it does not.

mod fallback;
mod json_ld;

use crate::selectors::SelectorTable;
use crate::types::EventRecord;
use scraper::Html;
use tracing::info;

/// Produces one record from a parsed detail page.
///
/// The returned `url` is always the caller-supplied source address, even when
/// the page declares a different canonical URL for itself. A record with an
/// empty title means neither tier recovered anything usable; the caller is
/// expected to drop it.
pub fn extract_event(document: &Html, source_url: &str, table: &SelectorTable) -> EventRecord {
    let mut record = match json_ld::extract(document) {
        Some(record) if record.has_title() => record,
        _ => {
            info!(url = %source_url, "No usable structured data, using HTML fallback");
            fallback::extract(document, source_url, table)
        }
    };

    record.url = source_url.to_string();
    record
}
