//! Fallback tier: heuristic CSS-selector scraping for pages without usable
//! structured data. Each field is resolved independently from its own ordered
//! candidate list.

use crate::dates::{normalize_date, parse_date_text};
use crate::selectors::SelectorTable;
use crate::types::EventRecord;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

pub fn extract(document: &Html, source_url: &str, table: &SelectorTable) -> EventRecord {
    let dates = collect_dates(document, &table.date_time);

    EventRecord {
        title: first_text(document, &table.title),
        start_date: dates.first().cloned().unwrap_or_default(),
        end_date: dates.get(1).cloned().unwrap_or_default(),
        venue_name: first_text(document, &table.venue_name),
        venue_location: first_text(document, &table.venue_address),
        organizer: first_text(document, &table.organizer),
        url: source_url.to_string(),
        image_url: first_image(document, source_url, &table.image),
    }
}

fn parse_candidate(candidate: &str) -> Option<Selector> {
    match Selector::parse(candidate) {
        Ok(selector) => Some(selector),
        Err(_) => {
            warn!(selector = %candidate, "Skipping unparseable selector");
            None
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First non-empty text across the candidate list, in candidate order.
fn first_text(document: &Html, candidates: &[String]) -> String {
    for candidate in candidates {
        let Some(selector) = parse_candidate(candidate) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element_text(element);
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Dates from all matched elements in document order. An explicit `datetime`
/// attribute is preferred per element; otherwise the visible text is scanned
/// for a date-like fragment.
fn collect_dates(document: &Html, candidates: &[String]) -> Vec<String> {
    let mut dates = Vec::new();
    for candidate in candidates {
        let Some(selector) = parse_candidate(candidate) else {
            continue;
        };
        for element in document.select(&selector) {
            if let Some(machine_date) = element.value().attr("datetime") {
                dates.push(normalize_date(machine_date));
            } else if let Some(parsed) = parse_date_text(&element_text(element)) {
                dates.push(parsed);
            }
        }
    }
    dates
}

/// First image with a usable `src` or `data-src`, resolved absolute against
/// the page address.
fn first_image(document: &Html, source_url: &str, candidates: &[String]) -> String {
    for candidate in candidates {
        let Some(selector) = parse_candidate(candidate) else {
            continue;
        };
        for element in document.select(&selector) {
            let src = element
                .value()
                .attr("src")
                .or_else(|| element.value().attr("data-src"));
            if let Some(src) = src {
                return match Url::parse(source_url).and_then(|base| base.join(src)) {
                    Ok(absolute) => absolute.to_string(),
                    Err(_) => src.to_string(),
                };
            }
        }
    }
    String::new()
}
