//! Selector tables tuned to the target site's markup.
//!
//! These lists are configuration data, not logic: when the site ships a new
//! layout, the fix is a new candidate string here (or an override in
//! `config.toml`), not a code change. Candidates are tried in order and the
//! first non-empty match wins.

use serde::Deserialize;

/// Ordered CSS selector candidates for link collection and for each
/// fallback-extracted field.
#[derive(Debug, Clone)]
pub struct SelectorTable {
    /// Candidates yielding anchors to event detail pages.
    pub event_links: Vec<String>,
    /// An href must contain this path fragment to count as a detail link.
    pub link_path_hint: String,
    pub title: Vec<String>,
    pub date_time: Vec<String>,
    pub venue_name: Vec<String>,
    pub venue_address: Vec<String>,
    pub organizer: Vec<String>,
    pub image: Vec<String>,
}

/// Optional per-field replacements loaded from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectorOverrides {
    pub event_links: Option<Vec<String>>,
    pub link_path_hint: Option<String>,
    pub title: Option<Vec<String>>,
    pub date_time: Option<Vec<String>>,
    pub venue_name: Option<Vec<String>>,
    pub venue_address: Option<Vec<String>>,
    pub organizer: Option<Vec<String>>,
    pub image: Option<Vec<String>>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SelectorTable {
    /// The table tuned to the known Eventbrite layout variants.
    pub fn eventbrite() -> Self {
        Self {
            event_links: owned(&[
                "a[href*=\"/e/\"]",
                "a[data-event-id]",
                ".event-card a",
                ".search-event-card-wrapper a",
                "[data-testid=\"event-card\"] a",
            ]),
            link_path_hint: "/e/".to_string(),
            title: owned(&[
                "h1.listing-hero-title",
                "h1[data-automation=\"event-title\"]",
                ".event-title h1",
                "h1.event-title",
                "h1",
            ]),
            date_time: owned(&[
                "[datetime]",
                ".event-details time",
                ".listing-hero-date",
                ".date-info",
            ]),
            venue_name: owned(&[
                ".venue-name",
                ".location-info .name",
                "[data-automation=\"venue-name\"]",
            ]),
            venue_address: owned(&[
                ".venue-address",
                ".location-info .address",
                "[data-automation=\"venue-address\"]",
            ]),
            organizer: owned(&[
                ".organizer-name",
                ".organizer-info .name",
                "[data-automation=\"organizer-name\"]",
            ]),
            image: owned(&[
                ".event-hero-image img",
                ".listing-hero-image img",
                ".event-image img",
            ]),
        }
    }

    /// Applies any configured replacements on top of this table.
    pub fn with_overrides(mut self, overrides: &SelectorOverrides) -> Self {
        if let Some(v) = &overrides.event_links {
            self.event_links = v.clone();
        }
        if let Some(v) = &overrides.link_path_hint {
            self.link_path_hint = v.clone();
        }
        if let Some(v) = &overrides.title {
            self.title = v.clone();
        }
        if let Some(v) = &overrides.date_time {
            self.date_time = v.clone();
        }
        if let Some(v) = &overrides.venue_name {
            self.venue_name = v.clone();
        }
        if let Some(v) = &overrides.venue_address {
            self.venue_address = v.clone();
        }
        if let Some(v) = &overrides.organizer {
            self.organizer = v.clone();
        }
        if let Some(v) = &overrides.image {
            self.image = v.clone();
        }
        self
    }
}

impl Default for SelectorTable {
    fn default() -> Self {
        Self::eventbrite()
    }
}
