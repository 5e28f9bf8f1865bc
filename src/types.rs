use serde::Serialize;

/// A normalized event scraped from one detail page.
///
/// Every field is plain text and may be empty except `url`, which is always
/// set to the page address the record was extracted from. Field order here
/// fixes the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventRecord {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub venue_name: String,
    pub venue_location: String,
    pub organizer: String,
    pub url: String,
    pub image_url: String,
}

impl EventRecord {
    /// A record is only worth keeping if a title was recovered.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}
