//! Structured-data tier: JSON-LD `Event` blocks embedded in the page.

use crate::dates::normalize_date;
use crate::types::EventRecord;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::warn;

/// Scans `script[type="application/ld+json"]` blocks in document order and
/// parses the first one declaring `@type: "Event"`. Blocks may hold a single
/// object or an array of objects. Returns `None` when no event block exists;
/// malformed blocks are logged and skipped.
pub fn extract(document: &Html) -> Option<EventRecord> {
    let selector = Selector::parse("script[type=\"application/ld+json\"]").unwrap();

    for script in document.select(&selector) {
        let data: Value = match serde_json::from_str(&script.inner_html()) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring malformed JSON-LD block: {}", e);
                continue;
            }
        };

        match &data {
            Value::Array(items) => {
                if let Some(event) = items.iter().find(|item| is_event(item)) {
                    return Some(parse_event(event));
                }
            }
            _ if is_event(&data) => return Some(parse_event(&data)),
            _ => {}
        }
    }

    None
}

fn is_event(data: &Value) -> bool {
    data.get("@type").and_then(Value::as_str) == Some("Event")
}

fn parse_event(data: &Value) -> EventRecord {
    let (venue_name, venue_location) = parse_location(data.get("location"));

    EventRecord {
        title: str_field(data, "name"),
        start_date: normalize_date(&str_field(data, "startDate")),
        end_date: normalize_date(&str_field(data, "endDate")),
        venue_name,
        venue_location,
        organizer: parse_organizer(data.get("organizer")),
        url: str_field(data, "url"),
        image_url: coerce_image(data.get("image")),
    }
}

fn str_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `location` may be an object with a nested address, a bare string, or
/// absent entirely.
fn parse_location(location: Option<&Value>) -> (String, String) {
    match location {
        Some(Value::Object(venue)) => {
            let name = venue
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let location = match venue.get("address") {
                Some(Value::Object(address)) => {
                    let city = address
                        .get("addressLocality")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    let state = address
                        .get("addressRegion")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    compose_city_state(city, state)
                }
                Some(Value::String(address)) => address.clone(),
                _ => String::new(),
            };
            (name, location)
        }
        Some(Value::String(name)) => (name.clone(), String::new()),
        _ => (String::new(), String::new()),
    }
}

fn compose_city_state(city: &str, state: &str) -> String {
    match (city.is_empty(), state.is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (false, true) => city.to_string(),
        (true, false) => state.to_string(),
        (true, true) => String::new(),
    }
}

fn parse_organizer(organizer: Option<&Value>) -> String {
    match organizer {
        Some(Value::Object(o)) => o
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(Value::String(name)) => name.clone(),
        _ => String::new(),
    }
}

/// `image` may be a bare string, a list of strings or objects, or an object
/// with a `url` field. Always coerced to a single string: lists take their
/// first element, objects their `url`.
fn coerce_image(image: Option<&Value>) -> String {
    let mut value = match image {
        Some(v) => v,
        None => return String::new(),
    };
    if let Value::Array(items) = value {
        match items.first() {
            Some(first) => value = first,
            None => return String::new(),
        }
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Object(o) => o
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}
