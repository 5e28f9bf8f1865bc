use crate::error::{Result, ScraperError};
use crate::selectors::SelectorOverrides;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub selectors: SelectorOverrides,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Search-results page the run starts from.
    pub search_url: String,
    /// Base address relative links are resolved against.
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Polite pause between consecutive detail-page fetches.
    pub delay_ms: u64,
    pub user_agent: String,
    pub output_file: String,
    /// Where the raw search page is dumped when no links are found.
    pub debug_dump_file: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.eventbrite.com/d/online/yakima/".to_string(),
            base_url: "https://www.eventbrite.com".to_string(),
            timeout_seconds: 10,
            delay_ms: 2000,
            user_agent: "Mozilla/5.0 (YakimaFinds Event Calendar Bot) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            output_file: "yakima_eventbrite_events.csv".to_string(),
            debug_dump_file: "debug_search_page.html".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the given TOML file, or built-in defaults
    /// when the file does not exist.
    pub fn load_from(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ScraperError::Config(format!("Failed to read config file '{path}': {e}")))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_from("does_not_exist.toml").unwrap();
        assert_eq!(config.scraper.timeout_seconds, 10);
        assert_eq!(config.scraper.delay_ms, 2000);
        assert!(config.scraper.search_url.contains("eventbrite.com"));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_unset_fields() {
        let parsed: Config = toml::from_str(
            r#"
            [scraper]
            delay_ms = 500
            output_file = "out.csv"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.scraper.delay_ms, 500);
        assert_eq!(parsed.scraper.output_file, "out.csv");
        assert_eq!(parsed.scraper.timeout_seconds, 10);
    }
}
