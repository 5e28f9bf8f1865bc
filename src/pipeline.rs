use crate::collector;
use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use crate::extractor;
use crate::selectors::SelectorTable;
use crate::sink::RecordSink;
use crate::types::EventRecord;
use scraper::Html;
use std::fs;
use std::time::Duration;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Result of a complete scrape run.
#[derive(Debug)]
pub struct RunSummary {
    /// Detail pages attempted.
    pub attempted: usize,
    /// Records accepted into the sink (non-empty title).
    pub scraped: usize,
    /// Pages that failed to fetch or yielded no title.
    pub failed: usize,
    /// Path of the CSV written, when at least one event was scraped.
    pub output_file: Option<String>,
}

/// The driver owning the HTTP session, configuration and selector table.
/// Pages are fetched strictly one at a time with a polite delay in between.
pub struct Scraper {
    client: reqwest::Client,
    config: ScraperConfig,
    selectors: SelectorTable,
}

impl Scraper {
    pub fn new(config: ScraperConfig, selectors: SelectorTable) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            config,
            selectors,
        })
    }

    /// Runs the full pipeline: collect links, scrape each detail page,
    /// write the CSV. Per-page failures are logged and skipped; only the
    /// search page itself being unreachable is fatal.
    #[instrument(skip(self))]
    pub async fn run(&self, limit: Option<usize>) -> Result<RunSummary> {
        info!("Starting scraper for {}", self.config.search_url);

        let mut links = self.collect_links().await?;
        if links.is_empty() {
            error!("No events found on search page");
            return Ok(RunSummary {
                attempted: 0,
                scraped: 0,
                failed: 0,
                output_file: None,
            });
        }
        if let Some(limit) = limit {
            links.truncate(limit);
        }

        let total = links.len();
        let mut sink = RecordSink::new();
        let mut failed = 0;

        for (i, url) in links.iter().enumerate() {
            info!("Scraping event {}/{}: {}", i + 1, total, url);

            match self.scrape_event_page(url).await {
                Ok(record) if record.has_title() => {
                    info!("Scraped: {}", record.title);
                    sink.push(record);
                }
                Ok(_) => {
                    warn!("Failed to scrape event: {}", url);
                    failed += 1;
                }
                Err(e) => {
                    error!("Error fetching event page {}: {}", url, e);
                    failed += 1;
                }
            }

            // Be polite, pause between requests.
            if i + 1 < total {
                tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
            }
        }

        let scraped = sink.len();
        let output_file = sink
            .finalize(&self.config.output_file)?
            .map(|_| self.config.output_file.clone());

        info!(
            "Scraping complete. Found {} events out of {} pages.",
            scraped, total
        );

        Ok(RunSummary {
            attempted: total,
            scraped,
            failed,
            output_file,
        })
    }

    /// Fetches the search-results page and extracts candidate links. When
    /// nothing matches, the raw page is kept on disk for offline inspection
    /// of whatever the site's layout has changed into.
    async fn collect_links(&self) -> Result<Vec<String>> {
        info!("Fetching search results from: {}", self.config.search_url);

        let body = self.fetch(&self.config.search_url).await?;
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| ScraperError::Config(format!("Invalid base_url: {e}")))?;
        let links = collector::collect_event_links(&body, &base, &self.selectors);

        info!("Found {} unique event links", links.len());

        if links.is_empty() {
            warn!("No event links found. Page structure may have changed.");
            if let Err(e) = fs::write(&self.config.debug_dump_file, &body) {
                warn!("Could not write debug dump: {}", e);
            } else {
                info!(
                    "Saved search page to {} for inspection",
                    self.config.debug_dump_file
                );
            }
        }

        Ok(links)
    }

    async fn scrape_event_page(&self, url: &str) -> Result<EventRecord> {
        let body = self.fetch(url).await?;
        let document = Html::parse_document(&body);
        Ok(extractor::extract_event(&document, url, &self.selectors))
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
