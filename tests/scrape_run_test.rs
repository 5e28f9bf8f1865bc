use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yakima_scraper::config::ScraperConfig;
use yakima_scraper::pipeline::Scraper;
use yakima_scraper::selectors::SelectorTable;

fn test_config(server_url: &str, dir: &std::path::Path) -> ScraperConfig {
    ScraperConfig {
        search_url: format!("{server_url}/d/online/yakima/"),
        base_url: server_url.to_string(),
        timeout_seconds: 5,
        delay_ms: 0,
        output_file: dir.join("events.csv").to_string_lossy().to_string(),
        debug_dump_file: dir.join("debug_search_page.html").to_string_lossy().to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn full_run_writes_csv_for_extractable_events() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // Search page: duplicate links to one JSON-LD event, one fallback-only
    // event, and one page with nothing extractable.
    let search_html = format!(
        r#"<html><body>
            <a href="/e/yakima-fair-1?aff=search">Yakima Fair</a>
            <a href="{0}/e/yakima-fair-1?aff=home">Yakima Fair dup</a>
            <a href="/e/street-dance-2">Street Dance</a>
            <a href="/e/broken-3">Broken</a>
        </body></html>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/d/online/yakima/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_html))
        .mount(&server)
        .await;

    let fair_html = r#"<html><head><script type="application/ld+json">
        {"@type": "Event", "name": "Yakima Fair",
         "url": "https://www.eventbrite.com/e/yakima-fair-1?canonical=1",
         "startDate": "2024-09-01T10:00:00Z",
         "location": {"name": "State Fair Park",
                      "address": {"addressLocality": "Yakima", "addressRegion": "WA"}}}
    </script></head></html>"#;
    Mock::given(method("GET"))
        .and(path("/e/yakima-fair-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fair_html))
        .mount(&server)
        .await;

    let dance_html = r#"<html><body>
        <h1 class="listing-hero-title">Street Dance</h1>
        <time datetime="2024-07-04T19:00:00Z">July 4</time>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/e/street-dance-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(dance_html))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/e/broken-3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>gone</p>"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let output_file = config.output_file.clone();
    let scraper = Scraper::new(config, SelectorTable::eventbrite()).unwrap();
    let summary = scraper.run(None).await.unwrap();

    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.scraped, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.output_file.as_deref(), Some(output_file.as_str()));

    let content = std::fs::read_to_string(&output_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "title,start_date,end_date,venue_name,venue_location,organizer,url,image_url"
    );
    // The emitted url is the canonical fetch address, not the page's
    // self-declared one.
    let fair_line = lines[1..]
        .iter()
        .find(|l| l.starts_with("Yakima Fair,"))
        .expect("fair row present");
    assert!(fair_line.contains(&format!("{}/e/yakima-fair-1", server.uri())));
    assert!(fair_line.contains("2024-09-01 10:00:00"));
    assert!(fair_line.contains("\"Yakima, WA\""));
}

#[tokio::test]
async fn linkless_search_page_dumps_raw_html_and_writes_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/d/online/yakima/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>No events</body></html>"),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let output_file = config.output_file.clone();
    let dump_file = config.debug_dump_file.clone();
    let scraper = Scraper::new(config, SelectorTable::eventbrite()).unwrap();
    let summary = scraper.run(None).await.unwrap();

    assert_eq!(summary.attempted, 0);
    assert_eq!(summary.scraped, 0);
    assert_eq!(summary.output_file, None);
    assert!(!std::path::Path::new(&output_file).exists());

    let dumped = std::fs::read_to_string(&dump_file).unwrap();
    assert!(dumped.contains("No events"));
}

#[tokio::test]
async fn failing_detail_page_is_skipped_without_aborting_the_run() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let search_html = r#"
        <a href="/e/good-1">Good</a>
        <a href="/e/gone-2">Gone</a>
    "#;
    Mock::given(method("GET"))
        .and(path("/d/online/yakima/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_html))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/e/good-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h1 class="listing-hero-title">Good Event</h1>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/e/gone-2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let output_file = config.output_file.clone();
    let scraper = Scraper::new(config, SelectorTable::eventbrite()).unwrap();
    let summary = scraper.run(None).await.unwrap();

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.scraped, 1);
    assert_eq!(summary.failed, 1);

    let content = std::fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("Good Event"));
}
