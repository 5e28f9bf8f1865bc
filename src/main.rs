use clap::{Parser, Subcommand};
use tracing::error;

use yakima_scraper::config::Config;
use yakima_scraper::logging;
use yakima_scraper::pipeline::Scraper;
use yakima_scraper::selectors::SelectorTable;

#[derive(Parser)]
#[command(name = "yakima_scraper")]
#[command(about = "Eventbrite event data scraper for Yakima area events")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = yakima_scraper::config::DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the search page and all discovered event pages
    Scrape {
        /// Override the output CSV path from the config
        #[arg(long)]
        output: Option<String>,
        /// Stop after this many detail pages
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load_from(&cli.config)?;

    match cli.command {
        Commands::Scrape { output, limit } => {
            if let Some(output) = output {
                config.scraper.output_file = output;
            }
            let selectors = SelectorTable::eventbrite().with_overrides(&config.selectors);

            println!("🔄 Running Eventbrite scraper...");
            let scraper = Scraper::new(config.scraper, selectors)?;
            match scraper.run(limit).await {
                Ok(summary) => {
                    println!("\n📊 Scrape results:");
                    println!("   Pages attempted: {}", summary.attempted);
                    println!("   Events scraped: {}", summary.scraped);
                    println!("   Failed pages: {}", summary.failed);
                    match summary.output_file {
                        Some(path) => println!("   Output file: {path}"),
                        None => println!("   Output file: (none written)"),
                    }
                }
                Err(e) => {
                    error!("Scrape run failed: {}", e);
                    println!("❌ Scrape run failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
