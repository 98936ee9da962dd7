//! ai-news command-line tool.
//!
//! `ainews fetch` pulls one page from NewsAPI into the local store;
//! `ainews list` prints what is stored.

use std::sync::Arc;

use ainews_client::{NewsApiClient, NewsApiConfig, NewsCurator};
use ainews_core::{AppConfig, NewsDb, NewsItem};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ainews", version, about = "Fetch and inspect cached AI news")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the latest news and store it.
    Fetch,
    /// Print stored news, newest first.
    List {
        /// Maximum number of items to print.
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let db = NewsDb::open(&config.db_path).await?;

    match cli.command {
        Command::Fetch => {
            let client = NewsApiClient::new(NewsApiConfig::from(&config))?;
            let curator = NewsCurator::new(Arc::new(client), db.clone());
            let batch = curator.refresh().await?;
            println!(
                "Fetched {} news items at {} ({} stored)",
                batch.len(),
                batch.fetched_at.to_rfc3339(),
                db.count().await?
            );
        }
        Command::List { limit } => {
            let items = db.fetch_recent(limit).await?;
            if items.is_empty() {
                println!("No cached news in {}", config.db_path.display());
                return Ok(());
            }
            for item in &items {
                println!("{}", format_line(item));
            }
            println!("{}", footer(items.len(), db.count().await?));
        }
    }

    Ok(())
}

fn format_line(item: &NewsItem) -> String {
    format!("{}  [{}] {}\n    {}", item.published_at.format("%Y-%m-%d %H:%M"), item.source, item.title, item.url)
}

fn footer(shown: usize, total: u64) -> String {
    format!("Showing {shown} of {total} cached items")
}
