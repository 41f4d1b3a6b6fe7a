//! Command-line surface. Each `visit` is one activation of the popup.
//!
//! Settings come from flags or the environment:
//!
//! - `TEDUH_DB` - SQLite file holding the tracker state
//! - `TEDUH_TIMEOUT_SECS` - HTTP timeout when fetching listing pages

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::db::{init_db, Database, KeyValueStore, SqliteStore};
use crate::domain::listing::link_for_code;
use crate::popup::{selected_url, PopupSession, PopupView};
use crate::scraper::{HtmlPage, PageFetcher, RemotePage};

#[derive(Debug, Parser)]
#[command(name = "teduh_tracker")]
#[command(author, version, about = "Track unit sales on TEDUH listing pages", long_about = None)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "TEDUH_DB", default_value = "teduh_tracker.sqlite3")]
    pub db: PathBuf,

    /// HTTP timeout in seconds.
    #[arg(long, env = "TEDUH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            db_path: self.db.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            format: self.format.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scrape a listing page, report counts and newly sold units.
    Visit {
        /// Listing page URL.
        url: String,
        /// Read the page from a saved HTML file instead of fetching it.
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Mark a listing's newly sold units as read.
    Ack { url: String },
    /// Show visited listings in stored order.
    List,
    /// Normalize and deduplicate the visited listings.
    Cleanup,
    /// Build a listing link from an APDL code.
    Link { code: String },
    /// Print the URL for a selected visited listing.
    Open { selection: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub timeout: Duration,
    pub format: OutputFormat,
}

fn open_session(config: &Config) -> Result<PopupSession> {
    let db = Database::new(config.db_path.clone());
    init_db(&db).with_context(|| format!("opening {}", config.db_path.display()))?;
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db));
    Ok(PopupSession::new(store))
}

fn print_view(view: &PopupView, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{view}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
    }
    Ok(())
}

pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.config();

    match cli.command {
        Commands::Link { code } => {
            println!("{}", link_for_code(&code)?);
        }
        Commands::Open { selection } => {
            if let Some(url) = selected_url(&selection) {
                println!("{url}");
            }
        }
        Commands::Visit { url, html } => {
            let session = open_session(&config)?;
            // Remote pages are only downloaded once the session has
            // recognised the URL as a unit listing.
            let view = match html {
                Some(path) => session.activate(&HtmlPage::from_file(url, &path).await?).await,
                None => {
                    let page = RemotePage::new(url, PageFetcher::new(config.timeout)?);
                    session.activate(&page).await
                }
            };
            print_view(&view, &config.format)?;
        }
        Commands::Ack { url } => {
            let session = open_session(&config)?;
            session.acknowledge(&url).await?;
            println!("Cleared newly sold units for {url}");
        }
        Commands::List => {
            let session = open_session(&config)?;
            let visited = session.visited().await;
            match config.format {
                OutputFormat::Text => {
                    for entry in &visited {
                        println!("{}\t{}", entry.url, entry.title);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&visited)?),
            }
        }
        Commands::Cleanup => {
            let session = open_session(&config)?;
            let report = session.cleanup().await?;
            println!(
                "{} listings, {} normalized, {} duplicates dropped{}",
                report.entries.len(),
                report.normalized,
                report.dropped,
                if report.written { "" } else { " (no changes)" }
            );
        }
    }

    Ok(())
}
