use anyhow::{Context, Result};
use artfeed::app::App;
use artfeed::config::{Config, API_KEY_ENV};
use artfeed::feed::{FeedService, HttpFeedClient, OrderBy};
use artfeed::ui;
use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

/// Get the config directory path (~/.config/artfeed/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("artfeed"))
}

#[derive(Parser, Debug)]
#[command(name = "artfeed", about = "Browse the latest art news from the Guardian")]
struct Args {
    /// Config file (default: ~/.config/artfeed/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sort order, overrides the config file
    #[arg(long, value_enum)]
    order_by: Option<OrderBy>,

    /// Number of articles to fetch, overrides the config file
    #[arg(long, value_name = "N")]
    page_size: Option<NonZeroU32>,

    /// Search keyword, overrides the config file
    #[arg(long)]
    query: Option<String>,

    /// Print the list to stdout instead of starting the TUI
    #[arg(long)]
    plain: bool,
}

/// Logs go to stderr in plain mode and to a file under the config
/// directory otherwise, so they don't tear the TUI.
fn init_tracing(plain: bool, config_dir: &std::path::Path) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();

    if plain {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    let log_path = config_dir.join("artfeed.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    init_tracing(args.plain, &config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

    if let Some(order_by) = args.order_by {
        config.order_by = order_by;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(query) = args.query {
        config.query = query;
    }

    let request = config.request(std::env::var(API_KEY_ENV).ok());
    tracing::debug!(?request, "Prepared search request");

    let client = HttpFeedClient::new().context("Failed to build HTTP client")?;
    let service = FeedService::new(client);

    if args.plain {
        match service.fetch_articles(&request).await {
            Ok(articles) if articles.is_empty() => {
                eprintln!("No articles found");
            }
            Ok(articles) => {
                for article in &articles {
                    println!("{}", ui::plain_line(article));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Fetch failed");
                eprintln!("{}: {}", e.empty_state().message(), e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let mut app = App::new();
    ui::run(&mut app, Arc::new(service), Arc::new(request)).await?;

    Ok(())
}
