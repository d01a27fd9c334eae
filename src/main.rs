//! Site-Scribe main entry point
//!
//! This is the command-line interface for the Site-Scribe site transcriber.

use anyhow::{bail, Context};
use clap::Parser;
use site_scribe::config::{load_config_with_hash, Config};
use site_scribe::crawler::crawl;
use site_scribe::events::{CrawlEvent, EventSink, JsonLinesSink};
use site_scribe::output::write_artifacts;
use site_scribe::state::PageState;
use site_scribe::url::normalize_seed;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Site-Scribe: transcribe a website into one text file and a sitemap
///
/// Crawls every page reachable from URL on the same host, breadth-first,
/// and writes the visible text of all pages plus a sitemap of the visited
/// URLs.
#[derive(Parser, Debug)]
#[command(name = "site-scribe")]
#[command(version)]
#[command(about = "Transcribe a website into text and a sitemap", long_about = None)]
struct Cli {
    /// Seed URL; https:// is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the artifact files (overrides config)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum number of pages to visit (overrides config)
    #[arg(long)]
    max_pages: Option<u32>,

    /// Delay after each page in milliseconds (overrides config)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print every event as a JSON line on stdout instead of writing files
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;
    let seed = normalize_seed(&cli.url).with_context(|| format!("Invalid URL '{}'", cli.url))?;

    tracing::info!("Starting crawl for: {}", seed);

    // The crawl runs on its own task; this task drains events until the
    // terminal one arrives or the channel closes.
    let (tx, mut rx) = mpsc::unbounded_channel();
    let crawl_config = config.clone();
    let seed_str = seed.to_string();
    let crawl_task = tokio::spawn(async move {
        let mut tx = tx;
        crawl(&seed_str, &crawl_config, &mut tx).await;
    });

    let mut json_sink = cli.json.then(|| JsonLinesSink::new(std::io::stdout()));
    let mut failure = None;

    while let Some(event) = rx.recv().await {
        let terminal = event.is_terminal();

        if let Some(sink) = json_sink.as_mut() {
            if let CrawlEvent::Error { message } = &event {
                failure = Some(message.clone());
            }
            if sink.report(event).is_err() {
                tracing::info!("stdout closed, stopping");
                break;
            }
        } else {
            match event {
                CrawlEvent::Progress { message, page } => match page {
                    Some(page) if page.state == PageState::Scraped => {
                        tracing::info!("{}", message)
                    }
                    _ => tracing::warn!("{}", message),
                },
                CrawlEvent::Complete { data } => {
                    let directory = PathBuf::from(&config.output.directory);
                    let written = write_artifacts(&data, &seed, &directory)
                        .with_context(|| format!("Failed to write to {}", directory.display()))?;
                    println!("{}", written.full_text.display());
                    println!("{}", written.sitemap.display());
                }
                CrawlEvent::Error { message } => failure = Some(message),
            }
        }

        if terminal {
            break;
        }
    }

    // Dropping the receiver lets a still-running crawl notice and stop
    drop(rx);
    crawl_task.await.context("Crawl task panicked")?;

    if let Some(message) = failure {
        bail!("Crawl failed: {}", message);
    }

    Ok(())
}

/// Loads the config file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        if max_pages == 0 {
            bail!("--max-pages must be at least 1");
        }
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.display().to_string();
    }

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so `--json` output on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_scribe=info,warn"),
            1 => EnvFilter::new("site_scribe=debug,info"),
            2 => EnvFilter::new("site_scribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
