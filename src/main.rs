//! scholarsync - Google Scholar publication sync
//!
//! Fetches the configured author's publications from Google Scholar and
//! regenerates the site's typed publication data module.
//!
//! ## Usage
//!
//! ```bash
//! scholarsync
//! scholarsync --proxy http://127.0.0.1:7890 --debug
//! ```
//!
//! The author id and output path are build-time configuration, not flags:
//! the tool always syncs the same profile into the same data module.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use scholarsync::dedupe::dedupe_by_title;
use scholarsync::emit;
use scholarsync::publication::Publication;
use scholarsync::scholar::{FetchOptions, FetchOutcome, ScholarClient};
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Google Scholar author id to sync
const SCHOLAR_ID: &str = "eydLJrwAAAAJ";

/// Generated data module consumed by the site
const OUTPUT_PATH: &str = "src/data/publications-auto.ts";

/// Google Scholar publication sync for the academic site
#[derive(Parser)]
#[command(name = "scholarsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Proxy URL (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    proxy: Option<String>,

    /// Mirror site URL
    #[arg(long)]
    mirror: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let options = FetchOptions {
        proxy: cli.proxy,
        base_url: cli.mirror,
    };

    run_sync(&options, SCHOLAR_ID, Path::new(OUTPUT_PATH)).await
}

/// Fetch, normalize, and write the publication data module.
async fn run_sync(options: &FetchOptions, scholar_id: &str, output_path: &Path) -> Result<()> {
    let client = ScholarClient::new(options).context("Failed to build Scholar client")?;

    // Author lookup is the only fatal step: without the profile there is
    // nothing to emit.
    let (profile, records) = client
        .fetch_author(scholar_id)
        .await
        .context("Author lookup failed")?;

    println!("Found author: {}", profile.name);
    println!("Fetching details for {} publications...", records.len());

    // Fill each record's detail page; failures degrade to basic info.
    let mut outcomes: Vec<FetchOutcome> = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        let title = record.bib.title.clone().unwrap_or_default();
        info!(n = i + 1, title = %truncate(&title, 60), "Filling record");
        outcomes.push(client.fill_record(scholar_id, record).await);
    }

    let basic_only = outcomes.iter().filter(|o| o.is_basic()).count();
    if basic_only > 0 {
        println!("Note: {} records kept basic info only (detail fetch failed)", basic_only);
    }

    // Normalization pipeline: parse, dedupe, sort, snapshot.
    let publications: Vec<Publication> = outcomes
        .iter()
        .map(|o| Publication::from_raw(o.record()))
        .collect();
    let parsed = publications.len();

    let deduped = dedupe_by_title(publications);
    let duplicates = parsed - deduped.len();

    let now = Local::now();
    let (stats, ordered) = emit::emit(&profile, deduped, now);
    let content = emit::render_typescript(&profile, &stats, &ordered, now);
    emit::write_data_module(output_path, &content).context("Failed to write data module")?;

    println!("Generated: {}", output_path.display());
    println!("  Publications: {} ({} duplicates removed)", stats.total_publications, duplicates);
    println!("  Total citations: {}", stats.total_citations);
    println!("  h-index: {}", stats.h_index);
    println!("  i10-index: {}", stats.i10_index);

    Ok(())
}

/// Truncate a string for log lines, char-boundary safe
fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
