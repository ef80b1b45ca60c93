mod scholar;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use sitepubs::{assemble, build_record, store, BatchReport, Settings};

use crate::scholar::ScholarClient;

#[derive(Parser, Debug)]
#[command(name = "fetch_publications")]
#[command(about = "Fetch publications from a Google Scholar profile and regenerate the site data file")]
struct Args {
    /// Google Scholar user ID (default: $SCHOLAR_ID)
    #[arg(short, long)]
    scholar_id: Option<String>,

    /// Output data file (default: $PUBLICATIONS_FILE or _data/publications.yml)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Name to highlight in author lists (default: $HIGHLIGHT_NAME)
    #[arg(long)]
    name: Option<String>,

    /// Pause between Scholar requests in milliseconds (default: $SCHOLAR_DELAY_MS or 1000)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// YAML file with venue pattern/domain rules
    #[arg(long)]
    venues: Option<PathBuf>,

    /// Dry run - fetch and log, but don't write the file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut settings = Settings::from_env().context("Failed to read settings")?;
    if let Some(id) = args.scholar_id {
        settings.scholar_id = id;
    }
    if let Some(file) = args.file {
        settings.data_file = file;
    }
    if let Some(name) = args.name {
        settings.highlight_name = name;
    }
    if let Some(ms) = args.delay_ms {
        settings.request_delay = Duration::from_millis(ms);
    }
    if let Some(venues) = args.venues {
        settings.venue_rules = Some(venues);
    }

    let rules = settings
        .load_venue_rules()
        .context("Failed to load venue rules")?;

    info!("Fetching publications for Scholar ID: {}", settings.scholar_id);

    let client = ScholarClient::new(settings.request_delay)?;
    let entries = client
        .fetch_profile(&settings.scholar_id)
        .await
        .context("Failed to fetch Scholar profile; check the ID and connection, or retry later if rate-limited")?;

    info!("Found {} publications", entries.len());

    let mut records = Vec::new();
    let mut report = BatchReport::default();

    for entry in &entries {
        tokio::time::sleep(settings.request_delay).await;

        let raw = match client.fetch_publication(entry).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("  Error processing publication {}: {:#}", entry.title, e);
                report.record_skip(&entry.title, format!("{e:#}"));
                continue;
            }
        };

        match build_record(&raw, &rules, &settings.highlight_name) {
            Ok(record) => {
                let year = record
                    .year()
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "?".to_string());
                info!("  - {} ({})", record.short_title(), year);
                report.record_update(&record.title);
                records.push(record);
            }
            Err(reason) => {
                warn!("  Skipping {}: {}", entry.title, reason);
                report.record_skip(&entry.title, reason);
            }
        }
    }

    let data = assemble(records);

    if !report.skipped.is_empty() {
        warn!("Skipped {} publications", report.skipped.len());
    }

    if args.dry_run {
        info!("Dry run - {} publications not written", data.publications.len());
        return Ok(());
    }

    store::save(&settings.data_file, &data)
        .with_context(|| format!("Failed to write {}", settings.data_file.display()))?;

    info!("Saved {} publications to {}", data.publications.len(), settings.data_file.display());
    info!("Review the generated file: add extra links (code, project pages) and verify author highlighting.");
    Ok(())
}
