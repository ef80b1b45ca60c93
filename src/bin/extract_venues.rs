use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use sitepubs::{fill_venues, store, Settings};

#[derive(Parser, Debug)]
#[command(name = "extract_venues")]
#[command(about = "Fill in missing publication venues from PDF, arXiv and DOI links")]
struct Args {
    /// Data file to update (default: $PUBLICATIONS_FILE or _data/publications.yml)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// YAML file with venue pattern/domain rules (default: $VENUE_RULES or built-in tables)
    #[arg(long)]
    venues: Option<PathBuf>,

    /// Dry run - report venues without writing the file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut settings = Settings::from_env().context("Failed to read settings")?;
    if let Some(file) = args.file {
        settings.data_file = file;
    }
    if let Some(venues) = args.venues {
        settings.venue_rules = Some(venues);
    }

    let rules = settings
        .load_venue_rules()
        .context("Failed to load venue rules")?;

    let mut data = store::load(&settings.data_file)
        .with_context(|| format!("Failed to load {}", settings.data_file.display()))?;

    if data.publications.is_empty() {
        info!("No publications found in file");
        return Ok(());
    }

    info!("Found {} publications", data.publications.len());
    info!("Extracting venue information from URLs...");

    let report = fill_venues(&mut data, &rules);

    for skipped in &report.skipped {
        warn!("Skipped {}: {}", skipped.title, skipped.reason);
    }

    if !report.has_changes() {
        info!("No venues needed updating (all already have venue information or no URLs found).");
        return Ok(());
    }

    info!("Updated {} publications", report.updated.len());

    if args.dry_run {
        info!("Dry run - not writing {}", settings.data_file.display());
        return Ok(());
    }

    store::save(&settings.data_file, &data)
        .with_context(|| format!("Failed to write {}", settings.data_file.display()))?;

    info!("Done! Venue information has been updated.");
    Ok(())
}
