use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sitepubs::{fix_authors, store, Settings};

#[derive(Parser, Debug)]
#[command(name = "fix_publications")]
#[command(about = "Repair corrupted author lists and highlight the site owner's name")]
struct Args {
    /// Data file to repair (default: $PUBLICATIONS_FILE or _data/publications.yml)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Name to highlight (default: $HIGHLIGHT_NAME)
    #[arg(long)]
    name: Option<String>,

    /// Dry run - report fixes without writing the file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut settings = Settings::from_env().context("Failed to read settings")?;
    if let Some(file) = args.file {
        settings.data_file = file;
    }
    if let Some(name) = args.name {
        settings.highlight_name = name;
    }

    let mut data = store::load(&settings.data_file)
        .with_context(|| format!("Failed to load {}", settings.data_file.display()))?;

    if data.publications.is_empty() {
        info!("No publications found in file");
        return Ok(());
    }

    info!("Found {} publications", data.publications.len());
    info!("Fixing authors fields...");

    let report = fix_authors(&mut data, &settings.highlight_name);

    if !report.has_changes() {
        info!("No issues found or unable to auto-fix. The authors may need manual correction.");
        return Ok(());
    }

    info!("Fixed {} publications", report.updated.len());

    if args.dry_run {
        info!("Dry run - not writing {}", settings.data_file.display());
        return Ok(());
    }

    store::save(&settings.data_file, &data)
        .with_context(|| format!("Failed to write {}", settings.data_file.display()))?;

    info!("Done! Please review the file and manually fix any remaining issues.");
    Ok(())
}
