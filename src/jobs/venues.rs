use tracing::{info, warn};

use super::BatchReport;
use crate::models::PublicationFile;
use crate::utils::{venue_from_links, VenueRules};

/// Fill in missing venues from each record's links.
///
/// Records that already have a venue are untouched. A link that cannot be
/// parsed is reported as skipped and the venue stays unset.
pub fn fill_venues(file: &mut PublicationFile, rules: &VenueRules) -> BatchReport {
    let mut report = BatchReport::default();

    for record in &mut file.publications {
        if record.venue().is_some() {
            continue;
        }
        let Some(links) = record.links.as_ref() else {
            continue;
        };

        match venue_from_links(links, rules) {
            Ok(Some(venue)) => {
                info!("  Updated: {} -> {}", record.short_title(), venue);
                record.venue = Some(venue);
                report.record_update(&record.title);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("  Error extracting venue for {}: {}", record.short_title(), e);
                report.record_skip(&record.title, e.to_string());
            }
        }
    }

    report
}
