use tracing::info;

use super::BatchReport;
use crate::models::{AuthorsField, PublicationFile};
use crate::utils::normalize_authors;

/// Normalize every record's `authors` field and highlight `highlight_name`.
///
/// Records without an `authors` key are left alone. A record counts as
/// updated only when its stored value actually changed.
pub fn fix_authors(file: &mut PublicationFile, highlight_name: &str) -> BatchReport {
    let mut report = BatchReport::default();

    for record in &mut file.publications {
        let Some(authors) = record.authors.as_ref() else {
            continue;
        };

        let fixed = normalize_authors(Some(authors), highlight_name);
        if authors.as_text() == Some(fixed.as_str()) {
            continue;
        }

        let kind = match authors {
            AuthorsField::List(_) => "list",
            AuthorsField::Text(_) => "formatting",
            AuthorsField::Other(_) => "value",
        };
        info!("  Fixed ({}): {}", kind, record.short_title());

        record.authors = Some(AuthorsField::Text(fixed));
        report.record_update(&record.title);
    }

    report
}
