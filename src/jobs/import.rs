//! Turning scraped profile entries into publication records.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use tracing::{debug, warn};

use crate::models::{AuthorsField, Links, PublicationFile, PublicationRecord, PublicationType, Year};
use crate::utils::{fold_text, infer_venue, normalize_authors, VenueRules};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());

const UNTITLED: &str = "Untitled";

/// A publication as reported by the scholarly index, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPublication {
    pub title: Option<String>,
    pub authors: Option<AuthorsField>,
    pub venue: Option<String>,
    pub journal: Option<String>,
    pub conference: Option<String>,
    pub publisher: Option<String>,
    /// Free-form date text such as `2023/5/12` or `2021`
    pub pub_date: Option<String>,
    pub eprint_url: Option<String>,
    pub pub_url: Option<String>,
    pub doi: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Build a site record from a scraped publication.
///
/// Returns the reason as `Err` when the entry has no usable title.
pub fn build_record(
    raw: &RawPublication,
    rules: &VenueRules,
    highlight_name: &str,
) -> Result<PublicationRecord, String> {
    let title = non_blank(&raw.title)
        .filter(|t| *t != UNTITLED)
        .ok_or_else(|| "missing title".to_string())?;

    let venue = [&raw.venue, &raw.journal, &raw.conference, &raw.publisher]
        .into_iter()
        .find_map(non_blank)
        .map(str::to_string)
        .unwrap_or_else(|| venue_from_urls(raw, rules));

    let year = extract_year(non_blank(&raw.pub_date).unwrap_or_default())
        .or_else(|| extract_year(&venue));

    let links = build_links(raw);
    let authors = normalize_authors(raw.authors.as_ref(), highlight_name);

    Ok(PublicationRecord {
        title: title.to_string(),
        authors: Some(AuthorsField::Text(authors)),
        pub_type: Some(PublicationType::from_venue(&venue)),
        venue: Some(venue),
        year: year.map(Year::Number),
        links: (!links.is_empty()).then_some(links),
        ..Default::default()
    })
}

fn venue_from_urls(raw: &RawPublication, rules: &VenueRules) -> String {
    let Some(url) = non_blank(&raw.eprint_url).or_else(|| non_blank(&raw.pub_url)) else {
        return String::new();
    };
    match infer_venue(url, rules) {
        Ok(venue) => venue.unwrap_or_default(),
        Err(e) => {
            warn!("  Error inferring venue: {}", e);
            String::new()
        }
    }
}

/// First plausible publication year in `text`: 1900 up to next year.
pub fn extract_year(text: &str) -> Option<i32> {
    let latest = Utc::now().year() + 1;
    YEAR.find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .find(|year| *year <= latest)
}

fn build_links(raw: &RawPublication) -> Links {
    let eprint = non_blank(&raw.eprint_url);
    let mut links = Links {
        pdf: eprint.or_else(|| non_blank(&raw.pub_url)).map(str::to_string),
        ..Default::default()
    };

    if let Some(eprint) = eprint.filter(|url| url.to_lowercase().contains("arxiv")) {
        links.arxiv = Some(eprint.to_string());
    }

    if let Some(doi) = non_blank(&raw.doi) {
        links.doi = Some(if doi.starts_with("http") {
            doi.to_string()
        } else {
            format!("https://doi.org/{doi}")
        });
    }

    links
}

/// Collect records into a data file: duplicate titles dropped, newest first,
/// records without a year last.
pub fn assemble(records: Vec<PublicationRecord>) -> PublicationFile {
    let mut seen = HashSet::new();
    let mut publications: Vec<PublicationRecord> = records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(fold_text(&record.title));
            if !fresh {
                debug!("Dropping duplicate: {}", record.short_title());
            }
            fresh
        })
        .collect();

    publications.sort_by_key(|record| std::cmp::Reverse(record.year()));

    PublicationFile {
        publications,
        ..Default::default()
    }
}
