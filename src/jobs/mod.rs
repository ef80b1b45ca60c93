//! Batch operations over an in-memory publication collection.
//!
//! Each job mutates the collection in place and returns a [`BatchReport`]
//! naming the records it changed and the ones it had to skip.

pub mod authors;
pub mod import;
pub mod venues;

pub use authors::fix_authors;
pub use import::{assemble, build_record, extract_year, RawPublication};
pub use venues::fill_venues;

/// A record a job could not process, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub title: String,
    pub reason: String,
}

/// Outcome of a batch job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Titles of records that were modified
    pub updated: Vec<String>,
    pub skipped: Vec<Skipped>,
}

impl BatchReport {
    pub fn record_update(&mut self, title: &str) {
        self.updated.push(title.to_string());
    }

    pub fn record_skip(&mut self, title: &str, reason: impl Into<String>) {
        self.skipped.push(Skipped {
            title: title.to_string(),
            reason: reason.into(),
        });
    }

    /// Whether the data file needs rewriting.
    pub fn has_changes(&self) -> bool {
        !self.updated.is_empty()
    }
}
