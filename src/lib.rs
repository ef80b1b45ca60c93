pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod store;
pub mod utils;

// Re-export commonly used items
pub use config::Settings;
pub use error::{Error, Result};
pub use jobs::{
    assemble, build_record, fill_venues, fix_authors,
    BatchReport, RawPublication, Skipped,
};
pub use models::{AuthorsField, Links, PublicationFile, PublicationRecord, PublicationType, Year};
pub use utils::{
    fold_text, highlight_author, infer_venue, normalize_authors, venue_from_links,
    VenueRules,
};
