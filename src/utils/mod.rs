pub mod authors;
pub mod normalize;
pub mod venue;

pub use authors::{highlight_author, name_variants, normalize_authors, EMPHASIS_CLOSE, EMPHASIS_OPEN};
pub use normalize::fold_text;
pub use venue::{infer_venue, venue_from_links, VenueRules};
