//! Venue inference from publication URLs.
//!
//! Rules are ordered: the first matching URL pattern wins, then the first
//! domain whose name is contained in the host. Tables are plain values so
//! callers can load their own from YAML:
//!
//! ```yaml
//! patterns:
//!   - pattern: 'nature\.com.*s41467'
//!     venue: Nature Communications
//! domains:
//!   - domain: arxiv.org
//!     venue: arXiv
//! ```

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::debug;
use url::{ParseError, Url};

use crate::error::{Error, Result};
use crate::models::Links;

/// Venue used when a record only has an arXiv link
pub const ARXIV_PREPRINT: &str = "arXiv preprint";

/// Path segments that name a section rather than a journal
const GENERIC_SEGMENTS: &[&str] = &["journals", "journal", "articles", "article"];

const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    (r"jamanetwork\.com.*jamanetworkopen", "JAMA Network Open"),
    (r"advanced\.onlinelibrary\.wiley\.com.*adma", "Advanced Materials"),
    (r"advanced\.onlinelibrary\.wiley\.com.*aelm", "Advanced Electronic Materials"),
    (r"advanced\.onlinelibrary\.wiley\.com.*adsr", "Advanced Science"),
    (r"mdpi\.com.*2079-6374", "Biosensors"),
    (r"ieeexplore\.ieee\.org", "IEEE"),
    (r"iopscience\.iop\.org.*2634-4386", "Neuromorphic Computing and Engineering"),
    (r"iopscience\.iop\.org.*1361-6463", "Journal of Physics D: Applied Physics"),
    (r"nature\.com.*s41467", "Nature Communications"),
    (r"nature\.com.*s43588", "Nature Computational Science"),
];

const DEFAULT_DOMAINS: &[(&str, &str)] = &[
    ("nature.com", "Nature"),
    ("springer.com", "Springer"),
    ("ieee.org", "IEEE"),
    ("ieeexplore.ieee.org", "IEEE"),
    ("arxiv.org", "arXiv"),
    ("jamanetwork.com", "JAMA Network Open"),
    ("mdpi.com", "MDPI"),
    ("wiley.com", "Wiley"),
    ("advanced.onlinelibrary.wiley.com", "Advanced Materials"),
    ("iopscience.iop.org", "IOP Publishing"),
    ("pmc.ncbi.nlm.nih.gov", "PMC"),
    ("scholar.google.com", "Google Scholar"),
    ("repository.cam.ac.uk", "Cambridge Repository"),
    ("researchsquare.com", "Research Square"),
    ("ui.adsabs.harvard.edu", "arXiv"),
];

/// Rule file layout
#[derive(Debug, Default, Deserialize)]
pub struct VenueRulesConfig {
    #[serde(default)]
    pub patterns: Vec<PatternEntry>,
    #[serde(default)]
    pub domains: Vec<DomainEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PatternEntry {
    pub pattern: String,
    pub venue: String,
}

#[derive(Debug, Deserialize)]
pub struct DomainEntry {
    pub domain: String,
    pub venue: String,
}

/// Ordered URL-pattern and domain tables
#[derive(Debug, Clone)]
pub struct VenueRules {
    patterns: Vec<(Regex, String)>,
    domains: Vec<(String, String)>,
}

impl VenueRules {
    /// Compile rule tables. Patterns match case-insensitively anywhere in the URL.
    pub fn new<P, D>(patterns: P, domains: D) -> Result<Self>
    where
        P: IntoIterator<Item = (String, String)>,
        D: IntoIterator<Item = (String, String)>,
    {
        let patterns = patterns
            .into_iter()
            .map(|(pattern, venue)| {
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, venue))
                    .map_err(|source| Error::InvalidPattern { pattern, source })
            })
            .collect::<Result<Vec<_>>>()?;

        let domains = domains
            .into_iter()
            .map(|(domain, venue)| (domain.to_lowercase(), venue))
            .collect();

        Ok(Self { patterns, domains })
    }

    pub fn from_config(config: VenueRulesConfig) -> Result<Self> {
        Self::new(
            config.patterns.into_iter().map(|p| (p.pattern, p.venue)),
            config.domains.into_iter().map(|d| (d.domain, d.venue)),
        )
    }

    /// Load rules from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: VenueRulesConfig =
            serde_yaml::from_str(&content).map_err(|source| Error::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_config(config)
    }

    /// The built-in publisher tables.
    pub fn builtin() -> Self {
        Self::new(owned(DEFAULT_PATTERNS), owned(DEFAULT_DOMAINS))
            .expect("built-in venue patterns are valid")
    }

    pub fn len(&self) -> usize {
        self.patterns.len() + self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VenueRules {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(key, venue)| (key.to_string(), venue.to_string()))
        .collect()
}

/// Guess a venue name from a URL.
///
/// URL patterns are tried on the raw text first, so a link without a scheme
/// still matches. Returns `Ok(None)` for an empty URL or when nothing
/// matches, and [`Error::InvalidUrl`] when the host and path are needed but
/// the URL cannot be parsed.
///
/// # Examples
///
/// ```
/// use sitepubs::{infer_venue, VenueRules};
///
/// let rules = VenueRules::builtin();
/// let venue = infer_venue("https://www.nature.com/articles/s41467-023-0001", &rules).unwrap();
/// assert_eq!(venue.as_deref(), Some("Nature Communications"));
/// ```
pub fn infer_venue(url: &str, rules: &VenueRules) -> Result<Option<String>> {
    let url = url.trim();
    if url.is_empty() {
        return Ok(None);
    }

    if let Some((_, venue)) = rules.patterns.iter().find(|(re, _)| re.is_match(url)) {
        debug!("Pattern match for {}: {}", url, venue);
        return Ok(Some(venue.clone()));
    }

    let parsed = parse_url(url)?;

    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    if let Some((_, venue)) = rules.domains.iter().find(|(domain, _)| host.contains(domain.as_str())) {
        debug!("Domain match for {}: {}", url, venue);
        return Ok(Some(venue.clone()));
    }

    Ok(venue_from_path(parsed.path()))
}

/// Parse a link, reading scheme-less ones (`www.mdpi.com/...`) as https.
fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url)
        .or_else(|e| match e {
            ParseError::RelativeUrlWithoutBase => Url::parse(&format!("https://{url}")),
            e => Err(e),
        })
        .map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })
}

/// `/journals/sensors-and-actuators/...` -> `Sensors And Actuators`
fn venue_from_path(path: &str) -> Option<String> {
    let path = path.to_lowercase();
    if !path.contains("journal") {
        return None;
    }

    let segment = path
        .split('/')
        .find(|part| !part.is_empty() && !GENERIC_SEGMENTS.contains(part))?;

    let journal = segment
        .replace('-', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    (!journal.is_empty()).then_some(journal)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pick a venue from a record's links: the PDF link first, then an arXiv
/// link, then the DOI.
pub fn venue_from_links(links: &Links, rules: &VenueRules) -> Result<Option<String>> {
    if let Some(pdf) = links.pdf() {
        infer_venue(pdf, rules)
    } else if links.arxiv().is_some() {
        Ok(Some(ARXIV_PREPRINT.to_string()))
    } else if let Some(doi) = links.doi() {
        infer_venue(doi, rules)
    } else {
        Ok(None)
    }
}
