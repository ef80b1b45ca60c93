use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::utils::VenueRules;

pub const DEFAULT_DATA_FILE: &str = "_data/publications.yml";
pub const DEFAULT_HIGHLIGHT_NAME: &str = "Shengbo Wang";
pub const DEFAULT_SCHOLAR_ID: &str = "VywDS3AAAAAJ";
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Runtime settings shared by the maintenance binaries.
///
/// Read from the environment (a `.env` file is loaded first by the
/// binaries); command-line flags override individual fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `PUBLICATIONS_FILE`
    pub data_file: PathBuf,
    /// `HIGHLIGHT_NAME`
    pub highlight_name: String,
    /// `SCHOLAR_ID`
    pub scholar_id: String,
    /// `SCHOLAR_DELAY_MS`
    pub request_delay: Duration,
    /// `VENUE_RULES`; built-in tables when unset
    pub venue_rules: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            highlight_name: DEFAULT_HIGHLIGHT_NAME.to_string(),
            scholar_id: DEFAULT_SCHOLAR_ID.to_string(),
            request_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            venue_rules: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let request_delay = match get("SCHOLAR_DELAY_MS") {
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|_| {
                    Error::MissingConfig(format!("SCHOLAR_DELAY_MS must be milliseconds, got {raw:?}"))
                })?;
                Duration::from_millis(millis)
            }
            None => defaults.request_delay,
        };

        Ok(Self {
            data_file: get("PUBLICATIONS_FILE").map(PathBuf::from).unwrap_or(defaults.data_file),
            highlight_name: get("HIGHLIGHT_NAME").unwrap_or(defaults.highlight_name),
            scholar_id: get("SCHOLAR_ID").unwrap_or(defaults.scholar_id),
            request_delay,
            venue_rules: get("VENUE_RULES").map(PathBuf::from),
        })
    }

    /// Venue tables from `venue_rules`, or the built-in ones.
    pub fn load_venue_rules(&self) -> Result<VenueRules> {
        match &self.venue_rules {
            Some(path) => VenueRules::from_file(path),
            None => Ok(VenueRules::builtin()),
        }
    }
}
