//! Reading and writing the publications data file.
//!
//! The file is always read whole and rewritten whole.

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::PublicationFile;

/// Parse a data file. An empty file yields an empty collection.
pub fn load(path: &Path) -> Result<PublicationFile> {
    info!("Reading {}...", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

fn parse(content: &str, path: &Path) -> Result<PublicationFile> {
    if content.trim().is_empty() {
        return Ok(PublicationFile::default());
    }
    serde_yaml::from_str(content).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrite the data file, creating parent directories as needed.
pub fn save(path: &Path, file: &PublicationFile) -> Result<()> {
    let yaml = serde_yaml::to_string(file).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, yaml).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} publications to {}", file.publications.len(), path.display());
    Ok(())
}
