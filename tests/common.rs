use std::path::PathBuf;

use tempfile::TempDir;

/// A data file in the shape the site had after the faulty export: one
/// author list split into characters, one proper list, one string with a
/// missing separator, and records with and without venues.
pub const LEGACY_DATA: &str = r#"publications:
  - title: Wearable sensors for continuous health monitoring
    authors: ['C', 'h', 'e', 'n', 'y', 'u', '', 'T', 'a', 'n', 'g', '', 'a', 'n', 'd', '', 'S', 'h', 'e', 'n', 'g', 'b', 'o', '', 'W', 'a', 'n', 'g']
    venue: ''
    year: '2023'
    type: journal
    links:
      pdf: https://www.nature.com/articles/s41467-023-00001-x
      code: https://github.com/example/sensors
    selected: true
  - title: Neuromorphic devices
    authors:
      - Alice Smith
      - Shengbo Wang
    venue: Advanced Materials
    year: 2022
    type: journal
    links:
      doi: https://doi.org/10.1002/adma.2022
  - title: A preprint on robots
    authors: Bob JonesAlice Smith and S. Wang
    year: 2024
    type: preprint
    links:
      arxiv: https://arxiv.org/abs/2401.00001
  - title: Broken link record
    authors: Carol White
    links:
      pdf: not a url
"#;

/// Write `content` to `_data/publications.yml` inside a fresh temp dir.
pub fn write_data_file(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("_data").join("publications.yml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).expect("Failed to write fixture");
    (dir, path)
}
