//! Workshop record parsing and serialization
//!
//! The record is a flat list of `"id"    "state"` pairs wrapped in an
//! `"AddonInfo"` block. Parsing is a pattern scan: any two quoted tokens where
//! the first is a run of digits and the second a single digit form an entry,
//! wherever they appear. Everything else is ignored.

use crate::model::{ModState, RecordEntry};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

static ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(\d+)"\s+"(\d)""#).unwrap());

const HEADER: &str = "\"AddonInfo\"\n{\n";
const FOOTER: &str = "}\n";

#[derive(Debug, Error)]
pub enum WorkshopError {
    #[error("{} not found!", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Extract every (id, state) pair in input order
pub fn parse(text: &str) -> Vec<RecordEntry> {
    ENTRY_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let id = caps.get(1)?.as_str();
            let state = caps.get(2)?.as_str().chars().next()?;
            Some(RecordEntry::new(id, ModState::from_digit(state)))
        })
        .collect()
}

/// Render entries in the exact layout downstream readers expect
pub fn serialize(entries: &[RecordEntry]) -> String {
    let mut out = String::from(HEADER);
    for entry in entries {
        out.push_str(&format!("    \"{}\"    \"{}\"\n", entry.id, entry.state));
    }
    out.push_str(FOOTER);
    out
}

pub fn load(path: &Path) -> Result<Vec<RecordEntry>, WorkshopError> {
    if !path.exists() {
        return Err(WorkshopError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| WorkshopError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse(&text);
    info!(path = %path.display(), count = entries.len(), "loaded workshop record");
    Ok(entries)
}

pub fn save(path: &Path, entries: &[RecordEntry]) -> Result<(), WorkshopError> {
    fs::write(path, serialize(entries)).map_err(|source| WorkshopError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = entries.len(), "wrote workshop record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\"AddonInfo\"\n{\n    \"111\"    \"1\"\n    \"222\"    \"0\"\n}\n";

    #[test]
    fn test_parse_sample() {
        assert_eq!(
            parse(SAMPLE),
            vec![
                RecordEntry::new("111", ModState::Enabled),
                RecordEntry::new("222", ModState::Disabled),
            ]
        );
    }

    #[test]
    fn test_serialize_matches_layout() {
        let entries = parse(SAMPLE);
        assert_eq!(serialize(&entries), SAMPLE);
        assert_eq!(serialize(&[]), "\"AddonInfo\"\n{\n}\n");
    }

    #[test]
    fn test_parse_ignores_unrelated_text() {
        let text = r#"
"AddonInfo"
{
    "name"    "My Collection"
    "333"  "1"
    "nested"
    {
        "444"	"0"
    }
    "abc"    "1"
    "555"    "12"
    "666""1"
}
"#;
        assert_eq!(
            parse(text),
            vec![
                RecordEntry::new("333", ModState::Enabled),
                RecordEntry::new("444", ModState::Disabled),
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let entries = vec![
            RecordEntry::new("2881031511", ModState::Enabled),
            RecordEntry::new("7", ModState::Other('3')),
            RecordEntry::new("00012", ModState::Disabled),
        ];
        assert_eq!(parse(&serialize(&entries)), entries);
    }

    #[test]
    fn test_toggle_then_save_scenario() {
        let mut entries = parse(SAMPLE);
        entries[1].state = entries[1].state.toggled();
        assert_eq!(
            serialize(&entries),
            "\"AddonInfo\"\n{\n    \"111\"    \"1\"\n    \"222\"    \"1\"\n}\n"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workshop.txt");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, WorkshopError::NotFound(_)));
        assert!(err.to_string().ends_with("not found!"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workshop.txt");
        let entries = parse(SAMPLE);

        save(&path, &entries).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
        assert_eq!(load(&path).unwrap(), entries);
    }
}
