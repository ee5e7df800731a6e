//! Shared pieces of the record loaders: locating source files, decoding
//! them, and reading CSV rows leniently.
//!
//! Sources are read whole and then parsed, so a `&str` based entry point is
//! available for every table and tests never need files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::{LoadError, MissingSourceError};
use crate::league::RequiredFile;

/// Locate `path`, falling back to a case-insensitive match of its file name
/// inside the parent directory (`People.csv` vs `people.csv`).
pub fn resolve_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    let wanted = path.file_name()?.to_str()?.to_lowercase();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut matches: Vec<PathBuf> = fs::read_dir(parent)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|candidate| {
            candidate.is_file()
                && candidate
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.to_lowercase() == wanted)
                    .unwrap_or(false)
        })
        .collect();
    matches.sort();
    matches.into_iter().next()
}

/// Fails with every file in `files` that cannot be found.
pub fn check_sources(files: &[RequiredFile]) -> Result<(), MissingSourceError> {
    let missing: Vec<RequiredFile> = files
        .iter()
        .filter(|file| resolve_path(&file.path).is_none())
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingSourceError { missing })
    }
}

/// Decode source bytes as UTF-8, or as Latin-1 when they are not valid UTF-8.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Read a source file (resolved case-insensitively) into text.
pub fn read_source_text(path: &Path) -> Result<(String, String), LoadError> {
    let resolved = resolve_path(path).unwrap_or_else(|| path.to_path_buf());
    let label = resolved.display().to_string();
    let bytes = fs::read(&resolved).map_err(|source| LoadError::Io {
        path: label.clone(),
        source,
    })?;
    debug!(path = %label, bytes = bytes.len(), "read source file");
    Ok((label, decode_text(bytes)))
}

/// Deserialize every row of a CSV table into `T`.
///
/// The header must name every column in `required`; extra columns are
/// ignored. Rows that cannot be deserialized are skipped with a warning.
pub fn read_rows<T: DeserializeOwned>(
    label: &str,
    text: &str,
    required: &[&'static str],
) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: label.to_string(),
            source,
        })?
        .clone();
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: label.to_string(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                warn!(path = %label, "skipping malformed row: {}", e);
            }
        }
    }
    debug!(path = %label, rows = rows.len(), skipped, "parsed table");
    Ok(rows)
}

/// Parse a season year. Accepts `1927` and integral floats such as `1927.0`
/// (tables exported with missing values elsewhere in the column).
pub fn parse_year(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(year) = raw.parse::<u32>() {
        return Some(year);
    }
    let value: f64 = raw.parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

// Blank and whitespace-only cells become None; anything else is kept verbatim.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

// Unparseable years become None so the row is dropped downstream, not here.
pub fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_year))
}
