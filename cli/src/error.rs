use std::fmt;
use std::io;

use thiserror::Error;

use crate::league::{League, RequiredFile};

/// Required input files are absent. No league is compiled when this is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSourceError {
    pub missing: Vec<RequiredFile>,
}

impl fmt::Display for MissingSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "missing {} required source file(s):", self.missing.len())?;
        for file in &self.missing {
            writeln!(f, "  [{}] {}", file.league, file.path.display())?;
            writeln!(f, "        {}", file.hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for MissingSourceError {}

/// A source file exists but cannot be read as the expected table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: String, column: &'static str },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to write {path}: {source}")]
    Io { path: String, source: io::Error },
}

/// Run settings that cannot produce a meaningful build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("NFL season range {first}-{last} is empty")]
    EmptySeasonRange { first: u32, last: u32 },

    #[error("{league} minimum name length must be at least 1")]
    ZeroNameLength { league: League },
}

/// Everything that can abort a run.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{0}")]
    MissingSource(#[from] MissingSourceError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write {path}: {source}")]
    Output { path: String, source: io::Error },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("league task failed: {0}")]
    Task(String),
}
