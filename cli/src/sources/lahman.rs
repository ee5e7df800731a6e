//! MLB rosters from the Lahman baseball database.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::league::{League, LeagueAdapter, RequiredFile};
use crate::loader::{blank_as_none, lenient_year, read_rows, read_source_text};
use crate::records::{NameFragments, RawAppearanceRecord, RawIdentityRecord, RawRecords};

pub const PEOPLE_FILE: &str = "people.csv";
pub const APPEARANCES_FILE: &str = "appearances.csv";
pub const DOWNLOAD_URL: &str = "https://sabr.org/lahman-database/";

const PEOPLE_COLUMNS: [&str; 3] = ["playerID", "nameFirst", "nameLast"];
const APPEARANCE_COLUMNS: [&str; 3] = ["playerID", "yearID", "teamID"];

#[derive(Debug, Deserialize)]
struct PeopleRow {
    #[serde(rename = "playerID", deserialize_with = "blank_as_none", default)]
    player_id: Option<String>,
    #[serde(rename = "nameFirst", default)]
    name_first: Option<String>,
    #[serde(rename = "nameLast", default)]
    name_last: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppearanceRow {
    #[serde(rename = "playerID", deserialize_with = "blank_as_none", default)]
    player_id: Option<String>,
    #[serde(rename = "yearID", deserialize_with = "lenient_year", default)]
    year_id: Option<u32>,
    #[serde(rename = "teamID", deserialize_with = "blank_as_none", default)]
    team_id: Option<String>,
}

/// Parse `people.csv` into identity records. Rows without a `playerID`
/// cannot join anything and are dropped here.
pub fn people_from_str(label: &str, text: &str) -> Result<Vec<RawIdentityRecord>, LoadError> {
    let rows: Vec<PeopleRow> = read_rows(label, text, &PEOPLE_COLUMNS)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            Some(RawIdentityRecord {
                person_id: row.player_id?,
                name: NameFragments::Split {
                    first: row.name_first,
                    last: row.name_last,
                },
            })
        })
        .collect())
}

/// Parse `appearances.csv` into appearance records.
pub fn appearances_from_str(
    label: &str,
    text: &str,
) -> Result<Vec<RawAppearanceRecord>, LoadError> {
    let rows: Vec<AppearanceRow> = read_rows(label, text, &APPEARANCE_COLUMNS)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            Some(RawAppearanceRecord {
                person_id: row.player_id?,
                team: row.team_id,
                year: row.year_id,
            })
        })
        .collect())
}

/// Lahman CSV export extracted into a single directory.
#[derive(Debug, Clone)]
pub struct LahmanSource {
    dir: PathBuf,
    min_name_len: usize,
}

impl LahmanSource {
    pub fn new(dir: impl Into<PathBuf>, min_name_len: usize) -> Self {
        Self {
            dir: dir.into(),
            min_name_len,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn people_path(&self) -> PathBuf {
        self.dir.join(PEOPLE_FILE)
    }

    fn appearances_path(&self) -> PathBuf {
        self.dir.join(APPEARANCES_FILE)
    }
}

impl LeagueAdapter for LahmanSource {
    fn league(&self) -> League {
        League::Mlb
    }

    fn required_files(&self) -> Vec<RequiredFile> {
        let hint = format!(
            "Download the Lahman database ZIP from {} and extract its CSV files into {}/",
            DOWNLOAD_URL,
            self.dir.display()
        );
        vec![
            RequiredFile {
                league: League::Mlb,
                path: self.people_path(),
                hint: hint.clone(),
            },
            RequiredFile {
                league: League::Mlb,
                path: self.appearances_path(),
                hint,
            },
        ]
    }

    fn load(&self) -> Result<RawRecords, LoadError> {
        let (people_label, people_text) = read_source_text(&self.people_path())?;
        let identities = people_from_str(&people_label, &people_text)?;
        debug!(file = %people_label, identities = identities.len(), "loaded people");

        let (apps_label, apps_text) = read_source_text(&self.appearances_path())?;
        let appearances = appearances_from_str(&apps_label, &apps_text)?;
        debug!(file = %apps_label, appearances = appearances.len(), "loaded appearances");

        info!(
            "Loaded {} people and {} appearances from {}",
            identities.len(),
            appearances.len(),
            self.dir.display()
        );
        Ok(RawRecords {
            identities,
            appearances,
        })
    }

    fn min_name_len(&self) -> usize {
        self.min_name_len
    }
}
