//! NFL rosters from the nflverse seasonal roster release, one CSV per season.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::league::{League, LeagueAdapter, RequiredFile};
use crate::loader::{blank_as_none, lenient_year, read_rows, read_source_text};
use crate::records::{NameFragments, RawAppearanceRecord, RawIdentityRecord, RawRecords};

pub const RELEASE_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download/rosters";
pub const FIRST_SEASON: u32 = 1999;

const ROSTER_COLUMNS: [&str; 3] = ["season", "team", "full_name"];

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(deserialize_with = "lenient_year", default)]
    season: Option<u32>,
    #[serde(deserialize_with = "blank_as_none", default)]
    team: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

pub fn roster_file_name(season: u32) -> String {
    format!("roster_{season}.csv")
}

pub fn roster_url(season: u32) -> String {
    format!("{}/{}", RELEASE_URL, roster_file_name(season))
}

/// Most recent season that has kicked off by `today`. NFL seasons start in
/// September and are named after the year they start in.
pub fn latest_started_season(today: NaiveDate) -> u32 {
    let year = today.year().max(0) as u32;
    if today.month() >= 9 {
        year
    } else {
        year.saturating_sub(1)
    }
}

/// Parse one roster file. Each row is its own person: the identity and the
/// appearance share a row-scoped id (`<label>#<row>`), so the join pairs
/// them one to one and the name is whatever `full_name` says on that row.
pub fn rosters_from_str(label: &str, text: &str) -> Result<RawRecords, LoadError> {
    let rows: Vec<RosterRow> = read_rows(label, text, &ROSTER_COLUMNS)?;
    let mut records = RawRecords::default();
    for (n, row) in rows.into_iter().enumerate() {
        let person_id = format!("{label}#{}", n + 1);
        records.identities.push(RawIdentityRecord {
            person_id: person_id.clone(),
            name: NameFragments::Full(row.full_name),
        });
        records.appearances.push(RawAppearanceRecord {
            person_id,
            team: row.team,
            year: row.season,
        });
    }
    Ok(records)
}

/// Directory of `roster_<season>.csv` files covering a season range.
#[derive(Debug, Clone)]
pub struct NflverseSource {
    dir: PathBuf,
    seasons: RangeInclusive<u32>,
    min_name_len: usize,
}

impl NflverseSource {
    pub fn new(dir: impl Into<PathBuf>, seasons: RangeInclusive<u32>, min_name_len: usize) -> Self {
        Self {
            dir: dir.into(),
            seasons,
            min_name_len,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn seasons(&self) -> RangeInclusive<u32> {
        self.seasons.clone()
    }

    pub fn roster_path(&self, season: u32) -> PathBuf {
        self.dir.join(roster_file_name(season))
    }
}

impl LeagueAdapter for NflverseSource {
    fn league(&self) -> League {
        League::Nfl
    }

    fn required_files(&self) -> Vec<RequiredFile> {
        self.seasons()
            .map(|season| RequiredFile {
                league: League::Nfl,
                path: self.roster_path(season),
                hint: format!(
                    "Download {} into {}/ (or re-run with --fetch-nfl)",
                    roster_url(season),
                    self.dir.display()
                ),
            })
            .collect()
    }

    fn load(&self) -> Result<RawRecords, LoadError> {
        let mut records = RawRecords::default();
        for season in self.seasons() {
            let (label, text) = read_source_text(&self.roster_path(season))?;
            let file_name = roster_file_name(season);
            let season_records = rosters_from_str(&file_name, &text)?;
            debug!(file = %label, rows = season_records.appearances.len(), "loaded roster");
            records.extend(season_records);
        }
        info!(
            "Loaded {} roster rows for seasons {}-{} from {}",
            records.appearances.len(),
            self.seasons.start(),
            self.seasons.end(),
            self.dir.display()
        );
        Ok(records)
    }

    fn min_name_len(&self) -> usize {
        self.min_name_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_rolls_over_in_september() {
        let aug = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let sep = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(latest_started_season(aug), 2024);
        assert_eq!(latest_started_season(sep), 2025);
    }

    #[test]
    fn each_roster_row_is_its_own_person() {
        let text = "season,team,position,full_name,gsis_id\n\
                    2020,KC,QB,Patrick Mahomes,00-0033873\n\
                    2020,KC,TE,Travis Kelce,00-0030506\n\
                    2020,,WR,Nobody Home,\n";
        let records = rosters_from_str("roster_2020.csv", text).unwrap();
        assert_eq!(records.identities.len(), 3);
        assert_eq!(records.appearances.len(), 3);
        assert_eq!(records.identities[0].person_id, "roster_2020.csv#1");
        assert_eq!(records.appearances[1].person_id, "roster_2020.csv#2");
        assert_eq!(
            records.identities[1].name,
            NameFragments::Full(Some("Travis Kelce".into()))
        );
        assert_eq!(records.appearances[2].team, None);
        assert_eq!(records.appearances[0].year, Some(2020));
    }

    #[test]
    fn one_required_file_per_season() {
        let source = NflverseSource::new("nfl", 2019..=2021, 4);
        let files = source.required_files();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["roster_2019.csv", "roster_2020.csv", "roster_2021.csv"]);
        assert!(files[0].hint.contains(&roster_url(2019)));
    }
}
