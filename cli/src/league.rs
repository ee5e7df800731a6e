use std::fmt;
use std::path::PathBuf;

use crate::error::LoadError;
use crate::records::RawRecords;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum League {
    Mlb,
    Nfl,
}

impl League {
    pub fn code(&self) -> &'static str {
        match self {
            League::Mlb => "MLB",
            League::Nfl => "NFL",
        }
    }

    /// File name of the compiled artifact for this league.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            League::Mlb => "mlb_data.json",
            League::Nfl => "nfl_data.json",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An input file a league cannot be compiled without, plus where to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFile {
    pub league: League,
    pub path: PathBuf,
    pub hint: String,
}

/// Everything that differs between leagues: where the raw tables live, how
/// they are read into raw records, and how strict the name filter is.
pub trait LeagueAdapter: Send + Sync {
    fn league(&self) -> League;

    fn required_files(&self) -> Vec<RequiredFile>;

    fn load(&self) -> Result<RawRecords, LoadError>;

    /// Shortest canonical name (in characters) that counts as a real name.
    fn min_name_len(&self) -> usize;
}
