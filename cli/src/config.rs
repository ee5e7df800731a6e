use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::league::{League, LeagueAdapter};
use crate::sources::{LahmanSource, NflverseSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    pub source_dir: PathBuf,
    pub min_name_len: usize,
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mlb: LeagueConfig,
    pub nfl: LeagueConfig,
    pub nfl_seasons: RangeInclusive<u32>,
    pub out_dir: PathBuf,
    pub pretty: bool,
    pub fetch_nfl: bool,
    pub fetch_delay_ms: u64,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nfl_seasons.is_empty() {
            return Err(ConfigError::EmptySeasonRange {
                first: *self.nfl_seasons.start(),
                last: *self.nfl_seasons.end(),
            });
        }
        for (league, cfg) in [(League::Mlb, &self.mlb), (League::Nfl, &self.nfl)] {
            if cfg.min_name_len == 0 {
                return Err(ConfigError::ZeroNameLength { league });
            }
        }
        Ok(())
    }

    /// One adapter per league, MLB first.
    pub fn adapters(&self) -> Vec<Arc<dyn LeagueAdapter>> {
        let mlb: Arc<dyn LeagueAdapter> =
            Arc::new(LahmanSource::new(&self.mlb.source_dir, self.mlb.min_name_len));
        let nfl: Arc<dyn LeagueAdapter> = Arc::new(NflverseSource::new(
            &self.nfl.source_dir,
            self.nfl_seasons.clone(),
            self.nfl.min_name_len,
        ));
        vec![mlb, nfl]
    }
}
