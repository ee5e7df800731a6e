//! Compile season-by-season roster records into two lookup indices per
//! league: player -> seasons and team-season -> players.

pub mod appearance;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod index;
pub mod league;
pub mod loader;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod sources;

pub use appearance::AppearanceFact;
pub use dataset::LeagueDataset;
pub use error::{BuildError, LoadError, MissingSourceError};
pub use index::{Season, TeamSeasonKey};
pub use league::{League, LeagueAdapter, RequiredFile};
pub use pipeline::{compile, run_all, run_league, LeagueRun};
