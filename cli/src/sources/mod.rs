pub mod lahman;
pub mod nflverse;

pub use lahman::LahmanSource;
pub use nflverse::NflverseSource;
