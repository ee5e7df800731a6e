use std::collections::HashSet;

use tracing::{debug, enabled, Level};

use crate::index::TeamSeasonKey;
use crate::normalize::NormalizedRow;

/// One person rostered on one team for one season.
///
/// Facts are not unique: a source with several rows for the same
/// person/team/year yields several identical facts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppearanceFact {
    pub name: String,
    pub team: String,
    pub year: u32,
}

impl AppearanceFact {
    pub fn new(name: impl Into<String>, team: impl Into<String>, year: u32) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            year,
        }
    }

    pub fn team_season(&self) -> TeamSeasonKey {
        TeamSeasonKey::new(self.team.clone(), self.year)
    }
}

impl From<NormalizedRow> for AppearanceFact {
    fn from(row: NormalizedRow) -> Self {
        Self {
            name: row.name,
            team: row.team,
            year: row.year,
        }
    }
}

/// Turn normalized rows into appearance facts, keeping row order and
/// every duplicate.
pub fn build_appearances(rows: Vec<NormalizedRow>) -> Vec<AppearanceFact> {
    let facts: Vec<AppearanceFact> = rows.into_iter().map(AppearanceFact::from).collect();
    if enabled!(Level::DEBUG) {
        debug!(
            facts = facts.len(),
            repeated = repeated_count(&facts),
            "built appearance facts"
        );
    }
    facts
}

/// How many facts repeat an earlier one.
fn repeated_count(facts: &[AppearanceFact]) -> usize {
    let distinct: HashSet<&AppearanceFact> = facts.iter().collect();
    facts.len() - distinct.len()
}
