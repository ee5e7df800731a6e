use serde::{Deserialize, Serialize};

use crate::appearance::AppearanceFact;
use crate::index::{player_seasons, team_rosters, PlayerSeasonsIndex, TeamSeasonRoster};

/// The compiled artifact for one league.
///
/// Field names are what downstream readers key on: `players`,
/// `playerSeasons`, `teamSeasons`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueDataset {
    pub players: Vec<String>,
    pub player_seasons: PlayerSeasonsIndex,
    pub team_seasons: TeamSeasonRoster,
}

impl LeagueDataset {
    pub fn from_facts(facts: &[AppearanceFact]) -> Self {
        let player_seasons = player_seasons(facts);
        let team_seasons = team_rosters(facts);
        // BTreeMap keys are already sorted and distinct.
        let players = player_seasons.keys().cloned().collect();
        Self {
            players,
            player_seasons,
            team_seasons,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn team_season_count(&self) -> usize {
        self.team_seasons.len()
    }

    /// Describe every broken structural guarantee. Empty means consistent.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if !self.players.iter().eq(self.player_seasons.keys()) {
            violations.push("players does not match the playerSeasons key set".to_string());
        }
        if self.players.windows(2).any(|w| w[0] >= w[1]) {
            violations.push("players is not strictly ascending".to_string());
        }
        for (key, roster) in &self.team_seasons {
            if roster.windows(2).any(|w| w[0] >= w[1]) {
                violations.push(format!("roster {key} is not sorted and distinct"));
            }
            for name in roster {
                let listed = self
                    .player_seasons
                    .get(name)
                    .map(|seasons| seasons.iter().any(|s| s.team == key.team && s.year == key.year))
                    .unwrap_or(false);
                if !listed {
                    violations.push(format!("{name} is on roster {key} without a matching season"));
                }
            }
        }
        violations
    }
}
