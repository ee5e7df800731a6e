//! The two lookup indices compiled from a league's appearance facts.
//!
//! Both are `BTreeMap`s so that key order, and therefore the serialized
//! artifact, is fully determined by the facts themselves.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::appearance::AppearanceFact;

/// One entry of a player's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub team: String,
    pub year: u32,
}

/// A team's roster for one year. Serialized as `"{team}-{year}"`, ordered
/// by team code and then year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamSeasonKey {
    pub team: String,
    pub year: u32,
}

impl TeamSeasonKey {
    pub fn new(team: impl Into<String>, year: u32) -> Self {
        Self {
            team: team.into(),
            year,
        }
    }
}

impl fmt::Display for TeamSeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTeamSeasonKeyError(String);

impl fmt::Display for ParseTeamSeasonKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid team-season key '{}'", self.0)
    }
}

impl std::error::Error for ParseTeamSeasonKeyError {}

impl FromStr for TeamSeasonKey {
    type Err = ParseTeamSeasonKeyError;

    // Split on the last hyphen: team codes may contain one, years never do.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (team, year) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseTeamSeasonKeyError(s.to_string()))?;
        if team.is_empty() {
            return Err(ParseTeamSeasonKeyError(s.to_string()));
        }
        let year = year
            .parse::<u32>()
            .map_err(|_| ParseTeamSeasonKeyError(s.to_string()))?;
        Ok(Self::new(team, year))
    }
}

impl Serialize for TeamSeasonKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TeamSeasonKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Player name -> every season appearance, in fact order.
pub type PlayerSeasonsIndex = BTreeMap<String, Vec<Season>>;

/// Team-season -> distinct player names, sorted.
pub type TeamSeasonRoster = BTreeMap<TeamSeasonKey, Vec<String>>;

/// Group facts by player, keeping each player's seasons in the order the
/// facts were encountered. Repeated team/year pairs are kept.
pub fn player_seasons(facts: &[AppearanceFact]) -> PlayerSeasonsIndex {
    let mut index = PlayerSeasonsIndex::new();
    for fact in facts {
        index.entry(fact.name.clone()).or_default().push(Season {
            team: fact.team.clone(),
            year: fact.year,
        });
    }
    index
}

/// Group facts by team-season. Each roster holds a player once, and rosters
/// are sorted by name regardless of fact order.
pub fn team_rosters(facts: &[AppearanceFact]) -> TeamSeasonRoster {
    let mut grouped: BTreeMap<TeamSeasonKey, BTreeSet<&str>> = BTreeMap::new();
    for fact in facts {
        grouped
            .entry(fact.team_season())
            .or_default()
            .insert(fact.name.as_str());
    }
    grouped
        .into_iter()
        .map(|(key, names)| (key, names.into_iter().map(str::to_string).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(name: &str, team: &str, year: u32) -> AppearanceFact {
        AppearanceFact::new(name, team, year)
    }

    #[test]
    fn player_seasons_keep_encounter_order_and_repeats() {
        let facts = vec![
            fact("Babe Ruth", "NYA", 1927),
            fact("Lou Gehrig", "NYA", 1927),
            fact("Babe Ruth", "BOS", 1919),
            fact("Babe Ruth", "NYA", 1927),
        ];
        let index = player_seasons(&facts);
        let ruth: Vec<_> = index["Babe Ruth"].iter().map(|s| (s.team.as_str(), s.year)).collect();
        assert_eq!(ruth, vec![("NYA", 1927), ("BOS", 1919), ("NYA", 1927)]);
        assert_eq!(index["Lou Gehrig"].len(), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn rosters_are_sorted_and_deduplicated() {
        let facts = vec![
            fact("Lou Gehrig", "NYA", 1927),
            fact("Babe Ruth", "NYA", 1927),
            fact("Lou Gehrig", "NYA", 1927),
            fact("Babe Ruth", "BOS", 1919),
        ];
        let rosters = team_rosters(&facts);
        assert_eq!(
            rosters[&TeamSeasonKey::new("NYA", 1927)],
            vec!["Babe Ruth".to_string(), "Lou Gehrig".to_string()]
        );
        assert_eq!(rosters[&TeamSeasonKey::new("BOS", 1919)], vec!["Babe Ruth".to_string()]);
    }

    #[test]
    fn roster_order_ignores_input_order() {
        let forward = team_rosters(&[fact("Ann Alpha", "T", 2000), fact("Bob Bravo", "T", 2000)]);
        let reverse = team_rosters(&[fact("Bob Bravo", "T", 2000), fact("Ann Alpha", "T", 2000)]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn keys_order_by_team_then_numeric_year() {
        let facts = vec![
            fact("Player One", "NYA", 1999),
            fact("Player One", "BOS", 2001),
            fact("Player One", "NYA", 987),
        ];
        let keys: Vec<String> = team_rosters(&facts).keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["BOS-2001", "NYA-987", "NYA-1999"]);
    }

    #[test]
    fn key_parses_from_its_display_form() {
        let key: TeamSeasonKey = "LA-RAMS-2016".parse().unwrap();
        assert_eq!(key, TeamSeasonKey::new("LA-RAMS", 2016));
        assert!("NYA".parse::<TeamSeasonKey>().is_err());
        assert!("-1999".parse::<TeamSeasonKey>().is_err());
        assert!("NYA-19x9".parse::<TeamSeasonKey>().is_err());
    }

    #[test]
    fn key_serializes_as_json_object_key() {
        let mut rosters = TeamSeasonRoster::new();
        rosters.insert(TeamSeasonKey::new("NYA", 1927), vec!["Babe Ruth".to_string()]);
        let json = serde_json::to_string(&rosters).unwrap();
        assert_eq!(json, r#"{"NYA-1927":["Babe Ruth"]}"#);
        let back: TeamSeasonRoster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rosters);
    }
}
