//! One generic pipeline, run once per league:
//! raw records -> normalized rows -> appearance facts -> dataset.

use std::sync::Arc;

use tracing::{error, info, info_span};

use crate::appearance::build_appearances;
use crate::dataset::LeagueDataset;
use crate::error::{BuildError, MissingSourceError};
use crate::league::{League, LeagueAdapter, RequiredFile};
use crate::loader::check_sources;
use crate::normalize::{normalize, NormalizeReport};
use crate::records::RawRecords;

/// A compiled league plus what normalization dropped along the way.
#[derive(Debug, Clone)]
pub struct LeagueRun {
    pub league: League,
    pub dataset: LeagueDataset,
    pub report: NormalizeReport,
}

/// Everything after loading. Pure: same records in, same dataset out.
pub fn compile(records: RawRecords, min_name_len: usize) -> (LeagueDataset, NormalizeReport) {
    let (rows, report) = normalize(records, min_name_len);
    let facts = build_appearances(rows);
    let dataset = LeagueDataset::from_facts(&facts);
    (dataset, report)
}

/// Check one league's sources, then load and compile it.
pub fn run_league(adapter: &dyn LeagueAdapter) -> Result<LeagueRun, BuildError> {
    check_sources(&adapter.required_files())?;
    compile_league(adapter)
}

/// Load and compile one league whose sources are already known to exist.
fn compile_league(adapter: &dyn LeagueAdapter) -> Result<LeagueRun, BuildError> {
    let league = adapter.league();
    let span = info_span!("league", league = %league);
    let _enter = span.enter();

    let records = adapter.load()?;
    let (dataset, report) = compile(records, adapter.min_name_len());

    for violation in dataset.invariant_violations() {
        error!("inconsistent dataset: {}", violation);
    }
    info!(
        players = dataset.player_count(),
        team_seasons = dataset.team_season_count(),
        "compiled league"
    );
    Ok(LeagueRun {
        league,
        dataset,
        report,
    })
}

/// Check every adapter's inputs up front, collecting all missing files.
pub fn check_all_sources(adapters: &[Arc<dyn LeagueAdapter>]) -> Result<(), MissingSourceError> {
    let required: Vec<RequiredFile> = adapters
        .iter()
        .flat_map(|adapter| adapter.required_files())
        .collect();
    check_sources(&required)
}

/// Compile every league. Nothing is loaded unless every league's sources
/// are present; leagues share no state and compile on separate blocking
/// tasks. Results come back in adapter order.
pub async fn run_all(
    adapters: Vec<Arc<dyn LeagueAdapter>>,
) -> Result<Vec<LeagueRun>, BuildError> {
    check_all_sources(&adapters)?;

    let handles: Vec<_> = adapters
        .into_iter()
        .map(|adapter| tokio::task::spawn_blocking(move || compile_league(adapter.as_ref())))
        .collect();

    let mut runs = Vec::with_capacity(handles.len());
    for handle in handles {
        let run = handle
            .await
            .map_err(|e| BuildError::Task(e.to_string()))??;
        runs.push(run);
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::index::TeamSeasonKey;
    use crate::records::{NameFragments, RawAppearanceRecord, RawIdentityRecord};

    fn babe_ruth() -> RawRecords {
        RawRecords {
            identities: vec![RawIdentityRecord {
                person_id: "1".into(),
                name: NameFragments::Split {
                    first: Some("Babe".into()),
                    last: Some("Ruth".into()),
                },
            }],
            appearances: vec![
                RawAppearanceRecord {
                    person_id: "1".into(),
                    team: Some("NYA".into()),
                    year: Some(1927),
                },
                RawAppearanceRecord {
                    person_id: "1".into(),
                    team: Some("BOS".into()),
                    year: Some(1919),
                },
            ],
        }
    }

    #[test]
    fn compiles_the_babe_ruth_scenario() {
        let (dataset, report) = compile(babe_ruth(), 4);
        assert_eq!(dataset.players, vec!["Babe Ruth"]);
        let seasons: Vec<_> = dataset.player_seasons["Babe Ruth"]
            .iter()
            .map(|s| (s.team.as_str(), s.year))
            .collect();
        assert_eq!(seasons, vec![("NYA", 1927), ("BOS", 1919)]);
        let key: TeamSeasonKey = "NYA-1927".parse().unwrap();
        assert_eq!(dataset.team_seasons[&key], vec!["Babe Ruth"]);
        assert_eq!(report.kept, 2);
    }

    #[test]
    fn compile_is_deterministic() {
        let (a, _) = compile(babe_ruth(), 4);
        let (b, _) = compile(babe_ruth(), 4);
        assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
    }

    struct InMemory {
        required: Vec<RequiredFile>,
    }

    impl LeagueAdapter for InMemory {
        fn league(&self) -> League {
            League::Mlb
        }

        fn required_files(&self) -> Vec<RequiredFile> {
            self.required.clone()
        }

        fn load(&self) -> Result<RawRecords, LoadError> {
            Ok(babe_ruth())
        }

        fn min_name_len(&self) -> usize {
            4
        }
    }

    #[test]
    fn standalone_run_checks_sources_and_compile_step_does_not() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = InMemory {
            required: vec![RequiredFile {
                league: League::Mlb,
                path: dir.path().join("people.csv"),
                hint: "extract the Lahman archive".into(),
            }],
        };

        let err = run_league(&adapter).unwrap_err();
        assert!(matches!(err, BuildError::MissingSource(_)));

        let run = compile_league(&adapter).unwrap();
        assert_eq!(run.dataset.players, vec!["Babe Ruth"]);
    }

    #[tokio::test]
    async fn run_all_compiles_every_adapter() {
        let first: Arc<dyn LeagueAdapter> = Arc::new(InMemory { required: vec![] });
        let second: Arc<dyn LeagueAdapter> = Arc::new(InMemory { required: vec![] });
        let runs = run_all(vec![first, second]).await.unwrap();
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.report.kept == 2));
    }
}
