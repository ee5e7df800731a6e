//! Opt-in download of nflverse roster files that are not on disk yet.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::loader::resolve_path;
use crate::sources::nflverse::{roster_file_name, roster_url};

const USER_AGENT: &str = "roster-index/0.1";

pub fn build_client() -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(2)
        .build()?)
}

/// Seasons in `seasons` whose roster file is not present in `dir`.
pub fn missing_seasons(dir: &Path, seasons: impl IntoIterator<Item = u32>) -> Vec<u32> {
    seasons
        .into_iter()
        .filter(|&season| resolve_path(&dir.join(roster_file_name(season))).is_none())
        .collect()
}

async fn fetch_roster(
    client: &reqwest::Client,
    season: u32,
    dest: &Path,
) -> Result<usize, FetchError> {
    let url = roster_url(season);
    let response = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url,
            status: response.status(),
        });
    }

    let body = response.bytes().await?;
    let tmp = dest.with_extension("csv.part");
    tokio::fs::write(&tmp, &body)
        .await
        .map_err(|source| FetchError::Io {
            path: tmp.display().to_string(),
            source,
        })?;
    tokio::fs::rename(&tmp, dest)
        .await
        .map_err(|source| FetchError::Io {
            path: dest.display().to_string(),
            source,
        })?;
    Ok(body.len())
}

/// Download every missing roster file into `dir`, pausing `delay_ms`
/// between requests. Seasons that fail to download are logged and left
/// missing; the source check that follows reports them.
pub async fn fetch_missing_rosters(
    client: &reqwest::Client,
    dir: &Path,
    seasons: impl IntoIterator<Item = u32>,
    delay_ms: u64,
) -> Result<Vec<PathBuf>, FetchError> {
    let missing = missing_seasons(dir, seasons);
    if missing.is_empty() {
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| FetchError::Io {
            path: dir.display().to_string(),
            source,
        })?;
    info!("Fetching {} missing NFL roster file(s) into {}", missing.len(), dir.display());

    let mut fetched = Vec::new();
    for (i, season) in missing.iter().copied().enumerate() {
        if i > 0 {
            sleep(Duration::from_millis(delay_ms)).await;
        }
        let dest = dir.join(roster_file_name(season));
        match fetch_roster(client, season, &dest).await {
            Ok(bytes) => {
                info!(season, bytes, "fetched roster");
                fetched.push(dest);
            }
            Err(e) => warn!(season, "failed to fetch roster: {}", e),
        }
    }
    Ok(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_absent_seasons_are_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roster_2020.csv"), "season,team,full_name\n").unwrap();
        assert_eq!(missing_seasons(dir.path(), 2019..=2021), vec![2019, 2021]);
    }

    #[tokio::test]
    async fn nothing_to_fetch_makes_no_requests() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roster_2020.csv"), "season,team,full_name\n").unwrap();
        let client = build_client().unwrap();
        let fetched = fetch_missing_rosters(&client, dir.path(), 2020..=2020, 0).await.unwrap();
        assert!(fetched.is_empty());
    }
}
