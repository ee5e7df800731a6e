use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::dataset::LeagueDataset;
use crate::error::BuildError;
use crate::league::League;
use crate::pipeline::LeagueRun;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub league: League,
    pub path: PathBuf,
    pub bytes: usize,
}

pub fn artifact_path(out_dir: &Path, league: League) -> PathBuf {
    out_dir.join(league.artifact_name())
}

/// Compact JSON unless `pretty` is set.
pub fn render(dataset: &LeagueDataset, pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
    if pretty {
        serde_json::to_vec_pretty(dataset)
    } else {
        serde_json::to_vec(dataset)
    }
}

fn io_error(path: &Path, source: io::Error) -> BuildError {
    BuildError::Output {
        path: path.display().to_string(),
        source,
    }
}

/// Write every run's artifact into `out_dir`.
///
/// All artifacts are rendered and staged before any target is replaced. If
/// staging or a rename fails, the staged files and any artifact already
/// created by this call are removed, so either every artifact lands or none
/// does.
pub fn write_artifacts(
    out_dir: &Path,
    runs: &[LeagueRun],
    pretty: bool,
) -> Result<Vec<WrittenArtifact>, BuildError> {
    let rendered = runs
        .iter()
        .map(|run| Ok((run.league, render(&run.dataset, pretty)?)))
        .collect::<Result<Vec<_>, BuildError>>()?;

    fs::create_dir_all(out_dir).map_err(|e| io_error(out_dir, e))?;

    for (league, _) in &rendered {
        let path = artifact_path(out_dir, *league);
        if path.is_dir() {
            let source = io::Error::new(io::ErrorKind::Other, "target is a directory");
            return Err(io_error(&path, source));
        }
    }

    let mut staged: Vec<Staged> = Vec::with_capacity(rendered.len());
    for (league, body) in &rendered {
        let path = artifact_path(out_dir, *league);
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, body) {
            let _ = fs::remove_file(&tmp);
            discard(&staged, &[]);
            return Err(io_error(&tmp, e));
        }
        staged.push(Staged {
            league: *league,
            tmp,
            path,
            bytes: body.len(),
        });
    }

    let mut created: Vec<PathBuf> = Vec::new();
    for (i, entry) in staged.iter().enumerate() {
        let existed = entry.path.exists();
        if let Err(e) = fs::rename(&entry.tmp, &entry.path) {
            discard(&staged[i..], &created);
            return Err(io_error(&entry.path, e));
        }
        if !existed {
            created.push(entry.path.clone());
        }
    }

    let written = staged
        .into_iter()
        .map(|entry| {
            info!(
                league = %entry.league,
                path = %entry.path.display(),
                bytes = entry.bytes,
                "wrote artifact"
            );
            WrittenArtifact {
                league: entry.league,
                path: entry.path,
                bytes: entry.bytes,
            }
        })
        .collect();
    Ok(written)
}

struct Staged {
    league: League,
    tmp: PathBuf,
    path: PathBuf,
    bytes: usize,
}

/// Best-effort cleanup after a failed write. Removal errors are logged
/// because the original failure is the one reported.
fn discard(staged: &[Staged], created: &[PathBuf]) {
    for path in staged.iter().map(|s| &s.tmp).chain(created) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %path.display(), "failed to clean up: {}", e);
            }
        }
    }
}
