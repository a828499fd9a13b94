use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::github::types::{PullRequest, PullRequestRecord};
use crate::stall::StallError;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to open PR snapshot at {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse PR snapshot: invalid JSON in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a PR list from a JSON file holding an array of PR objects
///
/// Fails on the first record with a missing field rather than skipping it.
pub fn load_snapshot(path: &Path) -> Result<Vec<PullRequest>> {
    let file = File::open(path).map_err(|source| SnapshotError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<PullRequestRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let prs = records
        .into_iter()
        .map(PullRequest::try_from)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid PR in snapshot {}", path.display()))?;

    Ok(prs)
}

/// True when the failure came from bad input data (an unreadable snapshot or
/// a PR with missing fields) rather than from the network side
pub fn is_input_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<SnapshotError>().is_some() || e.downcast_ref::<StallError>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prs.json");
        fs::write(
            &path,
            r#"[
                {"number": 1, "title": "One", "url": "https://x/1", "draft": false, "state": "open",
                 "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"},
                {"number": 2, "title": "Two", "url": "https://x/2", "state": "closed",
                 "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-03T00:00:00Z"}
            ]"#,
        )
        .unwrap();

        let prs = load_snapshot(&path).unwrap();
        assert_eq!(prs.len(), 2);
        assert_eq!(prs[1].number, 2);
        assert!(!prs[1].is_draft);
    }

    #[test]
    fn test_snapshot_missing_field_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prs.json");
        fs::write(
            &path,
            r#"[{"number": 9, "title": "Nine", "url": "https://x/9", "state": "open",
                 "created_at": "2026-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

        let err = load_snapshot(&path).unwrap_err();
        let stall_err = err.downcast_ref::<StallError>().unwrap();
        assert_eq!(
            *stall_err,
            StallError::InvalidInput {
                field: "updated_at",
                number: Some(9)
            }
        );
    }

    #[test]
    fn test_snapshot_not_found_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::Open { .. })
        ));
        assert!(is_input_error(&err));
    }

    #[test]
    fn test_snapshot_bad_json_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prs.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::Parse { .. })
        ));
        assert!(is_input_error(&err));
    }

    #[test]
    fn test_missing_field_is_input_error() {
        let err = anyhow::Error::new(StallError::InvalidInput {
            field: "title",
            number: Some(3),
        })
        .context("Invalid PR in snapshot prs.json");
        assert!(is_input_error(&err));
    }

    #[test]
    fn test_api_error_is_not_input_error() {
        let err = anyhow::anyhow!("GitHub API rate limit exceeded. Wait a few minutes and try again.");
        assert!(!is_input_error(&err));
    }
}
