use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stall::StallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String, // HTML URL for display
    pub is_draft: bool,
    pub state: PrState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PullRequest {
    /// True when the title marks the PR as unfinished ("draft" or "wip",
    /// any case, anywhere in the title)
    pub fn has_wip_title(&self) -> bool {
        let title = self.title.to_lowercase();
        title.contains("draft") || title.contains("wip")
    }
}

/// Loosely-typed PR shape as found in a JSON snapshot file.
///
/// Every field is optional so that a missing one can be reported by name
/// instead of failing deep inside serde.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PullRequestRecord {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(default, alias = "draft")]
    pub is_draft: Option<bool>,
    pub state: Option<PrState>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<PullRequestRecord> for PullRequest {
    type Error = StallError;

    fn try_from(record: PullRequestRecord) -> Result<Self, Self::Error> {
        let number = record.number;
        let missing = |field: &'static str| StallError::InvalidInput { field, number };

        Ok(PullRequest {
            number: number.ok_or_else(|| missing("number"))?,
            title: record.title.ok_or_else(|| missing("title"))?,
            url: record.url.ok_or_else(|| missing("url"))?,
            // Absent draft flag means "not a draft", same as the GitHub API
            is_draft: record.is_draft.unwrap_or(false),
            state: record.state.ok_or_else(|| missing("state"))?,
            created_at: record.created_at.ok_or_else(|| missing("created_at"))?,
            updated_at: record.updated_at.ok_or_else(|| missing("updated_at"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> PullRequestRecord {
        PullRequestRecord {
            number: Some(7),
            title: Some("Fix flaky test".to_string()),
            url: Some("https://github.com/owner/repo/pull/7".to_string()),
            is_draft: Some(false),
            state: Some(PrState::Open),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_record_converts_when_complete() {
        let pr = PullRequest::try_from(full_record()).unwrap();
        assert_eq!(pr.number, 7);
        assert_eq!(pr.state, PrState::Open);
        assert!(!pr.is_draft);
    }

    #[test]
    fn test_missing_created_at_names_field_and_number() {
        let record = PullRequestRecord {
            created_at: None,
            ..full_record()
        };
        let err = PullRequest::try_from(record).unwrap_err();
        assert_eq!(
            err,
            StallError::InvalidInput {
                field: "created_at",
                number: Some(7)
            }
        );
        assert!(err.to_string().contains("#7"));
        assert!(err.to_string().contains("created_at"));
    }

    #[test]
    fn test_missing_number_is_reported_without_number() {
        let record = PullRequestRecord {
            number: None,
            ..full_record()
        };
        let err = PullRequest::try_from(record).unwrap_err();
        assert_eq!(
            err,
            StallError::InvalidInput {
                field: "number",
                number: None
            }
        );
    }

    #[test]
    fn test_missing_draft_flag_defaults_to_false() {
        let record = PullRequestRecord {
            is_draft: None,
            ..full_record()
        };
        let pr = PullRequest::try_from(record).unwrap();
        assert!(!pr.is_draft);
    }

    #[test]
    fn test_record_parses_from_json() {
        let json = r#"{
            "number": 42,
            "title": "Add feature X",
            "url": "https://x/42",
            "draft": true,
            "state": "open",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z"
        }"#;
        let record: PullRequestRecord = serde_json::from_str(json).unwrap();
        let pr = PullRequest::try_from(record).unwrap();
        assert_eq!(pr.number, 42);
        assert!(pr.is_draft);
        assert_eq!(pr.state, PrState::Open);
    }
}
