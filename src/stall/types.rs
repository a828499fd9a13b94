use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::github::types::PullRequest;

pub const DEFAULT_OPENED_CUTOFF_DAYS: i64 = 4;
pub const DEFAULT_UPDATE_CUTOFF_DAYS: i64 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StallError {
    #[error("invalid input: pull request {} is missing field `{field}`", describe_number(.number))]
    InvalidInput {
        field: &'static str,
        number: Option<u64>,
    },
}

fn describe_number(number: &Option<u64>) -> String {
    match number {
        Some(n) => format!("#{}", n),
        None => "(unknown number)".to_string(),
    }
}

/// Age thresholds, in whole days, past which a PR counts as stalled.
///
/// Example YAML:
/// ```yaml
/// thresholds:
///   opened_cutoff_days: 4
///   update_cutoff_days: 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StallThresholds {
    /// A PR created more than this many days ago is "too old"
    #[serde(default = "default_opened_cutoff_days")]
    pub opened_cutoff_days: i64,

    /// A PR not updated for more than this many days is inactive
    #[serde(default = "default_update_cutoff_days")]
    pub update_cutoff_days: i64,
}

fn default_opened_cutoff_days() -> i64 {
    DEFAULT_OPENED_CUTOFF_DAYS
}

fn default_update_cutoff_days() -> i64 {
    DEFAULT_UPDATE_CUTOFF_DAYS
}

impl Default for StallThresholds {
    fn default() -> Self {
        Self {
            opened_cutoff_days: DEFAULT_OPENED_CUTOFF_DAYS,
            update_cutoff_days: DEFAULT_UPDATE_CUTOFF_DAYS,
        }
    }
}

/// One matched stall condition, with whole hours elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallReason {
    Opened { hours: i64 },
    LastUpdated { hours: i64 },
}

impl fmt::Display for StallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StallReason::Opened { hours } => write!(f, "opened {}h ago", hours),
            StallReason::LastUpdated { hours } => write!(f, "last updated {}h ago", hours),
        }
    }
}

/// Staleness verdict for a single PR
#[derive(Debug, Clone, PartialEq)]
pub struct StallReport<'a> {
    pub pull_request: &'a PullRequest,
    pub reasons: Vec<StallReason>,
}

impl StallReport<'_> {
    pub fn is_stalled(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// Reasons on one line, e.g. "opened 120h ago, last updated 48h ago".
    /// Empty when the PR is not stalled.
    pub fn details(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = StallThresholds::default();
        assert_eq!(t.opened_cutoff_days, 4);
        assert_eq!(t.update_cutoff_days, 1);
    }

    #[test]
    fn test_partial_thresholds_parse() {
        let t: StallThresholds = serde_saphyr::from_str("opened_cutoff_days: 7").unwrap();
        assert_eq!(t.opened_cutoff_days, 7);
        assert_eq!(t.update_cutoff_days, 1);
    }

    #[test]
    fn test_unknown_threshold_field_rejected() {
        let result: Result<StallThresholds, _> = serde_saphyr::from_str("stale_days: 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(StallReason::Opened { hours: 120 }.to_string(), "opened 120h ago");
        assert_eq!(
            StallReason::LastUpdated { hours: 0 }.to_string(),
            "last updated 0h ago"
        );
    }

    #[test]
    fn test_invalid_input_message() {
        let err = StallError::InvalidInput {
            field: "title",
            number: None,
        };
        assert_eq!(
            err.to_string(),
            "invalid input: pull request (unknown number) is missing field `title`"
        );
    }
}
