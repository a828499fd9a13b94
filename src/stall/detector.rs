use chrono::{DateTime, Duration, Utc};

use super::types::{StallReason, StallReport, StallThresholds};
use crate::github::types::{PrState, PullRequest};

/// Keep only PRs eligible for staleness checks: open, not flagged as draft,
/// and without "draft"/"wip" anywhere in the title. Order is preserved.
///
/// The title check is plain substring matching, so "wipe cache" is skipped too.
pub fn filter_active_prs(prs: &[PullRequest]) -> Vec<&PullRequest> {
    prs.iter()
        .filter(|pr| pr.state == PrState::Open && !pr.is_draft && !pr.has_wip_title())
        .collect()
}

/// Whole hours between `past` and `now`, floored
pub fn hours_ago(now: DateTime<Utc>, past: DateTime<Utc>) -> i64 {
    (now - past).num_seconds().div_euclid(3600)
}

/// `now` minus whole days; out-of-range cutoffs clamp to the earliest instant
fn cutoff(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Check a single PR against both thresholds.
///
/// Both checks always run and are reported in a fixed order: creation age
/// first, then inactivity. Comparisons are strict, so a PR exactly at the
/// cutoff is not flagged. Draft/WIP/state are not re-checked here.
pub fn evaluate_staleness<'a>(
    pr: &'a PullRequest,
    now: DateTime<Utc>,
    thresholds: &StallThresholds,
) -> StallReport<'a> {
    let opened_cutoff = cutoff(now, thresholds.opened_cutoff_days);
    let update_cutoff = cutoff(now, thresholds.update_cutoff_days);

    let mut reasons = Vec::new();

    if pr.created_at < opened_cutoff {
        reasons.push(StallReason::Opened {
            hours: hours_ago(now, pr.created_at),
        });
    }
    if pr.updated_at < update_cutoff {
        reasons.push(StallReason::LastUpdated {
            hours: hours_ago(now, pr.updated_at),
        });
    }

    StallReport {
        pull_request: pr,
        reasons,
    }
}

/// Filter, evaluate, and keep only the stalled PRs, in input order
pub fn find_stalled_prs<'a>(
    prs: &'a [PullRequest],
    now: DateTime<Utc>,
    thresholds: &StallThresholds,
) -> Vec<StallReport<'a>> {
    filter_active_prs(prs)
        .into_iter()
        .map(|pr| evaluate_staleness(pr, now, thresholds))
        .filter(StallReport::is_stalled)
        .collect()
}
