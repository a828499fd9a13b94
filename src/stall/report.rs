use chrono::{DateTime, Utc};

use super::detector::find_stalled_prs;
use super::types::{StallReport, StallThresholds};
use crate::github::types::PullRequest;

pub const REPORT_HEADER: &str = "Daily reminder about stalled PRs:";

/// Render already-evaluated stall reports as the reminder text.
///
/// Format: the header line, then per PR a block of
/// "\nPR: `{title}`\n  {url}\n  {reasons}\n".
pub fn render_report(stalled: &[StallReport]) -> String {
    let mut msg = REPORT_HEADER.to_string();
    for report in stalled {
        msg.push_str(&format!(
            "\nPR: `{}`\n  {}\n  {}\n",
            report.pull_request.title,
            report.pull_request.url,
            report.details()
        ));
    }
    msg
}

/// Build the full reminder text for a list of PRs.
///
/// With no stalled PRs this is just the header; whether to send it is up to
/// the caller.
pub fn build_report(prs: &[PullRequest], now: DateTime<Utc>, thresholds: &StallThresholds) -> String {
    render_report(&find_stalled_prs(prs, now, thresholds))
}
