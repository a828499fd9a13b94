use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::github::PullRequestSource;
use crate::slack::ReportSink;
use crate::stall::{filter_active_prs, find_stalled_prs, render_report, StallThresholds};

/// Counts from one run, for logging and exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub active: usize,
    pub stalled: usize,
    pub delivered: bool,
}

/// List PRs, find the stalled ones, and deliver the reminder.
///
/// The report is accumulated in full and delivered once. Nothing is sent
/// when no PR is stalled.
pub async fn run_stall_check<S, K>(
    source: &S,
    sink: &K,
    now: DateTime<Utc>,
    thresholds: &StallThresholds,
) -> Result<RunSummary>
where
    S: PullRequestSource,
    K: ReportSink,
{
    tracing::debug!(source = %source.describe(), "Listing pull requests");
    let prs = source.list_pull_requests().await?;
    let active = filter_active_prs(&prs).len();

    tracing::debug!(
        total = prs.len(),
        active,
        opened_cutoff_days = thresholds.opened_cutoff_days,
        update_cutoff_days = thresholds.update_cutoff_days,
        "Evaluating pull requests"
    );

    let stalled = find_stalled_prs(&prs, now, thresholds);
    for report in &stalled {
        tracing::info!(number = report.pull_request.number, "PR {} is stalled", report.pull_request.number);
    }

    let delivered = if stalled.is_empty() {
        tracing::info!("No stalled PRs, nothing to send");
        false
    } else {
        let text = render_report(&stalled);
        sink.deliver(&text).await?;
        tracing::info!(sink = %sink.describe(), stalled = stalled.len(), "Reminder delivered");
        true
    };

    Ok(RunSummary {
        total: prs.len(),
        active,
        stalled: stalled.len(),
        delivered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{PrState, PullRequest};
    use crate::stall::REPORT_HEADER;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    fn create_test_pr(number: u64, age: Duration) -> PullRequest {
        PullRequest {
            number,
            title: format!("PR #{}", number),
            url: format!("https://github.com/owner/repo/pull/{}", number),
            is_draft: false,
            state: PrState::Open,
            created_at: now() - age,
            updated_at: now() - age,
        }
    }

    struct FakeSource(Vec<PullRequest>);

    impl PullRequestSource for FakeSource {
        async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    struct FailingSource;

    impl PullRequestSource for FailingSource {
        async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
            anyhow::bail!("GitHub API error: boom")
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<String>>,
    }

    impl ReportSink for RecordingSink {
        async fn deliver(&self, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn describe(&self) -> String {
            "recording".to_string()
        }
    }

    #[tokio::test]
    async fn test_nothing_sent_when_no_stalled_prs() {
        let source = FakeSource(vec![create_test_pr(1, Duration::hours(1))]);
        let sink = RecordingSink::default();

        let summary = run_stall_check(&source, &sink, now(), &StallThresholds::default())
            .await
            .unwrap();

        assert_eq!(summary.stalled, 0);
        assert!(!summary.delivered);
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_delivery_with_all_stalled_prs() {
        let mut draft = create_test_pr(3, Duration::days(9));
        draft.is_draft = true;
        let source = FakeSource(vec![
            create_test_pr(1, Duration::days(6)),
            create_test_pr(2, Duration::hours(2)),
            draft,
            create_test_pr(4, Duration::days(2)),
        ]);
        let sink = RecordingSink::default();

        let summary = run_stall_check(&source, &sink, now(), &StallThresholds::default())
            .await
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                total: 4,
                active: 3,
                stalled: 2,
                delivered: true
            }
        );

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with(REPORT_HEADER));
        assert!(sent[0].contains("PR #1"));
        assert!(sent[0].contains("PR #4"));
        assert!(!sent[0].contains("PR #3"));
        assert_eq!(sent[0].matches(REPORT_HEADER).count(), 1);
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let sink = RecordingSink::default();
        let result = run_stall_check(&FailingSource, &sink, now(), &StallThresholds::default()).await;
        assert!(result.is_err());
        assert!(sink.sent.lock().unwrap().is_empty());
    }
}
