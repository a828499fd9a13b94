use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::notify::RunSummary;
use crate::stall::StallReport;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format stalled PRs as a table: number, title, reasons, URL.
/// Titles are truncated to the terminal width; pipes get full titles.
pub fn format_stalled_table(reports: &[StallReport], use_colors: bool) -> String {
    format_stalled_table_with_width(reports, use_colors, get_terminal_width())
}

fn format_stalled_table_with_width(
    reports: &[StallReport],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if reports.is_empty() {
        return "No stalled pull requests.".to_string();
    }

    let separator = "  ";
    let number_width = reports
        .iter()
        .map(|r| r.pull_request.number.to_string().len() + 1)
        .max()
        .unwrap_or(2);

    reports
        .iter()
        .map(|report| {
            let pr = report.pull_request;
            let number = format!("{:>width$}", format!("#{}", pr.number), width = number_width);
            let details = report.details();

            // Leave the rest of the line for the title
            let fixed_width = number_width + separator.len() * 3 + details.len() + pr.url.len();
            let title = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_title(&pr.title, width - fixed_width),
                Some(_) => truncate_title(&pr.title, 20),
                None => pr.title.clone(),
            };

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}",
                    number.dimmed(),
                    separator,
                    title.bold(),
                    separator,
                    details.yellow(),
                    separator,
                    pr.url.underline()
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}",
                    number, separator, title, separator, details, separator, pr.url
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line detail for one stalled PR (verbose mode)
pub fn format_stalled_detail(report: &StallReport, now: DateTime<Utc>, use_colors: bool) -> String {
    let pr = report.pull_request;
    let age = format_age(now - pr.created_at);
    let idle = format_age(now - pr.updated_at);

    if use_colors {
        format!(
            "{} {}\n  Age: {}\n  Idle: {}\n  Stalled: {}\n  URL: {}",
            format!("#{}", pr.number).dimmed(),
            pr.title.bold(),
            age,
            idle,
            report.details().yellow(),
            pr.url.underline()
        )
    } else {
        format!(
            "#{} {}\n  Age: {}\n  Idle: {}\n  Stalled: {}\n  URL: {}",
            pr.number,
            pr.title,
            age,
            idle,
            report.details(),
            pr.url
        )
    }
}

/// One-line run summary, e.g. "2 of 5 active PRs stalled (7 listed)"
pub fn format_summary(summary: &RunSummary) -> String {
    format!(
        "{} of {} active PRs stalled ({} listed)",
        summary.stalled, summary.active, summary.total
    )
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{PrState, PullRequest};
    use crate::stall::StallReason;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn sample_pr() -> PullRequest {
        PullRequest {
            number: 123,
            title: "Fix login bug".to_string(),
            url: "https://github.com/owner/repo/pull/123".to_string(),
            is_draft: false,
            state: PrState::Open,
            created_at: now() - Duration::days(5),
            updated_at: now() - Duration::hours(30),
        }
    }

    fn sample_report(pr: &PullRequest) -> StallReport<'_> {
        StallReport {
            pull_request: pr,
            reasons: vec![
                StallReason::Opened { hours: 120 },
                StallReason::LastUpdated { hours: 30 },
            ],
        }
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_stalled_table(&[], false), "No stalled pull requests.");
    }

    #[test]
    fn test_format_table_row() {
        let pr = sample_pr();
        let result = format_stalled_table_with_width(&[sample_report(&pr)], false, None);
        assert_eq!(
            result,
            "#123  Fix login bug  opened 120h ago, last updated 30h ago  https://github.com/owner/repo/pull/123"
        );
    }

    #[test]
    fn test_format_table_truncates_on_narrow_terminal() {
        let mut pr = sample_pr();
        pr.title = "A very long title that will never fit in a narrow terminal".to_string();
        let result = format_stalled_table_with_width(&[sample_report(&pr)], false, Some(40));
        assert!(result.contains("A very long title..."));
        assert!(!result.contains("narrow terminal"));
    }

    #[test]
    fn test_format_table_aligns_numbers() {
        let short = PullRequest {
            number: 7,
            ..sample_pr()
        };
        let long = sample_pr();
        let result = format_stalled_table_with_width(
            &[sample_report(&short), sample_report(&long)],
            false,
            None,
        );
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].starts_with("  #7  "));
        assert!(lines[1].starts_with("#123  "));
    }

    #[test]
    fn test_format_detail() {
        let pr = sample_pr();
        let result = format_stalled_detail(&sample_report(&pr), now(), false);
        assert!(result.starts_with("#123 Fix login bug"));
        assert!(result.contains("Age: 5d"));
        assert!(result.contains("Idle: 1d"));
        assert!(result.contains("Stalled: opened 120h ago, last updated 30h ago"));
    }

    #[test]
    fn test_format_summary() {
        let summary = RunSummary {
            total: 7,
            active: 5,
            stalled: 2,
            delivered: false,
        };
        assert_eq!(format_summary(&summary), "2 of 5 active PRs stalled (7 listed)");
    }

    #[test]
    fn test_format_age_hours() {
        assert_eq!(format_age(Duration::hours(3)), "3h");
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age(Duration::days(2)), "2d");
    }

    #[test]
    fn test_format_age_weeks() {
        assert_eq!(format_age(Duration::weeks(2)), "2w");
    }

    #[test]
    fn test_format_age_now() {
        assert_eq!(format_age(Duration::seconds(30)), "now");
    }
}
