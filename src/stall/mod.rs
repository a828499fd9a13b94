pub mod detector;
pub mod report;
pub mod types;

pub use detector::{evaluate_staleness, filter_active_prs, find_stalled_prs, hours_ago};
pub use report::{build_report, render_report, REPORT_HEADER};
pub use types::{StallError, StallReason, StallReport, StallThresholds};
