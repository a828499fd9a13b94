pub mod client;
pub mod pulls;
pub mod snapshot;
pub mod source;
pub mod types;

pub use client::create_client;
pub use pulls::list_open_prs;
pub use snapshot::{is_input_error, load_snapshot, SnapshotError};
pub use source::{GithubSource, PullRequestSource, SnapshotSource};
pub use types::{PrState, PullRequest, PullRequestRecord};
