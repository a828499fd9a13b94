use anyhow::Result;
use octocrab::Octocrab;
use std::path::PathBuf;

use crate::config::RepositoryConfig;
use crate::github::pulls::list_open_prs;
use crate::github::snapshot::load_snapshot;
use crate::github::types::PullRequest;

/// Where the PR list for a run comes from
#[allow(async_fn_in_trait)]
pub trait PullRequestSource {
    async fn list_pull_requests(&self) -> Result<Vec<PullRequest>>;

    /// Short human description for logs
    fn describe(&self) -> String;
}

/// Open PRs of one repository, straight from the GitHub API
pub struct GithubSource {
    client: Octocrab,
    repository: RepositoryConfig,
}

impl GithubSource {
    pub fn new(client: Octocrab, repository: RepositoryConfig) -> Self {
        Self { client, repository }
    }
}

impl PullRequestSource for GithubSource {
    async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        list_open_prs(&self.client, &self.repository.owner, &self.repository.name).await
    }

    fn describe(&self) -> String {
        format!("github:{}", self.repository.full_name())
    }
}

/// PRs recorded in a JSON file, for dry runs and replays
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PullRequestSource for SnapshotSource {
    async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_snapshot(&path)).await?
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
