use anyhow::{anyhow, Result};
use octocrab::models::IssueState;
use octocrab::params;
use octocrab::Octocrab;

use crate::github::types::{PrState, PullRequest, PullRequestRecord};

/// Largest page the pulls endpoint returns; only the first page is read
const PER_PAGE: u8 = 100;

/// Turn an octocrab error into something a user can act on
fn describe_api_error(e: octocrab::Error, repo: &str) -> anyhow::Error {
    let error_str = format!("{:?}", e);
    if error_str.contains("Not Found") || error_str.contains("404") {
        anyhow!(
            "Repository {} not found or no access. Check the name and token permissions (needs 'repo' scope for private repos).",
            repo
        )
    } else if error_str.contains("401") || error_str.contains("Bad credentials") {
        anyhow!("Authentication failed. Your GitHub token may be invalid or expired.")
    } else if error_str.contains("rate limit") || error_str.contains("403") {
        anyhow!("GitHub API rate limit exceeded. Wait a few minutes and try again.")
    } else {
        anyhow!("GitHub API error: {}", e)
    }
}

/// Map the octocrab model onto the loosely-typed record, so that missing
/// fields are reported the same way for API data and snapshot files
fn to_record(pr: octocrab::models::pulls::PullRequest) -> PullRequestRecord {
    let state = pr.state.map(|state| match state {
        IssueState::Open => PrState::Open,
        // Anything that isn't open is out of scope
        _ => PrState::Closed,
    });
    let url = pr
        .html_url
        .map(|url| url.to_string())
        .unwrap_or(pr.url);

    PullRequestRecord {
        number: Some(pr.number),
        title: pr.title,
        url: Some(url),
        is_draft: pr.draft,
        state,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
    }
}

/// List open pull requests of `owner/repo` (first page only)
pub async fn list_open_prs(client: &Octocrab, owner: &str, repo: &str) -> Result<Vec<PullRequest>> {
    let full_name = format!("{}/{}", owner, repo);

    let page = client
        .pulls(owner, repo)
        .list()
        .state(params::State::Open)
        .per_page(PER_PAGE)
        .send()
        .await
        .map_err(|e| describe_api_error(e, &full_name))?;

    if page.next.is_some() {
        tracing::warn!(
            repo = %full_name,
            "More than {} open PRs; only the first page is checked",
            PER_PAGE
        );
    }

    let prs = page
        .items
        .into_iter()
        .map(|pr| PullRequest::try_from(to_record(pr)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(prs)
}
