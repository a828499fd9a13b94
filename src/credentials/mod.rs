use std::fmt;

/// Environment variable checked first for the GitHub token
pub const ENV_GH_TOKEN_VAR: &str = "STALLED_PRS_GH_TOKEN";

/// Fallback GitHub token variable (set by most CI runners)
pub const ENV_GH_TOKEN_FALLBACK_VAR: &str = "GITHUB_TOKEN";

/// Environment variable holding the Slack bot token (xoxb-...)
pub const ENV_SLACK_TOKEN_VAR: &str = "SLACK_BOT_TOKEN";

#[derive(Debug, PartialEq)]
pub enum CredentialError {
    GithubTokenMissing,
    SlackTokenMissing,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::GithubTokenMissing => write!(
                f,
                "GitHub token not found. Set {} (or {}) to a token with read access to the repository",
                ENV_GH_TOKEN_VAR, ENV_GH_TOKEN_FALLBACK_VAR
            ),
            CredentialError::SlackTokenMissing => write!(
                f,
                "Slack token not found. Set {} to a bot token with the chat:write scope",
                ENV_SLACK_TOKEN_VAR
            ),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Trimmed value of an environment variable, None when unset or blank
fn non_empty(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn github_token_from(
    primary: Option<String>,
    fallback: Option<String>,
) -> Result<String, CredentialError> {
    non_empty(primary)
        .or_else(|| non_empty(fallback))
        .ok_or(CredentialError::GithubTokenMissing)
}

/// GitHub token from STALLED_PRS_GH_TOKEN, falling back to GITHUB_TOKEN
pub fn get_github_token() -> Result<String, CredentialError> {
    github_token_from(
        std::env::var(ENV_GH_TOKEN_VAR).ok(),
        std::env::var(ENV_GH_TOKEN_FALLBACK_VAR).ok(),
    )
}

/// Slack bot token from SLACK_BOT_TOKEN
pub fn get_slack_token() -> Result<String, CredentialError> {
    non_empty(std::env::var(ENV_SLACK_TOKEN_VAR).ok()).ok_or(CredentialError::SlackTokenMissing)
}
