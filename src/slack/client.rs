use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

/// Slack answers 200 OK even on failure; `ok` says whether it worked
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

impl PostMessageResponse {
    /// Message timestamp on success, the Slack error code otherwise
    fn into_result(self) -> Result<String> {
        if self.ok {
            Ok(self.ts.unwrap_or_default())
        } else {
            let code = self.error.unwrap_or_else(|| "unknown_error".to_string());
            match code.as_str() {
                "not_in_channel" | "channel_not_found" => anyhow::bail!(
                    "Slack rejected the message ({}). Check the channel name and invite the bot to it.",
                    code
                ),
                "invalid_auth" | "not_authed" | "token_revoked" => anyhow::bail!(
                    "Slack authentication failed ({}). Your Slack token may be invalid or revoked.",
                    code
                ),
                _ => anyhow::bail!("Slack API error: {}", code),
            }
        }
    }
}

/// Post a plain-text message to a channel (name or ID).
/// Returns the message timestamp Slack assigned.
pub async fn post_message(
    client: &reqwest::Client,
    token: &str,
    channel: &str,
    text: &str,
) -> Result<String> {
    let response = client
        .post(POST_MESSAGE_URL)
        .bearer_auth(token)
        .json(&PostMessageRequest { channel, text })
        .send()
        .await
        .context("Failed to send message to Slack")?
        .error_for_status()
        .context("Slack returned an HTTP error")?;

    let body: PostMessageResponse = response
        .json()
        .await
        .context("Failed to parse Slack response JSON")?;

    body.into_result()
}
