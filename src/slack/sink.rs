use anyhow::Result;

use super::client::post_message;

/// Where a finished report goes
#[allow(async_fn_in_trait)]
pub trait ReportSink {
    async fn deliver(&self, text: &str) -> Result<()>;

    /// Short human description for logs
    fn describe(&self) -> String;
}

/// Posts the report to a Slack channel
pub struct SlackSink {
    http: reqwest::Client,
    token: String,
    channel: String,
}

impl SlackSink {
    pub fn new(token: String, channel: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            channel,
        }
    }
}

impl ReportSink for SlackSink {
    async fn deliver(&self, text: &str) -> Result<()> {
        let ts = post_message(&self.http, &self.token, &self.channel, text).await?;
        tracing::debug!(channel = %self.channel, ts = %ts, "Slack message posted");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("slack:{}", self.channel)
    }
}

/// Prints the report instead of sending it (--dry-run)
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    async fn deliver(&self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}
