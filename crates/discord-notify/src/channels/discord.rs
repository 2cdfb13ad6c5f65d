//! Discord webhook notification channel.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::ChannelError;
use crate::events::Message;
use crate::NotifyChannel;

/// Discord webhook notification channel.
///
/// Holds the one HTTP client shared by every send until [`NotifyChannel::close`].
pub struct DiscordChannel {
    webhook: Url,
    client: Mutex<Option<reqwest::Client>>,
}

impl DiscordChannel {
    /// Create a Discord channel posting to `webhook`.
    #[must_use]
    pub fn new(webhook: Url) -> Self {
        Self::with_client(webhook, reqwest::Client::new())
    }

    /// Create a Discord channel around an existing client.
    #[must_use]
    pub fn with_client(webhook: Url, client: reqwest::Client) -> Self {
        Self {
            webhook,
            client: Mutex::new(Some(client)),
        }
    }

    #[must_use]
    pub fn webhook(&self) -> &Url {
        &self.webhook
    }

    /// Whether the client has been released.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn client(&self) -> Result<reqwest::Client, ChannelError> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ChannelError::Closed)
    }
}

#[async_trait]
impl NotifyChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, message: &Message) -> Result<(), ChannelError> {
        let client = self.client()?;

        debug!(channel = "discord", webhook = %self.webhook, "Posting to webhook");

        let response = client
            .post(self.webhook.clone())
            .json(&message.payload())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!(channel = "discord", status = %status, body = %body, "Webhook rejected message");

        Err(ChannelError::Status { status })
    }

    fn close(&self) -> Result<(), ChannelError> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(drop)
            .ok_or(ChannelError::Closed)
    }
}
