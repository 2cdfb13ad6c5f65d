//! Notification channel implementations.

pub mod discord;

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::events::Message;

/// Trait for notification channels.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Deliver a message. Resolves once the remote side has answered.
    async fn send(&self, message: &Message) -> Result<(), ChannelError>;

    /// Release the channel's transport. Called once at shutdown.
    fn close(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}
