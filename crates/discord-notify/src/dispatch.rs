//! Fire-and-forget message delivery.

use std::sync::Arc;

use tracing::{info, warn};

use crate::channels::NotifyChannel;
use crate::error::ChannelError;
use crate::events::Message;
use crate::host::TaskScheduler;

/// Hand-off point between event filtering and delivery.
///
/// Implementations must return without waiting on the network and must not
/// surface delivery failures to the caller.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, message: Message);

    /// Release delivery resources. Called once at shutdown.
    fn close(&self);
}

/// Delivers each message on a host-scheduled task through one channel.
pub struct ChannelDispatcher {
    channel: Arc<dyn NotifyChannel>,
    scheduler: Arc<dyn TaskScheduler>,
}

impl ChannelDispatcher {
    #[must_use]
    pub fn new(channel: Arc<dyn NotifyChannel>, scheduler: Arc<dyn TaskScheduler>) -> Self {
        Self { channel, scheduler }
    }
}

impl Dispatch for ChannelDispatcher {
    fn dispatch(&self, message: Message) {
        let channel = Arc::clone(&self.channel);
        self.scheduler.run_async(Box::pin(async move {
            // Outcome is logged inside deliver
            let _ = deliver(channel.as_ref(), &message).await;
        }));
    }

    fn close(&self) {
        if let Err(e) = self.channel.close() {
            warn!(channel = self.channel.name(), error = %e, "HTTP client errored on exit");
        }
    }
}

/// Send one message and log the outcome.
///
/// The result is returned for callers that want to observe it; dispatch
/// paths discard it.
///
/// # Errors
/// Returns the channel's error after logging it.
pub async fn deliver(channel: &dyn NotifyChannel, message: &Message) -> Result<(), ChannelError> {
    let channel_name = channel.name();
    info!(channel = channel_name, content = %message, "Sending Discord message");

    match channel.send(message).await {
        Ok(()) => {
            info!(channel = channel_name, content = %message, "Sent Discord message");
            Ok(())
        }
        Err(ChannelError::Status { status }) => {
            warn!(
                channel = channel_name,
                status = %status,
                "HTTP POST to Discord webhook returned status code"
            );
            Err(ChannelError::Status { status })
        }
        Err(e) => {
            warn!(
                channel = channel_name,
                error = %e,
                "HTTP POST to Discord webhook encountered an error"
            );
            Err(e)
        }
    }
}
