//! Host-facing plugin: wires config, channel, and relay together.

use std::sync::Arc;

use tracing::{info, warn};

use crate::channels::discord::DiscordChannel;
use crate::config::{ConfigFile, Settings, CONFIG_FILE_NAME, DEFAULT_WEBHOOK};
use crate::dispatch::{ChannelDispatcher, Dispatch};
use crate::host::{HostContext, PlayerListener, Plugin};
use crate::relay::NotificationRelay;

const PLUGIN_NAME: &str = "DiscordNotify";

/// Discord notification plugin.
///
/// Inert until [`Plugin::on_enable`]; player callbacks arriving before enable
/// or after disable are ignored.
#[derive(Default)]
pub struct DiscordNotifyPlugin {
    relay: Option<NotificationRelay>,
}

impl DiscordNotifyPlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active relay, if the plugin is enabled.
    #[must_use]
    pub fn relay(&self) -> Option<&NotificationRelay> {
        self.relay.as_ref()
    }

    /// Whether events will currently be forwarded.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.relay.as_ref().is_some_and(NotificationRelay::enabled)
    }

    fn build_relay(context: &HostContext) -> NotificationRelay {
        let path = context.data_folder().join(CONFIG_FILE_NAME);
        let file = match ConfigFile::load_or_create(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "Could not load config, notifications disabled");
                return NotificationRelay::disabled();
            }
        };

        let settings = Settings::resolve(file.section(), Some(DEFAULT_WEBHOOK));

        let dispatcher = settings.webhook().cloned().map(|webhook| {
            let channel = Arc::new(DiscordChannel::new(webhook));
            Arc::new(ChannelDispatcher::new(channel, context.scheduler())) as Arc<dyn Dispatch>
        });

        NotificationRelay::new(settings, dispatcher)
    }
}

impl Plugin for DiscordNotifyPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn on_enable(&mut self, context: &HostContext) {
        if let Some(mut previous) = self.relay.take() {
            previous.shutdown();
        }

        let relay = Self::build_relay(context);
        let summary = relay.settings().summary();
        if relay.enabled() {
            info!(plugin = PLUGIN_NAME, "{PLUGIN_NAME} enabled ({summary})");
        } else {
            warn!(plugin = PLUGIN_NAME, "{PLUGIN_NAME} not enabled ({summary})");
        }

        self.relay = Some(relay);
    }

    fn on_disable(&mut self) {
        if let Some(mut relay) = self.relay.take() {
            relay.shutdown();
        }
        info!(plugin = PLUGIN_NAME, "{PLUGIN_NAME} disabled");
    }
}

impl PlayerListener for DiscordNotifyPlugin {
    fn on_player_join(&self, display_name: &str) {
        if let Some(relay) = &self.relay {
            relay.on_player_join(display_name);
        }
    }

    fn on_player_quit(&self, display_name: &str) {
        if let Some(relay) = &self.relay {
            relay.on_player_quit(display_name);
        }
    }
}
