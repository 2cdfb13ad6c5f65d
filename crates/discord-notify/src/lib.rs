//! Discord notifications for game-server player events.
//!
//! This crate forwards player join and quit callbacks from a host game
//! server to a Discord webhook. Delivery is best-effort and fire-and-forget:
//! a slow or failing webhook never blocks or fails the host callback.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use discord_notify::{DiscordNotifyPlugin, HostContext, PlayerListener, Plugin};
//!
//! # fn host(runtime: tokio::runtime::Handle) {
//! let context = HostContext::new("plugins/DiscordNotify", Arc::new(runtime));
//!
//! let mut plugin = DiscordNotifyPlugin::new();
//! plugin.on_enable(&context);
//!
//! // Called by the host on its own thread
//! plugin.on_player_join("Alice");
//!
//! plugin.on_disable();
//! # }
//! ```
//!
//! # Configuration
//!
//! On first enable the plugin writes `config.yml` into its data folder:
//!
//! - `discord-notify.webhook`: Discord webhook URL (must be changed from the default)
//! - `discord-notify.events`: any of `player-join`, `player-quit`
//!
//! # Architecture
//!
//! - [`Settings`] is resolved once from the config file
//! - [`NotificationRelay`] filters callbacks against the subscribed events
//! - [`Dispatch`] hands messages to the host's [`TaskScheduler`]
//! - [`NotifyChannel`] performs delivery; [`DiscordChannel`] posts to the webhook

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod host;
pub mod plugin;
pub mod relay;

pub use channels::discord::DiscordChannel;
pub use channels::NotifyChannel;
pub use config::{ConfigFile, NotifySection, PluginConfig, Settings, DEFAULT_WEBHOOK};
pub use dispatch::{deliver, ChannelDispatcher, Dispatch};
pub use error::{ChannelError, ConfigError, WebhookError};
pub use events::{DiscordEvent, Message, PlayerEvent, UnknownEvent};
pub use host::{HostContext, PlayerListener, Plugin, TaskScheduler};
pub use plugin::DiscordNotifyPlugin;
pub use relay::NotificationRelay;
