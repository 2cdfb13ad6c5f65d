//! Error types for the notification relay.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when delivering a message over a channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook answered with a non-2xx status
    #[error("webhook returned status {status}")]
    Status { status: reqwest::StatusCode },

    /// The channel's HTTP client has already been released
    #[error("channel is closed")]
    Closed,
}

/// Reasons a configured webhook string is rejected.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Discord webhook not set")]
    NotSet,

    #[error("Discord webhook URL must be set to something other than the default")]
    Placeholder,

    #[error("Discord webhook URL invalid: \"{url}\": {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Discord webhook URL invalid: \"{url}\": {reason}")]
    Unsupported { url: String, reason: &'static str },
}

/// Errors reading or writing the plugin's configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),
}
