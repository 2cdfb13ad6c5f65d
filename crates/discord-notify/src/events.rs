//! Notifiable events and the messages they produce.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Events that can be subscribed to in the `events` config list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiscordEvent {
    /// A player joined the server
    PlayerJoin,
    /// A player left the server
    PlayerQuit,
}

/// Variant <-> config spelling. Lookups go through this table only.
const EVENT_NAMES: &[(DiscordEvent, &str)] = &[
    (DiscordEvent::PlayerJoin, "player-join"),
    (DiscordEvent::PlayerQuit, "player-quit"),
];

impl DiscordEvent {
    /// Every event, in declaration order.
    pub const ALL: [Self; 2] = [Self::PlayerJoin, Self::PlayerQuit];

    /// Canonical config spelling, e.g. `player-join`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        EVENT_NAMES
            .iter()
            .find(|(event, _)| *event == self)
            .map_or("", |(_, name)| *name)
    }
}

impl fmt::Display for DiscordEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured event name that matches no [`DiscordEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown event \"{0}\"")]
pub struct UnknownEvent(pub String);

impl FromStr for DiscordEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EVENT_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(event, _)| *event)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// A lifecycle callback delivered by the host, carrying the player's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Joined(String),
    Quit(String),
}

impl PlayerEvent {
    /// The subscription this callback falls under.
    #[must_use]
    pub const fn kind(&self) -> DiscordEvent {
        match self {
            Self::Joined(_) => DiscordEvent::PlayerJoin,
            Self::Quit(_) => DiscordEvent::PlayerQuit,
        }
    }

    /// Human-readable notification text for this callback.
    #[must_use]
    pub fn message(&self) -> Message {
        match self {
            Self::Joined(name) => Message::new(format!("{name} has joined.")),
            Self::Quit(name) => Message::new(format!("{name} has quit.")),
        }
    }
}

/// A single outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    content: String,
}

impl Message {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Body for the Discord execute-webhook endpoint.
    ///
    /// Mention parsing is always disabled so player names such as
    /// `@everyone` cannot ping the channel.
    #[must_use]
    pub fn payload(&self) -> WebhookPayload<'_> {
        WebhookPayload {
            content: &self.content,
            allowed_mentions: AllowedMentions { parse: Vec::new() },
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

// =============================================================================
// Discord API types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    content: &'a str,
    allowed_mentions: AllowedMentions,
}

#[derive(Debug, Serialize)]
struct AllowedMentions {
    parse: Vec<&'static str>,
}
