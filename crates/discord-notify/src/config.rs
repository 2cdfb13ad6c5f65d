//! Plugin configuration: the YAML file on disk and the settings resolved from it.
//!
//! The file lives in the plugin's data folder and looks like:
//!
//! ```yaml
//! discord-notify:
//!   webhook: https://discord.com/api/webhooks/<id>/<token>
//!   events:
//!     - player-join
//!     - player-quit
//! ```
//!
//! Resolution never fails. Every problem is logged at warn and degrades the
//! relay to a narrower (possibly disabled) state instead.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, WebhookError};
use crate::events::DiscordEvent;

/// Name of the config file inside the plugin data folder.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Top-level key owning this plugin's settings.
pub const SECTION: &str = "discord-notify";

/// Placeholder shipped in the default config. A webhook equal to this was never configured.
pub const DEFAULT_WEBHOOK: &str =
    "https://discord.com/api/webhooks/000000000000000000/your-webhook-token";

fn default_webhook() -> Option<String> {
    Some(DEFAULT_WEBHOOK.to_string())
}

fn default_events() -> Vec<String> {
    DiscordEvent::ALL
        .iter()
        .map(|event| event.as_str().to_string())
        .collect()
}

/// The `discord-notify` section as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifySection {
    /// Discord webhook URL; `null` means not set.
    #[serde(default = "default_webhook")]
    pub webhook: Option<String>,

    /// Event names to forward, e.g. `player-join`.
    #[serde(default = "default_events")]
    pub events: Vec<String>,
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            webhook: default_webhook(),
            events: default_events(),
        }
    }
}

/// Whole config document. Sections owned by other tools are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(rename = "discord-notify", default)]
    pub discord_notify: NotifySection,

    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

/// A config document bound to its path on disk.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    config: PluginConfig,
}

impl ConfigFile {
    /// Load the config at `path`, creating it from defaults when absent.
    ///
    /// Keys missing from an existing file are filled from the defaults and the
    /// file is written back. A complete file is never rewritten.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or written.
    pub fn load_or_create(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if !path.exists() {
            let file = Self {
                path,
                config: PluginConfig::default(),
            };
            file.save()?;
            info!(path = %file.path.display(), "Wrote default config");
            return Ok(file);
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let mut raw: serde_yaml::Value =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        // An empty document parses as null
        if raw.is_null() {
            raw = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
        }

        let needs_defaults = !has_all_keys(&raw);

        let config: PluginConfig =
            serde_yaml::from_value(raw).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        let file = Self { path, config };
        if needs_defaults {
            debug!(path = %file.path.display(), "Filling missing config keys from defaults");
            file.save()?;
        }

        Ok(file)
    }

    /// Write the current document to disk, creating parent directories.
    ///
    /// # Errors
    /// Returns [`ConfigError`] on serialization or I/O failure.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_yaml::to_string(&self.config).map_err(ConfigError::Serialize)?;

        std::fs::write(&self.path, contents).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    #[must_use]
    pub fn section(&self) -> &NotifySection {
        &self.config.discord_notify
    }
}

fn has_all_keys(raw: &serde_yaml::Value) -> bool {
    raw.get(SECTION)
        .is_some_and(|section| section.get("webhook").is_some() && section.get("events").is_some())
}

/// Settings resolved once at enable time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    webhook: Option<Url>,
    events: BTreeSet<DiscordEvent>,
}

impl Settings {
    /// Resolve a config section into settings, logging every rejected value.
    ///
    /// `placeholder` is the shipped default webhook; a configured value equal
    /// to it is treated as unconfigured.
    #[must_use]
    pub fn resolve(section: &NotifySection, placeholder: Option<&str>) -> Self {
        let mut events = BTreeSet::new();
        for name in &section.events {
            match name.parse::<DiscordEvent>() {
                Ok(event) => {
                    events.insert(event);
                }
                Err(e) => warn!(event = %name, "{e}"),
            }
        }

        let webhook = match resolve_webhook(section.webhook.as_deref(), placeholder) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("{e}");
                None
            }
        };

        Self { webhook, events }
    }

    /// Build settings directly, bypassing config parsing.
    #[must_use]
    pub fn new(webhook: Option<Url>, events: impl IntoIterator<Item = DiscordEvent>) -> Self {
        Self {
            webhook,
            events: events.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn webhook(&self) -> Option<&Url> {
        self.webhook.as_ref()
    }

    #[must_use]
    pub fn events(&self) -> &BTreeSet<DiscordEvent> {
        &self.events
    }

    #[must_use]
    pub fn is_subscribed(&self, event: DiscordEvent) -> bool {
        self.events.contains(&event)
    }

    /// Delivery happens only with a usable webhook and at least one subscription.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.webhook.is_some() && !self.events.is_empty()
    }

    /// One-line description for the startup log.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::from("webhook=");
        match &self.webhook {
            Some(url) => out.push_str(url.as_str()),
            None => out.push_str("none"),
        }
        let _ = write!(
            out,
            ", events={}",
            self.events
                .iter()
                .map(|event| event.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        out
    }
}

/// Validate a configured webhook, short-circuiting on the first failure.
///
/// # Errors
/// Returns the [`WebhookError`] describing why the value is unusable.
pub fn resolve_webhook(raw: Option<&str>, placeholder: Option<&str>) -> Result<Url, WebhookError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(WebhookError::NotSet),
    };

    if placeholder == Some(raw) {
        return Err(WebhookError::Placeholder);
    }

    let url = Url::parse(raw).map_err(|source| WebhookError::Invalid {
        url: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(WebhookError::Unsupported {
            url: raw.to_string(),
            reason: "scheme must be http or https",
        });
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(WebhookError::Unsupported {
            url: raw.to_string(),
            reason: "missing host",
        });
    }

    Ok(url)
}
