//! Event subscription filter.

use std::sync::Arc;

use tracing::debug;

use crate::config::Settings;
use crate::dispatch::Dispatch;
use crate::events::PlayerEvent;
use crate::host::PlayerListener;

/// Forwards subscribed player events to a dispatcher.
///
/// Whether the relay is enabled is fixed at construction: a relay built from
/// settings without a webhook or without subscriptions never dispatches.
pub struct NotificationRelay {
    settings: Settings,
    dispatcher: Option<Arc<dyn Dispatch>>,
}

impl NotificationRelay {
    #[must_use]
    pub fn new(settings: Settings, dispatcher: Option<Arc<dyn Dispatch>>) -> Self {
        Self {
            settings,
            dispatcher,
        }
    }

    /// A relay that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Settings::default(), None)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.settings.enabled() && self.dispatcher.is_some()
    }

    /// Filter one host callback and hand its message off for delivery.
    pub fn handle(&self, event: &PlayerEvent) {
        if !self.settings.enabled() {
            return;
        }
        if !self.settings.is_subscribed(event.kind()) {
            debug!(event = %event.kind(), "Event not subscribed, skipping");
            return;
        }
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.dispatch(event.message());
        }
    }

    /// Release the dispatcher. Later calls, and later events, are no-ops.
    pub fn shutdown(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.close();
        }
    }
}

impl PlayerListener for NotificationRelay {
    fn on_player_join(&self, display_name: &str) {
        self.handle(&PlayerEvent::Joined(display_name.to_string()));
    }

    fn on_player_quit(&self, display_name: &str) {
        self.handle(&PlayerEvent::Quit(display_name.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DiscordEvent, Message};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use url::Url;

    #[derive(Default)]
    struct RecordingDispatch {
        messages: Mutex<Vec<Message>>,
        closes: AtomicUsize,
    }

    impl RecordingDispatch {
        fn contents(&self) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .map(|m| m.content().to_string())
                .collect()
        }
    }

    impl Dispatch for RecordingDispatch {
        fn dispatch(&self, message: Message) {
            self.messages.lock().unwrap().push(message);
        }

        fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn relay(
        webhook: Option<&str>,
        events: &[DiscordEvent],
    ) -> (NotificationRelay, Arc<RecordingDispatch>) {
        let dispatch = Arc::new(RecordingDispatch::default());
        let settings = Settings::new(
            webhook.map(|w| Url::parse(w).unwrap()),
            events.iter().copied(),
        );
        let relay = NotificationRelay::new(settings, Some(dispatch.clone() as Arc<dyn Dispatch>));
        (relay, dispatch)
    }

    const HOOK: &str = "https://discord.com/api/webhooks/123/abc";

    #[test]
    fn test_join_only_subscription() {
        let (relay, dispatch) = relay(Some(HOOK), &[DiscordEvent::PlayerJoin]);
        assert!(relay.enabled());

        relay.on_player_quit("Alice");
        assert!(dispatch.contents().is_empty());

        relay.on_player_join("Alice");
        assert_eq!(dispatch.contents(), vec!["Alice has joined."]);
    }

    #[test]
    fn test_both_subscriptions() {
        let (relay, dispatch) = relay(Some(HOOK), &DiscordEvent::ALL);

        relay.on_player_join("Bob");
        relay.on_player_quit("Bob");
        assert_eq!(dispatch.contents(), vec!["Bob has joined.", "Bob has quit."]);
    }

    #[test]
    fn test_disabled_without_webhook() {
        let (relay, dispatch) = relay(None, &DiscordEvent::ALL);
        assert!(!relay.enabled());

        relay.on_player_join("Alice");
        relay.on_player_quit("Alice");
        assert!(dispatch.contents().is_empty());
    }

    #[test]
    fn test_disabled_without_events() {
        let (relay, dispatch) = relay(Some(HOOK), &[]);
        assert!(!relay.enabled());

        relay.on_player_join("Alice");
        assert!(dispatch.contents().is_empty());
    }

    #[test]
    fn test_disabled_relay_ignores_everything() {
        let mut relay = NotificationRelay::disabled();
        assert!(!relay.enabled());
        relay.on_player_join("Alice");
        relay.shutdown();
    }

    #[test]
    fn test_shutdown_closes_once() {
        let (mut relay, dispatch) = relay(Some(HOOK), &DiscordEvent::ALL);

        relay.shutdown();
        relay.shutdown();
        assert_eq!(dispatch.closes.load(Ordering::SeqCst), 1);
        assert!(!relay.enabled());

        relay.on_player_join("Late");
        assert!(dispatch.contents().is_empty());
    }
}
