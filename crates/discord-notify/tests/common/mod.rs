//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};
use wiremock::MockServer;

/// A log line captured from `tracing`.
#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub text: String,
}

/// Records every event emitted while its guard is alive on this thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    lines: Arc<Mutex<Vec<Captured>>>,
}

impl LogCapture {
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = Registry::default().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::WARN)
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|line| line.level == level)
            .map(|line| line.text.clone())
            .collect()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at(level).iter().any(|line| line.contains(needle))
    }

    /// Poll until a line at `level` contains `needle`.
    pub async fn wait_for(&self, level: Level, needle: &str) -> bool {
        for _ in 0..100 {
            if self.contains(level, needle) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldsVisitor(String::new());
        event.record(&mut visitor);
        self.lines.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            text: visitor.0,
        });
    }
}

struct FieldsVisitor(String);

impl Visit for FieldsVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{value:?} ");
        } else {
            let _ = write!(self.0, "{}={value:?} ", field.name());
        }
    }
}

/// Poll until the server has seen `count` requests.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
    for _ in 0..100 {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= count {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default()
}
