//! Boundary between this plugin and the game server hosting it.
//!
//! The host owns the process, the event loop, and the plugin lifecycle. It
//! hands the plugin a [`HostContext`] at enable time and delivers player
//! callbacks through [`PlayerListener`] on its own thread.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;

/// A unit of background work handed to the host.
pub type Task = BoxFuture<'static, ()>;

/// The host's asynchronous task facility.
///
/// `run_async` must return without waiting for `task` to make progress.
pub trait TaskScheduler: Send + Sync {
    fn run_async(&self, task: Task);
}

impl TaskScheduler for tokio::runtime::Handle {
    fn run_async(&self, task: Task) {
        // Detached; the join handle is not needed.
        drop(self.spawn(task));
    }
}

/// Player lifecycle callbacks consumed from the host.
pub trait PlayerListener {
    fn on_player_join(&self, display_name: &str);
    fn on_player_quit(&self, display_name: &str);
}

/// Lifecycle hooks a host drives.
pub trait Plugin {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Called once when the host loads the plugin.
    fn on_enable(&mut self, context: &HostContext);

    /// Called once when the host unloads the plugin.
    fn on_disable(&mut self);
}

/// Services the host exposes to an enabling plugin.
#[derive(Clone)]
pub struct HostContext {
    data_folder: PathBuf,
    scheduler: Arc<dyn TaskScheduler>,
}

impl HostContext {
    pub fn new(data_folder: impl Into<PathBuf>, scheduler: Arc<dyn TaskScheduler>) -> Self {
        Self {
            data_folder: data_folder.into(),
            scheduler,
        }
    }

    /// Directory where the plugin keeps its config file.
    #[must_use]
    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    #[must_use]
    pub fn scheduler(&self) -> Arc<dyn TaskScheduler> {
        Arc::clone(&self.scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_tokio_handle_runs_task() {
        let ran = Arc::new(AtomicBool::new(false));
        let (tx, rx) = tokio::sync::oneshot::channel();

        let flag = Arc::clone(&ran);
        tokio::runtime::Handle::current().run_async(Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
            let _ = tx.send(());
        }));

        rx.await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }
}
