//! Manifest file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_manifest, ConfigError};
use crate::config::schema::Manifest;

/// Watches a manifest file and reloads it on change.
pub struct ManifestWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<Result<Manifest, ConfigError>>,
}

impl ManifestWatcher {
    /// Returns the watcher and a receiver for reload results.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Result<Manifest, ConfigError>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. Reloads stop when the returned watcher is dropped.
    ///
    /// Every reload, successful or not, is forwarded to the receiver.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = ?path, "Manifest change detected, reloading");
                    let result = load_manifest(&path);
                    if let Err(e) = &result {
                        tracing::error!(error = %e, "Failed to reload manifest");
                    }
                    let _ = tx.send(result);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Manifest watcher started");
        Ok(watcher)
    }
}

