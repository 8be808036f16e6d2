//! Sync rules, live watches and subscriber notifications

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use notify::RecommendedWatcher;

use crate::error::QuireResult;
use crate::fs::ensure_contained;

use super::mirror::MirrorReport;

/// Declarative source → destination mirroring relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRule {
    /// Directory to mirror from
    pub source_path: PathBuf,
    /// Destination relative to the store root; defaults to the rule name
    pub destination_path: Option<PathBuf>,
    /// Gitignore-style glob limiting which files are copied
    pub file_pattern: Option<String>,
}

impl SyncRule {
    /// Mirror everything under `source_path` into the store named after the rule
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: None,
            file_pattern: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination_path = Some(destination.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = Some(pattern.into());
        self
    }

    /// Resolve the destination under `store_root`
    pub fn destination_in(&self, store_root: &Path, name: &str) -> QuireResult<PathBuf> {
        let relative = self
            .destination_path
            .as_deref()
            .unwrap_or_else(|| Path::new(name));
        ensure_contained(relative, store_root)?;
        Ok(store_root.join(relative))
    }
}

/// Notification delivered after every completed mirror pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncNotice {
    /// Rule name
    pub rule: String,
    /// Mirror destination
    pub destination: PathBuf,
    /// Pass number for this rule; the initial pass is 0
    pub pass: u64,
    pub report: MirrorReport,
}

/// Receives one notification per mirror pass of a rule
pub trait SyncSubscriber: Send + Sync {
    fn updated(&self, notice: &SyncNotice) -> QuireResult<()>;
}

impl<F> SyncSubscriber for F
where
    F: Fn(&SyncNotice) -> QuireResult<()> + Send + Sync,
{
    fn updated(&self, notice: &SyncNotice) -> QuireResult<()> {
        self(notice)
    }
}

/// Messages consumed by a rule's worker thread
#[derive(Debug)]
pub(crate) enum WatchMessage {
    /// Filesystem activity under the source (paths may be empty)
    Changed(Vec<PathBuf>),
    Stop,
}

/// A registered rule and the live watch bound to it
pub struct SyncWatch {
    pub(crate) rule: SyncRule,
    pub(crate) destination: PathBuf,
    pub(crate) watcher: RecommendedWatcher,
    pub(crate) control: Sender<WatchMessage>,
    pub(crate) worker: JoinHandle<QuireResult<()>>,
}

impl SyncWatch {
    pub fn rule(&self) -> &SyncRule {
        &self.rule
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// False once the worker has exited (stopped or failed)
    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
    }

    /// Close the watcher, stop the worker and wait for it
    ///
    /// A pass already in progress completes first. Returns the worker's
    /// fatal error if it had stopped on one.
    pub fn close(self) -> QuireResult<()> {
        let SyncWatch {
            watcher,
            control,
            worker,
            ..
        } = self;

        drop(watcher);
        // The worker may already be gone after a fatal pass.
        let _ = control.send(WatchMessage::Stop);

        worker
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("sync worker panicked").into()))
    }
}
