//! Data synchronization
//!
//! [`DataManager`] mirrors external source directories into a local store
//! and keeps each mirror current from filesystem events:
//! - one full mirror pass when a rule is registered
//! - one background worker per rule, re-mirroring on every event
//! - one subscriber notification per completed pass

mod mirror;
mod rule;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{QuireError, QuireResult};
use crate::fs::ensure_contained;

pub use mirror::{mirror_tree, remove_destination, FileFilter, MirrorReport};
pub use rule::{SyncNotice, SyncRule, SyncSubscriber, SyncWatch};

use rule::WatchMessage;

/// Owns the active sync rules and their watches
pub struct DataManager {
    store_root: PathBuf,
    registry: Mutex<Registry>,
}

#[derive(Default)]
struct Registry {
    watches: HashMap<String, SyncWatch>,
    /// Names whose registration is still running its first pass
    reserved: HashSet<String>,
}

impl DataManager {
    /// Create a manager whose stores live under `store_root`
    pub fn new(store_root: impl Into<PathBuf>) -> Self {
        Self {
            store_root: store_root.into(),
            registry: Mutex::new(Registry::default()),
        }
    }

    pub fn store_root(&self) -> &Path {
        &self.store_root
    }

    /// Register a rule, mirror it once, then keep it mirrored in the background
    ///
    /// When this returns, the destination holds a copy of the source and the
    /// subscriber has seen pass 0. Later passes run on the rule's worker.
    /// The registry stays unlocked during the first pass, so the subscriber
    /// may call back into the manager.
    pub fn add_sync_rule(
        &self,
        name: &str,
        rule: SyncRule,
        subscriber: Option<Arc<dyn SyncSubscriber>>,
    ) -> QuireResult<()> {
        ensure_contained(Path::new(name), &self.store_root)?;
        let reservation = self.reserve(name)?;

        let destination = rule.destination_in(&self.store_root, name)?;
        let filter = FileFilter::new(&rule.source_path, rule.file_pattern.as_deref())?;
        if !rule.source_path.is_dir() {
            return Err(QuireError::DirectoryNotFound {
                path: rule.source_path.clone(),
            });
        }

        // Watch before the first pass so edits made during it still arrive.
        let (control, events) = channel();
        let event_tx = control.clone();
        let watch_error = |e: notify::Error| QuireError::Watch {
            path: rule.source_path.clone(),
            message: e.to_string(),
        };
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                // A mirror pass reads every source file; reads change nothing.
                Ok(event) if event.kind.is_access() => {}
                Ok(event) => {
                    let _ = event_tx.send(WatchMessage::Changed(event.paths));
                }
                Err(e) => tracing::warn!(error = %e, "filesystem watch error"),
            },
            notify::Config::default(),
        )
        .map_err(watch_error)?;
        watcher
            .watch(&rule.source_path, RecursiveMode::Recursive)
            .map_err(watch_error)?;

        let mut pass = MirrorPass {
            name: name.to_string(),
            source: rule.source_path.clone(),
            destination: destination.clone(),
            filter,
            subscriber,
            count: 0,
        };
        pass.run()?;

        let worker = thread::Builder::new()
            .name(format!("quire-sync-{name}"))
            .spawn(move || pass.watch_loop(events))?;

        tracing::info!(
            rule = name,
            source = %rule.source_path.display(),
            destination = %destination.display(),
            "sync rule registered"
        );

        self.lock().watches.insert(
            name.to_string(),
            SyncWatch {
                rule,
                destination,
                watcher,
                control,
                worker,
            },
        );
        drop(reservation);
        Ok(())
    }

    /// Stop watching a rule and forget it
    ///
    /// Waits for an in-flight pass to finish; no pass starts afterwards.
    /// Returns `Ok(false)` for unknown names and the worker's fatal error if
    /// it had already stopped on one.
    pub fn remove_sync_rule(&self, name: &str) -> QuireResult<bool> {
        let Some(watch) = self.lock().watches.remove(name) else {
            return Ok(false);
        };
        watch.close()?;
        tracing::info!(rule = name, "sync rule removed");
        Ok(true)
    }

    /// Remove every rule, logging worker failures
    pub fn shutdown(&self) {
        let drained: Vec<(String, SyncWatch)> = self.lock().watches.drain().collect();
        for (name, watch) in drained {
            if let Err(e) = watch.close() {
                tracing::error!(rule = %name, error = %e, "sync worker had failed");
            }
        }
    }

    /// Path of the store named `name`
    pub fn get_store(&self, name: &str) -> PathBuf {
        self.store_root.join(name)
    }

    /// True when the store directory for `name` exists
    pub fn store_exists(&self, name: &str) -> bool {
        self.get_store(name).is_dir()
    }

    /// Registered rule names, sorted
    pub fn rules(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().watches.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn rule(&self, name: &str) -> Option<SyncRule> {
        self.lock().watches.get(name).map(|w| w.rule().clone())
    }

    /// Destination the rule mirrors into
    pub fn destination(&self, name: &str) -> Option<PathBuf> {
        self.lock()
            .watches
            .get(name)
            .map(|w| w.destination().to_path_buf())
    }

    /// False when the rule is unknown or its worker has exited
    pub fn is_running(&self, name: &str) -> bool {
        self.lock()
            .watches
            .get(name)
            .is_some_and(SyncWatch::is_running)
    }

    /// Claim `name` until the returned guard drops
    fn reserve(&self, name: &str) -> QuireResult<Reservation<'_>> {
        let mut registry = self.lock();
        if registry.watches.contains_key(name) || !registry.reserved.insert(name.to_string()) {
            return Err(QuireError::SyncRuleExists {
                name: name.to_string(),
            });
        }
        Ok(Reservation {
            manager: self,
            name: name.to_string(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // A panicking subscriber must not wedge the registry.
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Pending registration; releases the name on drop, including on error
struct Reservation<'a> {
    manager: &'a DataManager,
    name: String,
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.manager.lock().reserved.remove(&self.name);
    }
}

impl Drop for DataManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One mirror pass for a single rule, then the subscriber notification
///
/// Also runs every later pass from the rule's worker thread.
struct MirrorPass {
    name: String,
    source: PathBuf,
    destination: PathBuf,
    filter: FileFilter,
    subscriber: Option<Arc<dyn SyncSubscriber>>,
    count: u64,
}

impl MirrorPass {
    fn run(&mut self) -> QuireResult<()> {
        let _span = tracing::info_span!("mirror", rule = %self.name, pass = self.count).entered();

        let report = mirror_tree(&self.source, &self.destination, &self.filter)?;
        tracing::info!(files = report.files, bytes = report.bytes, "mirror pass complete");

        if let Some(subscriber) = &self.subscriber {
            let notice = SyncNotice {
                rule: self.name.clone(),
                destination: self.destination.clone(),
                pass: self.count,
                report,
            };
            if let Err(e) = subscriber.updated(&notice) {
                tracing::warn!(error = %e, "sync subscriber failed");
            }
        }

        self.count += 1;
        Ok(())
    }

    fn watch_loop(mut self, events: Receiver<WatchMessage>) -> QuireResult<()> {
        while let Ok(message) = events.recv() {
            let WatchMessage::Changed(mut paths) = message else {
                break;
            };

            // Everything already queued is covered by the same full pass.
            loop {
                match events.try_recv() {
                    Ok(WatchMessage::Changed(more)) => paths.extend(more),
                    Ok(WatchMessage::Stop) => return Ok(()),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return Ok(()),
                }
            }

            tracing::debug!(rule = %self.name, changed = paths.len(), "source changed");
            if let Err(e) = self.run() {
                tracing::error!(rule = %self.name, error = %e, "mirror pass failed, stopping watch");
                return Err(e);
            }
        }

        tracing::debug!(rule = %self.name, passes = self.count, "sync worker stopped");
        Ok(())
    }
}
