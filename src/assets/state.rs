//! Integrity digests for static files

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::QuireResult;
use crate::fs::resolve_within;

use super::hash::ContentHash;

type Slot = Arc<Mutex<Option<ContentHash>>>;

/// Memoised digests of files under a static root
///
/// Each path has its own slot. The first caller for a path holds the slot
/// while hashing; concurrent callers for the same path wait on it and then
/// read the stored digest. Different paths hash in parallel.
#[derive(Debug)]
pub struct AssetState {
    root: PathBuf,
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl AssetState {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Hex digest of `path` (relative to the static root)
    pub fn integrity(&self, path: &Path) -> QuireResult<String> {
        Ok(self.digest(path)?.hex())
    }

    /// Digest of `path`, computed at most once per path
    ///
    /// Read errors are returned to every waiting caller in turn and are not
    /// memoised, so a later call retries.
    pub fn digest(&self, path: &Path) -> QuireResult<ContentHash> {
        let file = resolve_within(&self.root, path)?;
        let slot = self.slot(path);
        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(hash) = *guard {
            return Ok(hash);
        }

        let bytes = fs::read(&file)?;
        let hash = ContentHash::of(&bytes);
        tracing::debug!(path = %path.display(), %hash, "asset hashed");
        *guard = Some(hash);
        Ok(hash)
    }

    /// Already-computed digest, without blocking or reading the file
    pub fn cached(&self, path: &Path) -> Option<ContentHash> {
        let slot = self.lock().get(path).cloned()?;
        let guard = slot.try_lock().ok()?;
        *guard
    }

    /// Number of paths with a slot (computed or in flight)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn slot(&self, path: &Path) -> Slot {
        self.lock().entry(path.to_path_buf()).or_default().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}
