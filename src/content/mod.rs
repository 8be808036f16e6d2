//! Content caches
//!
//! [`ContentCache`] scans a set of root directories, parses every content
//! file with a caller-supplied function and keeps the results keyed by slug.
//! [`PagesManager`] is the markdown page specialization.

mod pages;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::QuireResult;
use crate::models::{Content, ContentStamp};

pub use pages::PagesManager;

/// Records that can live in a [`ContentCache`]
pub trait ContentRecord {
    /// Cache key; records without one are skipped
    fn slug(&self) -> Option<&str>;
}

impl ContentRecord for Content {
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

/// What `refresh()` does with entries whose files disappeared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Build a fresh map and swap it in; deleted files drop out
    #[default]
    Rebuild,
    /// Merge into the existing map; deleted files stay cached
    Union,
}

impl RefreshPolicy {
    pub const VALUES: &'static [&'static str] = &["rebuild", "union"];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "rebuild" => Some(Self::Rebuild),
            "union" => Some(Self::Union),
            _ => None,
        }
    }
}

/// Outcome of a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records parsed and cached
    pub loaded: usize,
    /// Files that failed to parse
    pub failed: Vec<PathBuf>,
}

type ParseFn<T> = dyn Fn(&Path) -> QuireResult<ContentStamp<T>> + Send + Sync;

/// Directory-scanning cache parameterized by a parse function
pub struct ContentCache<T> {
    roots: Vec<PathBuf>,
    extension: String,
    policy: RefreshPolicy,
    parse: Box<ParseFn<T>>,
    entries: RwLock<HashMap<String, ContentStamp<T>>>,
}

impl<T: ContentRecord + Clone> ContentCache<T> {
    pub fn new<F>(roots: Vec<PathBuf>, extension: impl Into<String>, parse: F) -> Self
    where
        F: Fn(&Path) -> QuireResult<ContentStamp<T>> + Send + Sync + 'static,
    {
        Self {
            roots,
            extension: extension.into(),
            policy: RefreshPolicy::default(),
            parse: Box::new(parse),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Scan every root and merge the results into the cache
    ///
    /// Existing entries are kept; a record whose slug is already cached
    /// replaces the old one.
    pub fn load(&self) -> LoadReport {
        let (scanned, report) = self.scan();
        let mut entries = self.write();
        for (slug, stamp) in scanned {
            entries.insert(slug, stamp);
        }
        report
    }

    /// Rescan according to the refresh policy
    pub fn refresh(&self) -> LoadReport {
        match self.policy {
            RefreshPolicy::Union => self.load(),
            RefreshPolicy::Rebuild => {
                let (scanned, report) = self.scan();
                *self.write() = scanned;
                report
            }
        }
    }

    pub fn get(&self, slug: &str) -> Option<ContentStamp<T>> {
        self.read().get(slug).cloned()
    }

    /// Cached slugs, sorted
    pub fn slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = self.read().keys().cloned().collect();
        slugs.sort();
        slugs
    }

    pub fn values(&self) -> Vec<ContentStamp<T>> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn scan(&self) -> (HashMap<String, ContentStamp<T>>, LoadReport) {
        let mut scanned = HashMap::new();
        let mut report = LoadReport::default();

        for root in &self.roots {
            let _span = tracing::debug_span!("scan", root = %root.display()).entered();
            let (files, dirs) = match self.list(root) {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::warn!(error = %e, "cannot read content root");
                    continue;
                }
            };

            self.parse_files(&files, &mut scanned, &mut report);

            // One level of nesting only: `blog-post/index.md`, not deeper.
            for dir in dirs {
                match self.list(&dir) {
                    Ok((nested, _)) => self.parse_files(&nested, &mut scanned, &mut report),
                    Err(e) => {
                        tracing::warn!(dir = %dir.display(), error = %e, "cannot read content folder")
                    }
                }
            }
        }

        (scanned, report)
    }

    fn parse_files(
        &self,
        files: &[PathBuf],
        scanned: &mut HashMap<String, ContentStamp<T>>,
        report: &mut LoadReport,
    ) {
        for file in files {
            match (self.parse)(file) {
                Ok(stamp) => {
                    let Some(slug) = stamp.content.slug().map(str::to_string) else {
                        tracing::warn!(file = %file.display(), "record has no slug, skipped");
                        report.failed.push(file.clone());
                        continue;
                    };
                    if scanned.insert(slug.clone(), stamp).is_some() {
                        tracing::debug!(%slug, file = %file.display(), "slug overwritten");
                    }
                    report.loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "skipping content file");
                    report.failed.push(file.clone());
                }
            }
        }
    }

    /// Matching files and visible subdirectories of `dir`, each sorted
    fn list(&self, dir: &Path) -> QuireResult<(Vec<PathBuf>, Vec<PathBuf>)> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                let hidden = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'));
                if !hidden {
                    dirs.push(path);
                }
            } else if path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(self.extension.as_str()))
            {
                files.push(path);
            }
        }

        files.sort();
        dirs.sort();
        Ok((files, dirs))
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ContentStamp<T>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ContentStamp<T>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
