//! Stylesheet cache

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::QuireResult;

use super::fetch::Fetcher;
use super::hash::ContentHash;
use super::stamp::CacheStamp;

/// A stylesheet and its digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    pub content: String,
    pub hash: ContentHash,
}

impl Stylesheet {
    fn new(content: String) -> Self {
        let hash = ContentHash::of(content.as_bytes());
        Self {
            url: None,
            path: None,
            content,
            hash,
        }
    }
}

/// Append-only list of stylesheets, in insertion order
pub struct StylesCache {
    fetcher: Arc<dyn Fetcher>,
    stylesheets: Vec<CacheStamp<Stylesheet>>,
}

impl StylesCache {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            stylesheets: Vec::new(),
        }
    }

    pub fn append_content(&mut self, content: impl Into<String>) -> &Stylesheet {
        self.push(Stylesheet::new(content.into()))
    }

    pub fn append_file(&mut self, path: &Path) -> QuireResult<&Stylesheet> {
        let mut sheet = Stylesheet::new(fs::read_to_string(path)?);
        sheet.path = Some(path.to_path_buf());
        Ok(self.push(sheet))
    }

    pub fn append_url(&mut self, url: &str) -> QuireResult<&Stylesheet> {
        let mut sheet = Stylesheet::new(self.fetcher.fetch_text(url)?);
        sheet.url = Some(url.to_string());
        Ok(self.push(sheet))
    }

    pub fn stylesheets(&self) -> &[CacheStamp<Stylesheet>] {
        &self.stylesheets
    }

    pub fn len(&self) -> usize {
        self.stylesheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stylesheets.is_empty()
    }

    fn push(&mut self, sheet: Stylesheet) -> &Stylesheet {
        let stamp = CacheStamp::new(sheet);
        let hash = stamp.value.hash.hex();
        self.stylesheets.push(stamp.with_hash(hash));
        let last = self.stylesheets.len() - 1;
        &self.stylesheets[last].value
    }
}
