//! Font cache

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::QuireResult;

use super::fetch::Fetcher;
use super::hash::ContentHash;
use super::stamp::CacheStamp;

/// A font file and its digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResource {
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    pub content: Vec<u8>,
    pub hash: ContentHash,
}

impl FontResource {
    fn new(content: Vec<u8>) -> Self {
        let hash = ContentHash::of(&content);
        Self {
            url: None,
            path: None,
            content,
            hash,
        }
    }

    /// Content type guessed from the path or URL
    pub fn content_type(&self) -> Option<String> {
        let name = self
            .path
            .as_deref()
            .and_then(|p| p.to_str())
            .or(self.url.as_deref())?;
        mime_guess::from_path(name).first_raw().map(str::to_string)
    }
}

/// Append-only list of fonts, in insertion order
pub struct FontsCache {
    fetcher: Arc<dyn Fetcher>,
    fonts: Vec<CacheStamp<FontResource>>,
}

impl FontsCache {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            fonts: Vec::new(),
        }
    }

    pub fn append_content(&mut self, content: Vec<u8>) -> &FontResource {
        self.push(FontResource::new(content))
    }

    pub fn append_file(&mut self, path: &Path) -> QuireResult<&FontResource> {
        let mut font = FontResource::new(fs::read(path)?);
        font.path = Some(path.to_path_buf());
        Ok(self.push(font))
    }

    pub fn append_url(&mut self, url: &str) -> QuireResult<&FontResource> {
        let mut font = FontResource::new(self.fetcher.fetch_bytes(url)?);
        font.url = Some(url.to_string());
        Ok(self.push(font))
    }

    pub fn fonts(&self) -> &[CacheStamp<FontResource>] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn push(&mut self, font: FontResource) -> &FontResource {
        let stamp = CacheStamp::new(font);
        let hash = stamp.value.hash.hex();
        self.fonts.push(stamp.with_hash(hash));
        let last = self.fonts.len() - 1;
        &self.fonts[last].value
    }
}
