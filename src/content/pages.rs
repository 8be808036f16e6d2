//! Markdown page cache

use std::cmp::Reverse;
use std::path::PathBuf;

use crate::models::{Content, ContentStamp};
use crate::parser::parse_content;

use super::{ContentCache, LoadReport, RefreshPolicy};

/// Page cache over one or more mirrored content directories
pub struct PagesManager {
    cache: ContentCache<Content>,
}

impl PagesManager {
    /// Pages with the given extension (without the dot) under `roots`
    pub fn new(roots: Vec<PathBuf>, extension: &str) -> Self {
        Self {
            cache: ContentCache::new(roots, extension, parse_content),
        }
    }

    pub fn with_policy(self, policy: RefreshPolicy) -> Self {
        Self {
            cache: self.cache.with_policy(policy),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        self.cache.roots()
    }

    pub fn load(&self) -> LoadReport {
        let report = self.cache.load();
        tracing::info!(loaded = report.loaded, failed = report.failed.len(), "pages loaded");
        report
    }

    pub fn refresh(&self) -> LoadReport {
        let report = self.cache.refresh();
        tracing::info!(
            loaded = report.loaded,
            failed = report.failed.len(),
            policy = ?self.cache.policy(),
            "pages refreshed"
        );
        report
    }

    pub fn get(&self, slug: &str) -> Option<Content> {
        self.cache.get(slug).map(|stamp| stamp.content)
    }

    pub fn stamp(&self, slug: &str) -> Option<ContentStamp<Content>> {
        self.cache.get(slug)
    }

    pub fn slugs(&self) -> Vec<String> {
        self.cache.slugs()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Every cached page, newest first, undated pages last (by slug)
    pub fn all(&self) -> Vec<Content> {
        let mut pages: Vec<Content> = self
            .cache
            .values()
            .into_iter()
            .map(|stamp| stamp.content)
            .collect();
        pages.sort_by(|a, b| {
            let key = |c: &Content| (c.published_at.is_none(), Reverse(c.published_at));
            key(a).cmp(&key(b)).then_with(|| a.slug.cmp(&b.slug))
        });
        pages
    }

    /// Non-draft pages, newest first
    pub fn published(&self) -> Vec<Content> {
        self.all().into_iter().filter(Content::is_published).collect()
    }

    /// Non-draft pages flagged `feature`, newest first
    pub fn featured(&self) -> Vec<Content> {
        self.published().into_iter().filter(|c| c.feature).collect()
    }

    pub fn drafts(&self) -> Vec<Content> {
        self.all().into_iter().filter(|c| c.draft).collect()
    }
}
