//! Core data models for Quire
//!
//! Defines the fundamental data structures used throughout Quire:
//! - `PageFrontmatter`: YAML metadata extracted from content files
//! - `Content`: A parsed page with frontmatter fields and body
//! - `ContentStamp`: A parsed record plus the time it was (re)loaded

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An image referenced by name from a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// YAML frontmatter extracted from page files
///
/// Only `title` is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageFrontmatter {
    /// Page title (REQUIRED)
    pub title: String,

    /// Show the page in featured listings
    #[serde(default)]
    pub feature: bool,

    /// Drafts are loaded but left out of published listings
    #[serde(default)]
    pub draft: bool,

    /// Publication time; accepts RFC 3339 or a bare `YYYY-MM-DD`
    #[serde(
        default,
        alias = "date",
        alias = "publishedAt",
        deserialize_with = "deserialize_published_at"
    )]
    pub published_at: Option<DateTime<Utc>>,

    /// Explicit summary; derived from the body when absent
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub images: BTreeMap<String, Image>,
}

fn deserialize_published_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_published_at(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", s))),
    }
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC)
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A page's canonical in-memory form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub title: String,
    pub feature: bool,
    pub draft: bool,
    /// Source file the page was parsed from
    pub path: Option<PathBuf>,
    /// Derived from the file stem, or the parent folder for `index` files
    pub slug: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub body: String,
    pub summary: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, Image>,
}

impl Content {
    /// Build a page record from decoded frontmatter and body text
    pub fn from_frontmatter(
        frontmatter: PageFrontmatter,
        body: impl Into<String>,
        path: impl Into<PathBuf>,
        slug: impl Into<String>,
    ) -> Self {
        let body = body.into();
        let summary = frontmatter
            .summary
            .unwrap_or_else(|| derive_summary(&body));
        Self {
            title: frontmatter.title,
            feature: frontmatter.feature,
            draft: frontmatter.draft,
            path: Some(path.into()),
            slug: Some(slug.into()),
            published_at: frontmatter.published_at,
            body,
            summary,
            images: frontmatter.images,
        }
    }

    /// True for non-draft pages
    pub fn is_published(&self) -> bool {
        !self.draft
    }
}

/// First paragraph of the body that isn't a heading
pub fn derive_summary(body: &str) -> String {
    body.split("\n\n")
        .map(str::trim)
        .find(|para| !para.is_empty() && !para.starts_with('#'))
        .map(|para| para.lines().map(str::trim).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// A parsed record wrapped with the time it was last (re)loaded
///
/// `refresh_date` is informational only; nothing checks it before reuse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentStamp<T> {
    pub content: T,
    pub refresh_date: Option<DateTime<Utc>>,
}

impl<T> ContentStamp<T> {
    /// Stamp a record with the current time
    pub fn now(content: T) -> Self {
        Self {
            content,
            refresh_date: Some(Utc::now()),
        }
    }

    /// Wrap a record without a refresh time
    pub fn unstamped(content: T) -> Self {
        Self {
            content,
            refresh_date: None,
        }
    }
}
