//! Web manifest loading
//!
//! A manifest location is either a single `.webmanifest` file or a
//! directory of `<name>[.<language>].webmanifest` files, one per language.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuireError, QuireResult};

const MANIFEST_EXTENSION: &str = "webmanifest";

/// Display mode requested by the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Fullscreen,
    Standalone,
    MinimalUi,
    Browser,
}

/// One entry of the manifest `icons` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ManifestIcon {
    /// First `WxH` entry of `sizes`
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.sizes
            .as_deref()?
            .split_whitespace()
            .find_map(|size| {
                let (w, h) = size.split_once(|c: char| c == 'x' || c == 'X')?;
                Some((w.parse().ok()?, h.parse().ok()?))
            })
    }

    /// An icon without a purpose counts as `any`
    pub fn has_purpose(&self, purpose: &str) -> bool {
        match self.purpose.as_deref() {
            None => purpose == "any",
            Some(list) => list.split_whitespace().any(|p| p == purpose),
        }
    }
}

/// The main application logo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationLogo {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Decoded web manifest; only `name` is required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    pub fn from_json(raw: &str, file: &Path) -> QuireResult<Self> {
        let invalid = |message: String| QuireError::InvalidManifest {
            file: file.to_path_buf(),
            message,
        };

        let manifest: WebManifest = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        if manifest.name.trim().is_empty() {
            return Err(invalid("`name` must not be empty".to_string()));
        }
        Ok(manifest)
    }

    pub fn load(file: &Path) -> QuireResult<Self> {
        let raw = fs::read_to_string(file)?;
        Self::from_json(&raw, file)
    }

    /// First icon usable for any purpose, else the first icon
    pub fn logo(&self) -> Option<ApplicationLogo> {
        let icon = self
            .icons
            .iter()
            .find(|icon| icon.has_purpose("any"))
            .or_else(|| self.icons.first())?;
        let dimensions = icon.dimensions();
        Some(ApplicationLogo {
            href: icon.src.clone(),
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
        })
    }
}

/// Manifests keyed by language; the empty key is the default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifests {
    by_language: BTreeMap<String, WebManifest>,
}

impl Manifests {
    /// Load a single manifest file or a directory of them
    pub fn load(path: &Path) -> QuireResult<Self> {
        let mut manifests = Self::default();

        if !path.is_dir() {
            manifests
                .by_language
                .insert(String::new(), WebManifest::load(path)?);
            return Ok(manifests);
        }

        let mut files: Vec<_> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        for file in files {
            let Some(language) = file
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(manifest_language)
            else {
                continue;
            };
            let manifest = WebManifest::load(&file)?;
            tracing::debug!(file = %file.display(), language, "manifest loaded");
            manifests.by_language.insert(language.to_string(), manifest);
        }

        Ok(manifests)
    }

    /// Manifest for `language`, falling back to the default
    pub fn get(&self, language: Option<&str>) -> Option<&WebManifest> {
        language
            .and_then(|lang| self.by_language.get(lang))
            .or_else(|| self.by_language.get(""))
    }

    pub fn default_manifest(&self) -> Option<&WebManifest> {
        self.get(None)
    }

    /// Languages with a dedicated manifest
    pub fn languages(&self) -> Vec<&str> {
        self.by_language
            .keys()
            .filter(|k| !k.is_empty())
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty()
    }
}

/// Language key of a manifest file name; `""` for the default manifest
fn manifest_language(file_name: &str) -> Option<&str> {
    if file_name.starts_with('.') {
        return None;
    }
    let stem = file_name.strip_suffix(MANIFEST_EXTENSION)?.strip_suffix('.')?;
    match stem.split_once('.') {
        Some((_, language)) => Some(language),
        None => Some(""),
    }
}
