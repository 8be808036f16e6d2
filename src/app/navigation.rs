//! Navigation sections

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuireError, QuireResult};

/// A navigable link with optional sub-items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, alias = "children", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavigationItem>,
}

/// Named navigation sections such as `primary` and `footer`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub sections: BTreeMap<String, Vec<NavigationItem>>,
}

impl Navigation {
    /// Load every `<section>.json` file directly inside `dir`
    pub fn load(dir: &Path) -> QuireResult<Self> {
        let mut files: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        let mut navigation = Self::default();
        for file in files {
            let Some(section) = section_name(&file) else {
                continue;
            };
            let raw = fs::read_to_string(&file)?;
            let items: Vec<NavigationItem> =
                serde_json::from_str(&raw).map_err(|e| QuireError::InvalidNavigation {
                    file: file.clone(),
                    message: e.to_string(),
                })?;
            navigation.sections.insert(section.to_string(), items);
        }

        Ok(navigation)
    }

    /// Items of `section`; empty when the section is unknown
    pub fn section(&self, section: &str) -> &[NavigationItem] {
        self.sections.get(section).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }
}

fn section_name(file: &Path) -> Option<&str> {
    let is_json = file
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let stem = file.file_stem()?.to_str()?;
    (is_json && !stem.starts_with('.') && !stem.is_empty()).then_some(stem)
}
