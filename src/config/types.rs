//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::RefreshPolicy;
use crate::data::SyncRule;
use crate::error::{QuireError, QuireResult};

use super::loader::{self, ConfigWarning};

/// Default store root, relative to the working directory
pub const DEFAULT_STORE_ROOT: &str = ".quire/data";

/// Rule name used for the content origin mirror
pub const CONTENT_RULE: &str = "content";

/// Rule name used for the site configuration mirror
pub const CONFIG_RULE: &str = "config";

/// Local data store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

fn default_store_root() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_ROOT)
}

/// Content origin and page cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// External directory mirrored into the `content` store
    #[serde(default)]
    pub origin: Option<PathBuf>,

    /// Extension of page files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub refresh: RefreshPolicy,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            origin: None,
            extension: default_extension(),
            refresh: RefreshPolicy::default(),
        }
    }
}

fn default_extension() -> String {
    "md".to_string()
}

/// One `[[sync]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRuleConfig {
    pub name: String,
    pub source: PathBuf,
    #[serde(default)]
    pub destination: Option<PathBuf>,
    #[serde(default)]
    pub pattern: Option<String>,
}

impl SyncRuleConfig {
    pub fn to_rule(&self) -> SyncRule {
        SyncRule {
            source_path: self.source.clone(),
            destination_path: self.destination.clone(),
            file_pattern: self.pattern.clone(),
        }
    }
}

/// Site chrome settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// External site configuration directory (manifest, navigation)
    #[serde(default)]
    pub origin: Option<PathBuf>,

    /// Manifest file name inside the config store
    #[serde(default)]
    pub manifest: Option<String>,

    /// Navigation directory name inside the config store
    #[serde(default)]
    pub navigation: Option<String>,

    /// Directory of static files served with integrity digests
    #[serde(default)]
    pub static_root: Option<PathBuf>,

    /// Directory of application icons
    #[serde(default)]
    pub icons: Option<PathBuf>,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default, rename = "sync")]
    pub sync_rules: Vec<SyncRuleConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> QuireResult<Self> {
        loader::load_with_warnings(path).map(|(config, _warnings)| config)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> QuireResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve from the config origin, working directory, user config, then defaults
    pub fn load_or_default(explicit: Option<&Path>) -> QuireResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Content origin directory, required for the `content` mirror
    pub fn content_origin(&self) -> QuireResult<&Path> {
        self.content.origin.as_deref().ok_or(QuireError::PathNotSet {
            var: "QUIRE_CONTENT_PATH",
            hint: "point it at the directory holding your markdown pages, or set [content] origin in quire.toml",
        })
    }

    /// Site configuration directory, required for the `config` mirror
    pub fn config_origin(&self) -> QuireResult<&Path> {
        self.site.origin.as_deref().ok_or(QuireError::PathNotSet {
            var: "QUIRE_CONFIG_PATH",
            hint: "point it at the directory holding manifest.webmanifest and navigation/",
        })
    }

    /// Root of the local data store
    pub fn data_path(&self) -> QuireResult<&Path> {
        if self.storage.root.as_os_str().is_empty() {
            return Err(QuireError::PathNotSet {
                var: "QUIRE_DATA_PATH",
                hint: "set it to a writable directory, e.g. .quire/data",
            });
        }
        Ok(&self.storage.root)
    }

    /// Application icons directory, required by the icon route
    pub fn icons_path(&self) -> QuireResult<&Path> {
        self.site.icons.as_deref().ok_or(QuireError::PathNotSet {
            var: "QUIRE_ICONS_PATH",
            hint: "point it at the directory holding icon-*.png and favicon.ico",
        })
    }

    /// Static file root for integrity digests; defaults to the working directory
    pub fn static_root(&self) -> PathBuf {
        self.site
            .static_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn manifest_name(&self) -> &str {
        self.site
            .manifest
            .as_deref()
            .unwrap_or("manifest.webmanifest")
    }

    pub fn navigation_name(&self) -> &str {
        self.site.navigation.as_deref().unwrap_or("navigation")
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// All sync rules: explicit `[[sync]]` tables plus the implicit
    /// `content` and `config` mirrors when their origins are known.
    pub fn sync_rules(&self) -> Vec<(String, SyncRule)> {
        let mut rules: Vec<(String, SyncRule)> = self
            .sync_rules
            .iter()
            .map(|r| (r.name.clone(), r.to_rule()))
            .collect();

        let implicit = [
            (CONTENT_RULE, self.content.origin.as_ref()),
            (CONFIG_RULE, self.site.origin.as_ref()),
        ];
        for (name, origin) in implicit {
            if let Some(origin) = origin {
                if !rules.iter().any(|(n, _)| n == name) {
                    rules.push((name.to_string(), SyncRule::new(origin.clone())));
                }
            }
        }

        rules
    }
}
