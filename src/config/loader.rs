//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::content::RefreshPolicy;
use crate::error::{QuireError, QuireResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::Config;

/// Config file name looked up in the config origin and working directory
pub const CONFIG_FILE_NAME: &str = "quire.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> QuireResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| QuireError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config file and apply environment overrides
///
/// Lookup order: explicit path, `$QUIRE_CONFIG_PATH/quire.toml`,
/// `./quire.toml`, `~/.config/quire/config.toml`, built-in defaults.
/// An explicit path that doesn't exist is an error; the others are optional.
pub fn load_or_default(explicit: Option<&Path>) -> QuireResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        let (config, warnings) = load_with_warnings(path)?;
        return Ok((with_env_overrides(config), warnings));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(origin) = std::env::var_os("QUIRE_CONFIG_PATH") {
        candidates.push(PathBuf::from(origin).join(CONFIG_FILE_NAME));
    }
    candidates.push(PathBuf::from(CONFIG_FILE_NAME));
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("quire").join("config.toml"));
    }

    for candidate in candidates {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (QUIRE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_source(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable source (for testing)
pub fn with_env_source<F>(mut config: Config, var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    if let Some(path) = non_empty("QUIRE_CONTENT_PATH") {
        config.content.origin = Some(PathBuf::from(path));
    }
    if let Some(path) = non_empty("QUIRE_CONFIG_PATH") {
        config.site.origin = Some(PathBuf::from(path));
    }
    if let Some(path) = non_empty("QUIRE_DATA_PATH") {
        config.storage.root = PathBuf::from(path);
    }
    if let Some(path) = non_empty("QUIRE_ICONS_PATH") {
        config.site.icons = Some(PathBuf::from(path));
    }
    if let Some(path) = non_empty("QUIRE_STATIC_PATH") {
        config.site.static_root = Some(PathBuf::from(path));
    }

    if let Some(raw) = non_empty("QUIRE_REFRESH") {
        let validator = EnvVarValidator::new("QUIRE_REFRESH", RefreshPolicy::VALUES);
        config.content.refresh = validator.parse(&raw, RefreshPolicy::parse, config.content.refresh);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "storage",
        "root",
        "content",
        "origin",
        "extension",
        "refresh",
        "site",
        "manifest",
        "navigation",
        "static_root",
        "icons",
        "http",
        "timeout_secs",
        "sync",
        "name",
        "source",
        "destination",
        "pattern",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}
