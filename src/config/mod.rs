//! Configuration module for Quire
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (QUIRE_*)
//! 3. Config file (`quire.toml` in the config origin or working directory)
//! 4. User config (~/.config/quire/config.toml)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{with_env_overrides, with_env_source, ConfigWarning, CONFIG_FILE_NAME};
pub use types::{
    Config, ContentConfig, HttpConfig, SiteConfig, StorageConfig, SyncRuleConfig, CONFIG_RULE,
    CONTENT_RULE, DEFAULT_STORE_ROOT,
};
