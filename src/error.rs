//! Error types for Quire
//!
//! Library code returns [`QuireResult`]; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Quire operations
pub type QuireResult<T> = Result<T, QuireError>;

/// Main error type for Quire operations
#[derive(Error, Debug)]
pub enum QuireError {
    /// A required path setting has no value
    #[error("{var} is not set - {hint}")]
    PathNotSet { var: &'static str, hint: &'static str },

    /// Config file could not be decoded
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Invalid frontmatter YAML
    #[error("invalid frontmatter in {file}: {message}")]
    InvalidFrontmatter { file: PathBuf, message: String },

    /// No frontmatter found (missing `---` delimiters)
    #[error("no frontmatter found in {file} - file must start with '---'")]
    NoFrontmatter { file: PathBuf },

    /// Frontmatter not properly closed
    #[error("unclosed frontmatter in {file} - missing closing '---'")]
    UnclosedFrontmatter { file: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem watcher could not be set up
    #[error("watch error on {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A sync rule with this name is already active
    #[error("sync rule '{name}' is already registered")]
    SyncRuleExists { name: String },

    /// Invalid glob in a sync rule
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Web manifest failed schema decoding
    #[error("invalid web manifest {file}: {message}")]
    InvalidManifest { file: PathBuf, message: String },

    /// Navigation section failed schema decoding
    #[error("invalid navigation section {file}: {message}")]
    InvalidNavigation { file: PathBuf, message: String },

    /// SVG markup could not be read
    #[error("invalid SVG in {source_name}: {message}")]
    InvalidSvg { source_name: String, message: String },

    /// Network fetch failed
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Icon file name does not match the icon route
    #[error("unrecognized icon request '{name}'")]
    UnknownIcon { name: String },

    /// Path escapes its root directory
    #[error("path '{path}' escapes root '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },
}

impl QuireError {
    /// Short remediation hint shown to operators, if one applies
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            QuireError::PathNotSet { hint, .. } => Some(hint),
            QuireError::NoFrontmatter { .. } => {
                Some("Add frontmatter at the top:\n  ---\n  title: \"Page title\"\n  ---")
            }
            QuireError::UnclosedFrontmatter { .. } => {
                Some("Add a closing '---' line after the YAML frontmatter.")
            }
            QuireError::SyncRuleExists { .. } => {
                Some("Remove the existing rule first or pick a different name.")
            }
            _ => None,
        }
    }

    /// True when the underlying IO error is `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuireError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
