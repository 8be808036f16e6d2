//! Quire - content runtime for small sites
//!
//! Quire mirrors external source directories into a local data store,
//! keeps the mirrors current from filesystem events, parses the mirrored
//! markdown into an in-memory page cache and maintains content-addressed
//! asset caches (sprites, stylesheets, fonts, integrity digests) next to
//! the site chrome (title, logo, navigation, icons).

pub mod app;
pub mod assets;
pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod fs;
pub mod logging;
pub mod models;
pub mod parser;

// Re-exports for convenience
pub use app::{AppSettings, AppState, ApplicationController, IconServer};
pub use assets::{hash_string, AssetState, ContentHash, SpritesCache};
pub use config::Config;
pub use content::{ContentCache, PagesManager, RefreshPolicy};
pub use data::{DataManager, SyncNotice, SyncRule, SyncSubscriber};
pub use error::{QuireError, QuireResult};
pub use models::{Content, ContentStamp, PageFrontmatter};
pub use parser::{extract_frontmatter, parse_content, parse_frontmatter};
