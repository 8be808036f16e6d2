//! Content-addressed asset caches
//!
//! Everything here is keyed by SHA-256 digests:
//! [`AssetState`] memoises integrity digests of static files, while
//! [`SpritesCache`], [`StylesCache`] and [`FontsCache`] accumulate assets
//! read from disk or fetched through a [`Fetcher`].

mod fetch;
mod fonts;
mod hash;
mod sprites;
mod stamp;
mod state;
mod styles;

pub use fetch::{Fetcher, HttpFetcher, MemoryFetcher};
pub use fonts::{FontResource, FontsCache};
pub use hash::{hash_string, ContentHash};
pub use sprites::{extract_svg_elements, Sprite, SpritesCache};
pub use stamp::CacheStamp;
pub use state::AssetState;
pub use styles::{Stylesheet, StylesCache};
