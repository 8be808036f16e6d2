//! SVG spritesheet cache

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::error::{QuireError, QuireResult};

use super::fetch::Fetcher;
use super::hash::hash_string;
use super::stamp::CacheStamp;

/// One SVG fragment in the spritesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    /// SVG markup
    pub content: String,
    /// SHA-256 hex of `content`
    pub hash: String,
}

impl Sprite {
    fn new(content: String) -> Self {
        let hash = hash_string(&content);
        Self {
            url: None,
            path: None,
            content,
            hash,
        }
    }
}

/// Ordered sprite list and the spritesheet built from it
///
/// Sprites are never deduplicated: appending the same markup twice puts it
/// in the spritesheet twice.
pub struct SpritesCache {
    fetcher: Arc<dyn Fetcher>,
    sprites: Vec<CacheStamp<Sprite>>,
    spritesheet: String,
}

impl SpritesCache {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            sprites: Vec::new(),
            spritesheet: String::new(),
        }
    }

    /// Append raw SVG markup as one sprite and rebuild
    pub fn append_content(&mut self, content: impl Into<String>) -> &str {
        self.push(Sprite::new(content.into()));
        self.build()
    }

    /// Read an SVG file, append its `<svg>` elements and rebuild
    pub fn append_svg_from_file(&mut self, path: &Path) -> QuireResult<&str> {
        let markup = fs::read_to_string(path)?;
        let content = extract_svg_elements(&markup, &path.display().to_string())?;
        let mut sprite = Sprite::new(content);
        sprite.path = Some(path.to_path_buf());
        self.push(sprite);
        Ok(self.build())
    }

    /// Fetch an SVG document, append its `<svg>` elements and rebuild
    pub fn append_from_url(&mut self, url: &str) -> QuireResult<&str> {
        let markup = self.fetcher.fetch_text(url)?;
        let content = extract_svg_elements(&markup, url)?;
        let mut sprite = Sprite::new(content);
        sprite.url = Some(url.to_string());
        self.push(sprite);
        Ok(self.build())
    }

    /// Concatenate every sprite in append order
    pub fn build(&mut self) -> &str {
        self.spritesheet = self
            .sprites
            .iter()
            .map(|stamp| stamp.value.content.as_str())
            .collect();
        &self.spritesheet
    }

    /// Spritesheet from the last build
    pub fn spritesheet(&self) -> &str {
        &self.spritesheet
    }

    pub fn sprites(&self) -> &[CacheStamp<Sprite>] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    fn push(&mut self, sprite: Sprite) {
        tracing::debug!(hash = %sprite.hash, bytes = sprite.content.len(), "sprite appended");
        let hash = sprite.hash.clone();
        self.sprites.push(CacheStamp::new(sprite).with_hash(hash));
    }
}

/// Every top-level `<svg>` element of `markup`, re-serialized and concatenated
///
/// Nested `<svg>` elements stay inside their parent. Anything outside an
/// `<svg>` (prolog, doctype, wrapper HTML) is dropped, so sources may be
/// HTML pages with void elements like `<meta>` or `<br>`.
pub fn extract_svg_elements(markup: &str, source_name: &str) -> QuireResult<String> {
    let invalid = |message: String| QuireError::InvalidSvg {
        source_name: source_name.to_string(),
        message,
    };

    let mut reader = Reader::from_str(markup);
    // HTML void elements never close; depth tracking below balances the svg.
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| invalid(e.to_string()))?;
        let write = match &event {
            Event::Eof if depth > 0 => return Err(invalid("unexpected end of input".to_string())),
            Event::Eof => break,
            Event::Start(e) if depth == 0 => {
                if e.name().as_ref() == b"svg" {
                    depth = 1;
                    true
                } else {
                    false
                }
            }
            Event::Empty(e) if depth == 0 => e.name().as_ref() == b"svg",
            Event::Start(_) => {
                depth += 1;
                true
            }
            Event::End(_) if depth > 0 => {
                depth -= 1;
                true
            }
            _ => depth > 0,
        };

        if write {
            writer
                .write_event(event)
                .map_err(|e| invalid(e.to_string()))?;
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| invalid(e.to_string()))
}
