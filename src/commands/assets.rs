use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use quire::assets::{hash_string, AssetState, HttpFetcher, SpritesCache};
use quire::config::Config;

pub fn cmd_integrity(config: &Config, path: &Path, json: bool) -> Result<()> {
    let state = AssetState::new(config.static_root());
    let digest = state.digest(path)?;

    if json {
        let line = serde_json::json!({
            "path": path.display().to_string(),
            "sha256": digest.hex(),
            "integrity": digest.integrity_attr(),
        });
        println!("{line}");
    } else {
        println!("{}  {}", digest.hex(), path.display());
        println!("integrity=\"{}\"", digest.integrity_attr());
    }
    Ok(())
}

pub fn cmd_sprites(config: &Config, sources: &[String], json: bool) -> Result<()> {
    let fetcher = HttpFetcher::new(config.http_timeout())?;
    let mut sprites = SpritesCache::new(Arc::new(fetcher));

    for source in sources {
        if is_url(source) {
            sprites.append_from_url(source)?;
        } else {
            sprites.append_svg_from_file(Path::new(source))?;
        }
    }

    let sheet = sprites.spritesheet();
    if json {
        let line = serde_json::json!({
            "sprites": sprites.len(),
            "sha256": hash_string(sheet),
            "spritesheet": sheet,
        });
        println!("{line}");
    } else {
        println!("{sheet}");
    }
    Ok(())
}

fn is_url(source: &str) -> bool {
    source.starts_with("https://") || source.starts_with("http://")
}
