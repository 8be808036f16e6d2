use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quire::app::IconServer;
use quire::config::Config;

pub fn cmd_icon(config: &Config, name: &str, output: Option<&Path>, json: bool) -> Result<()> {
    let server = IconServer::new(config.icons_path()?);
    let response = server.serve(name)?;

    if let Some(output) = output {
        fs::write(output, &response.body)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    if json {
        let line = serde_json::json!({
            "name": name,
            "content_type": response.content_type,
            "bytes": response.body.len(),
        });
        println!("{line}");
    } else {
        println!(
            "{name}: {} ({} bytes)",
            response.content_type,
            response.body.len()
        );
    }
    Ok(())
}
