use anyhow::{bail, Result};
use quire::config::Config;
use quire::data::{mirror_tree, FileFilter};

pub fn cmd_sync(config: &Config, json: bool) -> Result<()> {
    let store = config.data_path()?;
    let rules = config.sync_rules();
    if rules.is_empty() {
        bail!(
            "no sync rules configured - set QUIRE_CONTENT_PATH or add a [[sync]] table to quire.toml"
        );
    }

    let mut total_files = 0usize;
    for (name, rule) in &rules {
        let destination = rule.destination_in(store, name)?;
        let filter = FileFilter::new(&rule.source_path, rule.file_pattern.as_deref())?;
        let report = mirror_tree(&rule.source_path, &destination, &filter)?;
        total_files += report.files;

        if json {
            let line = serde_json::json!({
                "event": "mirrored",
                "rule": name,
                "source": rule.source_path.display().to_string(),
                "destination": destination.display().to_string(),
                "files": report.files,
                "bytes": report.bytes,
            });
            println!("{line}");
        } else {
            println!(
                "✓ {name}: {} → {} ({} files, {} bytes)",
                rule.source_path.display(),
                destination.display(),
                report.files,
                report.bytes
            );
        }
    }

    if !json {
        println!("\nMirrored {} rules, {} files", rules.len(), total_files);
    }
    Ok(())
}
