use std::path::Path;

use anyhow::Result;
use quire::config::{Config, ConfigWarning};

pub mod assets;
pub mod icon;
pub mod pages;
pub mod site;
pub mod sync;
pub mod watch;

/// Resolve the config and print unknown-key warnings to stderr
pub(crate) fn load_config(explicit: Option<&Path>, json: bool) -> Result<Config> {
    let (config, warnings) = Config::load_or_default(explicit)?;
    for warning in &warnings {
        if json {
            let line = serde_json::json!({
                "event": "config_warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            });
            eprintln!("{line}");
        } else {
            eprintln!("{}", format_warning(warning));
        }
    }
    Ok(config)
}

fn format_warning(warning: &ConfigWarning) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    format!(
        "Warning: Unknown config key '{}' in {}{}",
        warning.key,
        location,
        warning
            .suggestion
            .as_ref()
            .map(|s| format!(". Did you mean '{}'?", s))
            .unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn warning_mentions_line_and_suggestion() {
        let warning = ConfigWarning {
            key: "extention".to_string(),
            file: PathBuf::from("quire.toml"),
            line: Some(2),
            suggestion: Some("extension".to_string()),
        };
        insta::assert_snapshot!(
            format_warning(&warning),
            @"Warning: Unknown config key 'extention' in quire.toml:2. Did you mean 'extension'?"
        );
    }

    #[test]
    fn warning_without_line_or_suggestion() {
        let warning = ConfigWarning {
            key: "zzz".to_string(),
            file: PathBuf::from("quire.toml"),
            line: None,
            suggestion: None,
        };
        assert_eq!(
            format_warning(&warning),
            "Warning: Unknown config key 'zzz' in quire.toml"
        );
    }
}
