use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use quire::app::{pages_for, AppSettings, ApplicationController};
use quire::config::Config;
use quire::data::{DataManager, SyncNotice, SyncSubscriber};
use quire::QuireResult;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub fn cmd_watch(config: &Config, json: bool) -> Result<()> {
    let rules = config.sync_rules();
    if rules.is_empty() {
        bail!(
            "no sync rules configured - set QUIRE_CONTENT_PATH or add a [[sync]] table to quire.toml"
        );
    }

    let manager = DataManager::new(config.data_path()?);
    let pages = Arc::new(pages_for(config)?);
    let app = Arc::new(ApplicationController::new(
        AppSettings::from_config(config)?,
        pages,
    ));

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    for (name, rule) in rules {
        let source = rule.source_path.display().to_string();
        manager.add_sync_rule(&name, rule, Some(announcer(Arc::clone(&app), json)))?;
        if !json {
            println!("Watching {name}: {source}");
        }
    }

    app.initialize()?;
    if json {
        let line = serde_json::json!({
            "event": "ready",
            "title": app.title(),
            "pages": app.pages().len(),
        });
        println!("{line}");
    } else {
        println!(
            "\nReady: {} ({} pages). Press Ctrl+C to stop.",
            app.title(),
            app.pages().len()
        );
    }

    let mut failure = None;
    while running.load(Ordering::SeqCst) && failure.is_none() {
        thread::sleep(POLL_INTERVAL);
        for name in manager.rules() {
            if manager.is_running(&name) {
                continue;
            }
            if let Err(e) = manager.remove_sync_rule(&name) {
                failure = Some(anyhow::Error::new(e).context(format!("sync rule '{name}' stopped")));
                break;
            }
        }
    }

    manager.shutdown();
    match failure {
        Some(err) => Err(err),
        None => {
            if !json {
                println!("\nStopped.");
            }
            Ok(())
        }
    }
}

/// Subscriber that reloads the application and reports each pass
fn announcer(app: Arc<ApplicationController>, json: bool) -> Arc<dyn SyncSubscriber> {
    Arc::new(move |notice: &SyncNotice| -> QuireResult<()> {
        SyncSubscriber::updated(app.as_ref(), notice)?;
        if json {
            let line = serde_json::json!({
                "event": "synced",
                "rule": notice.rule,
                "pass": notice.pass,
                "files": notice.report.files,
                "bytes": notice.report.bytes,
            });
            println!("{line}");
        } else if notice.pass > 0 {
            println!(
                "↻ {} synced ({} files, {} bytes)",
                notice.rule, notice.report.files, notice.report.bytes
            );
        }
        Ok(())
    })
}
