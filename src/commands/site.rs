use std::sync::Arc;

use anyhow::Result;
use quire::app::{pages_for, AppSettings, ApplicationController, NavigationItem};
use quire::config::Config;

pub fn cmd_site(config: &Config, json: bool) -> Result<()> {
    let app = ApplicationController::new(
        AppSettings::from_config(config)?,
        Arc::new(pages_for(config)?),
    );
    app.initialize()?;

    if json {
        let navigation: serde_json::Map<String, serde_json::Value> = app
            .sections()
            .into_iter()
            .map(|section| {
                serde_json::to_value(app.navigation(&section)).map(|items| (section, items))
            })
            .collect::<Result<_, serde_json::Error>>()?;
        let line = serde_json::json!({
            "title": app.title(),
            "logo": app.logo(),
            "navigation": navigation,
            "icons": app.icons(),
            "pages": app.pages().len(),
        });
        println!("{line}");
        return Ok(());
    }

    println!("Title: {}", app.title());
    match app.logo() {
        Some(logo) => match (logo.width, logo.height) {
            (Some(w), Some(h)) => println!("Logo:  {} ({w}x{h})", logo.href),
            _ => println!("Logo:  {}", logo.href),
        },
        None => println!("Logo:  -"),
    }
    println!("Pages: {}", app.pages().len());

    for section in app.sections() {
        println!("\n[{section}]");
        print!("{}", render_items(&app.navigation(&section), 1));
    }

    let icons = app.icons();
    if !icons.is_empty() {
        println!("\nIcons:");
        for icon in icons {
            println!("  {:<10} {:<8} {}", icon.descriptor.as_str(), icon.sizes, icon.href);
        }
    }
    Ok(())
}

pub(crate) fn render_items(items: &[NavigationItem], depth: usize) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&item.title);
        if let Some(href) = &item.href {
            out.push_str(" → ");
            out.push_str(href);
        }
        out.push('\n');
        out.push_str(&render_items(&item.items, depth + 1));
    }
    out
}
