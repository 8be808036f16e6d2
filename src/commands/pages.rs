use anyhow::Result;
use quire::app::pages_for;
use quire::config::Config;
use quire::Content;

pub fn cmd_pages(config: &Config, drafts: bool, featured: bool, json: bool) -> Result<()> {
    let pages = pages_for(config)?;
    let report = pages.load();

    let listed = if drafts {
        pages.drafts()
    } else if featured {
        pages.featured()
    } else {
        pages.published()
    };

    if json {
        for page in &listed {
            println!("{}", serde_json::to_string(&page_json(page))?);
        }
        for file in &report.failed {
            let line = serde_json::json!({
                "event": "skipped",
                "file": file.display().to_string(),
            });
            eprintln!("{line}");
        }
        return Ok(());
    }

    for page in &listed {
        println!("{}", render_page_line(page));
    }
    println!(
        "\n{} pages listed, {} loaded, {} skipped",
        listed.len(),
        report.loaded,
        report.failed.len()
    );
    for file in &report.failed {
        eprintln!("Warning: skipped {}", file.display());
    }
    Ok(())
}

fn page_json(page: &Content) -> serde_json::Value {
    serde_json::json!({
        "slug": page.slug,
        "title": page.title,
        "published_at": page.published_at.map(|d| d.to_rfc3339()),
        "draft": page.draft,
        "feature": page.feature,
        "summary": page.summary,
    })
}

pub(crate) fn render_page_line(page: &Content) -> String {
    let date = page
        .published_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    let marker = if page.feature { "★" } else { " " };
    format!(
        "{date} {marker} {:<24} {}",
        page.slug.as_deref().unwrap_or("-"),
        page.title
    )
}
