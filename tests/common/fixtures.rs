//! Reusable site content for tests.

use super::TestEnv;

pub const ABOUT_PAGE: &str = r#"---
title: About
summary: Who we are
---
# About

We write field notes.
"#;

pub const POST_PAGE: &str = r#"---
title: "First post: hello"
date: 2024-05-01
feature: true
---
Opening paragraph of the first post.
"#;

pub const DRAFT_PAGE: &str = r#"---
title: Upcoming
draft: true
---
Not ready.
"#;

pub const BROKEN_PAGE: &str = "no frontmatter at all\n";

pub const MANIFEST: &str = r#"{
  "name": "Field Notes",
  "short_name": "Notes",
  "icons": [
    { "src": "/images/icons/application/icon-512x512.png", "sizes": "512x512", "type": "image/png" }
  ]
}"#;

pub const PRIMARY_NAV: &str = r#"[
  { "title": "Home", "href": "/" },
  { "title": "Posts", "href": "/posts", "items": [ { "title": "Archive", "href": "/posts/archive" } ] }
]"#;

pub const ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" id="icon-star" viewBox="0 0 24 24"><path d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z"/></svg>"#;

/// Populate the content and config origins with a small site
pub fn write_site(env: &TestEnv) {
    env.write("sources/content/pages/about.md", ABOUT_PAGE);
    env.write("sources/content/pages/first-post/index.md", POST_PAGE);
    env.write("sources/content/pages/upcoming.md", DRAFT_PAGE);
    env.write("sources/config/manifest.webmanifest", MANIFEST);
    env.write("sources/config/navigation/primary.json", PRIMARY_NAV);
    env.write("icons/icon-512x512.png", b"\x89PNG\r\n\x1a\n");
    env.write("icons/favicon.ico", b"\0\0\x01\0");
}
