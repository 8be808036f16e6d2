//! Page parser
//!
//! Splits YAML frontmatter from markdown bodies and builds [`Content`] records.

use std::fs;
use std::path::Path;

use crate::error::{QuireError, QuireResult};
use crate::models::{Content, ContentStamp, PageFrontmatter};

/// Delimiter for frontmatter sections
const FRONTMATTER_DELIMITER: &str = "---";

/// File stem whose slug comes from the parent directory
const INDEX_STEM: &str = "index";

/// Result of extracting frontmatter from content
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFrontmatter {
    /// The raw YAML content of the frontmatter
    pub yaml: String,
    /// The content body after the frontmatter
    pub body: String,
    /// Line number where frontmatter ends (for error reporting)
    pub end_line: usize,
}

/// Extract frontmatter from file content
///
/// Frontmatter must be at the start of the file, delimited by `---` lines.
///
/// # Example
/// ```text
/// ---
/// title: About
/// ---
/// # About us
/// ```
pub fn extract_frontmatter(content: &str, file: &Path) -> QuireResult<ExtractedFrontmatter> {
    // A UTF-8 BOM would hide the opening delimiter
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.lines().collect();

    if lines.first().map(|l| l.trim()) != Some(FRONTMATTER_DELIMITER) {
        return Err(QuireError::NoFrontmatter {
            file: file.to_path_buf(),
        });
    }

    let closing_line = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == FRONTMATTER_DELIMITER)
        .map(|(i, _)| i)
        .ok_or_else(|| QuireError::UnclosedFrontmatter {
            file: file.to_path_buf(),
        })?;

    let yaml = lines[1..closing_line].join("\n");
    let body = lines
        .get(closing_line + 1..)
        .map(|rest| rest.join("\n"))
        .unwrap_or_default();

    Ok(ExtractedFrontmatter {
        yaml,
        body,
        end_line: closing_line + 1,
    })
}

/// Decode frontmatter YAML into [`PageFrontmatter`]
pub fn parse_frontmatter(yaml: &str, file: &Path) -> QuireResult<PageFrontmatter> {
    serde_yaml_ng::from_str(yaml).map_err(|e| QuireError::InvalidFrontmatter {
        file: file.to_path_buf(),
        message: format_yaml_frontmatter_error(yaml, &e),
    })
}

/// Derive a page slug from its path
///
/// `about.md` → `about`; `blog-post/index.md` → `blog-post`.
pub fn derive_slug(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    if stem == INDEX_STEM {
        if let Some(parent) = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
        {
            return parent.to_string();
        }
    }

    stem.to_string()
}

/// Parse one page file into a stamped [`Content`] record
pub fn parse_content(path: &Path) -> QuireResult<ContentStamp<Content>> {
    let text = fs::read_to_string(path)?;
    let extracted = extract_frontmatter(&text, path)?;
    let frontmatter = parse_frontmatter(&extracted.yaml, path)?;
    let slug = derive_slug(path);

    Ok(ContentStamp::now(Content::from_frontmatter(
        frontmatter,
        extracted.body,
        path,
        slug,
    )))
}

fn format_yaml_frontmatter_error(yaml: &str, err: &serde_yaml_ng::Error) -> String {
    let mut message = match err.location() {
        Some(loc) => format!("Line {}: Invalid YAML - {}", loc.line(), err),
        None => format!("Invalid YAML - {}", err),
    };

    if should_hint_colon_quotes(yaml, &err.to_string()) {
        message.push_str("\nHint: Strings with colons need quotes: title: \"Part 1: Setup\"");
    }

    message
}

fn should_hint_colon_quotes(yaml: &str, err_str: &str) -> bool {
    err_str.contains("mapping values are not allowed")
        || yaml
            .lines()
            .any(|l| l.trim_start().starts_with("title:") && l.matches(": ").count() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_extract_frontmatter_simple() {
        let content = "---\ntitle: About\n---\n# About us";

        let result = extract_frontmatter(content, Path::new("about.md")).unwrap();

        assert_eq!(result.yaml, "title: About");
        assert_eq!(result.body, "# About us");
        assert_eq!(result.end_line, 3);
    }

    #[test]
    fn test_extract_frontmatter_empty_body() {
        let result = extract_frontmatter("---\ntitle: Empty\n---", Path::new("e.md")).unwrap();
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_extract_frontmatter_with_bom() {
        let result =
            extract_frontmatter("\u{feff}---\ntitle: Bom\n---\nx", Path::new("b.md")).unwrap();
        assert_eq!(result.yaml, "title: Bom");
    }

    #[test]
    fn test_extract_frontmatter_missing_opening() {
        let result = extract_frontmatter("title: nope\n---\nbody", Path::new("x.md"));
        assert!(matches!(result, Err(QuireError::NoFrontmatter { .. })));
    }

    #[test]
    fn test_extract_frontmatter_missing_closing() {
        let result = extract_frontmatter("---\ntitle: open\nbody", Path::new("x.md"));
        assert!(matches!(result, Err(QuireError::UnclosedFrontmatter { .. })));
    }

    #[test]
    fn test_extract_frontmatter_empty_file() {
        let result = extract_frontmatter("", Path::new("x.md"));
        assert!(matches!(result, Err(QuireError::NoFrontmatter { .. })));
    }

    #[test]
    fn test_parse_frontmatter_invalid_yaml() {
        let result = parse_frontmatter("title: [broken", Path::new("x.md"));
        assert!(matches!(result, Err(QuireError::InvalidFrontmatter { .. })));
    }

    #[test]
    fn test_parse_frontmatter_colon_hint() {
        let err = parse_frontmatter("title: Part 1: Setup", Path::new("x.md")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Hint"), "expected hint in: {msg}");
    }

    #[test]
    fn test_derive_slug_root_file() {
        assert_eq!(derive_slug(Path::new("content/about.md")), "about");
        assert_eq!(derive_slug(Path::new("about.md")), "about");
    }

    #[test]
    fn test_derive_slug_index_uses_parent() {
        assert_eq!(derive_slug(Path::new("content/blog-post/index.md")), "blog-post");
    }

    #[test]
    fn test_derive_slug_bare_index() {
        assert_eq!(derive_slug(Path::new("index.md")), "index");
    }

    #[test]
    fn test_parse_content_reads_file() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("hello-world");
        fs::create_dir_all(&folder).unwrap();
        let file = folder.join("index.md");
        fs::write(&file, "---\ntitle: Hello\ndraft: true\n---\nFirst words.\n").unwrap();

        let stamp = parse_content(&file).unwrap();

        assert!(stamp.refresh_date.is_some());
        let page = stamp.content;
        assert_eq!(page.title, "Hello");
        assert_eq!(page.slug.as_deref(), Some("hello-world"));
        assert!(page.draft);
        assert_eq!(page.summary, "First words.");
        assert_eq!(page.path.as_deref(), Some(file.as_path()));
    }

    #[test]
    fn test_parse_content_missing_file() {
        let dir = tempdir().unwrap();
        let err = parse_content(&dir.path().join("gone.md")).unwrap_err();
        assert!(err.is_not_found());
    }
}
