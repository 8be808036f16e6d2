//! Application icon route and icon set

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{QuireError, QuireResult};
use crate::fs::resolve_within;

static ICON_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<feature>mask|fav)-?)?(?:icon|logo)(?:-?(?P<width>[0-9]+))?(?:x(?P<height>[0-9]+))?\.(?P<ext>jpg|jpeg|png|svg|webp|ico)$",
    )
    .expect("icon route pattern is valid")
});

/// How an icon is referenced from page meta links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconDescriptor {
    Icon,
    MaskIcon,
    Favicon,
}

impl IconDescriptor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::MaskIcon => "mask-icon",
            Self::Favicon => "favicon",
        }
    }
}

/// A file name accepted by the icon route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub name: String,
    pub descriptor: IconDescriptor,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub extension: String,
}

impl IconRequest {
    /// Match `file_name` against the icon route, e.g. `icon-192x192.png`,
    /// `mask-icon.svg` or `favicon.ico`
    pub fn parse(file_name: &str) -> QuireResult<Self> {
        let unknown = || QuireError::UnknownIcon {
            name: file_name.to_string(),
        };
        let caps = ICON_ROUTE.captures(file_name).ok_or_else(unknown)?;

        let descriptor = match caps.name("feature").map(|m| m.as_str()) {
            Some("mask") => IconDescriptor::MaskIcon,
            Some("fav") => IconDescriptor::Favicon,
            _ => IconDescriptor::Icon,
        };
        let dimension = |group: &str| -> QuireResult<Option<u32>> {
            caps.name(group)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| unknown()))
                .transpose()
        };
        // A single dimension, either side, means a square icon.
        let (width, height) = match (dimension("width")?, dimension("height")?) {
            (Some(w), h) => (Some(w), h.or(Some(w))),
            (None, Some(h)) => (Some(h), Some(h)),
            (None, None) => (None, None),
        };

        Ok(Self {
            name: file_name.to_string(),
            descriptor,
            width,
            height,
            extension: caps["ext"].to_string(),
        })
    }

    /// `WxH`, or `any` for scalable and unsized icons
    pub fn sizes(&self) -> String {
        match (self.width, self.height) {
            (Some(w), Some(h)) => format!("{w}x{h}"),
            _ => "any".to_string(),
        }
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_ext(&self.extension)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    }
}

/// Meta-link description of one icon file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub descriptor: IconDescriptor,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime: String,
    pub href: String,
}

impl From<&IconRequest> for Icon {
    fn from(request: &IconRequest) -> Self {
        Self {
            descriptor: request.descriptor,
            sizes: request.sizes(),
            mime: request.content_type(),
            href: request.name.clone(),
        }
    }
}

/// Icon body plus its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconResponse {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Serves files from the application icons directory
#[derive(Debug, Clone)]
pub struct IconServer {
    root: PathBuf,
}

impl IconServer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the icon named by `file_name`
    pub fn serve(&self, file_name: &str) -> QuireResult<IconResponse> {
        let request = IconRequest::parse(file_name)?;
        let path = resolve_within(&self.root, Path::new(&request.name))?;
        let body = fs::read(&path)?;
        tracing::debug!(icon = %request.name, bytes = body.len(), "icon served");
        Ok(IconResponse {
            body,
            content_type: request.content_type(),
        })
    }

    /// Every icon file in the directory, sorted by name
    pub fn icons(&self) -> QuireResult<Vec<Icon>> {
        let mut names: Vec<String> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();

        Ok(names
            .iter()
            .filter_map(|name| IconRequest::parse(name).ok())
            .map(|request| Icon::from(&request))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_sized_icon() {
        let request = IconRequest::parse("icon-192x192.png").unwrap();
        assert_eq!(request.descriptor, IconDescriptor::Icon);
        assert_eq!((request.width, request.height), (Some(192), Some(192)));
        assert_eq!(request.sizes(), "192x192");
        assert_eq!(request.content_type(), "image/png");
    }

    #[test]
    fn single_dimension_is_square() {
        let request = IconRequest::parse("logo-48.webp").unwrap();
        assert_eq!(request.sizes(), "48x48");

        let request = IconRequest::parse("iconx48.png").unwrap();
        assert_eq!((request.width, request.height), (Some(48), Some(48)));
        assert_eq!(request.sizes(), "48x48");
    }

    #[test]
    fn parses_favicon_and_mask() {
        let favicon = IconRequest::parse("favicon.ico").unwrap();
        assert_eq!(favicon.descriptor, IconDescriptor::Favicon);
        assert_eq!(favicon.sizes(), "any");

        let mask = IconRequest::parse("mask-icon.svg").unwrap();
        assert_eq!(mask.descriptor, IconDescriptor::MaskIcon);
        assert_eq!(mask.content_type(), "image/svg+xml");
    }

    #[test]
    fn rejects_other_names() {
        for name in ["robots.txt", "icon.gif", "../icon.png", "iconx.png", "my-icon.png"] {
            let err = IconRequest::parse(name).unwrap_err();
            assert!(matches!(err, QuireError::UnknownIcon { .. }), "{name}");
        }
    }

    #[test]
    fn rejects_oversized_dimensions() {
        assert!(IconRequest::parse("icon-99999999999x1.png").is_err());
    }

    #[test]
    fn serve_reads_file_with_content_type() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("icon-32x32.png"), b"\x89PNG").unwrap();
        let server = IconServer::new(dir.path());

        let response = server.serve("icon-32x32.png").unwrap();

        assert_eq!(response.body, b"\x89PNG");
        assert_eq!(response.content_type, "image/png");
    }

    #[test]
    fn serve_missing_icon_is_not_found() {
        let dir = tempdir().unwrap();
        let err = IconServer::new(dir.path()).serve("favicon.ico").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn icon_set_skips_unmatched_files() {
        let dir = tempdir().unwrap();
        for name in ["favicon.ico", "icon-512x512.png", "mask-icon.svg", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let icons = IconServer::new(dir.path()).icons().unwrap();
        let hrefs: Vec<&str> = icons.iter().map(|i| i.href.as_str()).collect();

        assert_eq!(hrefs, vec!["favicon.ico", "icon-512x512.png", "mask-icon.svg"]);
        assert_eq!(icons[0].descriptor, IconDescriptor::Favicon);
        assert_eq!(icons[1].sizes, "512x512");
    }
}
