//! Mirror pass: full delete-then-copy of a source tree

use std::fs;
use std::io;
use std::path::Path;

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;

use crate::error::{QuireError, QuireResult};

/// Counts from one mirror pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub files: usize,
    pub bytes: u64,
}

/// Optional glob limiting which files a rule copies
#[derive(Debug, Clone)]
pub struct FileFilter {
    globs: Option<Override>,
}

impl FileFilter {
    /// Accept every file
    pub fn all() -> Self {
        Self { globs: None }
    }

    /// Build from a rule's pattern; `None` accepts every file
    pub fn new(root: &Path, pattern: Option<&str>) -> QuireResult<Self> {
        let Some(pattern) = pattern else {
            return Ok(Self::all());
        };

        let invalid = |message: String| QuireError::InvalidPattern {
            pattern: pattern.to_string(),
            message,
        };

        let mut builder = OverrideBuilder::new(root);
        builder.add(pattern).map_err(|e| invalid(e.to_string()))?;
        let globs = builder.build().map_err(|e| invalid(e.to_string()))?;

        Ok(Self { globs: Some(globs) })
    }

    /// True when the file at `relative` should be copied
    pub fn accepts(&self, relative: &Path) -> bool {
        match &self.globs {
            None => true,
            Some(globs) => globs.matched(relative, false).is_whitelist(),
        }
    }
}

/// Replace `destination` with a copy of `source`
///
/// The destination is removed first (a missing destination is fine), then
/// every accepted file is copied with overwrite. Directories are recreated
/// even when the filter leaves them empty.
pub fn mirror_tree(
    source: &Path,
    destination: &Path,
    filter: &FileFilter,
) -> QuireResult<MirrorReport> {
    if !source.is_dir() {
        return Err(QuireError::DirectoryNotFound {
            path: source.to_path_buf(),
        });
    }
    if overlaps(source, destination) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "mirror destination {} overlaps source {}",
                destination.display(),
                source.display()
            ),
        )
        .into());
    }

    remove_destination(destination)?;
    fs::create_dir_all(destination)?;

    let mut report = MirrorReport::default();
    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        let path = entry.path();
        let relative = match path.strip_prefix(source) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let target = destination.join(relative);

        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            if !filter.accepts(relative) {
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            report.bytes += fs::copy(path, &target)?;
            report.files += 1;
        }
    }

    Ok(report)
}

/// Recursively delete `destination`; NotFound counts as already done
pub fn remove_destination(destination: &Path) -> QuireResult<()> {
    match fs::remove_dir_all(destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn overlaps(source: &Path, destination: &Path) -> bool {
    let source = source.canonicalize().unwrap_or_else(|_| source.to_path_buf());
    let destination = match destination.canonicalize() {
        Ok(p) => p,
        // Not created yet: compare against its closest existing ancestor
        Err(_) => destination
            .ancestors()
            .find_map(|a| a.canonicalize().ok().map(|c| (a, c)))
            .map(|(ancestor, canonical)| {
                canonical.join(destination.strip_prefix(ancestor).unwrap_or(destination))
            })
            .unwrap_or_else(|| destination.to_path_buf()),
    };
    destination.starts_with(&source) || source.starts_with(&destination)
}

fn walk_error(err: ignore::Error) -> QuireError {
    let message = err.to_string();
    QuireError::Io(
        err.into_io_error()
            .unwrap_or_else(|| io::Error::other(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn mirror_copies_nested_tree() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("store/content");
        write(&source, "about.md", "a");
        write(&source, "blog/post/index.md", "bb");
        write(&source, ".hidden/keep.txt", "ccc");

        let report = mirror_tree(&source, &dest, &FileFilter::all()).unwrap();

        assert_eq!(report.files, 3);
        assert_eq!(report.bytes, 6);
        assert_eq!(fs::read_to_string(dest.join("blog/post/index.md")).unwrap(), "bb");
        assert!(dest.join(".hidden/keep.txt").is_file());
    }

    #[test]
    fn mirror_removes_stale_destination_files() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("dest");
        write(&source, "new.md", "n");
        write(&dest, "stale.md", "s");

        mirror_tree(&source, &dest, &FileFilter::all()).unwrap();

        assert!(dest.join("new.md").exists());
        assert!(!dest.join("stale.md").exists());
    }

    #[test]
    fn mirror_overwrites_changed_files() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("dest");
        write(&source, "page.md", "v1");
        mirror_tree(&source, &dest, &FileFilter::all()).unwrap();

        write(&source, "page.md", "v2");
        mirror_tree(&source, &dest, &FileFilter::all()).unwrap();

        assert_eq!(fs::read_to_string(dest.join("page.md")).unwrap(), "v2");
    }

    #[test]
    fn mirror_applies_file_pattern() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("dest");
        write(&source, "a.md", "a");
        write(&source, "b.txt", "b");
        write(&source, "nested/c.md", "c");

        let filter = FileFilter::new(&source, Some("*.md")).unwrap();
        let report = mirror_tree(&source, &dest, &filter).unwrap();

        assert_eq!(report.files, 2);
        assert!(dest.join("a.md").exists());
        assert!(dest.join("nested/c.md").exists());
        assert!(!dest.join("b.txt").exists());
    }

    #[test]
    fn mirror_missing_source_errors() {
        let dir = tempdir().unwrap();
        let err = mirror_tree(
            &dir.path().join("missing"),
            &dir.path().join("dest"),
            &FileFilter::all(),
        )
        .unwrap_err();
        assert!(matches!(err, QuireError::DirectoryNotFound { .. }));
    }

    #[test]
    fn mirror_rejects_destination_inside_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        write(&source, "a.md", "a");

        let result = mirror_tree(&source, &source.join("copy"), &FileFilter::all());
        assert!(result.is_err());
        assert!(source.join("a.md").exists(), "source must be untouched");
    }

    #[test]
    fn remove_destination_ignores_missing() {
        let dir = tempdir().unwrap();
        remove_destination(&dir.path().join("nothing-here")).unwrap();
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = FileFilter::new(&PathBuf::from("/src"), Some("a[")).unwrap_err();
        assert!(matches!(err, QuireError::InvalidPattern { .. }));
    }
}
