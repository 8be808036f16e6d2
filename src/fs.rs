//! Path helpers shared by the stores and static-file readers

use std::path::{Component, Path, PathBuf};

use crate::error::{QuireError, QuireResult};

/// Reject absolute paths, `..` and empty paths so lookups stay under `root`
pub fn ensure_contained(relative: &Path, root: &Path) -> QuireResult<()> {
    let escape = || QuireError::PathEscape {
        path: relative.to_path_buf(),
        root: root.to_path_buf(),
    };

    let mut normal = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            _ => return Err(escape()),
        }
    }
    if normal == 0 {
        return Err(escape());
    }
    Ok(())
}

/// Join `relative` onto `root` after checking it can't escape
pub fn resolve_within(root: &Path, relative: &Path) -> QuireResult<PathBuf> {
    ensure_contained(relative, root)?;
    Ok(root.join(relative))
}
