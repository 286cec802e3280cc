//! Path resolution helpers.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Resolve `path` against the current directory and normalise it lexically.
///
/// `.` and `..` components are folded without touching the filesystem, so
/// symlinks are not followed. An empty path resolves to the current
/// directory.
pub(crate) fn resolve(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().map_err(|e| Error::CurrentDir(Arc::new(e)))?;
    Ok(normalize(&cwd.join(path)))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, matching `/..` == `/`.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// The user's home directory, if the platform variable is set.
pub(crate) fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("USERPROFILE").map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(unix)]
    #[test]
    fn test_normalize_folds_dots() {
        assert_eq!(
            resolve(Path::new("/a/b/../c/./d")).unwrap(),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(resolve(Path::new("/..")).unwrap(), PathBuf::from("/"));
        assert_eq!(resolve(Path::new("/a/b/")).unwrap(), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_relative_paths_resolve_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve(Path::new("")).unwrap(), cwd);
        assert_eq!(resolve(Path::new("sub")).unwrap(), cwd.join("sub"));
    }
}
