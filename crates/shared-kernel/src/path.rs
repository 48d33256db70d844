use std::path::{Component, Path, PathBuf};

/// Convert a potentially relative path into an absolute one without resolving symlinks.
pub fn logical_absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// `/`-separated form of `path` relative to `root`, or `None` when `path`
/// lies outside it. The root itself has no note path.
pub fn note_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!segments.is_empty()).then(|| segments.join("/"))
}

/// Filesystem location of the `/`-separated `note` below `root`.
pub fn resolve_note_path(root: &Path, note: &str) -> PathBuf {
    note.split('/').filter(|segment| !segment.is_empty()).fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_paths_use_forward_slashes() {
        let root = Path::new("/vault");
        assert_eq!(note_path(root, &root.join("Drafts").join("a.md")).as_deref(), Some("Drafts/a.md"));
        assert_eq!(note_path(root, root), None);
        assert_eq!(note_path(root, Path::new("/elsewhere/a.md")), None);
    }

    #[test]
    fn resolving_round_trips() {
        let root = Path::new("/vault");
        let resolved = resolve_note_path(root, "Drafts/sub/a.md");
        assert_eq!(resolved, root.join("Drafts").join("sub").join("a.md"));
        assert_eq!(note_path(root, &resolved).as_deref(), Some("Drafts/sub/a.md"));
    }
}
