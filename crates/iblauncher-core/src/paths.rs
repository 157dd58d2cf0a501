//! Path normalization helpers.

use std::env;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Make a path absolute against the current directory and collapse `.`/`..`.
///
/// Normalization is lexical: symlinks are not resolved and the path does not
/// need to exist. If the current directory cannot be determined a relative
/// input stays relative.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_lexically(path);
    }

    match env::current_dir() {
        Ok(cwd) => normalize_lexically(&cwd.join(path)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot determine current directory");
            normalize_lexically(path)
        }
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` directly below the root is dropped; leading `..` of a relative path
/// is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Render a directory with a trailing native separator, as used in templates.
pub fn with_trailing_separator(path: &Path) -> String {
    let mut rendered = path.to_string_lossy().into_owned();
    if !rendered.ends_with(MAIN_SEPARATOR) {
        rendered.push(MAIN_SEPARATOR);
    }
    rendered
}
