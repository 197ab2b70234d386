use crate::error::{AppError, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory and fold away `.` and
/// `..` components without touching the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = env::current_dir().map_err(|e| {
            AppError::WorkDir(format!("Cannot determine current directory: {}", e))
        })?;
        cwd.join(path)
    };
    Ok(normalize_lexically(&joined))
}

pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, matching how the OS resolves `/..`.
                let ends_in_parent = matches!(
                    normalized.components().next_back(),
                    Some(Component::ParentDir)
                );
                if ends_in_parent || (!normalized.pop() && !normalized.has_root()) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Path of `path` relative to `root`, rendered with `/` separators.
///
/// The root itself maps to the empty string.
pub fn summary_path(root: &Path, path: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Number of separators in a summary path; the indentation level of its line.
pub fn depth(summary_path: &str) -> usize {
    summary_path.matches('/').count()
}

pub fn escape_link_target(summary_path: &str) -> String {
    summary_path.replace(' ', "%20")
}

/// Last component of a summary path.
pub fn base_name(summary_path: &str) -> &str {
    summary_path.rsplit('/').next().unwrap_or(summary_path)
}
