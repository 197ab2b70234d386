use crate::listing::ListedEntry;
use std::path::{Path, PathBuf};

pub const CONTENT_EXTENSION: &str = ".md";
pub const README_FILENAME: &str = "README.md";
pub const SUMMARY_FILENAME: &str = "SUMMARY.md";

/// True if `path` is one of `ignored` or lies beneath one of them.
///
/// Comparison is per path component, so `/docs/draft` does not match
/// `/docs/drafts`. Both sides are expected to be absolute and normalized.
pub fn is_ignored(path: &Path, ignored: &[PathBuf]) -> bool {
    ignored.iter().any(|prefix| path.starts_with(prefix))
}

pub fn is_effective_dir(entry: &ListedEntry) -> bool {
    entry.is_dir
}

/// A file that gets its own link in the summary.
pub fn is_effective_file(entry: &ListedEntry) -> bool {
    if entry.is_dir {
        return false;
    }
    if entry.name == README_FILENAME || entry.name == SUMMARY_FILENAME {
        return false;
    }
    has_content_extension(&entry.name)
}

pub fn has_content_extension(name: &str) -> bool {
    name.ends_with(CONTENT_EXTENSION)
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Link title for a content file: the name without its trailing extension.
pub fn link_title(name: &str) -> &str {
    name.strip_suffix(CONTENT_EXTENSION).unwrap_or(name)
}

/// Ignore rules shared by the builder and the content oracle for one run.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    ignored: Vec<PathBuf>,
}

impl PathFilter {
    pub fn new(ignored: Vec<PathBuf>) -> Self {
        Self { ignored }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        is_ignored(path, &self.ignored)
    }

    /// Whether traversal should descend into this directory entry at all.
    pub fn should_descend(&self, entry: &ListedEntry) -> bool {
        is_effective_dir(entry) && !is_hidden(&entry.name) && !self.is_ignored(&entry.path)
    }
}
