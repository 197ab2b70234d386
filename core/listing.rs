//! One-level directory reads used by the tree builder and the content oracle.
//!
//! Entries are returned in the order the operating system yields them. They are
//! never sorted here; the summary mirrors the native listing order.

use log;
use std::fs;
use std::path::{Path, PathBuf};

/// A single entry found directly inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Outcome of reading a directory.
///
/// An unreadable directory behaves like an empty one downstream, but the two
/// cases stay distinguishable for callers that want to report them.
#[derive(Debug)]
pub enum DirListing {
    Read(Vec<ListedEntry>),
    Unreadable { path: PathBuf, reason: String },
}

impl DirListing {
    pub fn entries(&self) -> &[ListedEntry] {
        match self {
            DirListing::Read(entries) => entries,
            DirListing::Unreadable { .. } => &[],
        }
    }

    pub fn into_entries(self) -> Vec<ListedEntry> {
        match self {
            DirListing::Read(entries) => entries,
            DirListing::Unreadable { .. } => Vec::new(),
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, DirListing::Unreadable { .. })
    }
}

pub fn list_dir(dir: &Path) -> DirListing {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            log::warn!("Cannot read directory {}: {}", dir.display(), e);
            return DirListing::Unreadable {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            };
        }
    };

    let mut entries = Vec::new();
    for entry_result in read_dir {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        // file_type() does not follow symlinks, so linked directories count as files.
        let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
        entries.push(ListedEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            is_dir,
        });
    }
    log::trace!("Listed {} entries in {}", entries.len(), dir.display());
    DirListing::Read(entries)
}
