//! Memoized "does this directory tree contain any markdown" check.
//!
//! One [`ContentOracle`] lives for exactly one generation run. Answers are never
//! invalidated, so an oracle must not be reused after the tree may have changed.

use crate::filter::{PathFilter, has_content_extension};
use crate::listing::list_dir;
use log;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ContentOracle<'a> {
    filter: &'a PathFilter,
    cache: HashMap<PathBuf, bool>,
    scans: usize,
}

impl<'a> ContentOracle<'a> {
    pub fn new(filter: &'a PathFilter) -> Self {
        Self {
            filter,
            cache: HashMap::new(),
            scans: 0,
        }
    }

    /// Whether `dir` or any directory below it holds a `.md` file.
    ///
    /// Sub-directories are checked in listing order and the search stops at
    /// the first one with content. Siblings after it stay unresolved until
    /// they are queried directly.
    pub fn has_content(&mut self, dir: &Path) -> bool {
        if let Some(&known) = self.cache.get(dir) {
            return known;
        }

        self.scans += 1;
        let listing = list_dir(dir);
        let (sub_dirs, files): (Vec<_>, Vec<_>) =
            listing.entries().iter().partition(|entry| entry.is_dir);

        if files
            .iter()
            .any(|file| has_content_extension(&file.name) && !self.filter.is_ignored(&file.path))
        {
            log::trace!("Content found directly in {}", dir.display());
            self.cache.insert(dir.to_path_buf(), true);
            return true;
        }

        for sub_dir in sub_dirs {
            if !self.filter.should_descend(sub_dir) {
                continue;
            }
            if self.has_content(&sub_dir.path) {
                self.cache.insert(sub_dir.path.clone(), true);
                self.cache.insert(dir.to_path_buf(), true);
                return true;
            }
        }

        log::trace!("No content under {}", dir.display());
        self.cache.insert(dir.to_path_buf(), false);
        false
    }

    pub fn cached(&self, dir: &Path) -> Option<bool> {
        self.cache.get(dir).copied()
    }

    /// Number of directory listings performed so far.
    pub fn scans(&self) -> usize {
        self.scans
    }
}
