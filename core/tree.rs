use crate::filter::{self, PathFilter, README_FILENAME};
use crate::listing::{DirListing, list_dir};
use crate::paths;
use log;
use std::fs;
use std::path::{Path, PathBuf};

/// A directory in the summary tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Root-relative, `/`-separated. Empty for the root.
    pub path: String,
    pub abs_path: PathBuf,
    pub children: Vec<SummaryEntry>,
    pub links: Vec<SummaryLink>,
}

/// A content file listed directly under its directory's entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLink {
    pub title: String,
    pub path: String,
}

impl SummaryEntry {
    fn new(path: String, abs_path: PathBuf) -> Self {
        Self {
            path,
            abs_path,
            children: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn depth(&self) -> usize {
        paths::depth(&self.path)
    }

    pub fn base_name(&self) -> &str {
        paths::base_name(&self.path)
    }

    /// Find a descendant (or this entry) by its root-relative path.
    pub fn find(&self, path: &str) -> Option<&SummaryEntry> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    /// Every link in the tree, in the order the summary lists them.
    pub fn all_links(&self) -> Vec<&SummaryLink> {
        let mut links = Vec::new();
        for child in &self.children {
            links.extend(child.all_links());
        }
        links.extend(self.links.iter());
        links
    }
}

/// What the builder did besides producing the tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub created_readmes: Vec<PathBuf>,
    pub failed_readmes: Vec<(PathBuf, String)>,
    pub unreadable_dirs: Vec<PathBuf>,
}

pub struct TreeBuilder<'a> {
    root: PathBuf,
    filter: &'a PathFilter,
    create_missing_readme: bool,
    report: BuildReport,
}

impl<'a> TreeBuilder<'a> {
    /// `root` must already be absolute and normalized.
    pub fn new(root: &Path, filter: &'a PathFilter) -> Self {
        Self {
            root: root.to_path_buf(),
            filter,
            create_missing_readme: true,
            report: BuildReport::default(),
        }
    }

    pub fn create_missing_readme(mut self, enabled: bool) -> Self {
        self.create_missing_readme = enabled;
        self
    }

    pub fn build(mut self) -> (SummaryEntry, BuildReport) {
        log::debug!("Building summary tree from {}", self.root.display());
        let root = self.root.clone();
        let tree = self.build_entry(&root);
        log::debug!(
            "Summary tree built ({} readme files created).",
            self.report.created_readmes.len()
        );
        (tree, self.report)
    }

    fn build_entry(&mut self, dir: &Path) -> SummaryEntry {
        let mut entry =
            SummaryEntry::new(paths::summary_path(&self.root, dir), dir.to_path_buf());

        let listing = list_dir(dir);
        if let DirListing::Unreadable { path, .. } = &listing {
            self.report.unreadable_dirs.push(path.clone());
        }

        let mut has_readme = false;
        for item in listing.into_entries() {
            if !item.is_dir && item.name == README_FILENAME {
                has_readme = true;
            }
            if self.filter.is_ignored(&item.path) {
                log::trace!("Ignoring {}", item.path.display());
                continue;
            }
            if filter::is_effective_dir(&item) {
                if filter::is_hidden(&item.name) {
                    log::trace!("Skipping hidden directory {}", item.path.display());
                    continue;
                }
                let child = self.build_entry(&item.path);
                entry.children.push(child);
                continue;
            }
            if filter::is_effective_file(&item) {
                let link = SummaryLink {
                    title: filter::link_title(&item.name).to_string(),
                    path: paths::summary_path(&self.root, &item.path),
                };
                log::trace!("Adding link {}", link.path);
                entry.links.push(link);
            }
        }

        if self.create_missing_readme && !has_readme && !entry.links.is_empty() {
            self.write_readme(dir);
        }
        entry
    }

    fn write_readme(&mut self, dir: &Path) {
        let readme = dir.join(README_FILENAME);
        let heading = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "README".to_string());
        match fs::write(&readme, format!("# {}\n", heading)) {
            Ok(()) => {
                log::info!("Created {}", readme.display());
                self.report.created_readmes.push(readme);
            }
            Err(e) => {
                log::warn!("Failed to create {}: {}", readme.display(), e);
                self.report.failed_readmes.push((readme, e.to_string()));
            }
        }
    }
}
