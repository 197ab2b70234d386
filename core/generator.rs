use crate::content::ContentOracle;
use crate::error::{AppError, Result};
use crate::filter::PathFilter;
use crate::paths;
use crate::render::render_summary;
use crate::tree::{BuildReport, TreeBuilder};
use log;
use std::path::{Path, PathBuf};

pub const DEFAULT_SUMMARY_TITLE: &str = "SUMMARY";
pub const DEFAULT_README_TITLE: &str = "README";

/// Everything one summary generation needs.
///
/// `ignored_dirs` must already be absolute; no `~` or variable expansion
/// happens past this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub root: PathBuf,
    pub summary_title: Option<String>,
    pub readme_title: Option<String>,
    pub ignored_dirs: Vec<PathBuf>,
    pub create_missing_readme: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            summary_title: None,
            readme_title: None,
            ignored_dirs: Vec::new(),
            create_missing_readme: true,
        }
    }
}

impl GeneratorOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// Rendered summary plus the side effects of producing it.
#[derive(Debug, Clone)]
pub struct Generation {
    pub summary: String,
    pub report: BuildReport,
}

#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    options: GeneratorOptions,
}

impl SummaryGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn generate(&self) -> Result<String> {
        self.generate_with_report().map(|generation| generation.summary)
    }

    pub fn generate_with_report(&self) -> Result<Generation> {
        let root = self.resolve_root()?;
        log::info!("Generating summary for: {}", root.display());

        let ignored = self
            .options
            .ignored_dirs
            .iter()
            .map(|dir| paths::normalize_lexically(dir))
            .collect::<Vec<_>>();
        if !ignored.is_empty() {
            log::debug!("Ignored paths: {:?}", ignored);
        }
        let filter = PathFilter::new(ignored);

        let (tree, report) = TreeBuilder::new(&root, &filter)
            .create_missing_readme(self.options.create_missing_readme)
            .build();

        let summary_title = self.summary_title_for(&root);
        let readme_title = self.readme_title_for(&root);

        let mut oracle = ContentOracle::new(&filter);
        let summary = render_summary(&tree, &summary_title, &readme_title, &mut oracle);
        log::debug!(
            "Summary rendered ({} bytes, {} directory scans).",
            summary.len(),
            oracle.scans()
        );

        Ok(Generation { summary, report })
    }

    fn resolve_root(&self) -> Result<PathBuf> {
        let root = paths::absolutize(&self.options.root)?;
        if !root.exists() {
            return Err(AppError::RootNotFound(root));
        }
        if !root.is_dir() {
            return Err(AppError::RootNotDirectory(root));
        }
        Ok(root)
    }

    fn summary_title_for(&self, root: &Path) -> String {
        title_or_default(
            self.options.summary_title.as_deref(),
            root,
            DEFAULT_SUMMARY_TITLE,
        )
    }

    fn readme_title_for(&self, root: &Path) -> String {
        title_or_default(
            self.options.readme_title.as_deref(),
            root,
            DEFAULT_README_TITLE,
        )
    }
}

/// An explicit non-empty title wins, then the root's directory name, then
/// `fallback` when the root is the filesystem root.
fn title_or_default(explicit: Option<&str>, root: &Path, fallback: &str) -> String {
    if let Some(title) = explicit.filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
