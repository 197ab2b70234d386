use crate::error::{AppError, Result};
use crate::generator::GeneratorOptions;
use crate::paths;
use log;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = ".xtools/xsummary";
pub const DEFAULT_CONFIG_FILENAME: &str = "xsummary.toml";
pub const DEFAULT_SUMMARY_FILE: &str = "SUMMARY.md";
pub const ROOT_ENV_VAR: &str = "XSUMMARY_ROOT";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme_title: Option<String>,
    #[serde(default)]
    pub ignored_dirs: Vec<String>,
    #[serde(default = "default_true")]
    pub create_missing_readme: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_summary_file")]
    pub summary_file: PathBuf,
    #[serde(default = "default_false")]
    pub force: bool,
}

fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_summary_file() -> PathBuf {
    PathBuf::from(DEFAULT_SUMMARY_FILE)
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            summary_title: None,
            readme_title: None,
            ignored_dirs: Vec::new(),
            create_missing_readme: default_true(),
        }
    }
}
impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_file: default_summary_file(),
            force: default_false(),
        }
    }
}

impl Config {
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_str_opt = cli_project_root
            .map(|p| p.to_string_lossy().to_string())
            .or_else(|| env::var(ROOT_ENV_VAR).ok().filter(|s| !s.is_empty()));

        let path_to_resolve = match path_str_opt {
            Some(p_str) => PathBuf::from(shellexpand::tilde(&p_str).as_ref()),
            None => env::current_dir().map_err(|e| {
                AppError::WorkDir(format!("Cannot determine current directory: {}", e))
            })?,
        };

        path_to_resolve.canonicalize().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::RootNotFound(path_to_resolve.clone())
            } else {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to canonicalize project root '{}': {}",
                        path_to_resolve.display(),
                        e
                    ),
                ))
            }
        })
    }

    /// Locates the config file for `project_root`.
    ///
    /// An explicit value containing a path separator is used as given (after
    /// `~` expansion). A bare name such as `book` is looked up as
    /// `<root>/.xtools/xsummary/book.toml`. Without an explicit value the
    /// default file is used when present.
    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&str>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file disabled, using built-in defaults.");
            return Ok(None);
        }

        let config_dir = project_root.join(DEFAULT_CONFIG_DIR);
        let Some(raw) = cli_config_file else {
            let default_path = config_dir.join(DEFAULT_CONFIG_FILENAME);
            if default_path.is_file() {
                log::debug!("Found book config at {}", default_path.display());
                return Ok(Some(default_path));
            }
            log::debug!("No book config at {}", default_path.display());
            return Ok(None);
        };

        let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
        let is_bare_name = !raw.contains(['/', '\\']) && expanded.components().count() == 1;
        let candidate = if is_bare_name {
            config_dir.join(expanded).with_extension("toml")
        } else {
            expanded
        };

        if !candidate.is_file() {
            return Err(AppError::Config(format!(
                "Config file '{}' not found (looked for {})",
                raw,
                candidate.display()
            )));
        }
        log::debug!("Using config file {}", candidate.display());
        Ok(Some(candidate))
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&toml_content).map_err(|e| match e {
            AppError::TomlParse(msg) => AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                msg
            )),
            other => other,
        })
    }

    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        toml::from_str::<Config>(toml_content).map_err(|e| AppError::TomlParse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Ignored directories from the config file, expanded and made absolute
    /// against the project root.
    pub fn resolved_ignored_dirs(&self, project_root: &Path) -> Vec<PathBuf> {
        self.general
            .ignored_dirs
            .iter()
            .map(|dir| resolve_ignored_dir(dir, project_root))
            .collect()
    }

    pub fn generator_options(&self, project_root: &Path) -> GeneratorOptions {
        GeneratorOptions {
            root: project_root.to_path_buf(),
            summary_title: self.general.summary_title.clone(),
            readme_title: self.general.readme_title.clone(),
            ignored_dirs: self.resolved_ignored_dirs(project_root),
            create_missing_readme: self.general.create_missing_readme,
        }
    }
}

/// Expand `~` and anchor a relative ignore entry at `base`.
///
/// Existing paths are canonicalized so they line up with a canonical project
/// root; missing ones are normalized lexically.
pub fn resolve_ignored_dir(raw: &str, base: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    joined
        .canonicalize()
        .unwrap_or_else(|_| paths::normalize_lexically(&joined))
}
