use crate::cli_args::ConfigArgs;
use crate::output;
use anyhow::{Context, Result};
use colored::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use xsummary_core::Config;
use xsummary_core::config::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};

pub fn handle_config_command(args: &ConfigArgs, project_root: &Path, quiet: bool) -> Result<()> {
    let content = default_config_text()?;

    if !args.save {
        return output::write_to_stdout(&content);
    }

    let save_path = default_config_path(project_root);
    if save_path.exists() {
        if quiet {
            anyhow::bail!(
                "Target file '{}' exists. Overwrite prevented in quiet mode.",
                save_path.display()
            );
        }
        print!(
            "{} Config file already exists at '{}'. Overwrite? [{}/{}] ",
            "⚠️".yellow(),
            save_path.display().to_string().cyan(),
            "y".green(),
            "N".red()
        );
        io::stdout().flush().context("Failed to flush stdout")?;
        let mut response = String::new();
        io::stdin()
            .read_line(&mut response)
            .context("Failed to read user input")?;
        if !response.trim().eq_ignore_ascii_case("y") {
            println!("Save cancelled.");
            return Ok(());
        }
    }

    output::write_to_file(&save_path, &content)?;
    if !quiet {
        println!(
            "{} Default config saved to: {}",
            "✅".green(),
            save_path.display().to_string().blue()
        );
    }
    Ok(())
}

fn default_config_path(project_root: &Path) -> PathBuf {
    project_root
        .join(DEFAULT_CONFIG_DIR)
        .join(DEFAULT_CONFIG_FILENAME)
}

fn default_config_text() -> Result<String> {
    let body = Config::default()
        .to_toml_string()
        .context("Failed to serialize default configuration")?;
    Ok(format!(
        "# xsummary configuration\n\
         # [general] summary_title / readme_title default to the book directory name.\n\
         # ignored_dirs entries are relative to the book directory; `~` is expanded.\n\n{}",
        body
    ))
}
