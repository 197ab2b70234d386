use crate::cli_args::GenerateArgs;
use crate::load_config_for_command;
use crate::output;
use anyhow::{Context, Result};
use colored::Colorize;
use log;
use std::env;
use std::path::{Path, PathBuf};
use xsummary_core::config::resolve_ignored_dir;
use xsummary_core::{BuildReport, Config, GeneratorOptions, SummaryGenerator};

pub fn handle_generate_command(args: GenerateArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config, Some(&args))
        .context("Failed to load configuration")?;

    let cwd = env::current_dir().context("Failed to read current directory")?;
    let options = build_generator_options(&config, &project_root, &args.ignored_dirs, &cwd);

    let generation = SummaryGenerator::new(options)
        .generate_with_report()
        .context("Failed to generate summary")?;
    report_side_effects(&generation.report, quiet);

    let target = OutputTarget::decide(&config, args.stdout);
    match target {
        OutputTarget::File(path) => {
            output::write_to_file(&path, &generation.summary)?;
            if !quiet {
                println!(
                    "{} Generated {}",
                    "✅".green(),
                    path.display().to_string().blue()
                );
            }
        }
        OutputTarget::ExistingFile(path) => {
            if !quiet {
                eprintln!(
                    "{} {} already exists, use --force to overwrite. Generated summary:",
                    "⚠️".yellow(),
                    path.display().to_string().cyan()
                );
            }
            output::write_to_stdout(&generation.summary)?;
        }
        OutputTarget::Stdout => output::write_to_stdout(&generation.summary)?,
    }
    Ok(())
}

/// Merge config-file and CLI ignores into the options the core consumes.
///
/// Config entries are anchored at the project root, CLI entries at the
/// directory the command was run from.
fn build_generator_options(
    config: &Config,
    project_root: &Path,
    cli_ignored: &[String],
    cwd: &Path,
) -> GeneratorOptions {
    let mut options = config.generator_options(project_root);
    options.ignored_dirs.extend(
        cli_ignored
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| resolve_ignored_dir(raw.trim(), cwd)),
    );
    log::debug!("Generator options: {:?}", options);
    options
}

#[derive(Debug, PartialEq, Eq)]
enum OutputTarget {
    File(PathBuf),
    /// The summary file exists and overwriting was not requested.
    ExistingFile(PathBuf),
    Stdout,
}

impl OutputTarget {
    fn decide(config: &Config, force_stdout: bool) -> Self {
        if force_stdout {
            return OutputTarget::Stdout;
        }
        let path = PathBuf::from(
            shellexpand::tilde(&config.output.summary_file.to_string_lossy()).as_ref(),
        );
        if path.exists() && !config.output.force {
            log::debug!("Summary file {} exists and force is off.", path.display());
            OutputTarget::ExistingFile(path)
        } else {
            OutputTarget::File(path)
        }
    }
}

fn report_side_effects(report: &BuildReport, quiet: bool) {
    for dir in &report.unreadable_dirs {
        log::warn!("Skipped unreadable directory: {}", dir.display());
    }
    if quiet {
        return;
    }
    for readme in &report.created_readmes {
        println!("{} Created {}", "📝".blue(), readme.display().to_string().dimmed());
    }
    for (readme, reason) in &report.failed_readmes {
        eprintln!(
            "{} Could not create {}: {}",
            "⚠️".yellow(),
            readme.display(),
            reason
        );
    }
}
