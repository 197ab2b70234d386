use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        short = 'd',
        long = "dir",
        visible_alias = "project-root",
        help = "Book directory to summarize (default: current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Specify path/filename of the TOML config file (default: .xtools/xsummary/xsummary.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config_file",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config_file: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "xsummary",
    author,
    version,
    about = "Generate a GitBook SUMMARY.md from a directory of markdown files.",
    long_about = "xsummary walks a documentation directory and writes a SUMMARY.md that links \nevery markdown file, nested by directory. Directories with pages but no \nREADME.md get a one-line README.md created for them.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  xsummary generate\n  xsummary generate -d ./book --summary-file ./book/SUMMARY.md -f\n  xsummary generate --ignored-dirs drafts,~/book/private --stdout",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "start",
        visible_alias = "gen",
        visible_alias = "g",
        about = "Generate the summary file."
    )]
    Generate(GenerateArgs),

    #[command(about = "Generate or save shell completion scripts.")]
    Completion(CompletionArgs),

    #[command(about = "Show or save the default configuration file structure.")]
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,

    #[arg(
        long,
        value_name = "TITLE",
        help = "Title of the summary (default: book directory name).",
        help_heading = "Titles"
    )]
    pub summary_title: Option<String>,

    #[arg(
        long,
        value_name = "TITLE",
        help = "Title of the root README link (default: book directory name).",
        help_heading = "Titles"
    )]
    pub readme_title: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Summary file to write [default: ./SUMMARY.md].",
        help_heading = "Output Control"
    )]
    pub summary_file: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        help = "Overwrite the summary file if it already exists.",
        help_heading = "Output Control"
    )]
    pub force: bool,

    #[arg(
        long,
        help = "Print the summary to standard output instead of writing it.",
        help_heading = "Output Control"
    )]
    pub stdout: bool,

    #[arg(
        long = "ignored-dirs",
        value_name = "DIR",
        value_delimiter = ',',
        action = clap::ArgAction::Append,
        help = "Directories to leave out, comma separated (repeatable).",
        help_heading = "Content Filtering"
    )]
    pub ignored_dirs: Vec<String>,

    #[arg(
        long,
        help = "Do not create README.md in directories that lack one.",
        help_heading = "Content Filtering"
    )]
    pub no_create_readme: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,
    #[arg(
        long,
        help = "Save completion script to default location (prompts overwrite)."
    )]
    pub save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[arg(
        long,
        help = "Save default config structure to default path (prompts overwrite)."
    )]
    pub save: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_generate(args: &[&str]) -> GenerateArgs {
        let mut argv = vec!["xsummary", "generate"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Commands::Generate(args)) => args,
            other => panic!("expected generate command, got {:?}", other),
        }
    }

    #[test]
    fn generate_defaults() {
        let args = parse_generate(&[]);
        assert!(args.project_config.project_root.is_none());
        assert!(args.summary_file.is_none());
        assert!(args.ignored_dirs.is_empty());
        assert!(!args.force);
        assert!(!args.stdout);
        assert!(!args.no_create_readme);
    }

    #[test]
    fn ignored_dirs_split_on_commas_and_repeat() {
        let args = parse_generate(&["--ignored-dirs", "a,b", "--ignored-dirs", "~/c"]);
        assert_eq!(args.ignored_dirs, vec!["a", "b", "~/c"]);
    }

    #[test]
    fn start_alias_and_short_flags() {
        let cli = Cli::try_parse_from(["xsummary", "-v", "start", "-d", "book", "-f"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.project_config.project_root, Some(PathBuf::from("book")));
                assert!(args.force);
            }
            other => panic!("expected generate command, got {:?}", other),
        }
    }

    #[test]
    fn config_file_flags_conflict() {
        let result = Cli::try_parse_from([
            "xsummary",
            "generate",
            "--config-file",
            "x.toml",
            "--disable-config-file",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn titles_are_captured() {
        let args = parse_generate(&["--summary-title", "My Book", "--readme-title", "Intro"]);
        assert_eq!(args.summary_title.as_deref(), Some("My Book"));
        assert_eq!(args.readme_title.as_deref(), Some("Intro"));
    }
}
