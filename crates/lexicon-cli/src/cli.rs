//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use lexicon_export::ExportFormat;
use std::path::PathBuf;

/// Lexicon - export spell-check dictionaries from a lexicon database.
#[derive(Debug, Parser)]
#[command(name = "lexicon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<CliOutput>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LEXICON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database path
    #[arg(long, global = true, env = "LEXICON_DB")]
    pub db: Option<PathBuf>,

    /// Export directory
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,

    /// Base URL used for absolute links inside packages
    #[arg(long, global = true, env = "LEXICON_BASE_URL")]
    pub base_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliOutput {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export a project's dictionary
    Export(ExportArgs),

    /// Build the installable package with delivery defaults
    Latest(ProjectArgs),

    /// Print the update-check reply for a project's package
    UpdateInfo(ProjectArgs),

    /// Expand ad-hoc words with ad-hoc affix rules
    AffixTest(AffixTestArgs),

    /// Load a project from a JSON definition
    Import(ImportArgs),
}

/// Export file format.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FormatArg {
    /// Counted word list, expanded
    Dic,
    /// SpellingStatus XML
    Xml,
    /// Extension package
    Oxt,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Project code
    pub project: String,

    /// Export format
    #[arg(short, long, value_enum, default_value = "dic")]
    pub format: FormatArg,

    /// Include unchecked entries
    #[arg(long)]
    pub all: bool,

    /// Do not attach affix tags (also skips expansion)
    #[arg(long)]
    pub no_affixes: bool,

    /// Leave out ignore words
    #[arg(long)]
    pub no_ignore: bool,
}

/// Arguments naming a single project.
#[derive(Debug, Parser)]
pub struct ProjectArgs {
    /// Project code
    pub project: String,
}

/// Arguments for the affix-test command.
#[derive(Debug, Parser)]
pub struct AffixTestArgs {
    /// Seed word file, one word per line (`-` for stdin)
    #[arg(short, long)]
    pub words: String,

    /// Affix rule file
    #[arg(short, long)]
    pub rules: PathBuf,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file containing the project definition
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Read the JSON definition from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Affix rule file replacing the definition's rules
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Dic => ExportFormat::Dic,
            FormatArg::Xml => ExportFormat::Xml,
            FormatArg::Oxt => ExportFormat::Oxt,
        }
    }
}

impl From<CliOutput> for crate::config::OutputFormat {
    fn from(output: CliOutput) -> Self {
        match output {
            CliOutput::Text => crate::config::OutputFormat::Text,
            CliOutput::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_command() {
        let cli = Cli::parse_from(["lexicon", "export", "kgu", "--format", "oxt", "--all"]);
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.project, "kgu");
                assert!(matches!(args.format, FormatArg::Oxt));
                assert!(args.all);
                assert!(!args.no_affixes);
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_export_defaults_to_dic() {
        let cli = Cli::parse_from(["lexicon", "export", "kgu"]);
        match cli.command {
            Command::Export(args) => assert!(matches!(args.format, FormatArg::Dic)),
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "lexicon",
            "update-info",
            "kgu",
            "--base-url",
            "https://example.org",
            "-o",
            "json",
            "-v",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("https://example.org"));
        assert!(matches!(cli.output, Some(CliOutput::Json)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_affix_test_requires_rules() {
        assert!(Cli::try_parse_from(["lexicon", "affix-test", "--words", "-"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: ExportFormat = FormatArg::Xml.into();
        assert_eq!(format, ExportFormat::Xml);
    }
}
