//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use pulsecheck_extractor::ExtractorConfig;
use pulsecheck_llm::ProviderKind;
use std::path::PathBuf;

/// Pulsecheck - Project-health reports from issue-tracker and wiki exports.
#[derive(Debug, Parser)]
#[command(name = "pulsecheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API key for the oracle provider
    #[arg(long, env = "PULSECHECK_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze data sources and print a project-health report
    Analyze(AnalyzeArgs),

    /// Preview how a file would be chunked
    Chunk(ChunkArgs),

    /// Recover the JSON object from a saved oracle response
    ExtractJson(ExtractJsonArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Data source as LABEL=PATH (repeatable)
    #[arg(
        short,
        long = "source",
        value_name = "LABEL=PATH",
        required = true,
        value_parser = parse_source_arg
    )]
    pub sources: Vec<SourceArg>,

    /// Oracle provider (overrides the config file)
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model identifier (overrides the config file)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Provider endpoint (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Extraction preset (replaces the [extractor] section)
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// A labelled source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArg {
    /// Source label, e.g. "Jira"
    pub label: String,
    /// File holding the exported text
    pub path: PathBuf,
}

/// Parse a `LABEL=PATH` source argument.
pub fn parse_source_arg(value: &str) -> Result<SourceArg, String> {
    let (label, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=PATH, got '{}'", value))?;

    let label = label.trim();
    if label.is_empty() {
        return Err("source label must not be empty".to_string());
    }
    if path.is_empty() {
        return Err(format!("source '{}' has no path", label));
    }

    Ok(SourceArg {
        label: label.to_string(),
        path: PathBuf::from(path),
    })
}

/// Arguments for the chunk command.
#[derive(Debug, Parser)]
pub struct ChunkArgs {
    /// Text file to chunk
    #[arg(long)]
    pub file: PathBuf,

    /// Maximum chunk size in characters (defaults to the configured size)
    #[arg(short, long)]
    pub max_size: Option<usize>,
}

/// Arguments for the extract-json command.
#[derive(Debug, Parser)]
pub struct ExtractJsonArgs {
    /// File holding a raw oracle response
    #[arg(long)]
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// Local Ollama server
    Ollama,
    /// OpenAI-compatible API
    Openai,
}

/// Extraction preset argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Small chunks, short timeouts, capped chunk count
    Aggressive,
    /// Large chunks, long timeouts
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ProviderArg> for ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Ollama => ProviderKind::Ollama,
            ProviderArg::Openai => ProviderKind::OpenAi,
        }
    }
}

impl From<PresetArg> for ExtractorConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => ExtractorConfig::default(),
            PresetArg::Aggressive => ExtractorConfig::aggressive(),
            PresetArg::Lenient => ExtractorConfig::lenient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "pulsecheck",
            "analyze",
            "--source",
            "Jira=jira.txt",
            "-s",
            "Confluence=wiki/export.txt",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.sources.len(), 2);
                assert_eq!(args.sources[0].label, "Jira");
                assert_eq!(args.sources[1].path, PathBuf::from("wiki/export.txt"));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_requires_a_source() {
        assert!(Cli::try_parse_from(["pulsecheck", "analyze"]).is_err());
    }

    #[test]
    fn test_source_arg_parsing() {
        let arg = parse_source_arg("Jira=/tmp/a=b.txt").unwrap();
        assert_eq!(arg.label, "Jira");
        assert_eq!(arg.path, PathBuf::from("/tmp/a=b.txt"));

        assert!(parse_source_arg("no-separator").is_err());
        assert!(parse_source_arg("=path.txt").is_err());
        assert!(parse_source_arg("Jira=").is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "pulsecheck",
            "chunk",
            "--file",
            "notes.txt",
            "--max-size",
            "500",
            "--format",
            "json",
            "--verbose",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Chunk(args) => assert_eq!(args.max_size, Some(500)),
            _ => panic!("Expected Chunk command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["pulsecheck", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_provider_and_preset_conversion() {
        let kind: ProviderKind = ProviderArg::Openai.into();
        assert_eq!(kind, ProviderKind::OpenAi);

        let config: ExtractorConfig = PresetArg::Aggressive.into();
        assert_eq!(config, ExtractorConfig::aggressive());
    }
}
