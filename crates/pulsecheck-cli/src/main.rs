//! Pulsecheck CLI - Project-health reports from issue-tracker and wiki exports.

use clap::Parser;
use pulsecheck_cli::commands;
use pulsecheck_cli::config::OutputFormat;
use pulsecheck_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let no_color = cli.no_color;
    if let Err(e) = run(cli).await {
        let formatter = Formatter::new(OutputFormat::Table, !no_color);
        eprintln!("{}", formatter.failure(&e));
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins unless `--verbose` is given
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> pulsecheck_cli::Result<()> {
    let path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&path)?;

    // Credentials come from the flag or environment only
    if let Some(api_key) = cli.api_key {
        config.oracle.api_key = Some(api_key);
    }

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Analyze(args) => {
            commands::execute_analyze(args, &config, &formatter).await?;
        }
        Command::Chunk(args) => {
            commands::execute_chunk(args, &config, &formatter)?;
        }
        Command::ExtractJson(args) => {
            commands::execute_extract_json(args, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &path, &formatter)?;
        }
    }

    Ok(())
}
