//! Analyze command implementation.

use crate::cli::{AnalyzeArgs, SourceArg};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use pulsecheck_domain::DataSource;
use pulsecheck_extractor::ExtractorConfig;
use pulsecheck_llm::OracleConfig;
use pulsecheck_synthesizer::Pipeline;
use std::fs;
use tracing::debug;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let oracle_config = oracle_config(&args, config);
    let extractor_config = args
        .preset
        .map(ExtractorConfig::from)
        .unwrap_or_else(|| config.extractor.clone());

    let sources = read_sources(&args.sources)?;

    debug!(
        "Using {:?} oracle '{}' at {}",
        oracle_config.provider,
        oracle_config.model,
        oracle_config.effective_endpoint()
    );
    let oracle = oracle_config.build()?;
    let pipeline = Pipeline::new(oracle, extractor_config, config.synthesizer.clone())?;

    let analysis = pipeline.analyze(sources).await?;

    println!("{}", formatter.format_analysis(&analysis)?);

    Ok(())
}

/// Oracle configuration with command-line overrides applied
fn oracle_config(args: &AnalyzeArgs, config: &Config) -> OracleConfig {
    let mut oracle = config.oracle.clone();

    if let Some(provider) = args.provider {
        oracle.provider = provider.into();
    }
    if let Some(model) = &args.model {
        oracle.model = model.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        oracle.endpoint = Some(endpoint.clone());
    }

    oracle
}

/// Read every source file, in argument order.
pub fn read_sources(args: &[SourceArg]) -> Result<Vec<DataSource>> {
    args.iter()
        .map(|arg| {
            let text = fs::read_to_string(&arg.path).map_err(|e| {
                CliError::InvalidInput(format!(
                    "cannot read source '{}' from {}: {}",
                    arg.label,
                    arg.path.display(),
                    e
                ))
            })?;
            Ok(DataSource::new(arg.label.clone(), text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{PresetArg, ProviderArg};
    use pulsecheck_llm::ProviderKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            sources: vec![],
            provider: None,
            model: None,
            endpoint: None,
            preset: None,
        }
    }

    #[test]
    fn test_read_sources_keeps_order() {
        let dir = TempDir::new().unwrap();
        let jira = dir.path().join("jira.txt");
        let wiki = dir.path().join("wiki.txt");
        fs::write(&jira, "PROJ-1 done.").unwrap();
        fs::write(&wiki, "Roadmap updated.").unwrap();

        let sources = read_sources(&[
            SourceArg {
                label: "Jira".to_string(),
                path: jira,
            },
            SourceArg {
                label: "Confluence".to_string(),
                path: wiki,
            },
        ])
        .unwrap();

        assert_eq!(sources[0], DataSource::new("Jira", "PROJ-1 done."));
        assert_eq!(sources[1], DataSource::new("Confluence", "Roadmap updated."));
    }

    #[test]
    fn test_missing_source_file_names_the_label() {
        let err = read_sources(&[SourceArg {
            label: "Jira".to_string(),
            path: PathBuf::from("/definitely/not/here.txt"),
        }])
        .unwrap_err();
        assert!(err.to_string().contains("'Jira'"));
    }

    #[test]
    fn test_overrides_win_over_config_file() {
        let mut config = Config::default();
        config.oracle.api_key = Some("sk-env".to_string());

        let mut args = args();
        args.provider = Some(ProviderArg::Openai);
        args.model = Some("gpt-4o-mini".to_string());
        args.endpoint = Some("http://proxy:8000/v1".to_string());
        args.preset = Some(PresetArg::Lenient);

        let oracle = oracle_config(&args, &config);
        assert_eq!(oracle.provider, ProviderKind::OpenAi);
        assert_eq!(oracle.model, "gpt-4o-mini");
        assert_eq!(oracle.effective_endpoint(), "http://proxy:8000/v1");
        assert_eq!(oracle.api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = Config::default();
        let oracle = oracle_config(&args(), &config);
        assert_eq!(oracle.model, config.oracle.model);
        assert_eq!(oracle.endpoint, None);
    }
}
