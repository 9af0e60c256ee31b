//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
            if let Err(e) = config.validate() {
                eprintln!("{}", formatter.warning(&e.to_string()));
            }
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to(path)?;
            println!("{}", formatter.success(&format!("Wrote default configuration to {}", path.display())));
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn init(path: &Path, force: bool) -> Result<()> {
        let formatter = Formatter::new(OutputFormat::Table, false);
        execute_config(
            ConfigArgs {
                action: ConfigAction::Init { force },
            },
            &Config::default(),
            path,
            &formatter,
        )
    }

    #[test]
    fn test_init_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init(&path, false).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(matches!(init(&path, false), Err(CliError::Config(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        init(&path, true).unwrap();
        assert!(Config::load_from(&path).is_ok());
    }
}
