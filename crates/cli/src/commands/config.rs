//! config commands - show the effective configuration and where it lives

use clap::Subcommand;
use serde::Serialize;
use sk_core::{Config, ConfigManager};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

const MASK: &str = "********";

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (secrets masked)
    Show,

    /// Print the path of the configuration file
    Path,
}

#[derive(Debug, Serialize)]
struct PathOutput {
    path: String,
    exists: bool,
}

pub fn execute(cmd: ConfigCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ConfigManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    match cmd {
        ConfigCommands::Show => show(&manager, &formatter),
        ConfigCommands::Path => {
            let path = manager.config_path();
            if formatter.is_json() {
                formatter.json(&PathOutput {
                    path: path.display().to_string(),
                    exists: path.exists(),
                });
            } else {
                formatter.println(&path.display().to_string());
            }
            ExitCode::Success
        }
    }
}

fn show(manager: &ConfigManager, formatter: &Formatter) -> ExitCode {
    let config = match manager.load() {
        Ok(config) => redacted(config),
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from(&e);
        }
    };

    if formatter.is_json() {
        formatter.json(&config);
        return ExitCode::Success;
    }

    match toml::to_string_pretty(&config) {
        Ok(text) => {
            formatter.println(text.trim_end());
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to render configuration: {e}"));
            ExitCode::GeneralError
        }
    }
}

fn redacted(mut config: Config) -> Config {
    if config.aws.secret_key.is_some() {
        config.aws.secret_key = Some(MASK.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_masks_secret_key_only() {
        let mut config = Config::default();
        config.aws.access_key = Some("AKIAEXAMPLE".into());
        config.aws.secret_key = Some("wJalrXUtnFEMI".into());

        let shown = redacted(config);
        assert_eq!(shown.aws.access_key.as_deref(), Some("AKIAEXAMPLE"));
        assert_eq!(shown.aws.secret_key.as_deref(), Some(MASK));
    }

    #[test]
    fn test_show_invalid_config_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "schema_version = 1\n\n[client]\ntimeout_ms = 0\n").unwrap();

        let manager = ConfigManager::with_path(path);
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });
        assert_eq!(show(&manager, &formatter), ExitCode::UsageError);
    }

    #[test]
    fn test_show_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.toml"));
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });
        assert_eq!(show(&manager, &formatter), ExitCode::Success);
    }
}
