//! CLI command definitions and execution
//!
//! Commands are grouped by the service they talk to. Every command returns
//! an [`ExitCode`]; nothing below this module exits the process.

use clap::{Parser, Subcommand};
use sk_core::{Config, ConfigManager};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod config;
mod object;
mod secret;

/// sk - secrets and objects from the shell
///
/// Fetches validated secrets from AWS Secrets Manager and reads, writes,
/// moves, deletes and lists S3 objects.
#[derive(Parser, Debug)]
#[command(name = "sk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and validate secrets
    #[command(subcommand)]
    Secret(secret::SecretCommands),

    /// Read, write, move, delete and list objects
    #[command(subcommand)]
    Object(object::ObjectCommands),

    /// Inspect the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let flags = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Completions(args) => completions::execute(args),
        Commands::Config(cmd) => config::execute(cmd, flags),
        Commands::Secret(cmd) => match load_config(flags) {
            Ok((config, output)) => secret::execute(cmd, &config, output).await,
            Err(code) => code,
        },
        Commands::Object(cmd) => match load_config(flags) {
            Ok((config, output)) => object::execute(cmd, &config, output).await,
            Err(code) => code,
        },
    }
}

/// Load the configuration file and fold its defaults into the output flags
///
/// Flags given on the command line always win over `[defaults]`.
fn load_config(flags: OutputConfig) -> Result<(Config, OutputConfig), ExitCode> {
    let config = ConfigManager::new()
        .and_then(|manager| manager.load())
        .map_err(|e| {
            Formatter::new(flags.clone()).error(&format!("Failed to load configuration: {e}"));
            ExitCode::from(&e)
        })?;

    let output = merge_defaults(flags, &config);
    Ok((config, output))
}

fn merge_defaults(flags: OutputConfig, config: &Config) -> OutputConfig {
    let no_color = flags.no_color
        || match config.defaults.color.as_str() {
            "never" => true,
            "always" => false,
            _ => !console::colors_enabled(),
        };

    OutputConfig {
        json: flags.json || config.defaults.output == "json",
        no_color,
        quiet: flags.quiet,
    }
}
