//! secret commands - fetch and validate key/value secrets
//!
//! `get` resolves a secret from Secrets Manager; `validate` runs the same
//! payload checks against a local file without touching the network.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use sk_aws::SecretsManagerBackend;
use sk_core::{Config, SecretMap, SecretResolver, parse_and_validate};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

const MASK: &str = "********";

#[derive(Subcommand, Debug)]
pub enum SecretCommands {
    /// Fetch a secret and print its validated keys
    Get(GetArgs),

    /// Validate a secret payload stored in a local file
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Secret name or ARN
    pub id: String,

    /// Region to query instead of the ambient AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// Print secret values instead of masking them
    #[arg(long)]
    pub show_values: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File holding the JSON payload
    pub file: PathBuf,
}

/// Output structure for `secret get` (JSON format)
#[derive(Debug, Serialize)]
struct SecretOutput {
    id: String,
    secrets: BTreeMap<String, String>,
}

/// Output structure for `secret validate` (JSON format)
#[derive(Debug, Serialize)]
struct ValidateOutput {
    valid: bool,
    keys: Vec<String>,
}

pub async fn execute(cmd: SecretCommands, config: &Config, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match cmd {
        SecretCommands::Get(args) => get(args, config, &formatter).await,
        SecretCommands::Validate(args) => validate(args, &formatter),
    }
}

async fn get(args: GetArgs, config: &Config, formatter: &Formatter) -> ExitCode {
    let mut backend = SecretsManagerBackend::new(config.aws.clone());
    if let Some(region) = args.region {
        backend = backend.with_region(region);
    }

    let mut resolver = SecretResolver::new(backend);
    if let Some(timeout) = config.client.timeout() {
        resolver = resolver.with_timeout(timeout);
    }

    let payload = match resolver.try_fetch_secret(&args.id).await {
        Ok(payload) => payload,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_remote(e.kind);
        }
    };

    let secrets = match resolver.parse_and_validate(&payload) {
        Ok(secrets) => secrets,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let output = render(&args.id, &secrets, args.show_values);
    if formatter.is_json() {
        formatter.json(&output);
    } else {
        for (key, value) in &output.secrets {
            formatter.println(&format!("{key} = {value}"));
        }
    }

    ExitCode::Success
}

fn validate(args: ValidateArgs, formatter: &Formatter) -> ExitCode {
    let payload = match std::fs::read_to_string(&args.file) {
        Ok(payload) => payload,
        Err(e) => {
            formatter.error(&format!("Failed to read {}: {e}", args.file.display()));
            return ExitCode::GeneralError;
        }
    };

    match parse_and_validate(&payload) {
        Ok(secrets) => {
            let keys: Vec<String> = secrets.into_keys().collect();
            if formatter.is_json() {
                formatter.json(&ValidateOutput { valid: true, keys });
            } else {
                formatter.success(&format!(
                    "{} is a valid secret payload with {} key(s)",
                    args.file.display(),
                    keys.len()
                ));
                for key in &keys {
                    formatter.println(&format!("  {key}"));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

fn render(id: &str, secrets: &SecretMap, show_values: bool) -> SecretOutput {
    let secrets = secrets
        .iter()
        .map(|(key, value)| {
            let shown = if show_values { value.clone() } else { MASK.to_string() };
            (key.clone(), shown)
        })
        .collect();

    SecretOutput {
        id: id.to_string(),
        secrets,
    }
}
