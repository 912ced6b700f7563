//! object commands - single-object operations against S3
//!
//! Every command takes the region explicitly (or from `AWS_REGION`); it is
//! never inferred from the bucket.

use clap::{Args, Subcommand};
use sk_aws::S3Backend;
use sk_core::{Config, ObjectLocator, ObjectStoreClient};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod cat;
mod get;
mod ls;
mod mv;
mod put;
mod rm;

#[derive(Subcommand, Debug)]
pub enum ObjectCommands {
    /// Download an object to a local file
    Get(get::GetArgs),

    /// Print an object's contents to stdout
    Cat(cat::CatArgs),

    /// Upload a local file
    Put(put::PutArgs),

    /// Move an object (copy, then delete the source)
    Mv(mv::MvArgs),

    /// Delete an object
    Rm(rm::RmArgs),

    /// List one level of a bucket
    Ls(ls::LsArgs),
}

/// Region selection shared by every object command
#[derive(Args, Debug, Clone)]
pub struct RegionArg {
    /// Region the bucket lives in
    #[arg(long, env = "AWS_REGION")]
    pub region: String,
}

pub async fn execute(cmd: ObjectCommands, config: &Config, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let client = store_client(config);

    match cmd {
        ObjectCommands::Get(args) => get::execute(args, &client, &formatter).await,
        ObjectCommands::Cat(args) => cat::execute(args, &client, &formatter).await,
        ObjectCommands::Put(args) => put::execute(args, &client, &formatter).await,
        ObjectCommands::Mv(args) => mv::execute(args, &client, &formatter).await,
        ObjectCommands::Rm(args) => rm::execute(args, &client, &formatter).await,
        ObjectCommands::Ls(args) => ls::execute(args, &client, &formatter).await,
    }
}

fn store_client(config: &Config) -> ObjectStoreClient<S3Backend> {
    let client = ObjectStoreClient::new(S3Backend::new(config.aws.clone()));
    match config.client.timeout() {
        Some(timeout) => client.with_timeout(timeout),
        None => client,
    }
}

/// Parse `bucket/key`, reporting a usage error on failure
fn parse_locator(
    region: &RegionArg,
    path: &str,
    formatter: &Formatter,
) -> Result<ObjectLocator, ExitCode> {
    ObjectLocator::parse(region.region.as_str(), path).map_err(|e| {
        formatter.error(&e.to_string());
        ExitCode::from(&e)
    })
}

/// Like [`parse_locator`], but an object command needs a key
fn parse_object(
    region: &RegionArg,
    path: &str,
    formatter: &Formatter,
) -> Result<ObjectLocator, ExitCode> {
    let locator = parse_locator(region, path, formatter)?;
    if locator.is_prefix() {
        formatter.error(&format!("'{path}' does not name an object (expected bucket/key)"));
        return Err(ExitCode::UsageError);
    }
    Ok(locator)
}
