//! mv command - move an object within a region
//!
//! The move is a copy followed by a delete. When the delete fails the object
//! exists at both locations and the command exits with `Duplicated`.

use clap::Args;
use serde::Serialize;
use sk_core::{ObjectStore, ObjectStoreClient, TransferOutcome};

use super::{RegionArg, parse_object};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct MvArgs {
    /// Object to move (bucket/key)
    pub source: String,

    /// New location (bucket/key)
    pub destination: String,

    #[command(flatten)]
    pub region: RegionArg,
}

#[derive(Debug, Serialize)]
struct MvOutput {
    source: String,
    destination: String,
    status: &'static str,
}

pub async fn execute<S: ObjectStore>(
    args: MvArgs,
    client: &ObjectStoreClient<S>,
    formatter: &Formatter,
) -> ExitCode {
    let (source, destination) = match (
        parse_object(&args.region, &args.source, formatter),
        parse_object(&args.region, &args.destination, formatter),
    ) {
        (Ok(source), Ok(destination)) => (source, destination),
        (Err(code), _) | (_, Err(code)) => return code,
    };

    if source == destination {
        formatter.error("Source and destination are the same object");
        return ExitCode::UsageError;
    }

    let (status, code) = match client.copy_and_delete(&source, &destination).await {
        TransferOutcome::Moved => {
            if !formatter.is_json() {
                formatter.success(&format!("Moved {source} to {destination}"));
            }
            ("moved", ExitCode::Success)
        }
        TransferOutcome::CopyFailed(e) => {
            formatter.error(&format!("Failed to copy {source} to {destination}: {e}"));
            ("copy_failed", ExitCode::from_remote(e.kind))
        }
        TransferOutcome::Duplicated(e) => {
            formatter.error(&format!(
                "Copied to {destination} but could not delete {source}: {e}"
            ));
            ("duplicated", ExitCode::Duplicated)
        }
    };

    if formatter.is_json() {
        formatter.json(&MvOutput {
            source: source.bucket_key(),
            destination: destination.bucket_key(),
            status,
        });
    }

    code
}
