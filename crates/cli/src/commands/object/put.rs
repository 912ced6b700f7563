//! put command - upload a local file

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sk_core::{ObjectStore, ObjectStoreClient};

use super::{RegionArg, parse_locator};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub source: PathBuf,

    /// Destination (bucket/key, or bucket/prefix/ to keep the file name)
    pub destination: String,

    #[command(flatten)]
    pub region: RegionArg,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    bucket: String,
    key: String,
    size_bytes: u64,
}

pub async fn execute<S: ObjectStore>(
    args: PutArgs,
    client: &ObjectStoreClient<S>,
    formatter: &Formatter,
) -> ExitCode {
    if !args.source.is_file() {
        formatter.error(&format!("{} is not a readable file", args.source.display()));
        return ExitCode::UsageError;
    }

    let mut destination = match parse_locator(&args.region, &args.destination, formatter) {
        Ok(locator) => locator,
        Err(code) => return code,
    };

    if destination.is_prefix() {
        let Some(name) = args.source.file_name() else {
            formatter.error(&format!(
                "Cannot derive an object key from {}",
                args.source.display()
            ));
            return ExitCode::UsageError;
        };
        destination.key = format!("{}{}", destination.key, name.to_string_lossy());
    }

    if let Err(e) = client.try_write(&destination, &args.source).await {
        formatter.error(&format!(
            "Failed to upload {} to {destination}: {e}",
            args.source.display()
        ));
        return ExitCode::from_remote(e.kind);
    }

    if formatter.is_json() {
        let size_bytes = std::fs::metadata(&args.source).map(|m| m.len()).unwrap_or(0);
        formatter.json(&PutOutput {
            bucket: destination.bucket,
            key: destination.key,
            size_bytes,
        });
    } else {
        formatter.success(&format!("Uploaded {} to {destination}", args.source.display()));
    }

    ExitCode::Success
}
