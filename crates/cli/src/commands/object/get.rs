//! get command - download an object to a local file

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sk_core::{ObjectStore, ObjectStoreClient};

use super::{RegionArg, parse_object};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Object to download (bucket/key)
    pub source: String,

    /// Local file to write; an existing file is overwritten
    pub destination: PathBuf,

    #[command(flatten)]
    pub region: RegionArg,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    bucket: String,
    key: String,
    path: PathBuf,
}

pub async fn execute<S: ObjectStore>(
    args: GetArgs,
    client: &ObjectStoreClient<S>,
    formatter: &Formatter,
) -> ExitCode {
    let source = match parse_object(&args.region, &args.source, formatter) {
        Ok(locator) => locator,
        Err(code) => return code,
    };

    let path = match client.try_read_to_file(&source, &args.destination).await {
        Ok(path) => path,
        Err(e) => {
            formatter.error(&format!("Failed to download {source}: {e}"));
            return ExitCode::from_remote(e.kind);
        }
    };

    if formatter.is_json() {
        formatter.json(&GetOutput {
            bucket: source.bucket,
            key: source.key,
            path,
        });
    } else {
        formatter.success(&format!("Downloaded {source} to {}", path.display()));
    }

    ExitCode::Success
}
