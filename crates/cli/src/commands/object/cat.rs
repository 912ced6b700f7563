//! cat command - print an object's contents to stdout
//!
//! Bytes are written unmodified so binary objects can be piped.

use std::io::{self, Write};

use clap::Args;
use sk_core::{ObjectStore, ObjectStoreClient};

use super::{RegionArg, parse_object};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct CatArgs {
    /// Object to print (bucket/key)
    pub path: String,

    #[command(flatten)]
    pub region: RegionArg,
}

pub async fn execute<S: ObjectStore>(
    args: CatArgs,
    client: &ObjectStoreClient<S>,
    formatter: &Formatter,
) -> ExitCode {
    let locator = match parse_object(&args.region, &args.path, formatter) {
        Ok(locator) => locator,
        Err(code) => return code,
    };

    // The fallible variant keeps "empty object" and "fetch failed" apart
    let buffer = match client.try_read_to_buffer(&locator).await {
        Ok(buffer) => buffer,
        Err(e) => {
            formatter.error(&format!("Failed to read {locator}: {e}"));
            return ExitCode::from_remote(e.kind);
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(buffer.get_ref()).and_then(|()| stdout.flush()) {
        formatter.error(&format!("Failed to write to stdout: {e}"));
        return ExitCode::GeneralError;
    }

    ExitCode::Success
}
