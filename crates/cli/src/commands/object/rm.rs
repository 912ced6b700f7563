//! rm command - delete an object
//!
//! Deleting a key that does not exist succeeds.

use clap::Args;
use sk_core::{ObjectStore, ObjectStoreClient};

use super::{RegionArg, parse_object};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object to delete (bucket/key)
    pub path: String,

    #[command(flatten)]
    pub region: RegionArg,
}

pub async fn execute<S: ObjectStore>(
    args: RmArgs,
    client: &ObjectStoreClient<S>,
    formatter: &Formatter,
) -> ExitCode {
    let locator = match parse_object(&args.region, &args.path, formatter) {
        Ok(locator) => locator,
        Err(code) => return code,
    };

    if let Err(e) = client.try_delete(&locator).await {
        formatter.error(&format!("Failed to delete {locator}: {e}"));
        return ExitCode::from_remote(e.kind);
    }

    if formatter.is_json() {
        formatter.json(&serde_json::json!({
            "bucket": locator.bucket,
            "key": locator.key,
            "deleted": true,
        }));
    } else {
        formatter.success(&format!("Removed {locator}"));
    }

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputConfig;
    use sk_core::InMemoryObjectStore;

    fn args(path: &str) -> RmArgs {
        RmArgs {
            path: path.into(),
            region: RegionArg {
                region: "us-east-1".into(),
            },
        }
    }

    #[tokio::test]
    async fn test_rm_twice_succeeds() {
        let store = InMemoryObjectStore::new();
        store.insert("tmp", "scratch.bin", vec![0u8; 16]);
        let client = ObjectStoreClient::new(store);
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });

        assert_eq!(execute(args("tmp/scratch.bin"), &client, &formatter).await, ExitCode::Success);
        assert!(!client.store().contains("tmp", "scratch.bin"));
        assert_eq!(execute(args("tmp/scratch.bin"), &client, &formatter).await, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_rm_in_missing_bucket_is_not_found() {
        let client = ObjectStoreClient::new(InMemoryObjectStore::new());
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });

        assert_eq!(execute(args("ghost/scratch.bin"), &client, &formatter).await, ExitCode::NotFound);
    }
}
