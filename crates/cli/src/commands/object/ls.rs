//! ls command - list one level of a bucket
//!
//! Objects directly under the prefix are listed with their size and
//! modification time; deeper levels are shown as `PRE` rows.

use clap::Args;
use comfy_table::{Cell, CellAlignment, Table, presets};
use sk_core::{ObjectListing, ObjectStore, ObjectStoreClient};

use super::{RegionArg, parse_locator};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Bucket, optionally followed by a key prefix (bucket[/prefix])
    pub path: String,

    #[command(flatten)]
    pub region: RegionArg,
}

pub async fn execute<S: ObjectStore>(
    args: LsArgs,
    client: &ObjectStoreClient<S>,
    formatter: &Formatter,
) -> ExitCode {
    let prefix = match parse_locator(&args.region, &args.path, formatter) {
        Ok(locator) => locator,
        Err(code) => return code,
    };

    let listing = match client.try_list(&prefix).await {
        Ok(listing) => listing,
        Err(e) => {
            formatter.error(&format!("Failed to list {prefix}: {e}"));
            return ExitCode::from_remote(e.kind);
        }
    };

    if formatter.is_json() {
        formatter.json(&listing);
        return ExitCode::Success;
    }

    if !listing.objects.is_empty() || !listing.prefixes.is_empty() {
        formatter.println(&listing_table(&listing).to_string());
    }
    if listing.truncated {
        formatter.warning("Listing truncated; only the first page is shown");
    }

    ExitCode::Success
}

fn listing_table(listing: &ObjectListing) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_header(vec!["Modified", "Size", "Key"]);

    for prefix in &listing.prefixes {
        table.add_row(vec![
            Cell::new(""),
            Cell::new("PRE").set_alignment(CellAlignment::Right),
            Cell::new(prefix),
        ]);
    }

    for object in &listing.objects {
        let modified = object
            .last_modified
            .map(|ts| ts.strftime("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(modified),
            Cell::new(&object.size_human).set_alignment(CellAlignment::Right),
            Cell::new(&object.key),
        ]);
    }

    table
}
