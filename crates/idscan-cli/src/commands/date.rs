//! Date command - normalize a recognized date.

use clap::Args;
use console::style;

use idscan_core::{is_valid_date, normalize_date};

/// Arguments for the date command.
#[derive(Args)]
pub struct DateArgs {
    /// Date as recognized, e.g. "13/05/1990" or "5-3-90"
    raw: String,
}

pub async fn run(args: DateArgs) -> anyhow::Result<()> {
    let normalized = normalize_date(&args.raw);
    println!("{}", normalized);

    if is_valid_date(&normalized) {
        eprintln!("{} valid calendar date", style("✓").green());
    } else {
        eprintln!("{} not a valid MM/DD/YYYY date", style("⚠").yellow());
    }

    Ok(())
}
