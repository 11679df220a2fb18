//! Vendors command - list supported vendors.

use anyhow::Result;
use multiweather_vendors::VendorRegistry;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the vendors command.
pub fn run(cli: &Cli) -> Result<()> {
    info!("Listing vendors");

    let vendors = VendorRegistry::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_vendors_header());
            println!("{}", "─".repeat(78));

            for desc in vendors {
                println!("{}", formatter.format_vendor_line(desc));
            }

            println!();
            println!("Total: {} vendors", VendorRegistry::count());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_vendors(vendors)?);
        }
    }

    Ok(())
}
