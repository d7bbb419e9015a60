//! Rendering of interface records as a table or JSON.

mod json;
mod table;

pub use json::JsonOutput;
pub use table::{align, format_addresses, format_row, print_table};

use std::io::Write;

use crate::netlink::Result;
use crate::report::InterfaceRecord;

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Pretty print (for JSON).
    pub pretty: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned human-readable table.
    Table,
    /// JSON array of records.
    #[default]
    Json,
}

/// Print records in the given format.
pub fn print<W: Write>(
    w: &mut W,
    records: &[InterfaceRecord],
    format: OutputFormat,
    opts: &OutputOptions,
) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(w, records)?,
        OutputFormat::Json => JsonOutput::new(w).pretty(opts.pretty).write(records)?,
    }
    Ok(())
}
