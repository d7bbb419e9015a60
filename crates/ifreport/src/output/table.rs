//! Human-readable table output.

use std::io::Write;

use crate::report::InterfaceRecord;

/// Minimum column width.
const MIN_WIDTH: usize = 8;

/// Padding added to the widest cell of a column.
const PADDING: usize = 8;

/// Placeholder for an interface without addresses.
const NO_ADDRESSES: &str = "--";

/// Format the address list as `a, b` or `--` when empty.
pub fn format_addresses(addresses: &[String]) -> String {
    if addresses.is_empty() {
        NO_ADDRESSES.to_string()
    } else {
        addresses.join(", ")
    }
}

/// Format one record as a tab-separated row: `name\tup|down\taddresses`.
pub fn format_row(record: &InterfaceRecord) -> String {
    format!(
        "{}\t{}\t{}",
        record.name,
        record.link_state(),
        format_addresses(&record.addresses)
    )
}

/// Align tab-separated rows into left-aligned columns.
///
/// Each column is as wide as its widest cell plus padding (never below the
/// minimum width). The last cell of a row is written as is, so lines carry
/// no trailing padding; a tabwriter fed `a\tb\tc\t` would pad that column
/// too.
pub fn align(rows: &[String]) -> Vec<String> {
    let cells: Vec<Vec<&str>> = rows.iter().map(|r| r.split('\t').collect()).collect();

    let mut widths: Vec<usize> = Vec::new();
    for row in &cells {
        let Some((_, padded)) = row.split_last() else {
            continue;
        };
        for (i, cell) in padded.iter().enumerate() {
            let width = (cell.chars().count() + PADDING).max(MIN_WIDTH);
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    cells
        .iter()
        .map(|row| {
            let mut line = String::new();
            let last = row.len().saturating_sub(1);
            for (i, cell) in row.iter().enumerate() {
                if i == last {
                    line.push_str(cell);
                } else {
                    line.push_str(&format!("{:<width$}", cell, width = widths[i]));
                }
            }
            line
        })
        .collect()
}

/// Write the records as an aligned table, one line per interface.
pub fn print_table<W: Write>(w: &mut W, records: &[InterfaceRecord]) -> std::io::Result<()> {
    let rows: Vec<String> = records.iter().map(format_row).collect();
    for line in align(&rows) {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}
