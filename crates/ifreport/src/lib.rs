//! Snapshot report of the host's network interfaces.
//!
//! This crate enumerates network interfaces over NETLINK_ROUTE and reports,
//! per interface, its name, link state and assigned addresses. Loopback
//! interfaces are always skipped, other interfaces can be excluded by a name
//! pattern, and the report can optionally wait (bounded) for an IPv4 address
//! to show up on every up interface.
//!
//! # Example
//!
//! ```ignore
//! use ifreport::netlink::NetlinkSource;
//! use ifreport::report::{InterfaceReporter, ReportConfig, DEFAULT_EXCLUDE};
//! use regex::Regex;
//!
//! #[tokio::main]
//! async fn main() -> ifreport::Result<()> {
//!     let source = NetlinkSource::new()?;
//!     let reporter = InterfaceReporter::new(&source, &source, ReportConfig::new());
//!
//!     let exclude = Regex::new(DEFAULT_EXCLUDE).expect("valid pattern");
//!     for record in reporter.list(Some(&exclude), Some(true)).await? {
//!         println!("{}: {:?}", record.name, record.addresses);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod netlink;
pub mod output;
pub mod report;

// Re-export common types at crate root for convenience
pub use netlink::{Connection, Error, NetlinkSource, Result};
pub use report::{InterfaceRecord, InterfaceReporter, ReportConfig};
