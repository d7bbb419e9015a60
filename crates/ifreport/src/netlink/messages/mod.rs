//! Strongly-typed netlink message structures.
//!
//! ```ignore
//! use ifreport::netlink::messages::AddressMessage;
//! use ifreport::netlink::FromNetlink;
//!
//! let msg = AddressMessage::from_bytes(&payload)?;
//! println!("{:?} on {}", msg.to_cidr_string(), msg.ifindex());
//! ```

mod address;
mod link;

pub use address::*;
pub use link::*;
