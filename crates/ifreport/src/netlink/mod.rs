//! Minimal async NETLINK_ROUTE client.
//!
//! Only what the interface report needs is implemented here: link dumps,
//! single-link queries and address dumps.
//!
//! ```ignore
//! use ifreport::netlink::Connection;
//!
//! let conn = Connection::new()?;
//!
//! for link in conn.get_links().await? {
//!     println!("{}: {}", link.ifindex(), link.name().unwrap_or("?"));
//! }
//!
//! // Fresh RTM_GETLINK request for a single interface
//! let link = conn.get_link_by_index(2).await?;
//! println!("running: {}", link.is_running());
//! ```

pub mod attr;
mod builder;
pub mod connection;
mod error;
#[cfg(test)]
mod fixtures;
pub mod message;
pub mod messages;
pub mod parse;
mod socket;
mod source;
pub mod types;

pub use builder::MessageBuilder;
pub use connection::Connection;
pub use error::{Error, Result};
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
pub use parse::FromNetlink;
pub use socket::NetlinkSocket;
pub use source::NetlinkSource;
