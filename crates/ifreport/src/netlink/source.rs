//! Netlink-backed interface source.

use super::connection::Connection;
use super::error::Result;
use crate::report::{InterfaceEntry, InterfaceSource, LinkStatusProvider};

/// Interface source backed by a NETLINK_ROUTE connection.
///
/// As a [`LinkStatusProvider`] it issues a fresh RTM_GETLINK per interface
/// and reports the IFF_RUNNING flag, i.e. link-layer carrier rather than
/// administrative state.
pub struct NetlinkSource {
    conn: Connection,
}

impl NetlinkSource {
    /// Open a routing socket.
    pub fn new() -> Result<Self> {
        Ok(Self::with_connection(Connection::new()?))
    }

    /// Wrap an existing connection.
    pub fn with_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl InterfaceSource for NetlinkSource {
    async fn interfaces(&self) -> Result<Vec<InterfaceEntry>> {
        let links = self.conn.get_links().await?;

        Ok(links
            .into_iter()
            .filter_map(|link| match link.name() {
                Some(name) => Some(InterfaceEntry::new(link.ifindex(), name, link.flags())),
                None => {
                    tracing::trace!(index = link.ifindex(), "link without a name, skipping");
                    None
                }
            })
            .collect())
    }

    async fn addresses(&self, iface: &InterfaceEntry) -> Result<Vec<String>> {
        let addresses = self.conn.get_addresses_by_index(iface.index).await?;

        Ok(addresses
            .iter()
            .filter_map(|addr| addr.to_cidr_string())
            .collect())
    }
}

impl LinkStatusProvider for NetlinkSource {
    async fn link_up(&self, iface: &InterfaceEntry) -> Result<bool> {
        let link = self.conn.get_link_by_index(iface.index).await?;

        tracing::trace!(name = %iface.name, flags = link.flags(), "link state");

        Ok(link.is_running())
    }
}
