//! OS query seams used by the reporter.

use crate::netlink::Result;
use crate::netlink::types::link::iff;

/// One interface as seen by the enumeration query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntry {
    /// Interface index.
    pub index: u32,
    /// Interface name.
    pub name: String,
    /// Raw interface flags (IFF_*) at enumeration time.
    pub flags: u32,
}

impl InterfaceEntry {
    /// Create a new entry.
    pub fn new(index: u32, name: impl Into<String>, flags: u32) -> Self {
        Self {
            index,
            name: name.into(),
            flags,
        }
    }

    /// Check if the interface is a loopback.
    pub fn is_loopback(&self) -> bool {
        self.flags & iff::LOOPBACK != 0
    }

    /// Check if the interface is administratively up.
    pub fn is_admin_up(&self) -> bool {
        self.flags & iff::UP != 0
    }

    /// Check if the interface was running when enumerated.
    pub fn is_running(&self) -> bool {
        self.flags & iff::RUNNING != 0
    }
}

/// Source of interfaces and their addresses.
#[allow(async_fn_in_trait)]
pub trait InterfaceSource {
    /// List every interface visible to the OS, in OS order.
    async fn interfaces(&self) -> Result<Vec<InterfaceEntry>>;

    /// Fetch the addresses currently bound to an interface, as text.
    ///
    /// Strings are expected in `address/prefix` form; anything else is
    /// dropped by the reporter.
    async fn addresses(&self, iface: &InterfaceEntry) -> Result<Vec<String>>;
}

/// Strategy deciding whether an interface's link is up.
///
/// An error means the state could not be determined; it is never the same
/// as "down".
#[allow(async_fn_in_trait)]
pub trait LinkStatusProvider {
    /// Report whether the link of `iface` is up.
    async fn link_up(&self, iface: &InterfaceEntry) -> Result<bool>;
}

/// Link state taken from the administrative IFF_UP flag of the enumeration
/// snapshot. Needs no extra query, but reports "up" for an unplugged NIC.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminFlag;

impl LinkStatusProvider for AdminFlag {
    async fn link_up(&self, iface: &InterfaceEntry) -> Result<bool> {
        Ok(iface.is_admin_up())
    }
}
