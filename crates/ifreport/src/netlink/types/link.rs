//! `ifinfomsg` and link attributes.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::netlink::error::Result;

/// `struct ifinfomsg`. A zero index in a dump request means "all links".
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IfInfoMsg {
    pub ifi_family: u8,
    pub ifi_pad: u8,
    /// ARPHRD_* hardware type.
    pub ifi_type: u16,
    pub ifi_index: i32,
    /// IFF_* bits, see [`iff`].
    pub ifi_flags: u32,
    pub ifi_change: u32,
}

impl IfInfoMsg {
    pub const SIZE: usize = size_of::<Self>();

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(mut self, index: i32) -> Self {
        self.ifi_index = index;
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        IntoBytes::as_bytes(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        super::read_prefix(data)
    }
}

/// IFLA_* attribute kinds read from link replies.
pub mod ifla {
    pub const IFNAME: u16 = 3;
}

/// IFF_* device flags.
pub mod iff {
    pub const UP: u32 = 0x1;
    pub const LOOPBACK: u32 = 0x8;
    /// Carrier present; what `ip link` shows as LOWER_UP on most drivers.
    pub const RUNNING: u32 = 0x40;
}
