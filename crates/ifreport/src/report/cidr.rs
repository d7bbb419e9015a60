//! Filtering of raw address strings.

use ipnetwork::IpNetwork;

/// Parse `address/prefix`. A bare address is rejected.
pub fn parse_cidr(s: &str) -> Option<IpNetwork> {
    if !s.contains('/') {
        return None;
    }
    s.parse().ok()
}

/// Addresses accepted from one gather.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSet {
    /// Accepted addresses, in the order they were reported.
    pub addresses: Vec<String>,
    /// Whether any accepted address is IPv4.
    pub has_ipv4: bool,
}

impl AddressSet {
    /// Keep the strings that parse as CIDR; silently drop the rest.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();

        for addr in raw {
            let addr = addr.into();
            match parse_cidr(&addr) {
                Some(network) => {
                    set.has_ipv4 |= network.is_ipv4();
                    set.addresses.push(addr);
                }
                None => tracing::trace!(address = %addr, "dropping unparsable address"),
            }
        }

        set
    }
}
