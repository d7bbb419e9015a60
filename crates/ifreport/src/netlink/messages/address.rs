//! RTM_NEWADDR replies.

use std::net::IpAddr;

use crate::netlink::parse::{
    FromNetlink, PResult, cut, parse_attr, parse_ip_addr, take_bytes,
};
use crate::netlink::types::addr::{IfAddrMsg, ifa};

/// One address assignment.
#[derive(Debug, Clone, Default)]
pub struct AddressMessage {
    pub(crate) header: IfAddrMsg,
    /// IFA_ADDRESS; the peer on point-to-point links.
    pub(crate) address: Option<IpAddr>,
    /// IFA_LOCAL; the interface's own address when present.
    pub(crate) local: Option<IpAddr>,
}

impl AddressMessage {
    pub fn prefix_len(&self) -> u8 {
        self.header.ifa_prefixlen
    }

    pub fn ifindex(&self) -> u32 {
        self.header.ifa_index
    }

    /// The interface's own address: IFA_LOCAL, else IFA_ADDRESS.
    pub fn primary_address(&self) -> Option<&IpAddr> {
        self.local.as_ref().or(self.address.as_ref())
    }

    /// `address/prefix`, e.g. `10.0.0.5/24` or `fe80::1/64`.
    pub fn to_cidr_string(&self) -> Option<String> {
        let addr = self.primary_address()?;
        Some(format!("{addr}/{}", self.prefix_len()))
    }
}

impl FromNetlink for AddressMessage {
    fn write_dump_header(buf: &mut Vec<u8>) {
        buf.extend_from_slice(IfAddrMsg::new().as_bytes());
    }

    fn parse(input: &mut &[u8]) -> PResult<Self> {
        if input.len() < IfAddrMsg::SIZE {
            return Err(cut());
        }

        let header = IfAddrMsg::from_bytes(take_bytes(input, IfAddrMsg::SIZE)?).map_err(|_| cut())?;
        let family = header.ifa_family;

        let mut msg = AddressMessage {
            header,
            ..Default::default()
        };

        while let Some((kind, data)) = parse_attr(input)? {
            match kind {
                ifa::ADDRESS => msg.address = parse_ip_addr(data, family).ok(),
                ifa::LOCAL => msg.local = parse_ip_addr(data, family).ok(),
                _ => {}
            }
        }

        Ok(msg)
    }
}
