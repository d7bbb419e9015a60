//! RTM_NEWLINK replies.

use crate::netlink::parse::{
    FromNetlink, PResult, cut, parse_attr, parse_string_from_bytes, take_bytes,
};
use crate::netlink::types::link::{IfInfoMsg, iff, ifla};

/// One link as reported by the kernel. Attributes the report never reads
/// are skipped while parsing.
#[derive(Debug, Clone, Default)]
pub struct LinkMessage {
    pub(crate) header: IfInfoMsg,
    pub(crate) name: Option<String>,
}

impl LinkMessage {
    pub fn ifindex(&self) -> u32 {
        self.header.ifi_index as u32
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw IFF_* bits.
    pub fn flags(&self) -> u32 {
        self.header.ifi_flags
    }

    fn has(&self, flag: u32) -> bool {
        self.flags() & flag != 0
    }

    /// Up and with carrier.
    pub fn is_running(&self) -> bool {
        self.has(iff::RUNNING)
    }

    pub fn is_loopback(&self) -> bool {
        self.has(iff::LOOPBACK)
    }
}

impl FromNetlink for LinkMessage {
    fn write_dump_header(buf: &mut Vec<u8>) {
        buf.extend_from_slice(IfInfoMsg::new().as_bytes());
    }

    fn parse(input: &mut &[u8]) -> PResult<Self> {
        if input.len() < IfInfoMsg::SIZE {
            return Err(cut());
        }

        let header = IfInfoMsg::from_bytes(take_bytes(input, IfInfoMsg::SIZE)?).map_err(|_| cut())?;

        let mut msg = LinkMessage {
            header,
            ..Default::default()
        };

        while let Some((kind, data)) = parse_attr(input)? {
            if kind == ifla::IFNAME {
                msg.name = Some(parse_string_from_bytes(data));
            }
        }

        Ok(msg)
    }
}
