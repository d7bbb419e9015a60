//! Parsing trait and winnow helpers for typed netlink messages.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use winnow::binary::le_u16;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take;

use super::attr::{NLA_HDRLEN, NLA_TYPE_MASK, nla_align};
use super::error::{Error, Result};

/// Result type for winnow parsers.
pub type PResult<T> = core::result::Result<T, winnow::error::ErrMode<ContextError>>;

/// Trait for types that can be parsed from netlink wire format.
pub trait FromNetlink: Sized {
    /// Parse from a mutable byte slice reference.
    /// The slice is advanced past the consumed bytes.
    fn parse(input: &mut &[u8]) -> PResult<Self>;

    /// Parse from a complete message payload.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse
            .parse(data)
            .map_err(|e| Error::Parse(format!("{}", e)))
    }

    /// Write the fixed header a dump request for this type needs.
    fn write_dump_header(_buf: &mut Vec<u8>) {}
}

/// Take exactly `n` bytes.
pub fn take_bytes<'a>(input: &mut &'a [u8], n: usize) -> PResult<&'a [u8]> {
    take(n).parse_next(input)
}

/// Read a little-endian u16.
fn u16_le(input: &mut &[u8]) -> PResult<u16> {
    le_u16.parse_next(input)
}

/// Cut error for malformed input.
pub(crate) fn cut() -> winnow::error::ErrMode<ContextError> {
    winnow::error::ErrMode::Cut(ContextError::new())
}

/// Parse one attribute and return (type, payload), skipping alignment padding.
///
/// Returns `None` once the remaining input cannot hold another attribute;
/// trailing bytes are consumed so the caller's parse reaches end of input.
pub fn parse_attr<'a>(input: &mut &'a [u8]) -> PResult<Option<(u16, &'a [u8])>> {
    if input.len() < NLA_HDRLEN {
        let rest = input.len();
        take_bytes(input, rest)?;
        return Ok(None);
    }

    let len = u16_le(input)? as usize;
    let kind = u16_le(input)?;

    let payload_len = len.saturating_sub(NLA_HDRLEN);
    if len < NLA_HDRLEN || input.len() < payload_len {
        let rest = input.len();
        take_bytes(input, rest)?;
        return Ok(None);
    }

    let payload = take_bytes(input, payload_len)?;
    let padding = (nla_align(len) - len).min(input.len());
    take_bytes(input, padding)?;

    Ok(Some((kind & NLA_TYPE_MASK, payload)))
}

/// Parse a string from a fixed-size buffer (null-terminated).
pub fn parse_string_from_bytes(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    String::from_utf8_lossy(&data[..end]).into_owned()
}

/// Parse an IP address based on address family.
pub fn parse_ip_addr(data: &[u8], family: u8) -> Result<IpAddr> {
    match i32::from(family) {
        libc::AF_INET => {
            let octets: [u8; 4] = data
                .get(..4)
                .and_then(|b| b.try_into().ok())
                .ok_or(Error::Truncated {
                    expected: 4,
                    actual: data.len(),
                })?;
            Ok(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        libc::AF_INET6 => {
            let octets: [u8; 16] = data
                .get(..16)
                .and_then(|b| b.try_into().ok())
                .ok_or(Error::Truncated {
                    expected: 16,
                    actual: data.len(),
                })?;
            Ok(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => Err(Error::InvalidMessage(format!(
            "unknown address family: {}",
            family
        ))),
    }
}
