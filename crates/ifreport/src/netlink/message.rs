//! nlmsghdr framing: header view, message types, flags and a buffer walker.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::error::{Error, Result};

/// Round `len` up to the 4-byte message boundary.
#[inline]
pub const fn nlmsg_align(len: usize) -> usize {
    (len + 3) & !3
}

pub const NLMSG_HDRLEN: usize = nlmsg_align(size_of::<NlMsgHdr>());

/// `struct nlmsghdr`, host byte order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlMsgHdr {
    pub nlmsg_len: u32,
    pub nlmsg_type: u16,
    pub nlmsg_flags: u16,
    pub nlmsg_seq: u32,
    pub nlmsg_pid: u32,
}

impl NlMsgHdr {
    /// Header for a message with no payload yet; seq and pid are stamped later.
    pub fn new(msg_type: u16, flags: u16) -> Self {
        Self {
            nlmsg_len: NLMSG_HDRLEN as u32,
            nlmsg_type: msg_type,
            nlmsg_flags: flags,
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.nlmsg_type == NlMsgType::ERROR
    }

    pub fn is_done(&self) -> bool {
        self.nlmsg_type == NlMsgType::DONE
    }

    pub fn as_bytes(&self) -> &[u8] {
        IntoBytes::as_bytes(self)
    }

    /// Borrow the header at the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        view_prefix(data)
    }
}

/// Message types the client sends or expects back.
pub struct NlMsgType;

impl NlMsgType {
    pub const ERROR: u16 = 2;
    pub const DONE: u16 = 3;

    pub const RTM_NEWLINK: u16 = 16;
    pub const RTM_GETLINK: u16 = 18;
    pub const RTM_NEWADDR: u16 = 20;
    pub const RTM_GETADDR: u16 = 22;
}

pub const NLM_F_REQUEST: u16 = 0x01;
pub const NLM_F_MULTI: u16 = 0x02;
/// Set by the kernel when the table changed mid-dump.
pub const NLM_F_DUMP_INTR: u16 = 0x10;
/// NLM_F_ROOT | NLM_F_MATCH.
pub const NLM_F_DUMP: u16 = 0x300;

/// Walks the messages packed into one receive buffer.
///
/// A header whose length is out of range yields one error and ends the walk.
pub struct MessageIter<'a> {
    rest: &'a [u8],
}

impl<'a> MessageIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { rest: data }
    }
}

impl<'a> Iterator for MessageIter<'a> {
    type Item = Result<(&'a NlMsgHdr, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() < NLMSG_HDRLEN {
            return None;
        }

        let header = match NlMsgHdr::from_bytes(self.rest) {
            Ok(h) => h,
            Err(e) => return Some(Err(e)),
        };

        let len = header.nlmsg_len as usize;
        if !(NLMSG_HDRLEN..=self.rest.len()).contains(&len) {
            self.rest = &[];
            return Some(Err(Error::InvalidMessage(format!(
                "message length {len} out of range"
            ))));
        }

        let payload = &self.rest[NLMSG_HDRLEN..len];
        let next = nlmsg_align(len).min(self.rest.len());
        self.rest = &self.rest[next..];

        Some(Ok((header, payload)))
    }
}

/// Payload of an NLMSG_ERROR reply. A zero code is an ACK.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
pub struct NlMsgError {
    pub error: i32,
    /// Header of the request being answered.
    pub msg: NlMsgHdr,
}

impl NlMsgError {
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        view_prefix(data)
    }

    pub fn is_ack(&self) -> bool {
        self.error == 0
    }
}

fn view_prefix<T: FromBytes + KnownLayout + Immutable>(data: &[u8]) -> Result<&T> {
    T::ref_from_prefix(data)
        .map(|(view, _)| view)
        .map_err(|_| Error::Truncated {
            expected: size_of::<T>(),
            actual: data.len(),
        })
}
