//! Request construction.

use zerocopy::{Immutable, IntoBytes};

use super::message::{NLMSG_HDRLEN, NlMsgHdr, nlmsg_align};

/// A netlink request under construction: header, then fixed-size bodies.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    buf: Vec<u8>,
}

impl MessageBuilder {
    /// Start a request of `msg_type` with the given NLM_F_* flags.
    pub fn new(msg_type: u16, flags: u16) -> Self {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(NlMsgHdr::new(msg_type, flags).as_bytes());
        buf.resize(NLMSG_HDRLEN, 0);
        Self { buf }
    }

    /// Current length in bytes, header included.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True while nothing follows the header.
    pub fn is_empty(&self) -> bool {
        self.buf.len() == NLMSG_HDRLEN
    }

    /// Append raw bytes, padding to the next 4-byte boundary.
    pub fn append_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
        self.buf.resize(nlmsg_align(self.buf.len()), 0);
    }

    /// Append a wire struct such as `IfInfoMsg`.
    pub fn append<T: IntoBytes + Immutable>(&mut self, body: &T) {
        self.append_bytes(body.as_bytes());
    }

    /// Stamp the sequence number.
    pub fn set_seq(&mut self, seq: u32) {
        self.buf[8..12].copy_from_slice(&seq.to_ne_bytes());
    }

    /// Stamp the sender port id.
    pub fn set_pid(&mut self, pid: u32) {
        self.buf[12..16].copy_from_slice(&pid.to_ne_bytes());
    }

    /// Write the final length into the header and hand out the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let len = self.buf.len() as u32;
        self.buf[..4].copy_from_slice(&len.to_ne_bytes());
        self.buf
    }
}
