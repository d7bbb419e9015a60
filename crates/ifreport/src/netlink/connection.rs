//! Request/reply exchange over a routing socket, plus the link and address
//! queries built on it.

use super::builder::MessageBuilder;
use super::error::{Error, Result};
use super::message::{
    MessageIter, NLM_F_DUMP, NLM_F_DUMP_INTR, NLM_F_REQUEST, NLMSG_HDRLEN, NlMsgError, NlMsgHdr,
    NlMsgType, nlmsg_align,
};
use super::messages::{AddressMessage, LinkMessage};
use super::parse::FromNetlink;
use super::socket::NetlinkSocket;
use super::types::link::IfInfoMsg;

/// Owns one routing socket. Issue one request at a time.
pub struct Connection {
    socket: NetlinkSocket,
}

impl Connection {
    /// Open a routing socket.
    pub fn new() -> Result<Self> {
        Ok(Self {
            socket: NetlinkSocket::new()?,
        })
    }

    /// Send a non-dump request and return the full messages (header
    /// included) that answer it.
    /// An NLMSG_ERROR reply becomes [`Error::Kernel`].
    pub async fn request(&self, mut builder: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        let seq = self.socket.next_seq();
        builder.set_seq(seq);
        builder.set_pid(self.socket.pid());

        let msg = builder.finish();
        self.socket.send(&msg).await?;

        loop {
            let data = self.socket.recv_msg().await?;
            let (responses, _) = collect_replies(&data, seq)?;
            // Replies to an abandoned earlier request can still be queued.
            if !responses.is_empty() {
                return Ok(responses);
            }
        }
    }

    /// Send a dump request and gather every batch until NLMSG_DONE.
    pub async fn dump(&self, mut builder: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        let seq = self.socket.next_seq();
        builder.set_seq(seq);
        builder.set_pid(self.socket.pid());

        let msg = builder.finish();
        self.socket.send(&msg).await?;

        let mut responses = Vec::new();

        loop {
            let data = self.socket.recv_msg().await?;
            let (batch, done) = collect_replies(&data, seq)?;
            responses.extend(batch);

            if done {
                break;
            }
        }

        tracing::trace!(seq, count = responses.len(), "dump complete");

        Ok(responses)
    }

    /// Dump `msg_type` and parse each reply as `T`; replies that do not
    /// parse are logged and dropped.
    pub async fn dump_typed<T: FromNetlink>(&self, msg_type: u16) -> Result<Vec<T>> {
        let mut builder = dump_request(msg_type);

        let mut header_buf = Vec::new();
        T::write_dump_header(&mut header_buf);
        builder.append_bytes(&header_buf);

        let responses = self.dump(builder).await?;

        let mut parsed = Vec::with_capacity(responses.len());
        for response in responses {
            match self.parse_response(&response) {
                Ok(msg) => parsed.push(msg),
                Err(e) => tracing::trace!(error = %e, "skipping unparsable message"),
            }
        }

        Ok(parsed)
    }

    /// Parse the payload of one full reply.
    pub fn parse_response<T: FromNetlink>(&self, response: &[u8]) -> Result<T> {
        if response.len() < NLMSG_HDRLEN {
            return Err(Error::Truncated {
                expected: NLMSG_HDRLEN,
                actual: response.len(),
            });
        }
        let payload = &response[NLMSG_HDRLEN..];
        T::from_bytes(payload)
    }
}

/// Split one datagram into the replies for `seq`, and report whether the
/// dump terminator was among them. ACKs vanish, error replies fail the call.
fn collect_replies(data: &[u8], seq: u32) -> Result<(Vec<Vec<u8>>, bool)> {
    let mut responses = Vec::new();
    let mut offset = 0;

    for result in MessageIter::new(data) {
        let (header, payload) = result?;
        let msg_start = offset;
        offset += nlmsg_align(header.nlmsg_len as usize);

        if header.nlmsg_seq != seq {
            continue;
        }

        if header.is_error() {
            let err = NlMsgError::from_bytes(payload)?;
            if !err.is_ack() {
                return Err(Error::from_errno(err.error));
            }
            continue;
        }

        if header.is_done() {
            return Ok((responses, true));
        }

        if header.nlmsg_flags & NLM_F_DUMP_INTR != 0 {
            tracing::debug!(seq, "dump interrupted by a concurrent change");
        }

        let msg_len = header.nlmsg_len as usize;
        responses.push(data[msg_start..msg_start + msg_len].to_vec());
    }

    Ok((responses, false))
}

/// `NLM_F_REQUEST | NLM_F_DUMP` for `msg_type`.
pub fn dump_request(msg_type: u16) -> MessageBuilder {
    MessageBuilder::new(msg_type, NLM_F_REQUEST | NLM_F_DUMP)
}

/// Single-object request for `msg_type`.
pub fn get_request(msg_type: u16) -> MessageBuilder {
    MessageBuilder::new(msg_type, NLM_F_REQUEST)
}

// Link and address queries

impl Connection {
    /// Every link known to the kernel, loopback included.
    pub async fn get_links(&self) -> Result<Vec<LinkMessage>> {
        self.dump_typed(NlMsgType::RTM_GETLINK).await
    }

    /// Current state of one link, asked for directly rather than taken from
    /// an earlier dump. A vanished index fails with ENODEV.
    pub async fn get_link_by_index(&self, index: u32) -> Result<LinkMessage> {
        let mut builder = get_request(NlMsgType::RTM_GETLINK);
        builder.append(&IfInfoMsg::new().with_index(index as i32));

        let responses = self
            .request(builder)
            .await
            .map_err(|e| e.with_context(format!("querying link {}", index)))?;

        let response = responses
            .iter()
            .find(|r| {
                NlMsgHdr::from_bytes(r)
                    .map(|h| h.nlmsg_type == NlMsgType::RTM_NEWLINK)
                    .unwrap_or(false)
            })
            .ok_or_else(|| Error::InterfaceNotFound {
                name: index.to_string(),
            })?;

        self.parse_response(response)
    }

    /// Every IPv4 and IPv6 address on the host.
    pub async fn get_addresses(&self) -> Result<Vec<AddressMessage>> {
        self.dump_typed(NlMsgType::RTM_GETADDR).await
    }

    /// Addresses of one link. The kernel ignores the index filter on
    /// RTM_GETADDR dumps, so the full dump is filtered here.
    pub async fn get_addresses_by_index(&self, ifindex: u32) -> Result<Vec<AddressMessage>> {
        let addresses = self.get_addresses().await?;
        Ok(addresses
            .into_iter()
            .filter(|a| a.ifindex() == ifindex)
            .collect())
    }
}
