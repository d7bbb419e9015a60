//! Non-blocking NETLINK_ROUTE socket driven by tokio's reactor.

use std::sync::atomic::{AtomicU32, Ordering};

use bytes::BytesMut;
use netlink_sys::{Socket, SocketAddr, protocols};
use tokio::io::Interest;
use tokio::io::unix::AsyncFd;

use super::error::Result;

/// One dump batch from the kernel fits in a page-multiple buffer this size.
const RECV_BUF_SIZE: usize = 32 * 1024;

pub struct NetlinkSocket {
    fd: AsyncFd<Socket>,
    seq: AtomicU32,
    /// Port id the kernel bound us to.
    pid: u32,
}

impl NetlinkSocket {
    pub fn new() -> Result<Self> {
        let mut socket = Socket::new(protocols::NETLINK_ROUTE)?;
        socket.set_non_blocking(true)?;

        let mut addr = SocketAddr::new(0, 0);
        socket.bind(&addr)?;
        socket.get_address(&mut addr)?;
        let pid = addr.port_number();

        // Not available on old kernels; replies still work without it.
        let _ = socket.set_ext_ack(true);

        tracing::trace!(pid, "routing socket bound");

        Ok(Self {
            fd: AsyncFd::new(socket)?,
            seq: AtomicU32::new(1),
            pid,
        })
    }

    pub fn next_seq(&self) -> u32 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub async fn send(&self, msg: &[u8]) -> Result<()> {
        loop {
            let mut ready = self.fd.ready(Interest::WRITABLE).await?;
            if let Ok(sent) = ready.try_io(|fd| fd.get_ref().send(msg, 0)) {
                sent?;
                return Ok(());
            }
        }
    }

    /// Wait for the next datagram and return its bytes.
    pub async fn recv_msg(&self) -> Result<Vec<u8>> {
        let mut buf = BytesMut::with_capacity(RECV_BUF_SIZE);
        loop {
            let mut ready = self.fd.ready(Interest::READABLE).await?;
            if let Ok(received) = ready.try_io(|fd| fd.get_ref().recv(&mut buf, 0)) {
                received?;
                return Ok(buf.to_vec());
            }
        }
    }
}
