//! Fixed-size RTNetlink bodies and the constants used to read them.

use zerocopy::FromBytes;

use crate::netlink::error::{Error, Result};

pub mod addr;
pub mod link;

/// Copy a fixed-size body off the front of a payload; kernel payloads are
/// only 4-byte aligned.
fn read_prefix<T: FromBytes>(data: &[u8]) -> Result<T> {
    T::read_from_prefix(data)
        .map(|(body, _)| body)
        .map_err(|_| Error::Truncated {
            expected: size_of::<T>(),
            actual: data.len(),
        })
}
