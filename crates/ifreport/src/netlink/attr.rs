//! Route attribute (rtattr) layout.

/// Size of an attribute header (length + type, both u16).
pub const NLA_HDRLEN: usize = 4;

/// Attributes start on 4-byte boundaries.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + 3) & !3
}

/// Bits of the type field that carry the attribute kind; the top two are
/// the nested and network-byte-order markers.
pub const NLA_TYPE_MASK: u16 = 0x3fff;
