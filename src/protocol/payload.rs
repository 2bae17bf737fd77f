//! Payload extraction.
//!
//! tcpdump's `-x` dump starts at the network layer, so the PPA payload is
//! found by skipping a fixed number of header bytes. The default of 28 is an
//! IPv4 header without options (20) plus the UDP header (8). Captures with
//! IP options, VLAN tags or a link-layer header need a different offset;
//! nothing here inspects the headers to find it.

/// Bytes skipped before the PPA payload in the reference captures.
pub const DEFAULT_HEADER_OFFSET: usize = 28;

/// Return the bytes following the first `header_offset` bytes.
///
/// Returns `None` unless more than `header_offset` bytes were captured.
#[inline]
pub fn extract_payload(raw_bytes: &[u8], header_offset: usize) -> Option<&[u8]> {
    if raw_bytes.len() > header_offset {
        Some(&raw_bytes[header_offset..])
    } else {
        None
    }
}
