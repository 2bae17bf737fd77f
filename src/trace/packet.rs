//! Captured packet representation.

use serde::{Serialize, Serializer};

use crate::protocol::extract_payload;

/// One UDP datagram recovered from a capture trace.
///
/// Built by [`TraceReader`](super::TraceReader) once the header line and all
/// of its hex-dump lines have been consumed; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedPacket {
    /// Line number of the packet header in the trace (1-indexed).
    pub line_number: u64,

    /// Capture-relative timestamp exactly as printed (e.g. `10:00:00.000000`).
    pub timestamp: String,

    /// Source IP address.
    pub source_address: String,

    /// Source UDP port.
    pub source_port: u16,

    /// Destination address as printed (may be a hostname).
    pub dest_address: String,

    /// Destination UDP port.
    pub dest_port: u16,

    /// UDP length from the header annotation. Not reconciled with `raw_bytes`.
    pub declared_length: u32,

    /// All reconstructed bytes, lower-layer headers included.
    #[serde(serialize_with = "serialize_hex")]
    pub raw_bytes: Vec<u8>,

    /// Bytes to skip before the PPA payload.
    pub payload_offset: usize,

    /// Set when a hex-dump line could not be decoded and the bytes stop early.
    pub truncated: bool,
}

impl CapturedPacket {
    /// Whether any hex-dump bytes were captured for this packet.
    pub fn has_bytes(&self) -> bool {
        !self.raw_bytes.is_empty()
    }

    /// The PPA payload, if enough bytes were captured past the header offset.
    pub fn payload(&self) -> Option<&[u8]> {
        extract_payload(&self.raw_bytes, self.payload_offset)
    }
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}
