//! PPA fixed header decoding.
//!
//! ```text
//! ┌──────┬───────┬──────────┬───────────┬──────────┬───────────┬──────────┬──────┐
//! │ Type │ Proto │ Status   │ Device ID │ Sequence │ Component │ Reserved │ Body │
//! │ 1    │ 1     │ 2 LE     │ 4 opaque  │ 2 LE     │ 1         │ 1        │ ...  │
//! └──────┴───────┴──────────┴───────────┴──────────┴───────────┴──────────┴──────┘
//! ```
//!
//! Every byte pattern is a valid header; unknown values are carried through.

use serde::{Serialize, Serializer};

use super::{MessageType, StatusCode};
use crate::error::ProtocolError;

/// Fixed header size in bytes.
pub const PPA_HEADER_LEN: usize = 12;

/// One decoded PPA message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedMessage {
    pub message_type: MessageType,
    /// Not interpreted.
    pub protocol_id: u8,
    pub status: StatusCode,
    /// Kept as raw bytes; never read as a number.
    #[serde(serialize_with = "serialize_hex")]
    pub device_id: [u8; 4],
    /// No ordering or gap-free guarantee.
    pub sequence_number: u16,
    pub component_id: u8,
    pub reserved: u8,
    /// Everything after the fixed header.
    #[serde(serialize_with = "serialize_hex")]
    pub body: Vec<u8>,
}

impl DecodedMessage {
    /// Re-encode the fixed header fields.
    pub fn encode_header(&self) -> [u8; PPA_HEADER_LEN] {
        let status = self.status.code().to_le_bytes();
        let sequence = self.sequence_number.to_le_bytes();

        [
            self.message_type.code(),
            self.protocol_id,
            status[0],
            status[1],
            self.device_id[0],
            self.device_id[1],
            self.device_id[2],
            self.device_id[3],
            sequence[0],
            sequence[1],
            self.component_id,
            self.reserved,
        ]
    }

    /// Re-encode header and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PPA_HEADER_LEN + self.body.len());
        bytes.extend_from_slice(&self.encode_header());
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

/// Decode a PPA payload.
///
/// The only failure is a payload shorter than [`PPA_HEADER_LEN`].
pub fn decode(payload: &[u8]) -> Result<DecodedMessage, ProtocolError> {
    if payload.len() < PPA_HEADER_LEN {
        return Err(ProtocolError::PacketTooShort {
            protocol: "ppa",
            needed: PPA_HEADER_LEN,
            have: payload.len(),
        });
    }

    Ok(DecodedMessage {
        message_type: MessageType::from(payload[0]),
        protocol_id: payload[1],
        status: StatusCode(u16::from_le_bytes([payload[2], payload[3]])),
        device_id: [payload[4], payload[5], payload[6], payload[7]],
        sequence_number: u16::from_le_bytes([payload[8], payload[9]]),
        component_id: payload[10],
        reserved: payload[11],
        body: payload[PPA_HEADER_LEN..].to_vec(),
    })
}

/// Decode a PPA payload, `None` if it is too short.
#[inline]
pub fn try_decode(payload: &[u8]) -> Option<DecodedMessage> {
    decode(payload).ok()
}

fn serialize_hex<S: Serializer, T: AsRef<[u8]>>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}
