//! PPA protocol decoding module.
//!
//! This module provides:
//! - Payload extraction from reconstructed datagram bytes
//! - Decoding of the 12-byte PPA fixed header
//! - The canonical message-type and status-code label tables

mod labels;
mod payload;
mod ppa;

pub use labels::{
    message_type, MessageType, StatusCode, StatusEntry, StatusKind, StatusRole, STATUS_TABLE,
};
pub use payload::{extract_payload, DEFAULT_HEADER_OFFSET};
pub use ppa::{decode, try_decode, DecodedMessage, PPA_HEADER_LEN};
