//! Aggregate report types.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Direction;
use crate::protocol::{MessageType, StatusCode};

/// One decoded message in trace order, for flow review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    pub timestamp: String,
    pub direction: Direction,
    pub message_type: MessageType,
    pub status: StatusCode,
    pub sequence_number: u16,
    /// Declared UDP length of the carrying packet.
    pub length: u32,
}

/// A decoded message whose type is not in the documented set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownMessage {
    pub timestamp: String,
    pub message_type: u8,
    /// Hex of the first payload bytes, for manual inspection.
    pub payload_prefix: String,
}

/// Summary of one trace. Built once by [`Aggregator`](super::Aggregator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    /// Every packet header seen, decoded or not.
    pub total_packets: usize,

    /// Packets that yielded a PPA message.
    pub decoded_packets: usize,

    pub message_types: BTreeMap<u8, usize>,
    pub status_codes: BTreeMap<u16, usize>,

    /// Keyed by declared UDP length.
    pub packet_sizes: BTreeMap<u32, usize>,

    pub directions: BTreeMap<Direction, usize>,
    pub sequence_analysis: Vec<SequenceEntry>,
    pub unknown_messages: Vec<UnknownMessage>,
}

impl AggregateReport {
    pub fn direction_count(&self, direction: Direction) -> usize {
        self.directions.get(&direction).copied().unwrap_or(0)
    }

    pub fn message_type_count(&self, code: u8) -> usize {
        self.message_types.get(&code).copied().unwrap_or(0)
    }

    /// Message types, most frequent first. Ties keep ascending code order.
    pub fn message_types_by_count(&self) -> Vec<(MessageType, usize)> {
        let mut counts: Vec<_> = self
            .message_types
            .iter()
            .map(|(&code, &count)| (MessageType::from(code), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Status codes, most frequent first. Ties keep ascending code order.
    pub fn status_codes_by_count(&self) -> Vec<(StatusCode, usize)> {
        let mut counts: Vec<_> = self
            .status_codes
            .iter()
            .map(|(&code, &count)| (StatusCode(code), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Timestamp of the first decoded message.
    pub fn first_timestamp(&self) -> Option<&str> {
        self.sequence_analysis.first().map(|e| e.timestamp.as_str())
    }

    /// Timestamp of the last decoded message.
    pub fn last_timestamp(&self) -> Option<&str> {
        self.sequence_analysis.last().map(|e| e.timestamp.as_str())
    }

    /// Device-to-client messages per client-to-device message.
    ///
    /// `None` unless both directions were seen.
    pub fn device_to_client_ratio(&self) -> Option<f64> {
        let client = self.direction_count(Direction::ClientToDevice);
        let device = self.direction_count(Direction::DeviceToClient);
        if client > 0 && device > 0 {
            Some(device as f64 / client as f64)
        } else {
            None
        }
    }
}
