//! Single-pass aggregation over decoded messages.

use tracing::trace;

use super::{AggregateReport, Direction, SequenceEntry, UnknownMessage};
use crate::config::AnalysisConfig;
use crate::protocol::{try_decode, DecodedMessage, PPA_HEADER_LEN};
use crate::trace::CapturedPacket;

/// Payload bytes kept (as hex) for each unknown message.
pub const UNKNOWN_PREFIX_BYTES: usize = PPA_HEADER_LEN;

/// Accumulates an [`AggregateReport`] one packet at a time.
///
/// Sequence numbers are only tabulated, never checked for order or gaps.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: AnalysisConfig,
    report: AggregateReport,
}

impl Aggregator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            report: AggregateReport::default(),
        }
    }

    /// Decode a packet's payload and record it.
    pub fn add_packet(&mut self, packet: &CapturedPacket) -> Option<DecodedMessage> {
        let message = packet.payload().and_then(try_decode);
        self.record(packet, message.as_ref());
        message
    }

    /// Record a packet and its decoded message, if it had one.
    ///
    /// Packets without a message only count towards `total_packets`.
    pub fn record(&mut self, packet: &CapturedPacket, message: Option<&DecodedMessage>) {
        let report = &mut self.report;
        report.total_packets += 1;

        let Some(message) = message else {
            trace!(line_number = packet.line_number, "no PPA message in packet");
            return;
        };

        let direction = Direction::classify(packet.source_port, self.config.device_port);
        let code = message.message_type.code();

        report.decoded_packets += 1;
        *report.directions.entry(direction).or_default() += 1;
        *report.message_types.entry(code).or_default() += 1;
        *report.status_codes.entry(message.status.code()).or_default() += 1;
        *report.packet_sizes.entry(packet.declared_length).or_default() += 1;

        report.sequence_analysis.push(SequenceEntry {
            timestamp: packet.timestamp.clone(),
            direction,
            message_type: message.message_type,
            status: message.status,
            sequence_number: message.sequence_number,
            length: packet.declared_length,
        });

        if !message.message_type.is_known() {
            let payload_prefix = match packet.payload() {
                Some(payload) => hex::encode(&payload[..payload.len().min(UNKNOWN_PREFIX_BYTES)]),
                None => hex::encode(message.encode_header()),
            };
            report.unknown_messages.push(UnknownMessage {
                timestamp: packet.timestamp.clone(),
                message_type: code,
                payload_prefix,
            });
        }
    }

    /// Report accumulated so far.
    pub fn report(&self) -> &AggregateReport {
        &self.report
    }

    pub fn finish(self) -> AggregateReport {
        self.report
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Aggregate an ordered stream of (packet, message) pairs.
pub fn aggregate<'a, I>(pairs: I, config: AnalysisConfig) -> AggregateReport
where
    I: IntoIterator<Item = (&'a CapturedPacket, Option<&'a DecodedMessage>)>,
{
    let mut aggregator = Aggregator::new(config);
    for (packet, message) in pairs {
        aggregator.record(packet, message);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MessageType, StatusCode};

    fn packet(source_port: u16, declared_length: u32, payload: &[u8]) -> CapturedPacket {
        let mut raw_bytes = vec![0u8; 28];
        raw_bytes.extend_from_slice(payload);
        CapturedPacket {
            line_number: 1,
            timestamp: "10:00:00.000000".to_string(),
            source_address: "10.0.0.1".to_string(),
            source_port,
            dest_address: "10.0.0.2".to_string(),
            dest_port: 9000,
            declared_length,
            raw_bytes,
            payload_offset: 28,
            truncated: false,
        }
    }

    fn header(message_type: u8, status: u16, sequence: u16) -> Vec<u8> {
        let status = status.to_le_bytes();
        let sequence = sequence.to_le_bytes();
        vec![
            message_type, 0x00, status[0], status[1], 0xaa, 0xbb, 0xcc, 0xdd, sequence[0],
            sequence[1], 0x00, 0x00,
        ]
    }

    #[test]
    fn test_add_packet_counts() {
        let mut aggregator = Aggregator::default();

        let msg = aggregator.add_packet(&packet(5001, 12, &header(0, 0x0102, 3)));
        assert_eq!(msg.unwrap().message_type, MessageType::Ping);
        aggregator.add_packet(&packet(9000, 16, &header(1, 0x0106, 4)));
        aggregator.add_packet(&packet(9000, 16, &header(1, 0x0106, 5)));

        let report = aggregator.finish();
        assert_eq!(report.total_packets, 3);
        assert_eq!(report.decoded_packets, 3);
        assert_eq!(report.message_type_count(0), 1);
        assert_eq!(report.message_type_count(1), 2);
        assert_eq!(report.status_codes.get(&0x0106), Some(&2));
        assert_eq!(report.packet_sizes.get(&16), Some(&2));
        assert_eq!(report.direction_count(Direction::DeviceToClient), 1);
        assert_eq!(report.direction_count(Direction::ClientToDevice), 2);
        assert!(report.unknown_messages.is_empty());
    }

    #[test]
    fn test_short_payload_only_counts_total() {
        let mut aggregator = Aggregator::default();

        assert!(aggregator.add_packet(&packet(5001, 20, &[0x00, 0x01, 0x02])).is_none());

        let report = aggregator.finish();
        assert_eq!(report.total_packets, 1);
        assert_eq!(report.decoded_packets, 0);
        assert!(report.message_types.is_empty());
        assert!(report.sequence_analysis.is_empty());
        assert!(report.directions.is_empty());
    }

    #[test]
    fn test_unknown_message_recorded_once_with_prefix() {
        let mut payload = header(9, 0x0001, 1);
        payload.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

        let mut aggregator = Aggregator::default();
        aggregator.add_packet(&packet(9000, 16, &payload));
        let report = aggregator.finish();

        assert_eq!(report.unknown_messages.len(), 1);
        let unknown = &report.unknown_messages[0];
        assert_eq!(unknown.timestamp, "10:00:00.000000");
        assert_eq!(unknown.message_type, 9);
        assert_eq!(unknown.payload_prefix, "09000100aabbccdd01000000");
        assert_eq!(unknown.payload_prefix.len(), 24);
    }

    #[test]
    fn test_sequence_entries_keep_order_without_validation() {
        let mut aggregator = Aggregator::default();
        for seq in [7u16, 3, 3, 65535] {
            aggregator.add_packet(&packet(5001, 12, &header(2, 0x0001, seq)));
        }

        let report = aggregator.finish();
        let seqs: Vec<u16> = report.sequence_analysis.iter().map(|e| e.sequence_number).collect();
        assert_eq!(seqs, vec![7, 3, 3, 65535]);
        assert_eq!(report.sequence_analysis[0].status, StatusCode(0x0001));
        assert_eq!(report.sequence_analysis[0].length, 12);
    }

    #[test]
    fn test_custom_device_port() {
        let config = AnalysisConfig::default().with_device_port(9000);
        let mut aggregator = Aggregator::new(config);
        aggregator.add_packet(&packet(9000, 12, &header(0, 0x0002, 1)));

        assert_eq!(
            aggregator.report().direction_count(Direction::DeviceToClient),
            1
        );
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let packets = vec![
            packet(5001, 12, &header(0, 0x0102, 1)),
            packet(9000, 16, &header(9, 0x0106, 2)),
            packet(9000, 20, &[0x01]),
        ];
        let messages: Vec<_> = packets
            .iter()
            .map(|p| p.payload().and_then(try_decode))
            .collect();
        let pairs = || packets.iter().zip(messages.iter().map(Option::as_ref));

        let first = aggregate(pairs(), AnalysisConfig::default());
        let second = aggregate(pairs(), AnalysisConfig::default());

        assert_eq!(first, second);
        assert_eq!(first.total_packets, 3);
        assert_eq!(first.decoded_packets, 2);
    }
}
