//! Findings and anomalies derived from an [`AggregateReport`].

use std::fmt;

use serde::Serialize;

use super::AggregateReport;
use crate::format::format_sizes;
use crate::protocol::message_type;

/// Packet sizes seen in normal PPA traffic.
pub const STANDARD_PACKET_SIZES: &[u32] = &[12, 16, 20, 142, 144, 172];

/// Status bit set on response statuses.
const RESPONSE_BIT: u16 = 0x0100;

/// Status bits set on request statuses.
const REQUEST_BITS: u16 = 0x0006;

/// Balance of device and client traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrafficPattern {
    ResponseHeavy,
    Balanced,
    RequestHeavy,
}

impl TrafficPattern {
    pub fn from_ratio(device_to_client: f64) -> Self {
        if device_to_client > 2.0 {
            TrafficPattern::ResponseHeavy
        } else if device_to_client > 0.5 {
            TrafficPattern::Balanced
        } else {
            TrafficPattern::RequestHeavy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrafficPattern::ResponseHeavy => "response-heavy",
            TrafficPattern::Balanced => "balanced",
            TrafficPattern::RequestHeavy => "request-heavy",
        }
    }
}

/// Notable activity in a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    PingActivity { count: usize },
    DeviceDiscovery { count: usize },
    LiveCommands { count: usize },
    PresetOperations { count: usize },
    UnknownMessages { count: usize },
    CommunicationPattern { ratio: f64, pattern: TrafficPattern },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::PingActivity { count } => write!(
                f,
                "**Ping/Keepalive Activity**: {count} ping messages detected, indicating active connection monitoring"
            ),
            Finding::DeviceDiscovery { count } => write!(
                f,
                "**Device Discovery**: {count} device data exchanges, likely initial device enumeration"
            ),
            Finding::LiveCommands { count } => write!(
                f,
                "**Live Commands**: {count} live command messages for real-time control"
            ),
            Finding::PresetOperations { count } => write!(
                f,
                "**Preset Operations**: {count} preset-related messages (recall/save)"
            ),
            Finding::UnknownMessages { count } => write!(
                f,
                "**Unknown Messages**: {count} undocumented message types require investigation"
            ),
            Finding::CommunicationPattern { ratio, pattern } => write!(
                f,
                "**Communication Pattern**: {ratio:.1}:1 device-to-client message ratio suggests {} communication",
                pattern.label()
            ),
        }
    }
}

/// Traffic that departs from what normal PPA sessions look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    UnusualPacketSizes { sizes: Vec<u32> },
    StatusImbalance { response_statuses: usize, request_statuses: usize },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UnusualPacketSizes { sizes } => write!(
                f,
                "**Unusual Packet Sizes**: Sizes {} differ from standard PPA message sizes",
                format_sizes(sizes)
            ),
            Anomaly::StatusImbalance { .. } => {
                write!(f, "**Status Imbalance**: Unequal request/response status distribution")
            }
        }
    }
}

impl AggregateReport {
    /// Findings in a fixed order; absent activity is left out.
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        let ping = self.message_type_count(message_type::PING);
        if ping > 0 {
            findings.push(Finding::PingActivity { count: ping });
        }

        let device_data = self.message_type_count(message_type::DEVICE_DATA);
        if device_data > 0 {
            findings.push(Finding::DeviceDiscovery { count: device_data });
        }

        let live = self.message_type_count(message_type::LIVE_CMD);
        if live > 0 {
            findings.push(Finding::LiveCommands { count: live });
        }

        let preset = self.message_type_count(message_type::PRESET_RECALL)
            + self.message_type_count(message_type::PRESET_SAVE);
        if preset > 0 {
            findings.push(Finding::PresetOperations { count: preset });
        }

        if !self.unknown_messages.is_empty() {
            findings.push(Finding::UnknownMessages {
                count: self.unknown_messages.len(),
            });
        }

        if let Some(ratio) = self.device_to_client_ratio() {
            findings.push(Finding::CommunicationPattern {
                ratio,
                pattern: TrafficPattern::from_ratio(ratio),
            });
        }

        findings
    }

    /// Anomalies; empty when the trace looks normal.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();

        let unusual: Vec<u32> = self
            .packet_sizes
            .keys()
            .copied()
            .filter(|size| !STANDARD_PACKET_SIZES.contains(size))
            .collect();
        if !unusual.is_empty() {
            anomalies.push(Anomaly::UnusualPacketSizes { sizes: unusual });
        }

        let response_statuses = self
            .status_codes
            .keys()
            .filter(|&&s| s & RESPONSE_BIT != 0)
            .count();
        let request_statuses = self
            .status_codes
            .keys()
            .filter(|&&s| s & REQUEST_BITS != 0)
            .count();
        if response_statuses != request_statuses {
            anomalies.push(Anomaly::StatusImbalance {
                response_statuses,
                request_statuses,
            });
        }

        anomalies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Direction;

    fn report_with_types(types: &[(u8, usize)]) -> AggregateReport {
        let mut report = AggregateReport::default();
        for &(code, count) in types {
            report.message_types.insert(code, count);
        }
        report
    }

    #[test]
    fn test_traffic_pattern_thresholds() {
        assert_eq!(TrafficPattern::from_ratio(3.0), TrafficPattern::ResponseHeavy);
        assert_eq!(TrafficPattern::from_ratio(2.0), TrafficPattern::Balanced);
        assert_eq!(TrafficPattern::from_ratio(1.0), TrafficPattern::Balanced);
        assert_eq!(TrafficPattern::from_ratio(0.5), TrafficPattern::RequestHeavy);
    }

    #[test]
    fn test_findings_by_message_type() {
        let report = report_with_types(&[(0, 4), (1, 2), (2, 1), (4, 1), (5, 2)]);

        assert_eq!(
            report.findings(),
            vec![
                Finding::PingActivity { count: 4 },
                Finding::DeviceDiscovery { count: 1 },
                Finding::LiveCommands { count: 2 },
                Finding::PresetOperations { count: 3 },
            ]
        );
    }

    #[test]
    fn test_communication_pattern_finding() {
        let mut report = AggregateReport::default();
        report.directions.insert(Direction::DeviceToClient, 5);
        report.directions.insert(Direction::ClientToDevice, 2);

        let findings = report.findings();
        assert_eq!(
            findings,
            vec![Finding::CommunicationPattern {
                ratio: 2.5,
                pattern: TrafficPattern::ResponseHeavy
            }]
        );
        assert_eq!(
            findings[0].to_string(),
            "**Communication Pattern**: 2.5:1 device-to-client message ratio suggests response-heavy communication"
        );
    }

    #[test]
    fn test_no_findings_for_empty_report() {
        assert!(AggregateReport::default().findings().is_empty());
        assert!(AggregateReport::default().anomalies().is_empty());
    }

    #[test]
    fn test_unusual_packet_sizes() {
        let mut report = AggregateReport::default();
        report.packet_sizes.insert(12, 5);
        report.packet_sizes.insert(99, 1);
        report.packet_sizes.insert(172, 2);
        report.packet_sizes.insert(7, 1);

        let anomalies = report.anomalies();
        assert_eq!(
            anomalies,
            vec![Anomaly::UnusualPacketSizes { sizes: vec![7, 99] }]
        );
        assert_eq!(
            anomalies[0].to_string(),
            "**Unusual Packet Sizes**: Sizes [7, 99] differ from standard PPA message sizes"
        );
    }

    #[test]
    fn test_status_imbalance() {
        let mut report = AggregateReport::default();
        // RequestClient has both the response and request bits set
        report.status_codes.insert(0x0106, 1);
        assert!(report.anomalies().is_empty());

        // ResponseClient only carries the response bit
        report.status_codes.insert(0x0101, 1);
        assert_eq!(
            report.anomalies(),
            vec![Anomaly::StatusImbalance {
                response_statuses: 2,
                request_statuses: 1
            }]
        );
    }
}
