//! Statistics over the decoded PPA message stream.
//!
//! This module provides:
//! - The port-based [`Direction`] heuristic
//! - [`Aggregator`], a single pass over (packet, message) pairs
//! - [`AggregateReport`] with derived findings and anomalies

mod aggregator;
mod direction;
mod findings;
mod report;

pub use aggregator::{aggregate, Aggregator, UNKNOWN_PREFIX_BYTES};
pub use direction::Direction;
pub use findings::{Anomaly, Finding, TrafficPattern, STANDARD_PACKET_SIZES};
pub use report::{AggregateReport, SequenceEntry, UnknownMessage};
