//! Message and report value formatting.

use crate::stats::{AggregateReport, SequenceEntry};

/// Format one entry of the message flow listing.
///
/// # Example
///
/// ```
/// use ppatrace::format::format_flow_line;
/// use ppatrace::protocol::{MessageType, StatusCode};
/// use ppatrace::stats::{Direction, SequenceEntry};
///
/// let entry = SequenceEntry {
///     timestamp: "10:00:00.000000".to_string(),
///     direction: Direction::DeviceToClient,
///     message_type: MessageType::Ping,
///     status: StatusCode(0x0102),
///     sequence_number: 3,
///     length: 20,
/// };
/// assert_eq!(
///     format_flow_line(&entry),
///     "10:00:00.000000 → 0 (Ping) (CommandClient) Seq:3 Len:20"
/// );
/// ```
pub fn format_flow_line(entry: &SequenceEntry) -> String {
    format!(
        "{} {} {} ({}) Seq:{} Len:{}",
        entry.timestamp,
        entry.direction.arrow(),
        entry.message_type,
        entry.status.label(),
        entry.sequence_number,
        entry.length
    )
}

/// Format `count` as a percentage of `total` with one decimal.
///
/// A zero total formats as `0.0%`.
pub fn format_percentage(count: usize, total: usize) -> String {
    let pct = if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    format!("{pct:.1}%")
}

/// Format a list of packet sizes as `[12, 16]`.
pub fn format_sizes(sizes: &[u32]) -> String {
    format!("{sizes:?}")
}

/// Format the span of decoded messages, e.g. `10:00:00.0 to 10:05:00.0`.
pub fn format_capture_window(report: &AggregateReport) -> Option<String> {
    match (report.first_timestamp(), report.last_timestamp()) {
        (Some(first), Some(last)) => Some(format!("{first} to {last}")),
        _ => None,
    }
}
