//! Packet header lines.

use std::sync::OnceLock;

use regex::Regex;

/// Marker every UDP header line carries.
pub const UDP_MARKER: &str = "UDP, length";

/// `<time> [IP] <src-ip>.<src-port> > <dst>.<dst-port>: UDP, length <n>`
const HEADER_PATTERN: &str =
    r"^(\d{2}:\d{2}:\d{2}\.\d+).*?(\d+\.\d+\.\d+\.\d+)\.(\d+) > ([^:]+)\.(\d+): UDP, length (\d+)";

fn header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header pattern is a valid regex"))
}

/// Fields captured from a packet header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    pub timestamp: String,
    pub source_address: String,
    pub source_port: u16,
    pub dest_address: String,
    pub dest_port: u16,
    pub declared_length: u32,
}

/// Parse a packet header line.
///
/// Returns `None` for anything that is not a well-formed UDP header line,
/// including lines whose ports or length overflow their integer types.
pub fn parse_header_line(line: &str) -> Option<PacketHeader> {
    let line = line.trim();
    if !line.contains(UDP_MARKER) {
        return None;
    }

    let caps = header_regex().captures(line)?;

    Some(PacketHeader {
        timestamp: caps[1].to_string(),
        source_address: caps[2].to_string(),
        source_port: caps[3].parse().ok()?,
        dest_address: caps[4].to_string(),
        dest_port: caps[5].parse().ok()?,
        declared_length: caps[6].parse().ok()?,
    })
}
