//! Hex-dump continuation lines.
//!
//! tcpdump prints captured bytes as:
//!
//! ```text
//! 	0x0000:  4500 0030 1c46 4000 4011 0000 0a00 0001  E..0.F@.@.......
//! ```
//!
//! Only the fixed-width column window holding the eight 2-byte groups is
//! read; the offset column and the ASCII rendering are ignored.

use std::ops::Range;

/// Prefix of every hex-dump line once leading whitespace is trimmed.
pub const HEX_LINE_PREFIX: &str = "0x";

/// Character window of the trimmed line holding the hex groups.
pub const HEX_COLUMNS: Range<usize> = 8..48;

/// Check whether a line continues the current packet's hex dump.
pub fn is_hex_line(line: &str) -> bool {
    line.trim().starts_with(HEX_LINE_PREFIX)
}

/// Extract the hex digits of a dump line, whitespace removed.
///
/// Short lines (the last line of a packet) are clamped to their length.
pub fn hex_columns(line: &str) -> String {
    let bytes = line.trim().as_bytes();
    let start = HEX_COLUMNS.start.min(bytes.len());
    let end = HEX_COLUMNS.end.min(bytes.len());

    bytes[start..end]
        .iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|&b| b as char)
        .collect()
}

/// Decode the bytes carried by one hex-dump line.
pub fn decode_hex_line(line: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(hex_columns(line))
}
