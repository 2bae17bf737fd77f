//! Capture trace parsing module.
//!
//! This module reads the textual output of `tcpdump -x`/`-X` and turns it
//! into [`CapturedPacket`] records:
//! - Packet header lines (`<time> <src>.<port> > <dst>.<port>: UDP, length <n>`)
//! - Hex-dump continuation lines (`0x0000:  4500 0030 ...`)
//! - Optional gzip decompression of the trace file

mod header;
mod hexdump;
mod packet;
mod reader;

pub use header::{parse_header_line, PacketHeader};
pub use hexdump::{decode_hex_line, hex_columns, is_hex_line};
pub use packet::CapturedPacket;
pub use reader::{is_gzip_extension, parse_trace, parse_trace_with_offset, TraceReader};
