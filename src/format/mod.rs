//! Value formatting utilities for PPA messages.
//!
//! Provides the textual forms shared by every report renderer:
//! - Message flow lines (`10:00:00.000000 → 0 (Ping) (CommandClient) Seq:3 Len:20`)
//! - Percentages of a total
//! - Byte-count and timestamp-window helpers
//!
//! Labels themselves come from [`crate::protocol`]; nothing here keeps its
//! own name table.

mod message;

pub use message::{format_capture_window, format_flow_line, format_percentage, format_sizes};
