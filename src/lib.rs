//! ppatrace - Decode PPA control traffic from tcpdump hex traces.
//!
//! This library parses the text output of `tcpdump -x`/`-X`, recovers the
//! UDP payload of each packet, decodes the 12-byte PPA header and
//! summarizes the message stream.
//!
//! # Example
//!
//! ```no_run
//! use ppatrace::{analyze_file, AnalysisConfig};
//!
//! fn main() -> ppatrace::Result<()> {
//!     let report = analyze_file("capture.txt", AnalysisConfig::default())?;
//!     println!("{} of {} packets decoded", report.decoded_packets, report.total_packets);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod protocol;
pub mod stats;
pub mod trace;

pub use analysis::{analyze_file, analyze_reader, analyze_trace};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
