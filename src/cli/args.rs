//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::{AnalysisConfig, DEFAULT_DEVICE_PORT};
use crate::protocol::DEFAULT_HEADER_OFFSET;

/// Decode PPA traffic from a tcpdump hex trace and write a summary report.
#[derive(Parser, Debug)]
#[command(name = "ppatrace")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Trace produced by `tcpdump -x` or `-X` (plain text or .gz)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Report file to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Report format (inferred from the output extension if not specified)
    #[arg(long = "format", value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Bytes of IP/UDP header to skip before the PPA payload
    #[arg(long = "header-offset", value_name = "BYTES", default_value_t = DEFAULT_HEADER_OFFSET)]
    pub header_offset: usize,

    /// Source port the device sends from
    #[arg(long = "device-port", value_name = "PORT", default_value_t = DEFAULT_DEVICE_PORT)]
    pub device_port: u16,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Analysis settings selected on the command line.
    pub fn config(&self) -> AnalysisConfig {
        AnalysisConfig::default()
            .with_header_offset(self.header_offset)
            .with_device_port(self.device_port)
    }

    /// Explicit format, else the one implied by the output path, else Markdown.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| OutputFormat::from_extension(&self.output))
            .unwrap_or(OutputFormat::Markdown)
    }
}
