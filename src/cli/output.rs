//! Report rendering.
//!
//! Renders an [`AggregateReport`] as a Markdown document (the default), as
//! pretty-printed JSON, or as plain-text tables.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::format::{format_capture_window, format_flow_line, format_percentage};
use crate::stats::{AggregateReport, Anomaly, Direction, Finding};

/// Number of messages shown in the flow listing.
const FLOW_PREVIEW: usize = 20;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown document (default)
    Markdown,
    /// Pretty-printed JSON
    Json,
    /// Plain-text tables
    Table,
}

impl OutputFormat {
    /// Infer the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "md" | "markdown" => Some(OutputFormat::Markdown),
                "json" => Some(OutputFormat::Json),
                "txt" => Some(OutputFormat::Table),
                _ => None,
            })
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    #[serde(flatten)]
    report: &'a AggregateReport,
    findings: Vec<Finding>,
    anomalies: Vec<Anomaly>,
}

/// Writes reports in one of the supported formats.
pub struct ReportFormatter {
    format: OutputFormat,
}

impl ReportFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render `report` under `title` to the given writer.
    pub fn write<W: Write>(
        &self,
        report: &AggregateReport,
        title: &str,
        writer: &mut W,
    ) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Markdown => self.write_markdown(report, title, writer),
            OutputFormat::Json => self.write_json(report, title, writer),
            OutputFormat::Table => self.write_table(report, title, writer),
        }
    }

    fn write_markdown<W: Write>(
        &self,
        report: &AggregateReport,
        title: &str,
        w: &mut W,
    ) -> std::io::Result<()> {
        writeln!(w, "# {title}\n")?;
        writeln!(w, "Generated: {} {}\n", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;

        writeln!(w, "## Executive Summary\n")?;
        writeln!(w, "- **Total Packets**: {}", report.total_packets)?;
        writeln!(w, "- **Parsed PPA Packets**: {}", report.decoded_packets)?;
        writeln!(w, "- **Unique Message Types**: {}", report.message_types.len())?;
        writeln!(
            w,
            "- **Client→Device**: {}",
            report.direction_count(Direction::ClientToDevice)
        )?;
        writeln!(
            w,
            "- **Device→Client**: {}\n",
            report.direction_count(Direction::DeviceToClient)
        )?;

        writeln!(w, "## Message Type Analysis\n")?;
        writeln!(w, "| Type | Name | Count | Percentage |")?;
        writeln!(w, "|------|------|-------|------------|")?;
        for (message_type, count) in report.message_types_by_count() {
            writeln!(
                w,
                "| {} | {} | {} | {} |",
                message_type.code(),
                message_type.name(),
                count,
                format_percentage(count, report.decoded_packets)
            )?;
        }

        writeln!(w, "\n## Status Type Analysis\n")?;
        writeln!(w, "| Status | Name | Count |")?;
        writeln!(w, "|--------|------|-------|")?;
        for (status, count) in report.status_codes_by_count() {
            writeln!(w, "| 0x{:04x} | {} | {} |", status.code(), status.label(), count)?;
        }

        writeln!(w, "\n## Packet Size Distribution\n")?;
        writeln!(w, "| Size (bytes) | Count |")?;
        writeln!(w, "|--------------|-------|")?;
        for (size, count) in &report.packet_sizes {
            writeln!(w, "| {size} | {count} |")?;
        }

        if !report.unknown_messages.is_empty() {
            writeln!(w, "\n## Unknown/Undocumented Message Types\n")?;
            for unknown in &report.unknown_messages {
                writeln!(
                    w,
                    "- **Type {}** at {}",
                    unknown.message_type, unknown.timestamp
                )?;
                writeln!(w, "  - Payload: `{}`", unknown.payload_prefix)?;
            }
        }

        writeln!(w, "\n## Protocol Sequence Patterns\n")?;
        writeln!(w, "### Timing Analysis")?;
        writeln!(
            w,
            "- Total message exchanges: {}",
            report.sequence_analysis.len()
        )?;
        if let Some(window) = format_capture_window(report) {
            writeln!(w, "- Capture window: {window}")?;
        }

        writeln!(w, "\n### Message Flow Pattern")?;
        writeln!(w, "```")?;
        for entry in report.sequence_analysis.iter().take(FLOW_PREVIEW) {
            writeln!(w, "{}", format_flow_line(entry))?;
        }
        if report.sequence_analysis.len() > FLOW_PREVIEW {
            writeln!(
                w,
                "... and {} more messages",
                report.sequence_analysis.len() - FLOW_PREVIEW
            )?;
        }
        writeln!(w, "```")?;

        writeln!(w, "\n## Key Findings\n")?;
        for finding in report.findings() {
            writeln!(w, "- {finding}")?;
        }

        writeln!(w, "\n## Anomalies and Interesting Behaviors\n")?;
        let anomalies = report.anomalies();
        if anomalies.is_empty() {
            writeln!(w, "- No significant anomalies detected in the analyzed traffic")?;
        }
        for anomaly in anomalies {
            writeln!(w, "- {anomaly}")?;
        }

        Ok(())
    }

    fn write_json<W: Write>(
        &self,
        report: &AggregateReport,
        title: &str,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let json = JsonReport {
            title,
            report,
            findings: report.findings(),
            anomalies: report.anomalies(),
        };
        serde_json::to_writer_pretty(&mut *writer, &json)?;
        writeln!(writer)
    }

    fn write_table<W: Write>(
        &self,
        report: &AggregateReport,
        title: &str,
        writer: &mut W,
    ) -> std::io::Result<()> {
        use comfy_table::{Cell, Table};

        writeln!(writer, "{title}\n")?;

        let mut summary = Table::new();
        summary.set_header(vec![Cell::new("Metric"), Cell::new("Value")]);
        summary.add_row(vec![
            Cell::new("Total packets"),
            Cell::new(report.total_packets),
        ]);
        summary.add_row(vec![
            Cell::new("Parsed PPA packets"),
            Cell::new(report.decoded_packets),
        ]);
        for direction in [Direction::ClientToDevice, Direction::DeviceToClient] {
            summary.add_row(vec![
                Cell::new(direction.label()),
                Cell::new(report.direction_count(direction)),
            ]);
        }
        summary.add_row(vec![
            Cell::new("Unknown messages"),
            Cell::new(report.unknown_messages.len()),
        ]);
        writeln!(writer, "{summary}")?;

        let mut types = Table::new();
        types.set_header(vec!["Type", "Name", "Count", "Percentage"]);
        for (message_type, count) in report.message_types_by_count() {
            types.add_row(vec![
                Cell::new(message_type.code()),
                Cell::new(message_type.name()),
                Cell::new(count),
                Cell::new(format_percentage(count, report.decoded_packets)),
            ]);
        }
        writeln!(writer, "{types}")?;

        let mut statuses = Table::new();
        statuses.set_header(vec!["Status", "Name", "Count"]);
        for (status, count) in report.status_codes_by_count() {
            statuses.add_row(vec![
                Cell::new(format!("0x{:04x}", status.code())),
                Cell::new(status.label()),
                Cell::new(count),
            ]);
        }
        writeln!(writer, "{statuses}")?;

        let mut sizes = Table::new();
        sizes.set_header(vec!["Size (bytes)", "Count"]);
        for (size, count) in &report.packet_sizes {
            sizes.add_row(vec![Cell::new(size), Cell::new(count)]);
        }
        writeln!(writer, "{sizes}")
    }
}
