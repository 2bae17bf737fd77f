//! End-to-end trace analysis: parse, extract, decode, aggregate.

use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::stats::{AggregateReport, Aggregator};
use crate::trace::{parse_trace_with_offset, TraceReader};

/// Analyze a trace held in memory.
pub fn analyze_trace(text: &str, config: AnalysisConfig) -> AggregateReport {
    let mut aggregator = Aggregator::new(config);
    for packet in parse_trace_with_offset(text, config.header_offset) {
        aggregator.add_packet(&packet);
    }
    aggregator.finish()
}

/// Analyze a trace file (plain text or gzip).
pub fn analyze_file<P: AsRef<Path>>(path: P, config: AnalysisConfig) -> Result<AggregateReport> {
    let path = path.as_ref();
    info!(path = %path.display(), "parsing capture trace");
    analyze_reader(TraceReader::open(path)?, config)
}

/// Analyze packets from an open reader.
///
/// The reader's header offset is replaced by the one in `config`.
pub fn analyze_reader<R: BufRead>(
    reader: TraceReader<R>,
    config: AnalysisConfig,
) -> Result<AggregateReport> {
    let mut reader = reader.with_header_offset(config.header_offset);
    let mut aggregator = Aggregator::new(config);

    while let Some(packet) = reader.next_packet()? {
        aggregator.add_packet(&packet);
    }

    let report = aggregator.finish();
    info!(
        packets = report.total_packets,
        decoded = report.decoded_packets,
        skipped_lines = reader.skipped_lines(),
        "trace analyzed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "\
10:00:00.000000 10.0.0.1.5001 > 10.0.0.2.9000: UDP, length 20
\t0x0000:  4500 0028 0001 0000 4011 0000 0a00 0001
\t0x0010:  0a00 0002 1389 2328 0014 0000 0001 0201
\t0x0020:  aabb ccdd 0300 0400
";

    #[test]
    fn test_in_memory_and_reader_agree() {
        let config = AnalysisConfig::default();
        let from_text = analyze_trace(TRACE, config);
        let from_reader =
            analyze_reader(TraceReader::from_reader(TRACE.as_bytes()), config).unwrap();

        assert_eq!(from_text, from_reader);
        assert_eq!(from_text.decoded_packets, 1);
    }

    #[test]
    fn test_config_offset_reaches_reader() {
        let config = AnalysisConfig::default().with_header_offset(40);
        let report = analyze_reader(TraceReader::from_reader(TRACE.as_bytes()), config).unwrap();

        assert_eq!(report.total_packets, 1);
        assert_eq!(report.decoded_packets, 0);
    }
}
