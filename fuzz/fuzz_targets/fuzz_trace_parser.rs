//! Fuzz target for the tcpdump text trace reader.
//!
//! Tests handling of arbitrary text including:
//! - Header lines with out-of-range ports and lengths
//! - Hex-dump lines with odd digit counts and non-hex characters
//! - Invalid UTF-8 and missing line terminators

#![no_main]

use libfuzzer_sys::fuzz_target;
use ppatrace::stats::Aggregator;
use ppatrace::trace::TraceReader;
use ppatrace::AnalysisConfig;

fuzz_target!(|data: &[u8]| {
    let mut aggregator = Aggregator::new(AnalysisConfig::default());
    let mut reader = TraceReader::from_reader(data);

    // Read all packets - should never panic
    while let Ok(Some(packet)) = reader.next_packet() {
        aggregator.add_packet(&packet);
    }

    let report = aggregator.finish();
    assert!(report.decoded_packets <= report.total_packets);
    let _ = report.findings();
    let _ = report.anomalies();
});
