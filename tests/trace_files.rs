//! Integration tests for reading traces from disk.

use std::fs::{self, File};
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::{NamedTempFile, TempDir};

use ppatrace::cli::{OutputFormat, ReportFormatter};
use ppatrace::error::TraceError;
use ppatrace::trace::TraceReader;
use ppatrace::{analyze_file, AnalysisConfig, Error};

/// Two PPA exchanges as printed by `tcpdump -X`.
const TRACE: &str = "\
reading from file session.pcap, link-type RAW (Raw IPv4), snapshot length 262144
14:02:11.000100 IP 192.168.1.20.50123 > 192.168.1.50.5001: UDP, length 12
\t0x0000:  4500 0028 0001 0000 4011 0000 c0a8 0114  E..(....@.......
\t0x0010:  c0a8 0132 c3cb 1389 0014 0000 0200 0601  ...2............
\t0x0020:  0000 0001 0100 0000                      ........
14:02:11.004200 IP 192.168.1.50.5001 > 192.168.1.20.50123: UDP, length 16
\t0x0000:  4500 002c 0002 0000 4011 0000 c0a8 0132  E..,....@......2
\t0x0010:  c0a8 0114 1389 c3cb 0018 0000 0200 0101  ................
\t0x0020:  0000 0001 0100 0000 6d69 7872           ........mixr
14:02:12.000000 IP 192.168.1.50.5001 > 192.168.1.20.50123: UDP, length 12
\t0x0000:  4500 0028 0003 0000 4011 0000 c0a8 0132  E..(....@......2
\t0x0010:  c0a8 0114 1389 c3cb 0014 0000 0700 4100  ..............A.
\t0x0020:  0000 0001 0200 0000                      ........
";

fn write_plain(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("session.txt");
    fs::write(&path, TRACE).unwrap();
    path
}

fn write_gzip(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(TRACE.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

#[test]
fn test_analyze_plain_file() {
    let dir = TempDir::new().unwrap();
    let report = analyze_file(write_plain(&dir), AnalysisConfig::default()).unwrap();

    assert_eq!(report.total_packets, 3);
    assert_eq!(report.decoded_packets, 3);
    assert_eq!(report.message_type_count(2), 2);
    assert_eq!(report.status_codes.get(&0x0106), Some(&1));
    assert_eq!(report.status_codes.get(&0x0101), Some(&1));
    assert_eq!(report.status_codes.get(&0x0041), Some(&1));
    assert_eq!(report.unknown_messages.len(), 1);
    assert_eq!(report.unknown_messages[0].message_type, 7);
    assert_eq!(report.first_timestamp(), Some("14:02:11.000100"));
    assert_eq!(report.last_timestamp(), Some("14:02:12.000000"));
}

#[test]
fn test_gzip_matches_plain() {
    let dir = TempDir::new().unwrap();
    let plain = analyze_file(write_plain(&dir), AnalysisConfig::default()).unwrap();

    // Detected by extension
    let by_extension = analyze_file(write_gzip(&dir, "session.txt.gz"), AnalysisConfig::default()).unwrap();
    // Detected by magic bytes
    let by_magic = analyze_file(write_gzip(&dir, "session.dump"), AnalysisConfig::default()).unwrap();

    assert_eq!(plain, by_extension);
    assert_eq!(plain, by_magic);
}

#[test]
fn test_reader_yields_packets_from_file() {
    let dir = TempDir::new().unwrap();
    let packets: Vec<_> = TraceReader::open(write_plain(&dir))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(packets.len(), 3);
    assert_eq!(packets[0].line_number, 2);
    assert_eq!(packets[0].source_address, "192.168.1.20");
    assert_eq!(packets[0].dest_port, 5001);
    assert_eq!(packets[1].raw_bytes.len(), 44);
    assert_eq!(packets[1].payload().unwrap().len(), 16);
}

#[test]
fn test_missing_file_is_fatal() {
    let result = analyze_file("/definitely/not/here.txt", AnalysisConfig::default());

    match result {
        Err(Error::Trace(TraceError::FileNotFound { path })) => {
            assert!(path.contains("not/here.txt"));
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_empty_file() {
    let temp = NamedTempFile::new().unwrap();
    let report = analyze_file(temp.path(), AnalysisConfig::default()).unwrap();

    assert_eq!(report.total_packets, 0);
    assert!(report.findings().is_empty());
}

#[test]
fn test_write_markdown_report() {
    let dir = TempDir::new().unwrap();
    let report = analyze_file(write_plain(&dir), AnalysisConfig::default()).unwrap();

    let output_path = dir.path().join("report.md");
    {
        let mut file = File::create(&output_path).unwrap();
        ReportFormatter::new(OutputFormat::Markdown)
            .write(&report, "Mixer Session", &mut file)
            .unwrap();
    }

    let markdown = fs::read_to_string(&output_path).unwrap();
    assert!(markdown.starts_with("# Mixer Session"));
    assert!(markdown.contains("| 2 | DeviceData | 2 | 66.7% |"));
    assert!(markdown.contains("| 0x0041 | WaitServer | 1 |"));
    assert!(markdown.contains("- **Type 7** at 14:02:12.000000"));
    assert!(markdown.contains("14:02:11.000100 ← 2 (DeviceData) (RequestClient) Seq:1 Len:12"));
    assert!(markdown.contains("14:02:11.004200 → 2 (DeviceData) (ResponseClient) Seq:1 Len:16"));
}
