//! Capture trace reader.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::{debug, trace};

use super::header::{parse_header_line, UDP_MARKER};
use super::hexdump::{decode_hex_line, is_hex_line};
use super::CapturedPacket;
use crate::error::{Error, TraceError};
use crate::protocol::DEFAULT_HEADER_OFFSET;

/// Buffer size for reading trace files (64KB).
const BUFFER_SIZE: usize = 65536;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Streaming reader turning trace lines into [`CapturedPacket`]s.
///
/// Lines are consumed one at a time; the line that ends a hex dump is kept
/// back and examined again as a possible packet header.
pub struct TraceReader<R> {
    reader: R,
    pending: Option<(u64, String)>,
    line_number: u64,
    packet_count: u64,
    skipped_lines: u64,
    header_offset: usize,
    buf: Vec<u8>,
}

impl TraceReader<Box<dyn BufRead + Send>> {
    /// Open a trace file for reading.
    ///
    /// Automatically detects and decompresses gzipped files.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();

        let is_gzipped = is_gzip_file(path)?;
        let file = open_file(path)?;

        let reader: Box<dyn Read + Send> = if is_gzipped {
            debug!(path = %path.display(), "reading gzip-compressed trace");
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Ok(Self::from_reader(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            reader,
        ))))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Read a trace from any buffered source.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            line_number: 0,
            packet_count: 0,
            skipped_lines: 0,
            header_offset: DEFAULT_HEADER_OFFSET,
            buf: Vec::new(),
        }
    }

    /// Set the number of lower-layer header bytes skipped before the payload.
    pub fn with_header_offset(mut self, header_offset: usize) -> Self {
        self.header_offset = header_offset;
        self
    }

    /// Number of packets produced so far.
    pub fn packet_count(&self) -> u64 {
        self.packet_count
    }

    /// Number of `UDP, length` lines skipped because they did not parse.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    /// Read the next packet.
    pub fn next_packet(&mut self) -> Result<Option<CapturedPacket>, Error> {
        loop {
            let Some((line_number, line)) = self.next_line()? else {
                return Ok(None);
            };

            let Some(header) = parse_header_line(&line) else {
                if line.contains(UDP_MARKER) {
                    self.skipped_lines += 1;
                    debug!(line_number, "skipping malformed packet header line");
                }
                continue;
            };

            let mut raw_bytes = Vec::new();
            let mut truncated = false;

            while let Some((hex_line_number, hex_line)) = self.next_line()? {
                if !is_hex_line(&hex_line) {
                    self.pending = Some((hex_line_number, hex_line));
                    break;
                }
                if truncated {
                    continue;
                }
                match decode_hex_line(&hex_line) {
                    Ok(bytes) => raw_bytes.extend_from_slice(&bytes),
                    Err(e) => {
                        debug!(
                            line_number = hex_line_number,
                            error = %e,
                            "undecodable hex dump line, truncating packet"
                        );
                        truncated = true;
                    }
                }
            }

            self.packet_count += 1;
            trace!(
                line_number,
                timestamp = %header.timestamp,
                bytes = raw_bytes.len(),
                "captured packet"
            );

            return Ok(Some(CapturedPacket {
                line_number,
                timestamp: header.timestamp,
                source_address: header.source_address,
                source_port: header.source_port,
                dest_address: header.dest_address,
                dest_port: header.dest_port,
                declared_length: header.declared_length,
                raw_bytes,
                payload_offset: self.header_offset,
                truncated,
            }));
        }
    }

    fn next_line(&mut self) -> Result<Option<(u64, String)>, Error> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }

        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        // tcpdump output is ASCII; anything else only has to survive until
        // the header/hex matchers reject it.
        let line = String::from_utf8_lossy(&self.buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        Ok(Some((self.line_number, line)))
    }
}

/// Iterator adapter for TraceReader.
impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<CapturedPacket, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_packet() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Parse an in-memory trace using the default header offset.
pub fn parse_trace(text: &str) -> Vec<CapturedPacket> {
    parse_trace_with_offset(text, DEFAULT_HEADER_OFFSET)
}

/// Parse an in-memory trace, skipping `header_offset` bytes before each payload.
pub fn parse_trace_with_offset(text: &str, header_offset: usize) -> Vec<CapturedPacket> {
    // Reading from a byte slice cannot fail.
    TraceReader::from_reader(text.as_bytes())
        .with_header_offset(header_offset)
        .map_while(Result::ok)
        .collect()
}

fn open_file(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        let path = path.display().to_string();
        match e.kind() {
            io::ErrorKind::NotFound => Error::Trace(TraceError::FileNotFound { path }),
            _ => Error::Trace(TraceError::Unreadable {
                path,
                reason: e.to_string(),
            }),
        }
    })
}

/// Check if a file is gzipped by extension or magic bytes.
fn is_gzip_file(path: &Path) -> Result<bool, Error> {
    if is_gzip_extension(path) {
        return Ok(true);
    }

    let mut file = open_file(path)?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(_) => Ok(false), // File too short to be gzipped
    }
}

/// Check if a path appears to be a gzip file by extension only.
pub fn is_gzip_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|f| f.to_str())
        .map(|name| name.to_lowercase().ends_with(".gz"))
        .unwrap_or(false)
}
