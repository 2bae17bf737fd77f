//! Error types for ppatrace.

use thiserror::Error;

/// Main error type for ppatrace operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error opening or reading a capture trace
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Error during PPA header decoding
    #[error("Protocol decode error: {0}")]
    Protocol(#[from] ProtocolError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to capture trace input.
#[derive(Error, Debug)]
pub enum TraceError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// File exists but could not be read
    #[error("Cannot read trace {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Errors related to protocol decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload too short for the fixed header
    #[error("{protocol}: payload too short (need {needed} bytes, have {have})")]
    PacketTooShort {
        protocol: &'static str,
        needed: usize,
        have: usize,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
