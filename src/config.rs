//! Analysis configuration.

use crate::protocol::DEFAULT_HEADER_OFFSET;

/// Source port the PPA device sends from in the observed deployment.
pub const DEFAULT_DEVICE_PORT: u16 = 5001;

/// Settings for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Lower-layer header bytes skipped before the PPA payload.
    pub header_offset: usize,

    /// Source port identifying device-to-client traffic.
    pub device_port: u16,
}

impl AnalysisConfig {
    pub fn with_header_offset(mut self, header_offset: usize) -> Self {
        self.header_offset = header_offset;
        self
    }

    pub fn with_device_port(mut self, device_port: u16) -> Self {
        self.device_port = device_port;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            device_port: DEFAULT_DEVICE_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.header_offset, 28);
        assert_eq!(config.device_port, 5001);
    }

    #[test]
    fn test_builders() {
        let config = AnalysisConfig::default()
            .with_header_offset(42)
            .with_device_port(6000);
        assert_eq!(config.header_offset, 42);
        assert_eq!(config.device_port, 6000);
    }
}
