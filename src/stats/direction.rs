//! Message direction.
//!
//! PPA headers carry no direction field. Direction is inferred from the
//! UDP source port: the device sends from a fixed port (5001 in the
//! observed deployment), so anything else is client traffic.

use std::fmt;

use serde::Serialize;

/// Flow direction of one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Direction {
    #[serde(rename = "Client→Device")]
    ClientToDevice,
    #[serde(rename = "Device→Client")]
    DeviceToClient,
}

impl Direction {
    /// Classify by source port alone.
    #[inline]
    pub fn classify(source_port: u16, device_port: u16) -> Self {
        if source_port == device_port {
            Direction::DeviceToClient
        } else {
            Direction::ClientToDevice
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::ClientToDevice => "Client→Device",
            Direction::DeviceToClient => "Device→Client",
        }
    }

    /// Arrow used in flow listings.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::ClientToDevice => "←",
            Direction::DeviceToClient => "→",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
