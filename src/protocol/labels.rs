//! Message-type and status-code labels.
//!
//! These tables are the single source of names for decoding and for every
//! report renderer. Values missing from them are valid, just unlabeled.

use std::fmt;

use serde::Serialize;

/// Well-known PPA message type codes.
pub mod message_type {
    pub const PING: u8 = 0;
    pub const LIVE_CMD: u8 = 1;
    pub const DEVICE_DATA: u8 = 2;
    pub const PRESET_RECALL: u8 = 4;
    pub const PRESET_SAVE: u8 = 5;
}

/// PPA message type (header byte 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum MessageType {
    /// Keepalive
    Ping,
    /// Real-time control command
    LiveCmd,
    /// Device enumeration data
    DeviceData,
    PresetRecall,
    PresetSave,
    /// Any other opcode
    Unknown(u8),
}

impl MessageType {
    /// The raw opcode.
    pub fn code(self) -> u8 {
        match self {
            MessageType::Ping => message_type::PING,
            MessageType::LiveCmd => message_type::LIVE_CMD,
            MessageType::DeviceData => message_type::DEVICE_DATA,
            MessageType::PresetRecall => message_type::PRESET_RECALL,
            MessageType::PresetSave => message_type::PRESET_SAVE,
            MessageType::Unknown(code) => code,
        }
    }

    /// Display name, `"Unknown"` for unlabeled opcodes.
    pub fn name(self) -> &'static str {
        match self {
            MessageType::Ping => "Ping",
            MessageType::LiveCmd => "LiveCmd",
            MessageType::DeviceData => "DeviceData",
            MessageType::PresetRecall => "PresetRecall",
            MessageType::PresetSave => "PresetSave",
            MessageType::Unknown(_) => "Unknown",
        }
    }

    /// Whether the opcode is one of the documented message types.
    pub fn is_known(self) -> bool {
        !matches!(self, MessageType::Unknown(_))
    }
}

impl From<u8> for MessageType {
    fn from(code: u8) -> Self {
        match code {
            message_type::PING => MessageType::Ping,
            message_type::LIVE_CMD => MessageType::LiveCmd,
            message_type::DEVICE_DATA => MessageType::DeviceData,
            message_type::PRESET_RECALL => MessageType::PresetRecall,
            message_type::PRESET_SAVE => MessageType::PresetSave,
            other => MessageType::Unknown(other),
        }
    }
}

impl From<MessageType> for u8 {
    fn from(message_type: MessageType) -> Self {
        message_type.code()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

/// Which side issued a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusRole {
    Client,
    Server,
}

/// What a status says about the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusKind {
    Command,
    Request,
    Response,
    Error,
    Wait,
}

/// One row of the status-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: u16,
    pub name: &'static str,
    pub role: StatusRole,
    pub kind: StatusKind,
}

const fn entry(code: u16, name: &'static str, role: StatusRole, kind: StatusKind) -> StatusEntry {
    StatusEntry {
        code,
        name,
        role,
        kind,
    }
}

/// Known status codes, keyed by the exact 16-bit value.
pub const STATUS_TABLE: &[StatusEntry] = &[
    entry(0x0102, "CommandClient", StatusRole::Client, StatusKind::Command),
    entry(0x0106, "RequestClient", StatusRole::Client, StatusKind::Request),
    entry(0x0101, "ResponseClient", StatusRole::Client, StatusKind::Response),
    entry(0x0109, "ErrorClient", StatusRole::Client, StatusKind::Error),
    entry(0x0141, "WaitClient", StatusRole::Client, StatusKind::Wait),
    entry(0x0002, "CommandServer", StatusRole::Server, StatusKind::Command),
    entry(0x0006, "RequestServer", StatusRole::Server, StatusKind::Request),
    entry(0x0001, "ResponseServer", StatusRole::Server, StatusKind::Response),
    entry(0x0009, "ErrorServer", StatusRole::Server, StatusKind::Error),
    entry(0x0041, "WaitServer", StatusRole::Server, StatusKind::Wait),
];

/// PPA status code (header bytes 2-3, little-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// The raw 16-bit value.
    pub fn code(self) -> u16 {
        self.0
    }

    /// Table row for this code, if it is a known status.
    pub fn entry(self) -> Option<&'static StatusEntry> {
        STATUS_TABLE.iter().find(|e| e.code == self.0)
    }

    /// Known name, if any.
    pub fn name(self) -> Option<&'static str> {
        self.entry().map(|e| e.name)
    }

    /// Known name, or `"Unknown"`.
    pub fn label(self) -> &'static str {
        self.name().unwrap_or("Unknown")
    }

    /// Issuing side, for known statuses only.
    pub fn role(self) -> Option<StatusRole> {
        self.entry().map(|e| e.role)
    }

    /// Message kind, for known statuses only.
    pub fn kind(self) -> Option<StatusKind> {
        self.entry().map(|e| e.kind)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x} ({})", self.0, self.label())
    }
}
