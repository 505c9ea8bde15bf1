//! Constants for the OBD-II Client.
use strum_macros::EnumIter;

/// Offset added to the request mode by the ECU in a positive response.
pub static POSITIVE_RESPONSE: u8 = 0x40;
/// First byte of a negative response, followed by the rejected mode and a [`super::NegativeResponseCode`].
pub static NEGATIVE_RESPONSE: u8 = 0x7f;

/// Number of PIDs covered by a single "supported PIDs" bitfield.
pub static PIDS_PER_RANGE: u8 = 0x20;

/// Diagnostic services (modes) as defined in SAE J1979
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Mode {
    /// Show current data
    CurrentData = 0x01,
    /// Show stored Diagnostic Trouble Codes
    StoredTroubleCodes = 0x03,
    /// Request vehicle information
    VehicleInformation = 0x09,
}

impl Mode {
    /// The mode byte an ECU echoes in a positive response.
    pub fn positive_response(self) -> u8 {
        self as u8 + POSITIVE_RESPONSE
    }

    /// Whether requests in this mode carry a PID that is echoed in the response.
    pub fn has_pid(self) -> bool {
        !matches!(self, Mode::StoredTroubleCodes)
    }
}

/// Which member of [`super::Value`] holds the decoded data for a command.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseType {
    Bitfield,
    Numeric,
    String,
    Other,
}

/// Expected length of a raw response, including the mode and PID echo.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseLength {
    Fixed(usize),
    Variable,
}

/// First character of a trouble code, taken from the two most significant bits.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DTCCategory {
    Powertrain = 0,
    Chassis = 1,
    Body = 2,
    Network = 3,
}

impl DTCCategory {
    pub fn letter(self) -> char {
        match self {
            DTCCategory::Powertrain => 'P',
            DTCCategory::Chassis => 'C',
            DTCCategory::Body => 'B',
            DTCCategory::Network => 'U',
        }
    }
}
