//! Error types for decoding OBD-II responses.
use std::collections::TryReserveError;

use thiserror::Error;

/// Negative response codes an ECU may send for an emissions-related request (ISO 15765-4).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NegativeResponseCode {
    GeneralReject = 0x10,
    ServiceNotSupported = 0x11,
    SubFunctionNotSupported = 0x12,
    IncorrectMessageLengthOrInvalidFormat = 0x13,
    BusyRepeatRequest = 0x21,
    ConditionsNotCorrect = 0x22,
    RequestOutOfRange = 0x31,
    RequestCorrectlyReceivedResponsePending = 0x78,

    NonStandard(u8),
}

impl From<u8> for NegativeResponseCode {
    fn from(val: u8) -> NegativeResponseCode {
        match val {
            0x10 => NegativeResponseCode::GeneralReject,
            0x11 => NegativeResponseCode::ServiceNotSupported,
            0x12 => NegativeResponseCode::SubFunctionNotSupported,
            0x13 => NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat,
            0x21 => NegativeResponseCode::BusyRepeatRequest,
            0x22 => NegativeResponseCode::ConditionsNotCorrect,
            0x31 => NegativeResponseCode::RequestOutOfRange,
            0x78 => NegativeResponseCode::RequestCorrectlyReceivedResponsePending,
            _ => NegativeResponseCode::NonStandard(val),
        }
    }
}

/// Reasons a raw response is not a valid answer to a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Empty Response")]
    EmptyResponse,
    #[error("Invalid Response Length: expected {expected}, got {actual}")]
    InvalidResponseLength { expected: usize, actual: usize },
    #[error("Invalid Response Mode: 0x{0:02x}")]
    InvalidMode(u8),
    #[error("Invalid Response PID: 0x{0:02x}")]
    InvalidPid(u8),
    #[error("Malformed Trouble Code Payload: {0} bytes")]
    MalformedTroubleCodes(usize),
    #[error("Negative Response: {0:?}")]
    NegativeResponse(NegativeResponseCode),
    #[error(transparent)]
    Allocation(#[from] TryReserveError),
}
