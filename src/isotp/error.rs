//! Error types for the ISO-TP protocol.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Data Too Large")]
    DataTooLarge,
    #[error("Incomplete Write: {written} of {expected} bytes")]
    IncompleteWrite { written: usize, expected: usize },
    #[error("Invalid Separation Time")]
    InvalidSeparationTime,
}
