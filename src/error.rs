//! Contains the main error type for the library.
use thiserror::Error;

/// The main error type for the library. Each module has it's own error type that is contained by this error.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Not Found")]
    NotFound,
    #[error("Timeout")]
    Timeout,
    #[error("IO Error: {0}")]
    IOError(std::io::ErrorKind),
    #[error(transparent)]
    IsoTPError(#[from] crate::isotp::error::Error),
    #[error(transparent)]
    OBDError(#[from] crate::obd::Error),
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Error {
        Error::Timeout
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IOError(err.kind())
    }
}

impl Error {
    /// Whether the error came from the transport rather than from the ECU's answer.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Error::OBDError(_))
    }
}
