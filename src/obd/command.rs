//! Diagnostic command definitions and response validation.
use super::constants::{Mode, ResponseLength, ResponseType, NEGATIVE_RESPONSE};
use super::decoder::Decoder;
use super::error::{Error, NegativeResponseCode};
use super::types::Response;

/// A single diagnostic request together with the shape of its expected answer. Commands are only created
/// by the static catalog and are passed around as `&'static Command`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Command {
    /// Human readable description
    pub name: &'static str,
    pub mode: Mode,
    /// Parameter ID, absent for [`Mode::StoredTroubleCodes`]
    pub pid: Option<u8>,
    pub response_type: ResponseType,
    /// Expected response length, including the mode and PID echo
    pub response_length: ResponseLength,
    decoder: Decoder,
}

impl Command {
    pub(crate) const fn new(
        name: &'static str,
        mode: Mode,
        pid: Option<u8>,
        response_length: ResponseLength,
        decoder: Decoder,
    ) -> Self {
        Self {
            name,
            mode,
            pid,
            response_type: decoder.response_type(),
            response_length,
            decoder,
        }
    }

    /// Mode 1 command with a fixed length response
    pub(crate) const fn current_data(name: &'static str, pid: u8, length: usize, decoder: Decoder) -> Self {
        Self::new(name, Mode::CurrentData, Some(pid), ResponseLength::Fixed(length), decoder)
    }

    /// Raw bytes sent to the ECU: `[mode]` or `[mode, pid]`.
    pub fn request(&self) -> Vec<u8> {
        let mut request = vec![self.mode as u8];
        request.extend(self.pid);
        request
    }

    /// Checks that `payload` is a legitimate answer to this command without decoding it.
    pub fn validate(&self, payload: &[u8]) -> Result<(), Error> {
        if payload.is_empty() {
            return Err(Error::EmptyResponse);
        }

        // Negative responses have their own fixed layout: [0x7f, mode, code]
        if payload[0] == NEGATIVE_RESPONSE && payload.len() == 3 && payload[1] == self.mode as u8 {
            return Err(Error::NegativeResponse(payload[2].into()));
        }

        if let ResponseLength::Fixed(expected) = self.response_length {
            if payload.len() != expected {
                return Err(Error::InvalidResponseLength {
                    expected,
                    actual: payload.len(),
                });
            }
        }

        if payload[0] != self.mode.positive_response() {
            return Err(Error::InvalidMode(payload[0]));
        }

        if let Some(pid) = self.pid {
            if payload.len() < 2 {
                return Err(Error::InvalidResponseLength {
                    expected: 2,
                    actual: payload.len(),
                });
            }

            if payload[1] != pid {
                return Err(Error::InvalidPid(payload[1]));
            }
        }

        Ok(())
    }

    /// True if `payload` is the ECU asking for more time before it sends the real answer to this command.
    pub(crate) fn is_response_pending(&self, payload: &[u8]) -> bool {
        payload.len() == 3
            && payload[0] == NEGATIVE_RESPONSE
            && payload[1] == self.mode as u8
            && NegativeResponseCode::from(payload[2]) == NegativeResponseCode::RequestCorrectlyReceivedResponsePending
    }

    /// Validates `payload` and decodes it into a [`Response`] that refers back to this command.
    pub fn decode(&'static self, payload: &[u8]) -> Result<Response, Error> {
        self.validate(payload)?;
        let value = self.decoder.decode(payload)?;
        Ok(Response {
            command: self,
            value,
        })
    }

    #[cfg(test)]
    pub(crate) fn min_len(&self) -> usize {
        self.decoder.min_len()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pid {
            Some(pid) => write!(f, "[{:02X} {:02X}] {}", self.mode as u8, pid, self.name),
            None => write!(f, "[{:02X}] {}", self.mode as u8, self.name),
        }
    }
}
