//! Request/response channel used by the [`crate::obd::OBDClient`].
use std::future::Future;

use crate::Result;

/// A connection to a single ECU that answers one request at a time. Implementations send the raw request
/// payload and return the complete response payload, or an error if none arrives within their timeout.
///
/// The channel has no request/response correlation beyond strict ordering, so callers must not issue a new
/// request before the previous one resolved. [`crate::obd::OBDClient`] enforces this.
pub trait Transport: Send {
    fn request(&mut self, payload: &[u8]) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Waits for another response to the last request without sending anything. Used after the ECU answered
    /// with "response pending" and still owes the real answer.
    fn receive(&mut self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
