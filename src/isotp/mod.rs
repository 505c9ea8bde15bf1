//! ISO Transport Protocol (ISO-TP) configuration, ISO 15765-2
//!
//! Segmentation and flow control are handled by the transport (e.g. the Linux kernel for
//! [`crate::socketcan::IsoTPSocket`]); this module describes how the channel to an ECU is set up.
//! ## Example:
//! ```rust
//! let mut config = obdii::isotp::IsoTPConfig::new("can0", obdii::can::Identifier::Standard(0x7e0));
//! config.timeout = std::time::Duration::from_millis(2000);
//! assert_eq!(config.rx_id, obdii::can::Identifier::Standard(0x7e8));
//! ```

mod constants;
pub mod error;
mod types;

pub use constants::*;
pub use types::FlowControlConfig;

use crate::can::Identifier;

/// Configuration of an ISO-TP channel to a single ECU.
#[derive(Debug, Clone, PartialEq)]
pub struct IsoTPConfig {
    /// Network interface, e.g. `can0`
    pub interface: String,
    /// Transmit ID
    pub tx_id: Identifier,
    /// Receive ID
    pub rx_id: Identifier,
    /// Padding byte for frames shorter than 8 bytes, `None` to send short frames
    pub padding: Option<u8>,
    /// Flow control parameters for multi-frame responses
    pub flow_control: FlowControlConfig,
    /// Max time to wait for a request to be sent or a response to arrive
    pub timeout: std::time::Duration,
}

impl IsoTPConfig {
    /// Configuration for the ECU with request ID `id`. The receive ID follows the OBD-II addressing scheme.
    pub fn new(interface: &str, id: Identifier) -> Self {
        Self {
            interface: interface.to_owned(),
            tx_id: id,
            rx_id: id.response_id(),
            padding: Some(DEFAULT_PADDING),
            flow_control: FlowControlConfig::default(),
            timeout: std::time::Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}
