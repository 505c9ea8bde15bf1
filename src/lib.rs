//! # The OBD-II Crate
//! Decodes OBD-II (SAE J1979) diagnostic responses and queries vehicles over CAN using ISO-TP. The core is a static
//! catalog of diagnostic commands, each knowing how to validate and decode its response, and the "supported PIDs"
//! bitfield protocol used to find out which commands a vehicle implements.
//!
//! ## Decoding Example
//!
//! Responses can be decoded without any transport, e.g. from a log file.
//!
//! ```rust
//! use obdii::obd::{ENGINE_RPM, TROUBLE_CODES};
//!
//! let response = ENGINE_RPM.decode(&[0x41, 0x0c, 0x1a, 0x00]).unwrap();
//! assert_eq!(response.value.as_numeric(), Some(1664.0));
//!
//! let response = TROUBLE_CODES.decode(&[0x43, 0x38, 0xab, 0xe0, 0xfc]).unwrap();
//! let codes: Vec<String> = response.value.as_trouble_codes().unwrap().iter().map(|c| c.to_string()).collect();
//! assert_eq!(codes, ["P38AB", "U20FC"]);
//! ```
//!
//! ## Query Example
//!
//! The [`obd::OBDClient`] sends commands through any [`transport::Transport`]. On Linux the kernel ISO-TP stack
//! is available as [`socketcan::IsoTPSocket`]. All methods are async, and the client can be shared between tasks.
//!
//! ```rust
//! async fn obd_example() {
//!     let config = obdii::isotp::IsoTPConfig::new("can0", obdii::can::ENGINE_ECU.into());
//!     let socket = obdii::socketcan::IsoTPSocket::open(config).unwrap();
//!     let obd = obdii::obd::OBDClient::new(socket);
//!
//!     let vin = obd.query(obdii::obd::VIN).await.unwrap();
//!     println!("VIN: {}", vin.value);
//! }
//! ```
//!
//! ## Supported transports
//!  - SocketCAN ISO-TP (Linux only, `socketcan` feature)
//!

pub mod can;
mod error;
pub mod isotp;
pub mod obd;
pub mod transport;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use tokio_stream::{Stream, StreamExt};

#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub mod socketcan;
