//! On-Board Diagnostics (OBD-II) Client, implements the emissions related services of SAE J1979
//! ## Example
//! ```rust
//! async fn obd_example() {
//!     let config = obdii::isotp::IsoTPConfig::new("can0", obdii::can::ENGINE_ECU.into());
//!     let socket = obdii::socketcan::IsoTPSocket::open(config).unwrap();
//!     let obd = obdii::obd::OBDClient::new(socket);
//!
//!     let supported = obd.supported_commands().await.unwrap();
//!     for command in &supported {
//!         match obd.query(command).await {
//!             Ok(response) => println!("{}: {}", command.name, response.value),
//!             Err(e) => println!("{}: {}", command.name, e),
//!         }
//!     }
//! }
//! ```

mod catalog;
mod command;
mod command_set;
mod constants;
mod decoder;
mod error;
mod types;

use crate::transport::Transport;
use crate::Result;
pub use catalog::*;
pub use command::Command;
pub use command_set::{CommandSet, SupportedPids, MODE1_RANGES};
pub use constants::*;
pub use error::{Error, NegativeResponseCode};
pub use types::*;

use async_stream::stream;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_stream::Stream;
use tracing::{debug, info, warn};

/// OBD-II Client. Wraps a [`Transport`] to query and decode diagnostic commands.
///
/// The transport sits behind an async mutex, so the client can be shared between tasks while at most one
/// request is outstanding at a time.
pub struct OBDClient<T> {
    transport: Mutex<T>,
}

impl<T: Transport> OBDClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
        }
    }

    /// Sends the request payload of `command` and returns the raw response without validating it. While the ECU
    /// answers "response pending" the client keeps waiting for the real answer, each wait bounded by the transport
    /// timeout.
    pub async fn request(&self, command: &Command) -> Result<Vec<u8>> {
        let request = command.request();

        let mut transport = self.transport.lock().await;
        debug!("TX {}", hex::encode(&request));
        let mut response = transport.request(&request).await?;
        debug!("RX {}", hex::encode(&response));

        while command.is_response_pending(&response) {
            info!("Received Response Pending");
            response = transport.receive().await?;
            debug!("RX {}", hex::encode(&response));
        }

        Ok(response)
    }

    /// Sends `command`, then validates and decodes the response. Transport failures are reported as their own
    /// error variants, separate from [`crate::Error::OBDError`].
    pub async fn query(&self, command: &'static Command) -> Result<Response> {
        let response = self.request(command).await?;
        Ok(command.decode(&response)?)
    }

    async fn query_bitfield(&self, command: &'static Command) -> Result<u32> {
        let response = self.query(command).await?;
        Ok(response.value.as_bitfield().unwrap_or_default())
    }

    /// Discovers which commands the ECU supports. Mode 1 ranges are scanned in order, and the scan stops as soon as
    /// a range does not advertise the next one. A negative response to a later range or to the Mode 9 query counts
    /// as "not supported", all other errors are returned.
    pub async fn supported_commands(&self) -> Result<CommandSet> {
        let mut supported = SupportedPids::new();

        for (index, &command) in MODE1_SUPPORTED_PIDS.iter().enumerate() {
            let mask = match self.query_bitfield(command).await {
                Ok(mask) => mask,
                Err(crate::Error::OBDError(Error::NegativeResponse(code))) if index > 0 => {
                    warn!("Negative response to {}: {:?}", command, code);
                    break;
                }
                Err(e) => return Err(e),
            };
            supported.set_current_data(index, mask);

            let next = (index as u8 + 1) * PIDS_PER_RANGE;
            if !supported.contains(Mode::CurrentData, next) {
                break;
            }
        }

        match self.query_bitfield(SUPPORTED_PIDS_MODE9).await {
            Ok(mask) => supported.set_vehicle_information(mask),
            Err(crate::Error::OBDError(Error::NegativeResponse(code))) => {
                warn!("Negative response to {}: {:?}", SUPPORTED_PIDS_MODE9, code);
            }
            Err(e) => return Err(e),
        }

        let commands = CommandSet::new(supported);
        info!("Found {} supported commands", commands.len());

        Ok(commands)
    }

    /// Queries `commands` in order once every `period`, yielding each result. If a round takes longer than
    /// `period` the next one starts right away instead of bursting to catch up.
    pub fn stream<'a>(
        &'a self,
        commands: &'a [&'static Command],
        period: std::time::Duration,
    ) -> impl Stream<Item = Result<Response>> + 'a {
        Box::pin(stream! {
            let mut interval = tokio::time::interval(period.max(std::time::Duration::from_millis(1)));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                for &command in commands {
                    yield self.query(command).await;
                }
            }
        })
    }

    pub fn into_inner(self) -> T {
        self.transport.into_inner()
    }
}
