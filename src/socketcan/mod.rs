//! This module provides a [`Transport`] implementation backed by the Linux kernel ISO-TP stack (`CAN_ISOTP` sockets).
//! The kernel takes care of segmentation and flow control, so each request and response is a single read or write.
use crate::isotp::{IsoTPConfig, MAX_PAYLOAD_LEN};
use crate::transport::Transport;
use crate::Result;

use tokio::io::unix::AsyncFd;
use tokio::io::Interest;
use tracing::{debug, info};

mod socket;
use socket::RawIsoTPSocket;

/// Transport for an ISO-TP channel on a SocketCAN interface.
pub struct IsoTPSocket {
    socket: AsyncFd<RawIsoTPSocket>,
    config: IsoTPConfig,
}

impl IsoTPSocket {
    /// Opens and binds a socket for the channel described by `config`. Must be called from within a Tokio runtime.
    /// Returns [`crate::Error::NotFound`] if the interface does not exist.
    pub fn open(config: IsoTPConfig) -> Result<Self> {
        let socket = RawIsoTPSocket::open(&config)?;
        let socket = AsyncFd::new(socket)?;

        info!(
            "Opened ISO-TP socket on {} (tx {}, rx {})",
            config.interface, config.tx_id, config.rx_id
        );

        Ok(Self { socket, config })
    }

    pub fn config(&self) -> &IsoTPConfig {
        &self.config
    }

    /// Sends a single ISO-TP message. No timeout is applied.
    pub async fn send(&self, payload: &[u8]) -> Result<()> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(crate::isotp::error::Error::DataTooLarge.into());
        }

        let written = self
            .socket
            .async_io(Interest::WRITABLE, |socket| socket.send(payload))
            .await?;

        if written != payload.len() {
            return Err(crate::isotp::error::Error::IncompleteWrite {
                written,
                expected: payload.len(),
            }
            .into());
        }

        Ok(())
    }

    /// Waits for the next ISO-TP message on the receive ID. No timeout is applied.
    pub async fn recv(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0; MAX_PAYLOAD_LEN];
        let len = self
            .socket
            .async_io(Interest::READABLE, |socket| socket.recv(&mut buf))
            .await?;

        buf.truncate(len);
        Ok(buf)
    }

    /// Drops responses that arrived after an earlier request timed out, so they can't be mistaken for the next answer.
    fn discard_pending(&self) -> Result<()> {
        let mut buf = vec![0; MAX_PAYLOAD_LEN];
        loop {
            match self.socket.get_ref().recv(&mut buf) {
                Ok(len) => debug!("Discarding late response {}", hex::encode(&buf[..len])),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Transport for IsoTPSocket {
    async fn request(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        self.discard_pending()?;
        tokio::time::timeout(self.config.timeout, self.send(payload)).await??;
        tokio::time::timeout(self.config.timeout, self.recv()).await?
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
        tokio::time::timeout(self.config.timeout, self.recv()).await?
    }
}
