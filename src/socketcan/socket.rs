//! Low Level ISO-TP socket code, see `include/uapi/linux/can/isotp.h`
use libc::{c_int, c_void, sa_family_t, socklen_t, AF_CAN};
use std::ffi::CString;
use std::io::Read;
use std::os::fd::{AsRawFd, RawFd};

use crate::can::Identifier;
use crate::isotp::IsoTPConfig;
use crate::{Error, Result};

const CAN_ISOTP: c_int = 6;
const SOL_CAN_BASE: c_int = 100;
const SOL_CAN_ISOTP: c_int = SOL_CAN_BASE + CAN_ISOTP;

const CAN_ISOTP_OPTS: c_int = 1;
const CAN_ISOTP_RECV_FC: c_int = 2;

const CAN_ISOTP_TX_PADDING: u32 = 0x004;
const CAN_EFF_FLAG: u32 = 0x8000_0000;

/// `struct sockaddr_can` with the `tp` member of the address union
#[allow(non_camel_case_types)]
#[repr(C)]
struct sockaddr_can_tp {
    can_family: sa_family_t,
    can_ifindex: c_int,
    rx_id: u32,
    tx_id: u32,
    _pad: [u8; 8],
}

#[allow(non_camel_case_types)]
#[repr(C)]
struct can_isotp_options {
    flags: u32,
    frame_txtime: u32,
    ext_address: u8,
    txpad_content: u8,
    rxpad_content: u8,
    rx_ext_address: u8,
}

#[allow(non_camel_case_types)]
#[repr(C)]
struct can_isotp_fc_options {
    bs: u8,
    stmin: u8,
    wftmax: u8,
}

fn can_id(id: Identifier) -> u32 {
    match id {
        Identifier::Standard(id) => id,
        Identifier::Extended(id) => id | CAN_EFF_FLAG,
    }
}

fn interface_index(name: &str) -> Result<c_int> {
    let name = CString::new(name).map_err(|_| Error::NotFound)?;
    let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
    match index {
        0 => Err(Error::NotFound),
        index => Ok(index as c_int),
    }
}

/// Non-blocking kernel ISO-TP socket. Every read or write is one complete ISO-TP message.
pub struct RawIsoTPSocket(socket2::Socket);

impl RawIsoTPSocket {
    pub fn open(config: &IsoTPConfig) -> Result<Self> {
        let ifindex = interface_index(&config.interface)?;

        let af_can = socket2::Domain::from(AF_CAN);
        let can_isotp = socket2::Protocol::from(CAN_ISOTP);
        let socket = Self(socket2::Socket::new(af_can, socket2::Type::DGRAM, Some(can_isotp))?);

        // Options have to be set before binding
        socket.set_options(config)?;
        socket.bind(ifindex, config)?;
        socket.0.set_nonblocking(true)?;

        Ok(socket)
    }

    fn set_options(&self, config: &IsoTPConfig) -> Result<()> {
        let options = can_isotp_options {
            flags: if config.padding.is_some() { CAN_ISOTP_TX_PADDING } else { 0 },
            frame_txtime: 0,
            ext_address: 0,
            txpad_content: config.padding.unwrap_or(0),
            rxpad_content: 0,
            rx_ext_address: 0,
        };
        self.set_socket_option(SOL_CAN_ISOTP, CAN_ISOTP_OPTS, &options)?;

        let flow_control = can_isotp_fc_options {
            bs: config.flow_control.block_size,
            stmin: config.flow_control.separation_time_min_raw()?,
            wftmax: 0,
        };
        self.set_socket_option(SOL_CAN_ISOTP, CAN_ISOTP_RECV_FC, &flow_control)?;

        Ok(())
    }

    fn bind(&self, ifindex: c_int, config: &IsoTPConfig) -> Result<()> {
        let addr = sockaddr_can_tp {
            can_family: AF_CAN as sa_family_t,
            can_ifindex: ifindex,
            rx_id: can_id(config.rx_id),
            tx_id: can_id(config.tx_id),
            _pad: [0; 8],
        };

        let ret = unsafe {
            libc::bind(
                self.as_raw_fd(),
                &addr as *const _ as *const libc::sockaddr,
                std::mem::size_of::<sockaddr_can_tp>() as socklen_t,
            )
        };

        match ret {
            0 => Ok(()),
            _ => Err(std::io::Error::last_os_error().into()),
        }
    }

    pub fn send(&self, data: &[u8]) -> std::io::Result<usize> {
        self.0.send(data)
    }

    pub fn recv(&self, buf: &mut [u8]) -> std::io::Result<usize> {
        (&self.0).read(buf)
    }

    fn set_socket_option<T>(&self, level: c_int, name: c_int, val: &T) -> std::io::Result<()> {
        let ret = unsafe {
            libc::setsockopt(
                self.as_raw_fd(),
                level,
                name,
                val as *const _ as *const c_void,
                std::mem::size_of::<T>() as socklen_t,
            )
        };

        match ret {
            0 => Ok(()),
            _ => Err(std::io::Error::last_os_error()),
        }
    }
}

impl AsRawFd for RawIsoTPSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.0.as_raw_fd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_layout() {
        assert_eq!(std::mem::size_of::<sockaddr_can_tp>(), 24);
        assert_eq!(std::mem::size_of::<can_isotp_options>(), 12);
        assert_eq!(std::mem::size_of::<can_isotp_fc_options>(), 3);
    }

    #[test]
    fn extended_ids_carry_flag() {
        assert_eq!(can_id(Identifier::Standard(0x7e8)), 0x7e8);
        assert_eq!(can_id(Identifier::Extended(0x18daf110)), 0x98daf110);
    }

    #[test]
    fn unknown_interface() {
        assert_eq!(interface_index("doesnotexist0").err(), Some(Error::NotFound));
        assert_eq!(interface_index("can\0").err(), Some(Error::NotFound));
    }
}
