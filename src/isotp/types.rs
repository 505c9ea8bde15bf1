use std::time::Duration;

use crate::isotp::error::Error;

/// Flow control parameters sent to the ECU when it transmits a multi-frame response.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FlowControlConfig {
    /// Number of consecutive frames before waiting for the next flow control frame, 0 means no limit
    pub block_size: u8,
    pub separation_time_min: Duration,
}

impl FlowControlConfig {
    /// STmin byte as sent in a flow control frame. Sub-millisecond times are rounded up to the next 100 µs.
    pub fn separation_time_min_raw(&self) -> Result<u8, Error> {
        let micros = self.separation_time_min.as_micros();
        match micros {
            0 => Ok(0),
            1..=900 => Ok(0xf0 + micros.div_ceil(100) as u8),
            901..=999 => Ok(1),
            _ => match micros / 1000 {
                ms @ 0..=0x7f => Ok(ms as u8),
                _ => Err(Error::InvalidSeparationTime),
            },
        }
    }

}
