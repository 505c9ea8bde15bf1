/// Largest payload a classic CAN ISO-TP message can carry (12 bit length field)
pub static MAX_PAYLOAD_LEN: usize = 0xfff;

/// ISO 15765-4 requires all frames to use a DLC of 8, so shorter frames are padded
pub static DEFAULT_PADDING: u8 = 0xaa;

/// P2 timeout for an emissions related ECU is 50 ms, but gateways and multi-frame VIN responses can be much slower
pub static DEFAULT_TIMEOUT_MS: u64 = 1000;
