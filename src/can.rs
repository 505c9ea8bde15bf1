//! CAN identifiers and the OBD-II addressing scheme (ISO 15765-4)

/// Functional request ID, all emissions related ECUs listen on it
pub const FUNCTIONAL_BROADCAST: u32 = 0x7df;
/// Physical request ID of the engine ECU. Other ECUs use 0x7E1 - 0x7E7.
pub const ENGINE_ECU: u32 = 0x7e0;
/// An ECU answers on its request ID plus this offset (11 bit addressing)
pub const RESPONSE_OFFSET: u32 = 0x08;

/// Identifier for a CAN frame
#[derive(Debug, Copy, Clone, PartialOrd, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Identifier {
    Standard(u32),
    Extended(u32),
}

impl Identifier {
    pub fn is_standard(&self) -> bool {
        match self {
            Identifier::Standard(_) => true,
            Identifier::Extended(_) => false,
        }
    }
    pub fn is_extended(&self) -> bool {
        !self.is_standard()
    }

    /// ID the ECU addressed by `self` responds on. 29 bit IDs swap the target and source address bytes.
    pub fn response_id(&self) -> Identifier {
        match *self {
            Identifier::Standard(id) => Identifier::Standard(id.wrapping_add(RESPONSE_OFFSET)),
            Identifier::Extended(id) => {
                let bytes = id.to_be_bytes();
                Identifier::Extended(u32::from_be_bytes([bytes[0], bytes[1], bytes[3], bytes[2]]))
            }
        }
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Identifier {
        if id <= 0x7ff {
            Identifier::Standard(id)
        } else {
            Identifier::Extended(id)
        }
    }
}

impl From<Identifier> for u32 {
    fn from(val: Identifier) -> u32 {
        match val {
            Identifier::Standard(id) => id,
            Identifier::Extended(id) => id,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Standard(id) => write!(f, "0x{:03x}", id),
            Identifier::Extended(id) => write!(f, "0x{:08x}", id),
        }
    }
}
