//! Types produced by decoding OBD-II responses.
use std::fmt;

use super::command::Command;
use super::constants::DTCCategory;

/// A Diagnostic Trouble Code, e.g. `P0301`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TroubleCode {
    pub category: DTCCategory,
    /// Remaining 14 bits: one decimal digit (0-3) followed by three hex digits.
    pub code: u16,
}

impl TroubleCode {
    pub fn from_bytes(a: u8, b: u8) -> Self {
        let raw = u16::from_be_bytes([a, b]);
        let category = match a >> 6 {
            0 => DTCCategory::Powertrain,
            1 => DTCCategory::Chassis,
            2 => DTCCategory::Body,
            _ => DTCCategory::Network,
        };

        Self {
            category,
            code: raw & 0x3fff,
        }
    }
}

impl fmt::Display for TroubleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{:03X}",
            self.category.letter(),
            self.code >> 12,
            self.code & 0x0fff
        )
    }
}

/// Oxygen sensor readings. Each family of oxygen sensor PIDs reports a different pair of values.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OxygenSensor {
    /// PIDs 0x14 - 0x1B. Voltage in V, short term fuel trim in %.
    VoltageFuelTrim {
        voltage: f64,
        short_term_fuel_trim: f64,
    },
    /// PIDs 0x24 - 0x2B. Fuel-air equivalence ratio and voltage in V.
    RatioVoltage { equivalence_ratio: f64, voltage: f64 },
    /// PIDs 0x34 - 0x3B. Fuel-air equivalence ratio and current in mA.
    RatioCurrent { equivalence_ratio: f64, current: f64 },
}

/// Decoded diagnostic data. The variant matches the command's [`super::ResponseType`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Bitfield(u32),
    Numeric(f64),
    /// VIN or ECU name
    String(String),
    TroubleCodes(Vec<TroubleCode>),
    OxygenSensor(OxygenSensor),
    /// The command carries no decodable payload (e.g. Freeze DTC)
    None,
}

impl Value {
    pub fn as_bitfield(&self) -> Option<u32> {
        match self {
            Value::Bitfield(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_trouble_codes(&self) -> Option<&[TroubleCode]> {
        match self {
            Value::TroubleCodes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_oxygen_sensor(&self) -> Option<OxygenSensor> {
        match self {
            Value::OxygenSensor(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bitfield(v) => write!(f, "{:08x}", v),
            Value::Numeric(v) => write!(f, "{:.2}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::TroubleCodes(codes) => {
                let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
                write!(f, "[{}]", codes.join(", "))
            }
            Value::OxygenSensor(OxygenSensor::VoltageFuelTrim {
                voltage,
                short_term_fuel_trim,
            }) => write!(f, "{:.3} V, {:.2} %", voltage, short_term_fuel_trim),
            Value::OxygenSensor(OxygenSensor::RatioVoltage {
                equivalence_ratio,
                voltage,
            }) => write!(f, "λ {:.3}, {:.3} V", equivalence_ratio, voltage),
            Value::OxygenSensor(OxygenSensor::RatioCurrent {
                equivalence_ratio,
                current,
            }) => write!(f, "λ {:.3}, {:.2} mA", equivalence_ratio, current),
            Value::None => write!(f, "-"),
        }
    }
}

/// A successfully decoded response. Owns its payload; dropping it releases everything.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The command this response answers
    pub command: &'static Command,
    pub value: Value,
}
