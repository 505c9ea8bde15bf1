//! Decoding rules converting raw response bytes into engineering values (SAE J1979).
//!
//! All offsets are into the full response payload, so `payload[0]` is the mode echo,
//! `payload[1]` the PID echo, and the data bytes usually referred to as A, B, C, D start at `payload[2]`.
use bstr::ByteSlice;

use super::constants::ResponseType;
use super::error::Error;
use super::types::{OxygenSensor, TroubleCode, Value};

const BYTES_PER_DTC: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Decoder {
    /// 4 byte bitfield
    Bitfield,
    TwoByteBitfield,
    SingleByteBitfield,
    /// A / 2.55
    Percentage,
    /// A - 40
    Temperature,
    /// A / 1.28 - 100
    FuelTrim,
    /// 3 * A
    FuelPressure,
    /// (256 * A + B) / 4
    EngineRpm,
    /// A / 2 - 64
    TimingAdvance,
    UInt8,
    UInt16,
    /// (256 * A + B) / 100
    MafAirFlowRate,
    /// 100 / 255 * A
    ThrottlePosition,
    /// 0.079 * (256 * A + B)
    FuelRailPressure,
    /// 10 * (256 * A + B)
    FuelRailGaugePressure,
    /// 100 / 128 * A - 100
    EgrError,
    /// signed (256 * A + B) / 4
    VaporPressure,
    /// (256 * A + B) / 10 - 40
    CatalystTemperature,
    /// (256 * A + B) / 1000
    ControlModuleVoltage,
    /// 100 / 255 * (256 * A + B)
    AbsoluteLoadValue,
    /// 2 / 65536 * (256 * A + B)
    FuelAirEquivalenceRatio,
    OxygenSensorVoltage,
    OxygenSensorRatioVoltage,
    OxygenSensorRatioCurrent,
    TroubleCodes,
    /// VIN or ECU name
    Text,
    Nop,
}

fn word(hi: u8, lo: u8) -> f64 {
    u16::from_be_bytes([hi, lo]) as f64
}

fn equivalence_ratio(payload: &[u8]) -> f64 {
    2.0 / 65536.0 * word(payload[2], payload[3])
}

impl Decoder {
    pub(crate) const fn response_type(self) -> ResponseType {
        match self {
            Decoder::Bitfield | Decoder::TwoByteBitfield | Decoder::SingleByteBitfield => {
                ResponseType::Bitfield
            }
            Decoder::OxygenSensorVoltage
            | Decoder::OxygenSensorRatioVoltage
            | Decoder::OxygenSensorRatioCurrent
            | Decoder::TroubleCodes
            | Decoder::Nop => ResponseType::Other,
            Decoder::Text => ResponseType::String,
            _ => ResponseType::Numeric,
        }
    }

    /// Smallest payload, echo bytes included, the rule can read without going out of bounds.
    pub(crate) const fn min_len(self) -> usize {
        match self {
            Decoder::Nop => 0,
            Decoder::TroubleCodes => 1,
            Decoder::Text => 2,
            Decoder::SingleByteBitfield
            | Decoder::Percentage
            | Decoder::Temperature
            | Decoder::FuelTrim
            | Decoder::FuelPressure
            | Decoder::TimingAdvance
            | Decoder::UInt8
            | Decoder::ThrottlePosition
            | Decoder::EgrError => 3,
            Decoder::Bitfield
            | Decoder::OxygenSensorRatioVoltage
            | Decoder::OxygenSensorRatioCurrent => 6,
            _ => 4,
        }
    }

    pub(crate) fn decode(self, payload: &[u8]) -> Result<Value, Error> {
        if payload.len() < self.min_len() {
            return Err(Error::InvalidResponseLength {
                expected: self.min_len(),
                actual: payload.len(),
            });
        }

        let value = match self {
            Decoder::Bitfield => Value::Bitfield(u32::from_be_bytes([
                payload[2], payload[3], payload[4], payload[5],
            ])),
            Decoder::TwoByteBitfield => {
                Value::Bitfield(u16::from_be_bytes([payload[2], payload[3]]) as u32)
            }
            Decoder::SingleByteBitfield => Value::Bitfield(payload[2] as u32),
            Decoder::Percentage => Value::Numeric(payload[2] as f64 / 2.55),
            Decoder::Temperature => Value::Numeric(payload[2] as f64 - 40.0),
            Decoder::FuelTrim => Value::Numeric(payload[2] as f64 / 1.28 - 100.0),
            Decoder::FuelPressure => Value::Numeric(3.0 * payload[2] as f64),
            Decoder::EngineRpm => Value::Numeric(word(payload[2], payload[3]) / 4.0),
            Decoder::TimingAdvance => Value::Numeric(payload[2] as f64 / 2.0 - 64.0),
            Decoder::UInt8 => Value::Numeric(payload[2] as f64),
            Decoder::UInt16 => Value::Numeric(word(payload[2], payload[3])),
            Decoder::MafAirFlowRate => Value::Numeric(word(payload[2], payload[3]) / 100.0),
            Decoder::ThrottlePosition => Value::Numeric(100.0 / 255.0 * payload[2] as f64),
            Decoder::FuelRailPressure => Value::Numeric(0.079 * word(payload[2], payload[3])),
            Decoder::FuelRailGaugePressure => Value::Numeric(10.0 * word(payload[2], payload[3])),
            Decoder::EgrError => Value::Numeric(100.0 / 128.0 * payload[2] as f64 - 100.0),
            Decoder::VaporPressure => {
                Value::Numeric(i16::from_be_bytes([payload[2], payload[3]]) as f64 / 4.0)
            }
            Decoder::CatalystTemperature => {
                Value::Numeric(word(payload[2], payload[3]) / 10.0 - 40.0)
            }
            Decoder::ControlModuleVoltage => {
                Value::Numeric(word(payload[2], payload[3]) / 1000.0)
            }
            Decoder::AbsoluteLoadValue => {
                Value::Numeric(100.0 / 255.0 * word(payload[2], payload[3]))
            }
            Decoder::FuelAirEquivalenceRatio => Value::Numeric(equivalence_ratio(payload)),
            Decoder::OxygenSensorVoltage => Value::OxygenSensor(OxygenSensor::VoltageFuelTrim {
                voltage: payload[2] as f64 / 200.0,
                short_term_fuel_trim: 100.0 / 128.0 * payload[3] as f64 - 100.0,
            }),
            Decoder::OxygenSensorRatioVoltage => Value::OxygenSensor(OxygenSensor::RatioVoltage {
                equivalence_ratio: equivalence_ratio(payload),
                voltage: 8.0 / 65536.0 * word(payload[4], payload[5]),
            }),
            Decoder::OxygenSensorRatioCurrent => Value::OxygenSensor(OxygenSensor::RatioCurrent {
                equivalence_ratio: equivalence_ratio(payload),
                current: word(payload[4], payload[5]) / 256.0 - 128.0,
            }),
            Decoder::TroubleCodes => Value::TroubleCodes(decode_trouble_codes(&payload[1..])?),
            Decoder::Text => Value::String(decode_text(&payload[2..])?),
            Decoder::Nop => Value::None,
        };

        Ok(value)
    }
}

fn decode_trouble_codes(data: &[u8]) -> Result<Vec<TroubleCode>, Error> {
    if data.len() % BYTES_PER_DTC != 0 {
        return Err(Error::MalformedTroubleCodes(data.len()));
    }

    let mut codes = Vec::new();
    codes.try_reserve_exact(data.len() / BYTES_PER_DTC)?;
    codes.extend(
        data.chunks_exact(BYTES_PER_DTC)
            .map(|pair| TroubleCode::from_bytes(pair[0], pair[1])),
    );

    Ok(codes)
}

/// Copies everything up to the first NUL; padding after it is dropped. Each invalid UTF-8 sequence becomes a
/// single U+FFFD.
fn decode_text(data: &[u8]) -> Result<String, Error> {
    let end = data.find_byte(0).unwrap_or(data.len());
    let text = &data[..end];

    let len = text
        .utf8_chunks()
        .map(|chunk| {
            let replacement = if chunk.invalid().is_empty() { 0 } else { char::REPLACEMENT_CHARACTER.len_utf8() };
            chunk.valid().len() + replacement
        })
        .sum();

    let mut value = String::new();
    value.try_reserve_exact(len)?;
    for chunk in text.utf8_chunks() {
        value.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            value.push(char::REPLACEMENT_CHARACTER);
        }
    }

    Ok(value)
}
