//! Static registry of all known diagnostic commands. Mode 1 commands are stored at the index of their PID.
use super::command::Command;
use super::constants::{Mode, ResponseLength};
use super::decoder::Decoder;

/// Number of cataloged Mode 1 PIDs (0x00 - 0x4E). PIDs 0x4F and up are not yet supported.
pub const MODE1_PID_COUNT: usize = 0x4f;

#[rustfmt::skip]
pub static MODE1_COMMANDS: [Command; MODE1_PID_COUNT] = [
    Command::current_data("Supported PIDs in the range 01 - 20", 0x00, 6, Decoder::Bitfield),
    Command::current_data("Monitor status since DTCs cleared", 0x01, 6, Decoder::Bitfield),
    Command::current_data("Freeze DTC", 0x02, 4, Decoder::Nop),
    Command::current_data("Fuel system status", 0x03, 4, Decoder::TwoByteBitfield),
    Command::current_data("Calculated engine load", 0x04, 3, Decoder::Percentage),
    Command::current_data("Engine coolant temperature", 0x05, 3, Decoder::Temperature),
    Command::current_data("Short term fuel trim, bank 1", 0x06, 3, Decoder::FuelTrim),
    Command::current_data("Long term fuel trim, bank 1", 0x07, 3, Decoder::FuelTrim),
    Command::current_data("Short term fuel trim, bank 2", 0x08, 3, Decoder::FuelTrim),
    Command::current_data("Long term fuel trim, bank 2", 0x09, 3, Decoder::FuelTrim),
    Command::current_data("Fuel pressure (gauge pressure)", 0x0a, 3, Decoder::FuelPressure),
    Command::current_data("Intake manifold absolute pressure", 0x0b, 3, Decoder::UInt8),
    Command::current_data("Engine RPM", 0x0c, 4, Decoder::EngineRpm),
    Command::current_data("Vehicle speed", 0x0d, 3, Decoder::UInt8),
    Command::current_data("Timing advance", 0x0e, 3, Decoder::TimingAdvance),
    Command::current_data("Intake air temperature", 0x0f, 3, Decoder::Temperature),
    Command::current_data("MAF air flow rate", 0x10, 4, Decoder::MafAirFlowRate),
    Command::current_data("Throttle position", 0x11, 3, Decoder::ThrottlePosition),
    Command::current_data("Commanded secondary air status", 0x12, 3, Decoder::SingleByteBitfield),
    Command::current_data("Oxygen sensors present", 0x13, 3, Decoder::SingleByteBitfield),
    Command::current_data("Oxygen sensor 1", 0x14, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("Oxygen sensor 2", 0x15, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("Oxygen sensor 3", 0x16, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("Oxygen sensor 4", 0x17, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("Oxygen sensor 5", 0x18, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("Oxygen sensor 6", 0x19, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("Oxygen sensor 7", 0x1a, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("Oxygen sensor 8", 0x1b, 4, Decoder::OxygenSensorVoltage),
    Command::current_data("OBD standards this vehicle conforms to", 0x1c, 3, Decoder::SingleByteBitfield),
    Command::current_data("Oxygen sensors present in 4 banks", 0x1d, 3, Decoder::SingleByteBitfield),
    Command::current_data("Auxiliary input status", 0x1e, 3, Decoder::SingleByteBitfield),
    Command::current_data("Run time since engine start", 0x1f, 4, Decoder::UInt16),
    Command::current_data("Supported PIDs in the range 21 - 40", 0x20, 6, Decoder::Bitfield),
    Command::current_data("Distance traveled with malfunction indicator lamp on", 0x21, 4, Decoder::UInt16),
    Command::current_data("Fuel rail pressure (relative to manifold vacuum)", 0x22, 4, Decoder::FuelRailPressure),
    Command::current_data("Fuel rail gauge pressure (diesel, or gasoline direct injection)", 0x23, 4, Decoder::FuelRailGaugePressure),
    Command::current_data("Oxygen sensor 1", 0x24, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Oxygen sensor 2", 0x25, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Oxygen sensor 3", 0x26, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Oxygen sensor 4", 0x27, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Oxygen sensor 5", 0x28, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Oxygen sensor 6", 0x29, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Oxygen sensor 7", 0x2a, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Oxygen sensor 8", 0x2b, 6, Decoder::OxygenSensorRatioVoltage),
    Command::current_data("Commanded EGR", 0x2c, 3, Decoder::Percentage),
    Command::current_data("EGR error", 0x2d, 3, Decoder::EgrError),
    Command::current_data("Commanded evaporative purge", 0x2e, 3, Decoder::Percentage),
    Command::current_data("Fuel tank level input", 0x2f, 3, Decoder::Percentage),
    Command::current_data("Warm-ups since codes cleared", 0x30, 3, Decoder::UInt8),
    Command::current_data("Distance traveled since codes cleared", 0x31, 4, Decoder::UInt16),
    Command::current_data("Evaporative system vapor pressure", 0x32, 4, Decoder::VaporPressure),
    Command::current_data("Absolute barometric pressure", 0x33, 3, Decoder::UInt8),
    Command::current_data("Oxygen sensor 1", 0x34, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Oxygen sensor 2", 0x35, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Oxygen sensor 3", 0x36, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Oxygen sensor 4", 0x37, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Oxygen sensor 5", 0x38, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Oxygen sensor 6", 0x39, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Oxygen sensor 7", 0x3a, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Oxygen sensor 8", 0x3b, 6, Decoder::OxygenSensorRatioCurrent),
    Command::current_data("Catalyst temperature, bank 1, sensor 1", 0x3c, 4, Decoder::CatalystTemperature),
    Command::current_data("Catalyst temperature, bank 2, sensor 1", 0x3d, 4, Decoder::CatalystTemperature),
    Command::current_data("Catalyst temperature, bank 1, sensor 2", 0x3e, 4, Decoder::CatalystTemperature),
    Command::current_data("Catalyst temperature, bank 2, sensor 2", 0x3f, 4, Decoder::CatalystTemperature),
    Command::current_data("Supported PIDs in the range 41 - 60", 0x40, 6, Decoder::Bitfield),
    Command::current_data("Monitor status this drive cycle", 0x41, 6, Decoder::Bitfield),
    Command::current_data("Control module voltage", 0x42, 4, Decoder::ControlModuleVoltage),
    Command::current_data("Absolute load value", 0x43, 4, Decoder::AbsoluteLoadValue),
    Command::current_data("Fuel-air commanded equivalence ratio", 0x44, 4, Decoder::FuelAirEquivalenceRatio),
    Command::current_data("Relative throttle position", 0x45, 3, Decoder::Percentage),
    Command::current_data("Ambient air temperature", 0x46, 3, Decoder::Temperature),
    Command::current_data("Absolute throttle position B", 0x47, 3, Decoder::Percentage),
    Command::current_data("Absolute throttle position C", 0x48, 3, Decoder::Percentage),
    Command::current_data("Accelerator pedal position D", 0x49, 3, Decoder::Percentage),
    Command::current_data("Accelerator pedal position E", 0x4a, 3, Decoder::Percentage),
    Command::current_data("Accelerator pedal position F", 0x4b, 3, Decoder::Percentage),
    Command::current_data("Commanded throttle actuator", 0x4c, 3, Decoder::Percentage),
    Command::current_data("Time run with MIL on", 0x4d, 4, Decoder::UInt16),
    Command::current_data("Time since trouble codes cleared", 0x4e, 4, Decoder::UInt16),
];

pub static MODE3_COMMAND: Command = Command::new(
    "Stored trouble codes",
    Mode::StoredTroubleCodes,
    None,
    ResponseLength::Variable,
    Decoder::TroubleCodes,
);

#[rustfmt::skip]
pub static MODE9_COMMANDS: [Command; 4] = [
    Command::new("Supported PIDs in the range 01 - 20", Mode::VehicleInformation, Some(0x00), ResponseLength::Fixed(6), Decoder::Bitfield),
    Command::new("VIN message count", Mode::VehicleInformation, Some(0x01), ResponseLength::Fixed(3), Decoder::UInt8),
    Command::new("Vehicle identification number", Mode::VehicleInformation, Some(0x02), ResponseLength::Variable, Decoder::Text),
    Command::new("ECU name", Mode::VehicleInformation, Some(0x0a), ResponseLength::Variable, Decoder::Text),
];

// Mode 1
pub static SUPPORTED_PIDS_01_20: &Command = &MODE1_COMMANDS[0x00];
pub static MONITOR_STATUS: &Command = &MODE1_COMMANDS[0x01];
pub static FREEZE_DTC: &Command = &MODE1_COMMANDS[0x02];
pub static FUEL_SYSTEM_STATUS: &Command = &MODE1_COMMANDS[0x03];
pub static ENGINE_LOAD: &Command = &MODE1_COMMANDS[0x04];
pub static ENGINE_COOLANT_TEMPERATURE: &Command = &MODE1_COMMANDS[0x05];
pub static SHORT_TERM_FUEL_TRIM_BANK_1: &Command = &MODE1_COMMANDS[0x06];
pub static LONG_TERM_FUEL_TRIM_BANK_1: &Command = &MODE1_COMMANDS[0x07];
pub static SHORT_TERM_FUEL_TRIM_BANK_2: &Command = &MODE1_COMMANDS[0x08];
pub static LONG_TERM_FUEL_TRIM_BANK_2: &Command = &MODE1_COMMANDS[0x09];
pub static FUEL_PRESSURE: &Command = &MODE1_COMMANDS[0x0a];
pub static INTAKE_MANIFOLD_PRESSURE: &Command = &MODE1_COMMANDS[0x0b];
pub static ENGINE_RPM: &Command = &MODE1_COMMANDS[0x0c];
pub static VEHICLE_SPEED: &Command = &MODE1_COMMANDS[0x0d];
pub static TIMING_ADVANCE: &Command = &MODE1_COMMANDS[0x0e];
pub static INTAKE_AIR_TEMPERATURE: &Command = &MODE1_COMMANDS[0x0f];
pub static MAF_AIR_FLOW_RATE: &Command = &MODE1_COMMANDS[0x10];
pub static THROTTLE_POSITION: &Command = &MODE1_COMMANDS[0x11];
pub static SECONDARY_AIR_STATUS: &Command = &MODE1_COMMANDS[0x12];
pub static OXYGEN_SENSORS_PRESENT: &Command = &MODE1_COMMANDS[0x13];
pub static OBD_STANDARDS: &Command = &MODE1_COMMANDS[0x1c];
pub static OXYGEN_SENSORS_PRESENT_4_BANKS: &Command = &MODE1_COMMANDS[0x1d];
pub static AUXILIARY_INPUT_STATUS: &Command = &MODE1_COMMANDS[0x1e];
pub static RUN_TIME_SINCE_ENGINE_START: &Command = &MODE1_COMMANDS[0x1f];
pub static SUPPORTED_PIDS_21_40: &Command = &MODE1_COMMANDS[0x20];
pub static DISTANCE_WITH_MIL_ON: &Command = &MODE1_COMMANDS[0x21];
pub static FUEL_RAIL_PRESSURE: &Command = &MODE1_COMMANDS[0x22];
pub static FUEL_RAIL_GAUGE_PRESSURE: &Command = &MODE1_COMMANDS[0x23];
pub static COMMANDED_EGR: &Command = &MODE1_COMMANDS[0x2c];
pub static EGR_ERROR: &Command = &MODE1_COMMANDS[0x2d];
pub static COMMANDED_EVAPORATIVE_PURGE: &Command = &MODE1_COMMANDS[0x2e];
pub static FUEL_TANK_LEVEL: &Command = &MODE1_COMMANDS[0x2f];
pub static WARM_UPS_SINCE_CODES_CLEARED: &Command = &MODE1_COMMANDS[0x30];
pub static DISTANCE_SINCE_CODES_CLEARED: &Command = &MODE1_COMMANDS[0x31];
pub static EVAP_VAPOR_PRESSURE: &Command = &MODE1_COMMANDS[0x32];
pub static BAROMETRIC_PRESSURE: &Command = &MODE1_COMMANDS[0x33];
pub static CATALYST_TEMPERATURE_BANK_1_SENSOR_1: &Command = &MODE1_COMMANDS[0x3c];
pub static CATALYST_TEMPERATURE_BANK_2_SENSOR_1: &Command = &MODE1_COMMANDS[0x3d];
pub static CATALYST_TEMPERATURE_BANK_1_SENSOR_2: &Command = &MODE1_COMMANDS[0x3e];
pub static CATALYST_TEMPERATURE_BANK_2_SENSOR_2: &Command = &MODE1_COMMANDS[0x3f];
pub static SUPPORTED_PIDS_41_60: &Command = &MODE1_COMMANDS[0x40];
pub static MONITOR_STATUS_DRIVE_CYCLE: &Command = &MODE1_COMMANDS[0x41];
pub static CONTROL_MODULE_VOLTAGE: &Command = &MODE1_COMMANDS[0x42];
pub static ABSOLUTE_LOAD: &Command = &MODE1_COMMANDS[0x43];
pub static COMMANDED_EQUIVALENCE_RATIO: &Command = &MODE1_COMMANDS[0x44];
pub static RELATIVE_THROTTLE_POSITION: &Command = &MODE1_COMMANDS[0x45];
pub static AMBIENT_AIR_TEMPERATURE: &Command = &MODE1_COMMANDS[0x46];
pub static ABSOLUTE_THROTTLE_POSITION_B: &Command = &MODE1_COMMANDS[0x47];
pub static ABSOLUTE_THROTTLE_POSITION_C: &Command = &MODE1_COMMANDS[0x48];
pub static ACCELERATOR_PEDAL_POSITION_D: &Command = &MODE1_COMMANDS[0x49];
pub static ACCELERATOR_PEDAL_POSITION_E: &Command = &MODE1_COMMANDS[0x4a];
pub static ACCELERATOR_PEDAL_POSITION_F: &Command = &MODE1_COMMANDS[0x4b];
pub static COMMANDED_THROTTLE_ACTUATOR: &Command = &MODE1_COMMANDS[0x4c];
pub static TIME_RUN_WITH_MIL_ON: &Command = &MODE1_COMMANDS[0x4d];
pub static TIME_SINCE_TROUBLE_CODES_CLEARED: &Command = &MODE1_COMMANDS[0x4e];

/// Oxygen sensors 1 - 8, voltage and short term fuel trim (PIDs 0x14 - 0x1B)
pub static OXYGEN_SENSOR_FUEL_TRIM: [&Command; 8] = [
    &MODE1_COMMANDS[0x14],
    &MODE1_COMMANDS[0x15],
    &MODE1_COMMANDS[0x16],
    &MODE1_COMMANDS[0x17],
    &MODE1_COMMANDS[0x18],
    &MODE1_COMMANDS[0x19],
    &MODE1_COMMANDS[0x1a],
    &MODE1_COMMANDS[0x1b],
];

/// Oxygen sensors 1 - 8, equivalence ratio and voltage (PIDs 0x24 - 0x2B)
pub static OXYGEN_SENSOR_RATIO_VOLTAGE: [&Command; 8] = [
    &MODE1_COMMANDS[0x24],
    &MODE1_COMMANDS[0x25],
    &MODE1_COMMANDS[0x26],
    &MODE1_COMMANDS[0x27],
    &MODE1_COMMANDS[0x28],
    &MODE1_COMMANDS[0x29],
    &MODE1_COMMANDS[0x2a],
    &MODE1_COMMANDS[0x2b],
];

/// Oxygen sensors 1 - 8, equivalence ratio and current (PIDs 0x34 - 0x3B)
pub static OXYGEN_SENSOR_RATIO_CURRENT: [&Command; 8] = [
    &MODE1_COMMANDS[0x34],
    &MODE1_COMMANDS[0x35],
    &MODE1_COMMANDS[0x36],
    &MODE1_COMMANDS[0x37],
    &MODE1_COMMANDS[0x38],
    &MODE1_COMMANDS[0x39],
    &MODE1_COMMANDS[0x3a],
    &MODE1_COMMANDS[0x3b],
];

// Mode 3
pub static TROUBLE_CODES: &Command = &MODE3_COMMAND;

// Mode 9
pub static SUPPORTED_PIDS_MODE9: &Command = &MODE9_COMMANDS[0];
pub static VIN_MESSAGE_COUNT: &Command = &MODE9_COMMANDS[1];
pub static VIN: &Command = &MODE9_COMMANDS[2];
pub static ECU_NAME: &Command = &MODE9_COMMANDS[3];

/// The Mode 1 "supported PIDs" commands, in scan order. Each one reports the 0x20 PIDs following its own.
pub static MODE1_SUPPORTED_PIDS: [&Command; 3] = [
    &MODE1_COMMANDS[0x00],
    &MODE1_COMMANDS[0x20],
    &MODE1_COMMANDS[0x40],
];

/// Looks up a cataloged command. The `pid` is ignored for [`Mode::StoredTroubleCodes`].
pub fn command(mode: Mode, pid: u8) -> Option<&'static Command> {
    match mode {
        Mode::CurrentData => MODE1_COMMANDS.get(pid as usize),
        Mode::StoredTroubleCodes => Some(&MODE3_COMMAND),
        Mode::VehicleInformation => MODE9_COMMANDS.iter().find(|c| c.pid == Some(pid)),
    }
}

/// Every cataloged command: Mode 1 by ascending PID, then Mode 3, then Mode 9.
pub fn all_commands() -> impl Iterator<Item = &'static Command> {
    MODE1_COMMANDS
        .iter()
        .chain(std::iter::once(&MODE3_COMMAND))
        .chain(MODE9_COMMANDS.iter())
}
