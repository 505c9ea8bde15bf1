//! Supported PID bitfields and the set of commands a vehicle implements.
use super::catalog::{MODE1_COMMANDS, MODE1_PID_COUNT, MODE3_COMMAND, MODE9_COMMANDS};
use super::command::Command;
use super::constants::{Mode, PIDS_PER_RANGE};

/// Number of Mode 1 "supported PIDs" ranges (0x01 - 0x20 up to 0x61 - 0x80).
pub const MODE1_RANGES: usize = 4;

/// Bit of `pid` inside the 32 bit mask of the range starting at `base`. The most significant bit is `base + 1`.
const fn range_bit(base: u8, pid: u8) -> u32 {
    0x8000_0000 >> (pid - base - 1)
}

/// Mask with a bit set for each PID in `pids`, relative to the range starting at `base`.
fn mask_for<'a>(base: u8, pids: impl Iterator<Item = &'a Command>) -> u32 {
    pids.filter_map(|c| c.pid)
        .filter(|&pid| pid > base && pid - base <= PIDS_PER_RANGE)
        .fold(0, |mask, pid| mask | range_bit(base, pid))
}

/// Raw "supported PIDs" bitfields as reported by the ECU. Bits for PIDs that are not cataloged are
/// cleared when a mask is stored, so membership never refers to a command that doesn't exist.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportedPids {
    current_data: [u32; MODE1_RANGES],
    vehicle_information: u32,
}

impl SupportedPids {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the Mode 1 mask for range `index` (0 for PIDs 0x01 - 0x20, 1 for 0x21 - 0x40, ...).
    pub fn set_current_data(&mut self, index: usize, mask: u32) {
        if let Some(slot) = self.current_data.get_mut(index) {
            let base = index as u8 * PIDS_PER_RANGE;
            *slot = mask & mask_for(base, MODE1_COMMANDS.iter());
        }
    }

    /// Stores the Mode 9 mask (PIDs 0x01 - 0x20).
    pub fn set_vehicle_information(&mut self, mask: u32) {
        self.vehicle_information = mask & mask_for(0, MODE9_COMMANDS.iter());
    }

    /// The stored Mode 1 mask for range `index`
    pub fn current_data(&self, index: usize) -> u32 {
        self.current_data.get(index).copied().unwrap_or(0)
    }

    pub fn vehicle_information(&self) -> u32 {
        self.vehicle_information
    }

    /// Whether the ECU reported `(mode, pid)` as supported. PID 0x00 of Mode 1 and Mode 9 is always supported,
    /// as is Mode 3 which has no PID.
    pub fn contains(&self, mode: Mode, pid: u8) -> bool {
        if pid == 0 && mode.has_pid() {
            return true;
        }

        match mode {
            Mode::StoredTroubleCodes => true,
            Mode::CurrentData => {
                let index = (pid as usize - 1) / PIDS_PER_RANGE as usize;
                match self.current_data.get(index) {
                    Some(mask) => mask & range_bit(index as u8 * PIDS_PER_RANGE, pid) != 0,
                    None => false,
                }
            }
            Mode::VehicleInformation => {
                pid <= PIDS_PER_RANGE && self.vehicle_information & range_bit(0, pid) != 0
            }
        }
    }
}

/// The ordered list of commands a vehicle supports: Mode 1 by ascending PID, the Mode 3 command, then Mode 9 by ascending PID.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSet {
    supported: SupportedPids,
    commands: Vec<&'static Command>,
}

impl CommandSet {
    pub fn new(supported: SupportedPids) -> Self {
        let mode1 = MODE1_COMMANDS.iter();
        let mode9 = MODE9_COMMANDS.iter();

        let commands = mode1
            .chain(std::iter::once(&MODE3_COMMAND))
            .chain(mode9)
            .filter(|c| supported.contains(c.mode, c.pid.unwrap_or(0)))
            .collect();

        Self { supported, commands }
    }

    pub fn supported_pids(&self) -> &SupportedPids {
        &self.supported
    }

    pub fn contains(&self, command: &Command) -> bool {
        let cataloged = match (command.mode, command.pid) {
            (Mode::CurrentData, Some(pid)) => (pid as usize) < MODE1_PID_COUNT,
            (Mode::VehicleInformation, Some(pid)) => MODE9_COMMANDS.iter().any(|c| c.pid == Some(pid)),
            (Mode::StoredTroubleCodes, None) => true,
            _ => false,
        };

        cataloged && self.supported.contains(command.mode, command.pid.unwrap_or(0))
    }

    pub fn commands(&self) -> &[&'static Command] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Command> + '_ {
        self.commands.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a CommandSet {
    type Item = &'static Command;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, &'static Command>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter().copied()
    }
}
