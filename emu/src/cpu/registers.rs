//! # ARM7TDMI Register File
//!
//! - **R0-R12**: General purpose
//! - **R13 (SP)**: Stack pointer (by convention)
//! - **R14 (LR)**: Link register (return address)
//! - **R15 (PC)**: Program counter, reads as the executing instruction + 8
//!   (ARM) or + 4 (Thumb) because of the pipeline
//!
//! The physical storage is an arena of [`SLOT_COUNT`] words, the 16 visible
//! registers are a resolution table into it refreshed on every mode switch.
//! See [`register_bank`](super::register_bank).

use serde::{Deserialize, Serialize};

use crate::cpu::cpu_modes::Mode;
use crate::cpu::register_bank::{SLOT_COUNT, SlotId, physical_slot};

/// Stack Pointer register index.
pub const REG_SP: usize = 0xD;

/// Link Register index (return address for subroutines).
pub const REG_LR: usize = 0xE;

/// Program Counter register index.
pub const REG_PROGRAM_COUNTER: usize = 0xF;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registers {
    slots: [u32; SLOT_COUNT],
    live: [SlotId; 16],
}

impl Default for Registers {
    fn default() -> Self {
        Self::new(Mode::System)
    }
}

impl Registers {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        let mut registers = Self {
            slots: [0; SLOT_COUNT],
            live: [physical_slot(0, mode); 16],
        };
        registers.rebank(mode);

        registers
    }

    /// Points every logical register at the storage `mode` uses.
    pub fn rebank(&mut self, mode: Mode) {
        for (index, live) in self.live.iter_mut().enumerate() {
            *live = physical_slot(index, mode);
        }
    }

    #[must_use]
    pub fn program_counter(&self) -> u32 {
        self.register_at(REG_PROGRAM_COUNTER)
    }

    pub fn set_program_counter(&mut self, new_value: u32) {
        self.set_register_at(REG_PROGRAM_COUNTER, new_value);
    }

    pub fn advance_program_counter(&mut self, bytes: u32) {
        let pc = self.program_counter().wrapping_add(bytes);
        self.set_program_counter(pc);
    }

    /// `reg` is a 4-bit register field, higher bits are ignored.
    #[must_use]
    pub fn register_at(&self, reg: usize) -> u32 {
        self.slots[self.live[reg & 0xF].index()]
    }

    pub fn set_register_at(&mut self, reg: usize, new_value: u32) {
        self.slots[self.live[reg & 0xF].index()] = new_value;
    }

    /// Reads `reg` as `mode` sees it, whatever the current mode is.
    #[must_use]
    pub fn register_in_mode(&self, reg: usize, mode: Mode) -> u32 {
        self.slots[physical_slot(reg & 0xF, mode).index()]
    }

    pub fn set_register_in_mode(&mut self, reg: usize, mode: Mode, new_value: u32) {
        self.slots[physical_slot(reg & 0xF, mode).index()] = new_value;
    }

    /// The 16 registers visible in the current mode.
    #[must_use]
    pub fn visible(&self) -> [u32; 16] {
        std::array::from_fn(|reg| self.register_at(reg))
    }
}
