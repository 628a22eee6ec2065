//! # Banked Registers for Exception Modes
//!
//! All physical registers live in one small arena. A logical register index
//! (R0-R15) is turned into an arena slot by [`physical_slot`], which only
//! depends on the current mode:
//!
//! ```text
//! slot   0..=15   R0-R15 of User/System (R0-R7 and R15 are never banked)
//! slot  16..=22   R8_fiq-R14_fiq
//! slot  23..=24   R13_svc, R14_svc
//! slot  25..=26   R13_abt, R14_abt
//! slot  27..=28   R13_irq, R14_irq
//! slot  29..=30   R13_und, R14_und
//! ```
//!
//! A mode switch never moves values around; the register file only
//! recomputes which slot each logical index points to. Each exception mode
//! also owns one SPSR, kept in [`SpsrBank`].

use serde::{Deserialize, Serialize};

use crate::cpu::cpu_modes::Mode;
use crate::cpu::error::CpuError;
use crate::cpu::psr::Psr;

pub const SLOT_COUNT: usize = 31;

const FIQ_BASE: usize = 16;
const SVC_BASE: usize = 23;
const ABT_BASE: usize = 25;
const IRQ_BASE: usize = 27;
const UND_BASE: usize = 29;

/// Index into the register arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotId(usize);

impl SlotId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Resolves logical register `index` (0..=15) to its storage for `mode`.
#[must_use]
pub const fn physical_slot(index: usize, mode: Mode) -> SlotId {
    let slot = match (mode, index) {
        (Mode::Fiq, 8..=14) => FIQ_BASE + index - 8,
        (Mode::Supervisor, 13..=14) => SVC_BASE + index - 13,
        (Mode::Abort, 13..=14) => ABT_BASE + index - 13,
        (Mode::Irq, 13..=14) => IRQ_BASE + index - 13,
        (Mode::Undefined, 13..=14) => UND_BASE + index - 13,
        _ => index,
    };

    SlotId(slot)
}

/// Saved Program Status Registers, one per exception mode.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct SpsrBank {
    fiq: Psr,
    svc: Psr,
    abt: Psr,
    irq: Psr,
    und: Psr,
}

impl SpsrBank {
    pub fn get(&self, mode: Mode) -> Result<Psr, CpuError> {
        match mode {
            Mode::Fiq => Ok(self.fiq),
            Mode::Supervisor => Ok(self.svc),
            Mode::Abort => Ok(self.abt),
            Mode::Irq => Ok(self.irq),
            Mode::Undefined => Ok(self.und),
            Mode::User | Mode::System => Err(CpuError::NoSpsr(mode)),
        }
    }

    pub fn set(&mut self, mode: Mode, value: Psr) -> Result<(), CpuError> {
        let slot = match mode {
            Mode::Fiq => &mut self.fiq,
            Mode::Supervisor => &mut self.svc,
            Mode::Abort => &mut self.abt,
            Mode::Irq => &mut self.irq,
            Mode::Undefined => &mut self.und,
            Mode::User | Mode::System => return Err(CpuError::NoSpsr(mode)),
        };

        *slot = value;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_unbanked_registers_are_shared() {
        for mode in [Mode::User, Mode::Fiq, Mode::Irq, Mode::Supervisor, Mode::System] {
            for index in 0..=7 {
                assert_eq!(physical_slot(index, mode), SlotId(index));
            }
            assert_eq!(physical_slot(15, mode), SlotId(15));
        }
    }

    #[test]
    fn check_fiq_banks_r8_to_r14() {
        for index in 8..=14 {
            assert_eq!(physical_slot(index, Mode::Fiq), SlotId(16 + index - 8));
        }
    }

    #[test]
    fn check_exception_modes_bank_sp_and_lr() {
        assert_eq!(physical_slot(12, Mode::Irq), SlotId(12));
        assert_eq!(physical_slot(13, Mode::Supervisor), SlotId(23));
        assert_eq!(physical_slot(14, Mode::Abort), SlotId(26));
        assert_eq!(physical_slot(13, Mode::Irq), SlotId(27));
        assert_eq!(physical_slot(14, Mode::Undefined), SlotId(30));
        assert_eq!(physical_slot(13, Mode::System), physical_slot(13, Mode::User));
    }

    #[test]
    fn check_slots_are_unique_per_mode() {
        for mode in [
            Mode::User,
            Mode::Fiq,
            Mode::Irq,
            Mode::Supervisor,
            Mode::Abort,
            Mode::Undefined,
            Mode::System,
        ] {
            let mut seen = [false; SLOT_COUNT];
            for index in 0..16 {
                let slot = physical_slot(index, mode).index();
                assert!(!seen[slot], "{mode} maps two registers to slot {slot}");
                seen[slot] = true;
            }
        }
    }

    #[test]
    fn check_spsr_bank() {
        let mut bank = SpsrBank::default();
        bank.set(Mode::Irq, Psr::from(0x6000_0010)).unwrap();

        assert_eq!(bank.get(Mode::Irq), Ok(Psr::from(0x6000_0010)));
        assert_eq!(bank.get(Mode::Supervisor), Ok(Psr::default()));
        assert_eq!(bank.get(Mode::User), Err(CpuError::NoSpsr(Mode::User)));
        assert_eq!(
            bank.set(Mode::System, Psr::default()),
            Err(CpuError::NoSpsr(Mode::System))
        );
    }
}
