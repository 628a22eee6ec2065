//! # Processor Modes
//!
//! The mode field (CPSR bits 4-0) selects which physical registers back
//! R8-R14 and which SPSR (if any) is visible.
//!
//! ```text
//! ┌────────────┬────────┬──────────────────────┬───────┐
//! │ Mode       │ M4-M0  │ Banked registers     │ SPSR  │
//! ├────────────┼────────┼──────────────────────┼───────┤
//! │ User       │ 10000  │ -                    │ no    │
//! │ FIQ        │ 10001  │ R8-R14               │ yes   │
//! │ IRQ        │ 10010  │ R13-R14              │ yes   │
//! │ Supervisor │ 10011  │ R13-R14              │ yes   │
//! │ Abort      │ 10111  │ R13-R14              │ yes   │
//! │ Undefined  │ 11011  │ R13-R14              │ yes   │
//! │ System     │ 11111  │ - (shares User's)    │ no    │
//! └────────────┴────────┴──────────────────────┴───────┘
//! ```
//!
//! See [`register_bank`](super::register_bank) for how a logical register
//! index is resolved to its storage slot.

use serde::{Deserialize, Serialize};

use crate::cpu::error::CpuError;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Mode {
    /// The normal ARM program execution state.
    User = 0b10000,

    /// Designed to support a data transfer or channel process.
    Fiq = 0b10001,

    /// Used for general-purpose interrupt handling.
    Irq = 0b10010,

    /// Protected mode for the operating system, entered by SWI.
    Supervisor = 0b10011,

    /// Entered after a data or instruction prefetch abort.
    Abort = 0b10111,

    /// Entered when an undefined instruction is executed.
    Undefined = 0b11011,

    /// A privileged user mode for the operating system.
    System = 0b11111,
}

impl Mode {
    /// User and System are the only modes without a saved status register.
    #[must_use]
    pub const fn has_spsr(self) -> bool {
        !matches!(self, Self::User | Self::System)
    }

    #[must_use]
    pub const fn is_privileged(self) -> bool {
        !matches!(self, Self::User)
    }
}

impl From<Mode> for u32 {
    fn from(m: Mode) -> Self {
        m as Self
    }
}

impl TryFrom<u32> for Mode {
    type Error = CpuError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            0b10000 => Ok(Self::User),
            0b10001 => Ok(Self::Fiq),
            0b10010 => Ok(Self::Irq),
            0b10011 => Ok(Self::Supervisor),
            0b10111 => Ok(Self::Abort),
            0b11011 => Ok(Self::Undefined),
            0b11111 => Ok(Self::System),
            _ => Err(CpuError::InvalidMode(n)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("User"),
            Self::Fiq => f.write_str("FIQ"),
            Self::Irq => f.write_str("IRQ"),
            Self::Supervisor => f.write_str("Supervisor"),
            Self::Abort => f.write_str("Abort"),
            Self::Undefined => f.write_str("Undefined"),
            Self::System => f.write_str("System"),
        }
    }
}
