use thiserror::Error;

use crate::cpu::cpu_modes::Mode;

/// Conditions that stop the core.
///
/// Decode misses and accesses to unmapped memory are absorbed where they
/// happen (logged, then treated as undefined / open bus) and never show up
/// here: everything in this enum means the emulated state can no longer be
/// trusted and the run loop has to end.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CpuError {
    #[error("mode bits 0b{0:05b} do not name any processor mode")]
    InvalidMode(u32),

    #[error("{0} mode has no SPSR")]
    NoSpsr(Mode),

    #[error("condition field 0x{0:X} is out of range")]
    InvalidCondition(u8),

    #[error("unsupported instruction 0x{op_code:08X}: {reason}")]
    UnsupportedInstruction { op_code: u32, reason: &'static str },
}
