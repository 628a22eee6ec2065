//! # Barrel Shifter
//!
//! Shared by data processing operand 2, the register offsets of single and
//! halfword data transfers, and the Thumb shift instructions.
//!
//! The amount can come from the instruction itself or from the bottom byte of
//! a register, and a zero amount means different things in the two cases:
//!
//! | Kind | Immediate #0            | Register, Rs = 0 |
//! |------|-------------------------|------------------|
//! | LSL  | no shift, C unchanged   | no shift, C unchanged |
//! | LSR  | LSR #32                 | no shift, C unchanged |
//! | ASR  | ASR #32                 | no shift, C unchanged |
//! | ROR  | RRX (rotate through C)  | no shift, C unchanged |

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    Lsl,
    Lsr,
    Asr,
    Ror,
}

impl From<u32> for ShiftKind {
    fn from(op_code: u32) -> Self {
        match op_code & 0b11 {
            0b00 => Self::Lsl,
            0b01 => Self::Lsr,
            0b10 => Self::Asr,
            _ => Self::Ror,
        }
    }
}

impl From<u16> for ShiftKind {
    fn from(op_code: u16) -> Self {
        u32::from(op_code).into()
    }
}

impl Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
        }
    }
}

/// Where the shift amount was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftSource {
    /// 5-bit literal in the instruction.
    Immediate,

    /// Bottom byte of a register.
    Register,
}

/// Shifts `value` and returns the result with the carry out.
///
/// Only the bottom byte of `amount` is used for [`ShiftSource::Register`].
#[must_use]
pub fn shift(
    value: u32,
    kind: ShiftKind,
    amount: u32,
    source: ShiftSource,
    carry_in: bool,
) -> (u32, bool) {
    let amount = match source {
        ShiftSource::Immediate => amount & 0x1F,
        ShiftSource::Register => amount & 0xFF,
    };

    if amount == 0 {
        return match (source, kind) {
            (ShiftSource::Register, _) | (ShiftSource::Immediate, ShiftKind::Lsl) => {
                (value, carry_in)
            }
            (ShiftSource::Immediate, ShiftKind::Lsr) => (0, value.get_bit(31)),
            (ShiftSource::Immediate, ShiftKind::Asr) => asr(value, 32),
            (ShiftSource::Immediate, ShiftKind::Ror) => {
                // RRX
                let result = (u32::from(carry_in) << 31) | (value >> 1);
                (result, value.get_bit(0))
            }
        };
    }

    match kind {
        ShiftKind::Lsl => match amount {
            1..=31 => (value << amount, value.get_bit((32 - amount) as u8)),
            32 => (0, value.get_bit(0)),
            _ => (0, false),
        },
        ShiftKind::Lsr => match amount {
            1..=31 => (value >> amount, value.get_bit((amount - 1) as u8)),
            32 => (0, value.get_bit(31)),
            _ => (0, false),
        },
        ShiftKind::Asr => asr(value, amount),
        ShiftKind::Ror => {
            let amount = amount & 0x1F;
            if amount == 0 {
                // A multiple of 32: nothing moves, C gets bit 31.
                (value, value.get_bit(31))
            } else {
                let result = value.rotate_right(amount);
                (result, result.get_bit(31))
            }
        }
    }
}

fn asr(value: u32, amount: u32) -> (u32, bool) {
    if amount >= 32 {
        let fill = if value.get_bit(31) { u32::MAX } else { 0 };
        (fill, value.get_bit(31))
    } else {
        (
            ((value as i32) >> amount) as u32,
            value.get_bit((amount - 1) as u8),
        )
    }
}
