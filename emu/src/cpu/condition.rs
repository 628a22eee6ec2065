//! # Condition Field
//!
//! Every ARM instruction carries a condition in bits 31-28; in Thumb only the
//! conditional branch (format 16) has one. The instruction runs only when the
//! CPSR flags satisfy it, otherwise it behaves as a NOP that still lets the
//! pipeline advance.
//!
//! ```text
//! ┌──────┬────────┬──────────────────────┬──────────────────┐
//! │ Code │ Suffix │ Meaning              │ Flags            │
//! ├──────┼────────┼──────────────────────┼──────────────────┤
//! │ 0000 │ EQ     │ equal                │ Z=1              │
//! │ 0001 │ NE     │ not equal            │ Z=0              │
//! │ 0010 │ CS/HS  │ unsigned >=          │ C=1              │
//! │ 0011 │ CC/LO  │ unsigned <           │ C=0              │
//! │ 0100 │ MI     │ negative             │ N=1              │
//! │ 0101 │ PL     │ positive or zero     │ N=0              │
//! │ 0110 │ VS     │ overflow             │ V=1              │
//! │ 0111 │ VC     │ no overflow          │ V=0              │
//! │ 1000 │ HI     │ unsigned >           │ C=1 and Z=0      │
//! │ 1001 │ LS     │ unsigned <=          │ C=0 or Z=1       │
//! │ 1010 │ GE     │ signed >=            │ N=V              │
//! │ 1011 │ LT     │ signed <             │ N!=V             │
//! │ 1100 │ GT     │ signed >             │ Z=0 and N=V      │
//! │ 1101 │ LE     │ signed <=            │ Z=1 or N!=V      │
//! │ 1110 │ AL     │ always               │ -                │
//! │ 1111 │ NV     │ never (reserved)     │ -                │
//! └──────┴────────┴──────────────────────┴──────────────────┘
//! ```
//!
//! The evaluation itself lives in [`Psr::can_execute`](super::psr::Psr::can_execute).

use serde::{Deserialize, Serialize};

use crate::cpu::error::CpuError;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum Condition {
    /// Equal (Z=1)
    EQ = 0x0,

    /// Not equal (Z=0)
    NE = 0x1,

    /// Carry set, unsigned higher or same (C=1)
    CS = 0x2,

    /// Carry clear, unsigned lower (C=0)
    CC = 0x3,

    /// Negative (N=1)
    MI = 0x4,

    /// Positive or zero (N=0)
    PL = 0x5,

    /// Overflow (V=1)
    VS = 0x6,

    /// No overflow (V=0)
    VC = 0x7,

    /// Unsigned higher (C=1 and Z=0)
    HI = 0x8,

    /// Unsigned lower or same (C=0 or Z=1)
    LS = 0x9,

    /// Signed greater or equal (N=V)
    GE = 0xA,

    /// Signed less than (N!=V)
    LT = 0xB,

    /// Signed greater than (Z=0 and N=V)
    GT = 0xC,

    /// Signed less or equal (Z=1 or N!=V)
    LE = 0xD,

    /// Always. The suffix is omitted in assembly.
    AL = 0xE,

    /// Never. Reserved on `ARMv4`, the core never executes it.
    NV = 0xF,
}

impl TryFrom<u8> for Condition {
    type Error = CpuError;

    fn try_from(item: u8) -> Result<Self, Self::Error> {
        Ok(match item {
            0x0 => Self::EQ,
            0x1 => Self::NE,
            0x2 => Self::CS,
            0x3 => Self::CC,
            0x4 => Self::MI,
            0x5 => Self::PL,
            0x6 => Self::VS,
            0x7 => Self::VC,
            0x8 => Self::HI,
            0x9 => Self::LS,
            0xA => Self::GE,
            0xB => Self::LT,
            0xC => Self::GT,
            0xD => Self::LE,
            0xE => Self::AL,
            0xF => Self::NV,
            _ => return Err(CpuError::InvalidCondition(item)),
        })
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EQ => f.write_str("EQ"),
            Self::NE => f.write_str("NE"),
            Self::CS => f.write_str("CS"),
            Self::CC => f.write_str("CC"),
            Self::MI => f.write_str("MI"),
            Self::PL => f.write_str("PL"),
            Self::VS => f.write_str("VS"),
            Self::VC => f.write_str("VC"),
            Self::HI => f.write_str("HI"),
            Self::LS => f.write_str("LS"),
            Self::GE => f.write_str("GE"),
            Self::LT => f.write_str("LT"),
            Self::GT => f.write_str("GT"),
            Self::LE => f.write_str("LE"),
            Self::AL => Ok(()),
            Self::NV => f.write_str("NV"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_condition_from_field() {
        assert_eq!(Condition::try_from(0x0), Ok(Condition::EQ));
        assert_eq!(Condition::try_from(0xB), Ok(Condition::LT));
        assert_eq!(Condition::try_from(0xE), Ok(Condition::AL));
        assert_eq!(
            Condition::try_from(0x10),
            Err(CpuError::InvalidCondition(0x10))
        );
    }

    #[test]
    fn check_always_has_no_suffix() {
        assert_eq!(Condition::AL.to_string(), "");
        assert_eq!(Condition::GT.to_string(), "GT");
    }
}
