//! # ALU Engine
//!
//! One entry point, [`AluOperation::apply`], shared by ARM data processing and
//! every Thumb format that computes something (formats 1-5, 12, 13).
//!
//! The engine never touches the register file: it returns the value to write
//! (if any) and the flag update (if any) and the caller commits them. That
//! keeps R15 handling (alignment, pipeline flush) in one place in the CPU.
//!
//! Flag rules:
//!
//! | Group      | N          | Z          | C                          | V                  |
//! |------------|------------|------------|----------------------------|--------------------|
//! | Logical    | result[31] | result==0  | shifter carry-out          | unchanged          |
//! | Arithmetic | result[31] | result==0  | carry out / NOT borrow     | signed overflow    |
//! | MUL        | result[31] | result==0  | unchanged                  | unchanged          |

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;

/// The 16 ARM data-processing operations followed by the Thumb-only ones.
///
/// The Thumb shift operations receive an operand already run through the
/// barrel shifter, so for the engine they are moves whose carry comes from
/// the shifter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum AluOperation {
    And,
    Eor,
    Sub,
    Rsb,
    Add,
    Adc,
    Sbc,
    Rsc,
    Tst,
    Teq,
    Cmp,
    Cmn,
    Orr,
    Mov,
    Bic,
    Mvn,
    Lsl,
    Lsr,
    Asr,
    Ror,
    Neg,
    Mul,
}

/// ARM opcode field (bits 24-21) to operation.
const ARM_OPCODES: [AluOperation; 16] = [
    AluOperation::And,
    AluOperation::Eor,
    AluOperation::Sub,
    AluOperation::Rsb,
    AluOperation::Add,
    AluOperation::Adc,
    AluOperation::Sbc,
    AluOperation::Rsc,
    AluOperation::Tst,
    AluOperation::Teq,
    AluOperation::Cmp,
    AluOperation::Cmn,
    AluOperation::Orr,
    AluOperation::Mov,
    AluOperation::Bic,
    AluOperation::Mvn,
];

/// Thumb format 4 opcode field (bits 9-6) to operation.
const THUMB_OPCODES: [AluOperation; 16] = [
    AluOperation::And,
    AluOperation::Eor,
    AluOperation::Lsl,
    AluOperation::Lsr,
    AluOperation::Asr,
    AluOperation::Adc,
    AluOperation::Sbc,
    AluOperation::Ror,
    AluOperation::Tst,
    AluOperation::Neg,
    AluOperation::Cmp,
    AluOperation::Cmn,
    AluOperation::Orr,
    AluOperation::Mul,
    AluOperation::Bic,
    AluOperation::Mvn,
];

/// Thumb format 3 opcode field (bits 12-11) to operation.
const THUMB_IMMEDIATE_OPCODES: [AluOperation; 4] = [
    AluOperation::Mov,
    AluOperation::Cmp,
    AluOperation::Add,
    AluOperation::Sub,
];

#[derive(Eq, PartialEq, Debug)]
pub enum AluInstructionKind {
    Logical,
    Arithmetic,
}

/// Flags produced by one operation. `None` leaves the CPSR bit untouched.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FlagUpdate {
    pub sign: bool,
    pub zero: bool,
    pub carry: Option<bool>,
    pub overflow: Option<bool>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AluOutput {
    /// `None` for the comparison operations, which never write a register.
    pub result: Option<u32>,
    pub flags: Option<FlagUpdate>,
}

impl AluOperation {
    #[must_use]
    pub const fn from_arm_opcode(op_code: u32) -> Self {
        ARM_OPCODES[(op_code & 0xF) as usize]
    }

    #[must_use]
    pub const fn from_thumb_opcode(op_code: u16) -> Self {
        THUMB_OPCODES[(op_code & 0xF) as usize]
    }

    #[must_use]
    pub const fn from_thumb_immediate_opcode(op_code: u16) -> Self {
        THUMB_IMMEDIATE_OPCODES[(op_code & 0b11) as usize]
    }

    #[must_use]
    pub const fn kind(self) -> AluInstructionKind {
        use AluOperation::{And, Asr, Bic, Eor, Lsl, Lsr, Mov, Mvn, Orr, Ror, Teq, Tst};
        match self {
            And | Eor | Tst | Teq | Orr | Mov | Bic | Mvn | Lsl | Lsr | Asr | Ror => {
                AluInstructionKind::Logical
            }
            _ => AluInstructionKind::Arithmetic,
        }
    }

    /// TST, TEQ, CMP and CMN only exist to set flags.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Tst | Self::Teq | Self::Cmp | Self::Cmn)
    }

    /// Picks the carry the operation consumes: the shifter carry-out for the
    /// logical group, the current C flag for the arithmetic group.
    #[must_use]
    pub const fn carry_in(self, shifter_carry: bool, carry_flag: bool) -> bool {
        match self.kind() {
            AluInstructionKind::Logical => shifter_carry,
            AluInstructionKind::Arithmetic => carry_flag,
        }
    }

    /// Runs the operation on `rn` and the (already shifted) `op2`.
    ///
    /// `carry_in` is whatever [`carry_in`](Self::carry_in) picked. Flags are
    /// produced when `set_flags` is true and always for the comparisons.
    #[must_use]
    pub fn apply(self, rn: u32, op2: u32, carry_in: bool, set_flags: bool) -> AluOutput {
        use AluOperation::{
            Adc, Add, And, Asr, Bic, Cmn, Cmp, Eor, Lsl, Lsr, Mov, Mul, Mvn, Neg, Orr, Ror, Rsb,
            Rsc, Sbc, Sub, Teq, Tst,
        };

        let (value, carry, overflow) = match self {
            And | Tst => (rn & op2, Some(carry_in), None),
            Eor | Teq => (rn ^ op2, Some(carry_in), None),
            Orr => (rn | op2, Some(carry_in), None),
            Bic => (rn & !op2, Some(carry_in), None),
            Mov | Lsl | Lsr | Asr | Ror => (op2, Some(carry_in), None),
            Mvn => (!op2, Some(carry_in), None),
            Add | Cmn => arithmetic(add_with_carry(rn, op2, false)),
            Adc => arithmetic(add_with_carry(rn, op2, carry_in)),
            Sub | Cmp => arithmetic(sub_with_carry(rn, op2, true)),
            Sbc => arithmetic(sub_with_carry(rn, op2, carry_in)),
            Rsb => arithmetic(sub_with_carry(op2, rn, true)),
            Rsc => arithmetic(sub_with_carry(op2, rn, carry_in)),
            Neg => arithmetic(sub_with_carry(0, op2, true)),
            Mul => (rn.wrapping_mul(op2), None, None),
        };

        let flags = (set_flags || self.is_comparison()).then_some(FlagUpdate {
            sign: value.get_bit(31),
            zero: value == 0,
            carry,
            overflow,
        });

        AluOutput {
            result: (!self.is_comparison()).then_some(value),
            flags,
        }
    }
}

#[derive(Debug, Default)]
pub struct ArithmeticOpResult {
    pub result: u32,
    pub carry: bool,
    pub overflow: bool,
}

const fn arithmetic(r: ArithmeticOpResult) -> (u32, Option<bool>, Option<bool>) {
    (r.result, Some(r.carry), Some(r.overflow))
}

/// `a + b + carry` with the carry out of bit 31 and the signed overflow.
#[must_use]
pub fn add_with_carry(a: u32, b: u32, carry: bool) -> ArithmeticOpResult {
    // Done in 64 bits so that bit 32 is the carry.
    let wide = u64::from(a) + u64::from(b) + u64::from(carry);
    let result = wide as u32;

    ArithmeticOpResult {
        result,
        carry: wide > u64::from(u32::MAX),
        // Operands with the same sign giving a result with the other one.
        overflow: ((a ^ result) & (b ^ result)).get_bit(31),
    }
}

/// `a - b - !carry`. The carry out is NOT borrow, as ARM defines it.
#[must_use]
pub fn sub_with_carry(a: u32, b: u32, carry: bool) -> ArithmeticOpResult {
    let borrow_in = u64::from(!carry);
    let result = a.wrapping_sub(b).wrapping_sub(u32::from(!carry));

    ArithmeticOpResult {
        result,
        carry: u64::from(a) >= u64::from(b) + borrow_in,
        // Operands with different signs and result sign differing from `a`.
        overflow: ((a ^ b) & (a ^ result)).get_bit(31),
    }
}

impl Display for AluOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Eor => f.write_str("EOR"),
            Self::Sub => f.write_str("SUB"),
            Self::Rsb => f.write_str("RSB"),
            Self::Add => f.write_str("ADD"),
            Self::Adc => f.write_str("ADC"),
            Self::Sbc => f.write_str("SBC"),
            Self::Rsc => f.write_str("RSC"),
            Self::Tst => f.write_str("TST"),
            Self::Teq => f.write_str("TEQ"),
            Self::Cmp => f.write_str("CMP"),
            Self::Cmn => f.write_str("CMN"),
            Self::Orr => f.write_str("ORR"),
            Self::Mov => f.write_str("MOV"),
            Self::Bic => f.write_str("BIC"),
            Self::Mvn => f.write_str("MVN"),
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
            Self::Neg => f.write_str("NEG"),
            Self::Mul => f.write_str("MUL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flags(output: AluOutput) -> FlagUpdate {
        output.flags.unwrap()
    }

    #[test]
    fn check_opcode_tables() {
        assert_eq!(AluOperation::from_arm_opcode(0x9), AluOperation::Teq);
        assert_eq!(AluOperation::from_arm_opcode(0xD), AluOperation::Mov);
        assert_eq!(AluOperation::from_thumb_opcode(0x9), AluOperation::Neg);
        assert_eq!(AluOperation::from_thumb_opcode(0xD), AluOperation::Mul);
        assert_eq!(
            AluOperation::from_thumb_immediate_opcode(0b10),
            AluOperation::Add
        );
    }

    #[test]
    fn check_kind() {
        assert_eq!(AluOperation::Teq.kind(), AluInstructionKind::Logical);
        assert_eq!(AluOperation::Sub.kind(), AluInstructionKind::Arithmetic);
        assert_eq!(AluOperation::Ror.kind(), AluInstructionKind::Logical);
    }

    #[test]
    fn check_no_flags_without_s_bit() {
        let output = AluOperation::Add.apply(1, 2, false, false);
        assert_eq!(output.result, Some(3));
        assert_eq!(output.flags, None);
    }

    #[test]
    fn check_comparisons_never_write_and_always_set_flags() {
        for op in [
            AluOperation::Tst,
            AluOperation::Teq,
            AluOperation::Cmp,
            AluOperation::Cmn,
        ] {
            let output = op.apply(5, 5, false, false);
            assert_eq!(output.result, None);
            assert!(output.flags.is_some());
        }
    }

    #[test]
    fn check_logical_carry_is_passthrough() {
        let f = flags(AluOperation::Mov.apply(0, 0x8000_0000, true, true));
        assert_eq!(
            f,
            FlagUpdate {
                sign: true,
                zero: false,
                carry: Some(true),
                overflow: None,
            }
        );

        let f = flags(AluOperation::And.apply(0xF0, 0x0F, false, true));
        assert!(f.zero);
        assert_eq!(f.carry, Some(false));
        assert_eq!(f.overflow, None);
    }

    #[test]
    fn check_add() {
        let output = AluOperation::Add.apply(0xFFFF_FFFF, 1, false, true);
        assert_eq!(output.result, Some(0));
        assert_eq!(
            flags(output),
            FlagUpdate {
                sign: false,
                zero: true,
                carry: Some(true),
                overflow: Some(false),
            }
        );

        let f = flags(AluOperation::Add.apply(0x7FFF_FFFF, 1, false, true));
        assert!(f.sign);
        assert_eq!(f.carry, Some(false));
        assert_eq!(f.overflow, Some(true));

        // Both operands negative, result wraps positive.
        let output = AluOperation::Add.apply(0x8000_0001, 0x8000_0000, false, true);
        assert_eq!(output.result, Some(1));
        assert_eq!(flags(output).carry, Some(true));
        assert_eq!(flags(output).overflow, Some(true));
    }

    #[test]
    fn check_adc_uses_carry_in() {
        assert_eq!(AluOperation::Adc.apply(1, 1, true, false).result, Some(3));

        let f = flags(AluOperation::Adc.apply(0xFFFF_FFFF, 0, true, true));
        assert!(f.zero);
        assert_eq!(f.carry, Some(true));
    }

    #[test]
    fn check_sub_and_cmp() {
        let output = AluOperation::Sub.apply(5, 3, false, true);
        assert_eq!(output.result, Some(2));
        assert_eq!(flags(output).carry, Some(true));

        // Borrow clears C.
        let f = flags(AluOperation::Cmp.apply(3, 5, false, false));
        assert!(f.sign);
        assert_eq!(f.carry, Some(false));
        assert_eq!(f.overflow, Some(false));

        let f = flags(AluOperation::Cmp.apply(7, 7, false, false));
        assert!(f.zero);
        assert_eq!(f.carry, Some(true));

        let f = flags(AluOperation::Cmp.apply(0x8000_0000, 1, false, false));
        assert_eq!(f.overflow, Some(true));
    }

    #[test]
    fn check_sbc_and_rsc() {
        // With C clear an extra 1 is taken.
        assert_eq!(AluOperation::Sbc.apply(5, 3, false, false).result, Some(1));
        assert_eq!(AluOperation::Sbc.apply(5, 3, true, false).result, Some(2));
        assert_eq!(AluOperation::Rsc.apply(3, 5, false, false).result, Some(1));
        assert_eq!(AluOperation::Rsb.apply(3, 5, false, false).result, Some(2));

        let f = flags(AluOperation::Sbc.apply(0, 0, false, true));
        assert!(f.sign);
        assert_eq!(f.carry, Some(false));
    }

    #[test]
    fn check_cmn() {
        let f = flags(AluOperation::Cmn.apply(1, 0xFFFF_FFFF, false, false));
        assert!(f.zero);
        assert_eq!(f.carry, Some(true));
    }

    #[test]
    fn check_neg() {
        let output = AluOperation::Neg.apply(0, 1, false, true);
        assert_eq!(output.result, Some(0xFFFF_FFFF));
        assert_eq!(flags(output).carry, Some(false));

        let f = flags(AluOperation::Neg.apply(0, 0, false, true));
        assert!(f.zero);
        assert_eq!(f.carry, Some(true));
    }

    #[test]
    fn check_mul_leaves_carry_and_overflow() {
        let output = AluOperation::Mul.apply(0x1_0000, 0x1_0000, true, true);
        assert_eq!(output.result, Some(0));
        assert_eq!(
            flags(output),
            FlagUpdate {
                sign: false,
                zero: true,
                carry: None,
                overflow: None,
            }
        );
    }

    #[test]
    fn check_bic_mvn_orr_eor() {
        assert_eq!(AluOperation::Bic.apply(0xFF, 0x0F, false, false).result, Some(0xF0));
        assert_eq!(AluOperation::Mvn.apply(0, 0, false, false).result, Some(u32::MAX));
        assert_eq!(AluOperation::Orr.apply(0xF0, 0x0F, false, false).result, Some(0xFF));
        assert_eq!(AluOperation::Eor.apply(0xFF, 0x0F, false, false).result, Some(0xF0));
    }
}
