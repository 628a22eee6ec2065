//! # Thumb Instruction Decoding
//!
//! This module handles decoding 16-bit Thumb instructions.
//!
//! ## Thumb Instruction Formats
//!
//! Thumb instructions are grouped into 19 formats, identified by their high bits:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Thumb Instruction Formats                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Format 1:  000 xx          Move shifted register                      │
//! │  Format 2:  00011           Add/subtract                               │
//! │  Format 3:  001 xx          Move/compare/add/subtract immediate        │
//! │  Format 4:  010000          ALU operations                             │
//! │  Format 5:  010001          Hi register operations / BX                │
//! │  Format 6:  01001           PC-relative load                           │
//! │  Format 7:  0101 xx0        Load/store with register offset            │
//! │  Format 8:  0101 xx1        Load/store sign-extended byte/halfword     │
//! │  Format 9:  011 xx          Load/store with immediate offset           │
//! │  Format 10: 1000 x          Load/store halfword                        │
//! │  Format 11: 1001 x          SP-relative load/store                     │
//! │  Format 12: 1010 x          Load address                               │
//! │  Format 13: 10110000        Add offset to stack pointer                │
//! │  Format 14: 1011 x10x       Push/pop registers                         │
//! │  Format 15: 1100 x          Multiple load/store                        │
//! │  Format 16: 1101 xxxx       Conditional branch                         │
//! │  Format 17: 11011111        Software interrupt                         │
//! │  Format 18: 11100           Unconditional branch                       │
//! │  Format 19: 1111 x          Long branch with link                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The formats are matched in a fixed order (see [`THUMB_CLASSES`]): SWI is
//! the `1111` condition of format 16 and add-offset-to-SP sits inside the
//! `1011` space of push/pop, so both go first. Add/subtract is carved out of
//! format 1 the same way.
//!
//! ## Register Restrictions
//!
//! Most Thumb instructions can only access R0-R7. To access R8-R15:
//! - Format 5 (Hi register ops): ADD, CMP, MOV with high registers
//! - BX: Can branch to any register
//! - PUSH/POP: Can include LR/PC via special bit
//!
//! ## Long Branch (BL)
//!
//! The BL instruction spans ±4MB but requires two 16-bit instructions:
//!
//! ```text
//! First:  1111 0xxx xxxx xxxx  ; LR = PC + (offset_hi << 12)
//! Second: 1111 1xxx xxxx xxxx  ; PC = LR + (offset_lo << 1), LR = old_PC | 1
//! ```

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::alu::AluOperation;
use crate::cpu::barrel_shifter::ShiftKind;
use crate::cpu::condition::Condition;
use crate::cpu::flags::{LoadStoreKind, OperandKind, ReadWriteKind};
use crate::cpu::thumb::alu_instructions::ThumbHighRegisterOperation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThumbInstructionClass {
    Swi,
    AddOffsetSP,
    PushPopReg,
    AluOp,
    HiRegisterOpBX,
    PCRelativeLoad,
    LoadStoreRegisterOffset,
    LoadStoreSignExtByteHalfword,
    AddSubtract,
    MoveShiftedRegister,
    MoveCompareAddSubtractImm,
    LoadStoreImmOffset,
    LoadStoreHalfword,
    SPRelativeLoadStore,
    LoadAddress,
    MultipleLoadStore,
    CondBranch,
    UncondBranch,
    LongBranchLink,
    Undefined,
}

/// `(class, pattern, mask)`, first match wins.
pub const THUMB_CLASSES: [(ThumbInstructionClass, u16, u16); 19] = [
    (ThumbInstructionClass::Swi, 0xDF00, 0xFF00),
    (ThumbInstructionClass::AddOffsetSP, 0xB000, 0xFF00),
    (ThumbInstructionClass::PushPopReg, 0xB400, 0xF600),
    (ThumbInstructionClass::AluOp, 0x4000, 0xFC00),
    (ThumbInstructionClass::HiRegisterOpBX, 0x4400, 0xFC00),
    (ThumbInstructionClass::PCRelativeLoad, 0x4800, 0xF800),
    (ThumbInstructionClass::LoadStoreRegisterOffset, 0x5000, 0xF200),
    (ThumbInstructionClass::LoadStoreSignExtByteHalfword, 0x5200, 0xF200),
    (ThumbInstructionClass::AddSubtract, 0x1800, 0xF800),
    (ThumbInstructionClass::MoveShiftedRegister, 0x0000, 0xE000),
    (ThumbInstructionClass::MoveCompareAddSubtractImm, 0x2000, 0xE000),
    (ThumbInstructionClass::LoadStoreImmOffset, 0x6000, 0xE000),
    (ThumbInstructionClass::LoadStoreHalfword, 0x8000, 0xF000),
    (ThumbInstructionClass::SPRelativeLoadStore, 0x9000, 0xF000),
    (ThumbInstructionClass::LoadAddress, 0xA000, 0xF000),
    (ThumbInstructionClass::MultipleLoadStore, 0xC000, 0xF000),
    (ThumbInstructionClass::CondBranch, 0xD000, 0xF000),
    (ThumbInstructionClass::UncondBranch, 0xE000, 0xF800),
    (ThumbInstructionClass::LongBranchLink, 0xF000, 0xF000),
];

#[must_use]
pub fn classify(op_code: u16) -> ThumbInstructionClass {
    THUMB_CLASSES
        .iter()
        .find(|(_, pattern, mask)| op_code & mask == *pattern)
        .map_or_else(
            || {
                tracing::debug!("no Thumb instruction class matches 0x{op_code:04X}");
                ThumbInstructionClass::Undefined
            },
            |(class, _, _)| *class,
        )
}

/// Immediate offsets are stored already scaled to bytes.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum ThumbModeInstruction {
    MoveShiftedRegister {
        shift_operation: ShiftKind,
        offset5: u16,
        source_register: u16,
        destination_register: u16,
    },
    AddSubtract {
        operation_kind: OperandKind,
        /// `Add` or `Sub`.
        op: AluOperation,
        rn_offset3: u16,
        source_register: u16,
        destination_register: u16,
    },
    MoveCompareAddSubtractImm {
        operation: AluOperation,
        destination_register: u16,
        offset: u16,
    },
    AluOp {
        alu_operation: AluOperation,
        source_register: u16,
        destination_register: u16,
    },
    HiRegisterOpBX {
        op: ThumbHighRegisterOperation,
        source_register: u16,
        destination_register: u16,
    },
    PCRelativeLoad {
        destination_register: u16,
        immediate_value: u16,
    },
    LoadStoreRegisterOffset {
        load_store: LoadStoreKind,
        byte_word: ReadWriteKind,
        offset_register: u16,
        base_register: u16,
        source_destination_register: u16,
    },
    LoadStoreSignExtByteHalfword {
        h_flag: bool,
        sign_extend_flag: bool,
        offset_register: u16,
        base_register: u16,
        source_destination_register: u16,
    },
    LoadStoreImmOffset {
        byte_word: ReadWriteKind,
        load_store: LoadStoreKind,
        offset: u16,
        base_register: u16,
        source_destination_register: u16,
    },
    LoadStoreHalfword {
        load_store: LoadStoreKind,
        offset: u16,
        base_register: u16,
        source_destination_register: u16,
    },
    SPRelativeLoadStore {
        load_store: LoadStoreKind,
        destination_register: u16,
        word8: u16,
    },
    LoadAddress {
        sp: bool,
        destination_register: u16,
        word8: u16,
    },
    AddOffsetSP {
        /// Subtract when set.
        s: bool,
        word7: u16,
    },
    PushPopReg {
        load_store: LoadStoreKind,
        pc_lr: bool,
        register_list: u16,
    },
    MultipleLoadStore {
        load_store: LoadStoreKind,
        base_register: u16,
        register_list: u16,
    },
    CondBranch {
        condition: Condition,
        immediate_offset: i32,
    },
    Swi {
        comment: u16,
    },
    UncondBranch {
        offset: i32,
    },
    LongBranchLink {
        /// Second half when set.
        h: bool,
        offset: u16,
    },
    Undefined,
}

impl From<u16> for ThumbModeInstruction {
    #[allow(clippy::too_many_lines)]
    fn from(op_code: u16) -> Self {
        match classify(op_code) {
            ThumbInstructionClass::Swi => Self::Swi {
                comment: op_code.get_bits(0..=7),
            },
            ThumbInstructionClass::AddOffsetSP => Self::AddOffsetSP {
                s: op_code.get_bit(7),
                word7: op_code.get_bits(0..=6) << 2,
            },
            ThumbInstructionClass::PushPopReg => Self::PushPopReg {
                load_store: op_code.get_bit(11).into(),
                pc_lr: op_code.get_bit(8),
                register_list: op_code.get_bits(0..=7),
            },
            ThumbInstructionClass::AluOp => Self::AluOp {
                alu_operation: AluOperation::from_thumb_opcode(op_code.get_bits(6..=9)),
                source_register: op_code.get_bits(3..=5),
                destination_register: op_code.get_bits(0..=2),
            },
            ThumbInstructionClass::HiRegisterOpBX => {
                let h1 = op_code.get_bit(7);
                let rd_hd = op_code.get_bits(0..=2);

                Self::HiRegisterOpBX {
                    op: op_code.get_bits(8..=9).into(),
                    // H2 is bit 6, right above Rs/Hs.
                    source_register: op_code.get_bits(3..=6),
                    destination_register: if h1 { rd_hd | (1 << 3) } else { rd_hd },
                }
            }
            ThumbInstructionClass::PCRelativeLoad => Self::PCRelativeLoad {
                destination_register: op_code.get_bits(8..=10),
                immediate_value: op_code.get_bits(0..=7) << 2,
            },
            ThumbInstructionClass::LoadStoreRegisterOffset => Self::LoadStoreRegisterOffset {
                load_store: op_code.get_bit(11).into(),
                byte_word: op_code.get_bit(10).into(),
                offset_register: op_code.get_bits(6..=8),
                base_register: op_code.get_bits(3..=5),
                source_destination_register: op_code.get_bits(0..=2),
            },
            ThumbInstructionClass::LoadStoreSignExtByteHalfword => {
                Self::LoadStoreSignExtByteHalfword {
                    h_flag: op_code.get_bit(11),
                    sign_extend_flag: op_code.get_bit(10),
                    offset_register: op_code.get_bits(6..=8),
                    base_register: op_code.get_bits(3..=5),
                    source_destination_register: op_code.get_bits(0..=2),
                }
            }
            ThumbInstructionClass::AddSubtract => Self::AddSubtract {
                operation_kind: op_code.get_bit(10).into(),
                op: if op_code.get_bit(9) {
                    AluOperation::Sub
                } else {
                    AluOperation::Add
                },
                rn_offset3: op_code.get_bits(6..=8),
                source_register: op_code.get_bits(3..=5),
                destination_register: op_code.get_bits(0..=2),
            },
            ThumbInstructionClass::MoveShiftedRegister => Self::MoveShiftedRegister {
                shift_operation: op_code.get_bits(11..=12).into(),
                offset5: op_code.get_bits(6..=10),
                source_register: op_code.get_bits(3..=5),
                destination_register: op_code.get_bits(0..=2),
            },
            ThumbInstructionClass::MoveCompareAddSubtractImm => Self::MoveCompareAddSubtractImm {
                operation: AluOperation::from_thumb_immediate_opcode(op_code.get_bits(11..=12)),
                destination_register: op_code.get_bits(8..=10),
                offset: op_code.get_bits(0..=7),
            },
            ThumbInstructionClass::LoadStoreImmOffset => {
                let byte_word: ReadWriteKind = op_code.get_bit(12).into();
                let offset = match byte_word {
                    ReadWriteKind::Word => op_code.get_bits(6..=10) << 2,
                    ReadWriteKind::Byte => op_code.get_bits(6..=10),
                };

                Self::LoadStoreImmOffset {
                    byte_word,
                    load_store: op_code.get_bit(11).into(),
                    offset,
                    base_register: op_code.get_bits(3..=5),
                    source_destination_register: op_code.get_bits(0..=2),
                }
            }
            ThumbInstructionClass::LoadStoreHalfword => Self::LoadStoreHalfword {
                load_store: op_code.get_bit(11).into(),
                offset: op_code.get_bits(6..=10) << 1,
                base_register: op_code.get_bits(3..=5),
                source_destination_register: op_code.get_bits(0..=2),
            },
            ThumbInstructionClass::SPRelativeLoadStore => Self::SPRelativeLoadStore {
                load_store: op_code.get_bit(11).into(),
                destination_register: op_code.get_bits(8..=10),
                word8: op_code.get_bits(0..=7) << 2,
            },
            ThumbInstructionClass::LoadAddress => Self::LoadAddress {
                sp: op_code.get_bit(11),
                destination_register: op_code.get_bits(8..=10),
                word8: op_code.get_bits(0..=7) << 2,
            },
            ThumbInstructionClass::MultipleLoadStore => Self::MultipleLoadStore {
                load_store: op_code.get_bit(11).into(),
                base_register: op_code.get_bits(8..=10),
                register_list: op_code.get_bits(0..=7),
            },
            ThumbInstructionClass::CondBranch => {
                match Condition::try_from(op_code.get_bits(8..=11) as u8) {
                    Ok(Condition::AL) | Err(_) => {
                        tracing::debug!("conditional branch with AL condition: 0x{op_code:04X}");
                        Self::Undefined
                    }
                    Ok(condition) => Self::CondBranch {
                        condition,
                        immediate_offset: (u32::from(op_code.get_bits(0..=7)) << 1)
                            .sign_extended(9) as i32,
                    },
                }
            }
            ThumbInstructionClass::UncondBranch => Self::UncondBranch {
                offset: (u32::from(op_code.get_bits(0..=10)) << 1).sign_extended(12) as i32,
            },
            ThumbInstructionClass::LongBranchLink => Self::LongBranchLink {
                h: op_code.get_bit(11),
                offset: op_code.get_bits(0..=10),
            },
            ThumbInstructionClass::Undefined => Self::Undefined,
        }
    }
}

#[cfg(feature = "disassembler")]
impl ThumbModeInstruction {
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn disassembler(&self) -> String {
        fn register_list(list: u16, extra: Option<&str>) -> String {
            let mut regs: Vec<String> = (0..8u8)
                .filter(|&reg| list.is_bit_on(reg))
                .map(|reg| format!("R{reg}"))
                .collect();
            regs.extend(extra.map(str::to_owned));
            regs.join(", ")
        }

        fn transfer(load_store: LoadStoreKind, byte_word: ReadWriteKind) -> &'static str {
            match (load_store, byte_word) {
                (LoadStoreKind::Load, ReadWriteKind::Byte) => "LDRB",
                (LoadStoreKind::Load, ReadWriteKind::Word) => "LDR",
                (LoadStoreKind::Store, ReadWriteKind::Byte) => "STRB",
                (LoadStoreKind::Store, ReadWriteKind::Word) => "STR",
            }
        }

        match self {
            Self::MoveShiftedRegister {
                shift_operation,
                offset5,
                source_register,
                destination_register,
            } => format!("{shift_operation} R{destination_register}, R{source_register}, #{offset5}"),
            Self::AddSubtract {
                operation_kind,
                op,
                rn_offset3,
                source_register: rs,
                destination_register: rd,
            } => {
                let operand = match operation_kind {
                    OperandKind::Immediate => format!("#{rn_offset3}"),
                    OperandKind::Register => format!("R{rn_offset3}"),
                };
                format!("{op} R{rd}, R{rs}, {operand}")
            }
            Self::MoveCompareAddSubtractImm {
                operation,
                destination_register,
                offset,
            } => format!("{operation} R{destination_register}, #{offset}"),
            Self::AluOp {
                alu_operation,
                source_register: rs,
                destination_register: rd,
            } => format!("{alu_operation} R{rd}, R{rs}"),
            Self::HiRegisterOpBX {
                op: ThumbHighRegisterOperation::BxOrBlx,
                source_register,
                ..
            } => format!("BX R{source_register}"),
            Self::HiRegisterOpBX {
                op,
                source_register,
                destination_register,
            } => format!("{op} R{destination_register}, R{source_register}"),
            Self::PCRelativeLoad {
                destination_register,
                immediate_value,
            } => format!("LDR R{destination_register}, [PC, #{immediate_value}]"),
            Self::LoadStoreRegisterOffset {
                load_store,
                byte_word,
                offset_register: ro,
                base_register: rb,
                source_destination_register: rd,
            } => format!("{} R{rd}, [R{rb}, R{ro}]", transfer(*load_store, *byte_word)),
            Self::LoadStoreSignExtByteHalfword {
                h_flag,
                sign_extend_flag,
                offset_register: ro,
                base_register: rb,
                source_destination_register: rd,
            } => {
                let instr = match (sign_extend_flag, h_flag) {
                    (false, false) => "STRH",
                    (false, true) => "LDRH",
                    (true, false) => "LDSB",
                    (true, true) => "LDSH",
                };
                format!("{instr} R{rd}, [R{rb}, R{ro}]")
            }
            Self::LoadStoreImmOffset {
                byte_word,
                load_store,
                offset,
                base_register: rb,
                source_destination_register: rd,
            } => format!("{} R{rd}, [R{rb}, #{offset}]", transfer(*load_store, *byte_word)),
            Self::LoadStoreHalfword {
                load_store,
                offset,
                base_register: rb,
                source_destination_register: rd,
            } => format!("{load_store}H R{rd}, [R{rb}, #{offset}]"),
            Self::SPRelativeLoadStore {
                load_store,
                destination_register,
                word8,
            } => format!("{load_store} R{destination_register}, [SP, #{word8}]"),
            Self::LoadAddress {
                sp,
                destination_register,
                word8,
            } => {
                let source = if *sp { "SP" } else { "PC" };
                format!("ADD R{destination_register}, {source}, #{word8}")
            }
            Self::AddOffsetSP { s, word7 } => {
                let sign = if *s { "-" } else { "" };
                format!("ADD SP, #{sign}{word7}")
            }
            Self::PushPopReg {
                load_store,
                pc_lr,
                register_list: list,
            } => match load_store {
                LoadStoreKind::Store => {
                    format!("PUSH {{{}}}", register_list(*list, pc_lr.then_some("LR")))
                }
                LoadStoreKind::Load => {
                    format!("POP {{{}}}", register_list(*list, pc_lr.then_some("PC")))
                }
            },
            Self::MultipleLoadStore {
                load_store,
                base_register,
                register_list: list,
            } => {
                let instr = match load_store {
                    LoadStoreKind::Load => "LDMIA",
                    LoadStoreKind::Store => "STMIA",
                };
                format!("{instr} R{base_register}!, {{{}}}", register_list(*list, None))
            }
            Self::CondBranch {
                condition,
                immediate_offset,
            } => format!("B{condition} #{immediate_offset}"),
            Self::Swi { comment } => format!("SWI 0x{comment:02X}"),
            Self::UncondBranch { offset } => format!("B #{offset}"),
            Self::LongBranchLink { h, offset } => {
                let half = if *h { "low" } else { "high" };
                format!("BL ({half}) #0x{offset:03X}")
            }
            Self::Undefined => "UNDEFINED".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_table_order() {
        assert_eq!(classify(0xDF01), ThumbInstructionClass::Swi);
        assert_eq!(classify(0xD001), ThumbInstructionClass::CondBranch);
        assert_eq!(classify(0xB084), ThumbInstructionClass::AddOffsetSP);
        assert_eq!(classify(0xB503), ThumbInstructionClass::PushPopReg);
        assert_eq!(classify(0xBD03), ThumbInstructionClass::PushPopReg);
        assert_eq!(classify(0x1C40), ThumbInstructionClass::AddSubtract);
        assert_eq!(classify(0x0081), ThumbInstructionClass::MoveShiftedRegister);
        assert_eq!(classify(0x5E8B), ThumbInstructionClass::LoadStoreSignExtByteHalfword);
        assert_eq!(classify(0x5C8B), ThumbInstructionClass::LoadStoreRegisterOffset);
        assert_eq!(classify(0xF800), ThumbInstructionClass::LongBranchLink);
    }

    #[test]
    fn check_undefined_encodings() {
        // BLX suffix and the holes of the 1011 space do not exist on ARMv4T.
        assert_eq!(classify(0xE800), ThumbInstructionClass::Undefined);
        assert_eq!(classify(0xB100), ThumbInstructionClass::Undefined);
        assert_eq!(ThumbModeInstruction::from(0xBE00), ThumbModeInstruction::Undefined);
        // Condition AL is not a conditional branch.
        assert_eq!(ThumbModeInstruction::from(0xDE00), ThumbModeInstruction::Undefined);
    }

    #[test]
    fn decode_move_shifted_register() {
        // LSL R1, R0, #2
        assert_eq!(
            ThumbModeInstruction::from(0x0081),
            ThumbModeInstruction::MoveShiftedRegister {
                shift_operation: ShiftKind::Lsl,
                offset5: 2,
                source_register: 0,
                destination_register: 1,
            }
        );
    }

    #[test]
    fn decode_add_subtract() {
        // ADD R0, R0, #1
        assert_eq!(
            ThumbModeInstruction::from(0x1C40),
            ThumbModeInstruction::AddSubtract {
                operation_kind: OperandKind::Immediate,
                op: AluOperation::Add,
                rn_offset3: 1,
                source_register: 0,
                destination_register: 0,
            }
        );
        // SUB R2, R1, R3
        assert_eq!(
            ThumbModeInstruction::from(0b0001_1010_1100_1010),
            ThumbModeInstruction::AddSubtract {
                operation_kind: OperandKind::Register,
                op: AluOperation::Sub,
                rn_offset3: 3,
                source_register: 1,
                destination_register: 2,
            }
        );
    }

    #[test]
    fn decode_move_compare_add_sub_imm() {
        assert_eq!(
            ThumbModeInstruction::from(0x2805),
            ThumbModeInstruction::MoveCompareAddSubtractImm {
                operation: AluOperation::Cmp,
                destination_register: 0,
                offset: 5,
            }
        );
    }

    #[test]
    fn decode_alu_op() {
        assert_eq!(
            ThumbModeInstruction::from(0x4248),
            ThumbModeInstruction::AluOp {
                alu_operation: AluOperation::Neg,
                source_register: 1,
                destination_register: 0,
            }
        );
    }

    #[test]
    fn decode_hi_register_op() {
        // MOV PC, R0
        assert_eq!(
            ThumbModeInstruction::from(0x4687),
            ThumbModeInstruction::HiRegisterOpBX {
                op: ThumbHighRegisterOperation::Mov,
                source_register: 0,
                destination_register: 15,
            }
        );
        // BX LR
        assert_eq!(
            ThumbModeInstruction::from(0x4770),
            ThumbModeInstruction::HiRegisterOpBX {
                op: ThumbHighRegisterOperation::BxOrBlx,
                source_register: 14,
                destination_register: 0,
            }
        );
    }

    #[test]
    fn decode_loads_and_stores() {
        assert_eq!(
            ThumbModeInstruction::from(0x4801),
            ThumbModeInstruction::PCRelativeLoad {
                destination_register: 0,
                immediate_value: 4,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0x7D4A),
            ThumbModeInstruction::LoadStoreImmOffset {
                byte_word: ReadWriteKind::Byte,
                load_store: LoadStoreKind::Load,
                offset: 5,
                base_register: 1,
                source_destination_register: 2,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0x6048),
            ThumbModeInstruction::LoadStoreImmOffset {
                byte_word: ReadWriteKind::Word,
                load_store: LoadStoreKind::Store,
                offset: 4,
                base_register: 1,
                source_destination_register: 0,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0x884A),
            ThumbModeInstruction::LoadStoreHalfword {
                load_store: LoadStoreKind::Load,
                offset: 2,
                base_register: 1,
                source_destination_register: 2,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0x9902),
            ThumbModeInstruction::SPRelativeLoadStore {
                load_store: LoadStoreKind::Load,
                destination_register: 1,
                word8: 8,
            }
        );
    }

    #[test]
    fn decode_stack_operations() {
        assert_eq!(
            ThumbModeInstruction::from(0xB084),
            ThumbModeInstruction::AddOffsetSP { s: true, word7: 16 }
        );
        assert_eq!(
            ThumbModeInstruction::from(0xB503),
            ThumbModeInstruction::PushPopReg {
                load_store: LoadStoreKind::Store,
                pc_lr: true,
                register_list: 0b11,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0xA901),
            ThumbModeInstruction::LoadAddress {
                sp: true,
                destination_register: 1,
                word8: 4,
            }
        );
    }

    #[test]
    fn decode_branches() {
        assert_eq!(
            ThumbModeInstruction::from(0xD1FE),
            ThumbModeInstruction::CondBranch {
                condition: Condition::NE,
                immediate_offset: -4,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0xE7FE),
            ThumbModeInstruction::UncondBranch { offset: -4 }
        );
        assert_eq!(
            ThumbModeInstruction::from(0xF7FF),
            ThumbModeInstruction::LongBranchLink {
                h: false,
                offset: 0x7FF,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0xDF06),
            ThumbModeInstruction::Swi { comment: 6 }
        );
    }

    #[cfg(feature = "disassembler")]
    #[test]
    fn check_disassembler() {
        assert_eq!(ThumbModeInstruction::from(0xB503).disassembler(), "PUSH {R0, R1, LR}");
        assert_eq!(ThumbModeInstruction::from(0x4770).disassembler(), "BX R14");
        assert_eq!(ThumbModeInstruction::from(0x1C40).disassembler(), "ADD R0, R0, #1");
        assert_eq!(ThumbModeInstruction::from(0xD1FE).disassembler(), "BNE #-4");
    }
}
