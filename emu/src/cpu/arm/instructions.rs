//! # ARM Instruction Decoding
//!
//! A 32-bit word is first classified by [`classify`] against an ordered
//! `(pattern, mask)` table, then the class decides which fields are pulled
//! out of the word.
//!
//! ## Decoding Priority
//!
//! Several masks overlap, so the table is walked top to bottom and the first
//! match wins. The order is load-bearing:
//!
//! 1. BX is a single fully specified word, and lives inside the MSR/TEQ space.
//! 2. Block data transfer, B/BL, SWI and the undefined space are told apart
//!    by bits 27-24 and never collide with the 00x formats below.
//! 3. The undefined space (011 with bit 4 set) must win over single data
//!    transfer, whose mask does not look at bit 4.
//! 4. Swap, multiply and multiply long all have `1001` in bits 7-4 and must
//!    come before the halfword transfers, which would otherwise read them as
//!    the reserved SH=00 sub-type.
//! 5. MRS and MSR sit in the TST/TEQ/CMP/CMN-with-S=0 holes of data
//!    processing, so they come before it.
//! 6. Data processing is the catch-all of the 00x space.
//!
//! Words matching nothing (the coprocessor space, mostly) are undefined.
//!
//! ```text
//! ADD R0, R1, R2, LSL #3
//!
//! 31-28  27-26  25  24-21  20  19-16  15-12  11-7   6-5  4  3-0
//! [1110] [ 00 ] [0] [0100] [0] [0001] [0000] [00011][00] [0][0010]
//!   │       │    │    │     │    │      │      │     │   │   └─ Rm = R2
//!   │       │    │    │     │    │      │      │     │   └──── Shift by imm
//!   │       │    │    │     │    │      │      │     └──────── LSL
//!   │       │    │    │     │    │      │      └────────────── Shift = 3
//!   │       │    │    │     │    │      └───────────────────── Rd = R0
//!   │       │    │    │     │    └──────────────────────────── Rn = R1
//!   │       │    │    │     └───────────────────────────────── S = 0 (no flags)
//!   │       │    │    └─────────────────────────────────────── ADD opcode
//!   │       │    └──────────────────────────────────────────── Register operand
//!   │       └───────────────────────────────────────────────── Data processing
//!   └───────────────────────────────────────────────────────── Always execute
//! ```

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::alu::AluOperation;
use crate::cpu::barrel_shifter::ShiftKind;
#[cfg(feature = "disassembler")]
use crate::cpu::condition::Condition;
use crate::cpu::flags::{
    HalfwordTransferKind, Indexing, LoadStoreKind, Offsetting, OperandKind, ReadWriteKind,
};
use crate::cpu::psr::PsrFieldMask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmInstructionClass {
    BranchAndExchange,
    BlockDataTransfer,
    Branch,
    SoftwareInterrupt,
    Undefined,
    SingleDataTransfer,
    SingleDataSwap,
    Multiply,
    MultiplyLong,
    HalfwordDataTransferRegisterOffset,
    HalfwordDataTransferImmediateOffset,
    Mrs,
    Msr,
    DataProcessing,
}

/// `(class, pattern, mask)`: a word belongs to `class` when
/// `word & mask == pattern`. See the module docs for why the order matters.
const ARM_CLASSES: [(ArmInstructionClass, u32, u32); 14] = [
    (ArmInstructionClass::BranchAndExchange, 0x012F_FF10, 0x0FFF_FFF0),
    (ArmInstructionClass::BlockDataTransfer, 0x0800_0000, 0x0E00_0000),
    (ArmInstructionClass::Branch, 0x0A00_0000, 0x0E00_0000),
    (ArmInstructionClass::SoftwareInterrupt, 0x0F00_0000, 0x0F00_0000),
    (ArmInstructionClass::Undefined, 0x0600_0010, 0x0E00_0010),
    (ArmInstructionClass::SingleDataTransfer, 0x0400_0000, 0x0C00_0000),
    (ArmInstructionClass::SingleDataSwap, 0x0100_0090, 0x0FB0_0FF0),
    (ArmInstructionClass::Multiply, 0x0000_0090, 0x0F80_00F0),
    (ArmInstructionClass::MultiplyLong, 0x0080_0090, 0x0F80_00F0),
    (ArmInstructionClass::HalfwordDataTransferRegisterOffset, 0x0000_0090, 0x0E40_0F90),
    (ArmInstructionClass::HalfwordDataTransferImmediateOffset, 0x0040_0090, 0x0E40_0090),
    (ArmInstructionClass::Mrs, 0x010F_0000, 0x0FBF_0000),
    (ArmInstructionClass::Msr, 0x0120_F000, 0x0DB0_F000),
    (ArmInstructionClass::DataProcessing, 0x0000_0000, 0x0C00_0000),
];

/// First class of the table matching `op_code`.
#[must_use]
pub fn classify(op_code: u32) -> ArmInstructionClass {
    ARM_CLASSES
        .iter()
        .find(|(_, pattern, mask)| op_code & mask == *pattern)
        .map_or_else(
            || {
                tracing::debug!("no ARM instruction class matches 0x{op_code:08X}");
                ArmInstructionClass::Undefined
            },
            |(class, _, _)| *class,
        )
}

/// How the amount of a register operand shift is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftOperator {
    Immediate(u32),
    Register(u32),
}

/// Operand 2 of data processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AluSecondOperandInfo {
    Register {
        shift_op: ShiftOperator,
        shift_kind: ShiftKind,
        register: u32,
    },
    /// `base` rotated right by `shift` (already doubled).
    Immediate { base: u32, shift: u32 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SingleDataTransferOffsetInfo {
    Immediate {
        offset: u32,
    },
    RegisterImmediate {
        shift_amount: u32,
        shift_kind: ShiftKind,
        reg_offset: u32,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum HalfwordDataTransferOffsetKind {
    Immediate { offset: u32 },
    Register { register: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PsrKind {
    Cpsr,
    Spsr,
}

impl From<bool> for PsrKind {
    fn from(value: bool) -> Self {
        if value { Self::Spsr } else { Self::Cpsr }
    }
}

impl std::fmt::Display for PsrKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpsr => f.write_str("CPSR"),
            Self::Spsr => f.write_str("SPSR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrOperand {
    Register(u32),
    Immediate { base: u32, shift: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PsrOpKind {
    Mrs {
        destination_register: u32,
    },
    Msr {
        field_mask: PsrFieldMask,
        operand: MsrOperand,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmModeMultiplyVariant {
    Mul,
    Mla,
}

impl From<u32> for ArmModeMultiplyVariant {
    fn from(op_code: u32) -> Self {
        if op_code.get_bit(21) { Self::Mla } else { Self::Mul }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmModeMultiplyLongVariant {
    Umull,
    Umlal,
    Smull,
    Smlal,
}

impl ArmModeMultiplyLongVariant {
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Smull | Self::Smlal)
    }

    #[must_use]
    pub const fn accumulates(self) -> bool {
        matches!(self, Self::Umlal | Self::Smlal)
    }
}

impl From<u32> for ArmModeMultiplyLongVariant {
    fn from(op_code: u32) -> Self {
        match (op_code.get_bit(22), op_code.get_bit(21)) {
            (false, false) => Self::Umull,
            (false, true) => Self::Umlal,
            (true, false) => Self::Smull,
            (true, true) => Self::Smlal,
        }
    }
}

impl std::fmt::Display for ArmModeMultiplyLongVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Umull => f.write_str("UMULL"),
            Self::Umlal => f.write_str("UMLAL"),
            Self::Smull => f.write_str("SMULL"),
            Self::Smlal => f.write_str("SMLAL"),
        }
    }
}

/// All ARM instruction types after decoding. The condition field is kept
/// apart, in [`ArmModeOpcode`](super::mode::ArmModeOpcode).
///
/// | Variant                | Example Instructions      |
/// |------------------------|---------------------------|
/// | `DataProcessing`       | AND, ADD, CMP, MOV        |
/// | `Multiply`             | MUL, MLA                  |
/// | `MultiplyLong`         | UMULL, SMLAL              |
/// | `PsrTransfer`          | MRS, MSR                  |
/// | `SingleDataSwap`       | SWP, SWPB                 |
/// | `BranchAndExchange`    | BX                        |
/// | `HalfwordDataTransfer` | LDRH, STRH, LDRSB, LDRSH  |
/// | `SingleDataTransfer`   | LDR, STR, LDRB            |
/// | `BlockDataTransfer`    | LDM, STM                  |
/// | `Branch`               | B, BL                     |
/// | `SoftwareInterrupt`    | SWI                       |
/// | `Undefined`            | -                         |
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum ArmModeInstruction {
    DataProcessing {
        alu_instruction: AluOperation,
        set_conditions: bool,
        rn: u32,
        destination: u32,
        op2: AluSecondOperandInfo,
    },
    Multiply {
        variant: ArmModeMultiplyVariant,
        should_set_codes: bool,
        rd_destination_register: u32,
        rn_accumulate_register: u32,
        rs_operand_register: u32,
        rm_operand_register: u32,
    },
    MultiplyLong {
        variant: ArmModeMultiplyLongVariant,
        should_set_codes: bool,
        rdhi_destination_register: u32,
        rdlo_destination_register: u32,
        rs_operand_register: u32,
        rm_operand_register: u32,
    },
    PsrTransfer {
        psr_kind: PsrKind,
        kind: PsrOpKind,
    },
    SingleDataSwap {
        byte: bool,
        rn: u32,
        rd: u32,
        rm: u32,
    },
    BranchAndExchange {
        register: u32,
    },
    HalfwordDataTransfer {
        indexing: Indexing,
        offsetting: Offsetting,
        write_back: bool,
        load_store_kind: LoadStoreKind,
        offset_kind: HalfwordDataTransferOffsetKind,
        base_register: u32,
        source_destination_register: u32,
        transfer_kind: HalfwordTransferKind,
    },
    SingleDataTransfer {
        load_store: LoadStoreKind,
        quantity: ReadWriteKind,
        write_back: bool,
        indexing: Indexing,
        rd: u32,
        base_register: u32,
        offset_info: SingleDataTransferOffsetInfo,
        offsetting: Offsetting,
    },
    BlockDataTransfer {
        indexing: Indexing,
        offsetting: Offsetting,
        load_psr: bool,
        write_back: bool,
        load_store: LoadStoreKind,
        rn: u32,
        register_list: u16,
    },
    Branch {
        link: bool,
        /// Byte offset from R15, already sign extended.
        offset: i32,
    },
    SoftwareInterrupt {
        comment: u32,
    },
    Undefined,
}

impl From<u32> for ArmModeInstruction {
    #[allow(clippy::too_many_lines)]
    fn from(op_code: u32) -> Self {
        match classify(op_code) {
            ArmInstructionClass::BranchAndExchange => Self::BranchAndExchange {
                register: op_code.get_bits(0..=3),
            },
            ArmInstructionClass::BlockDataTransfer => Self::BlockDataTransfer {
                indexing: op_code.get_bit(24).into(),
                offsetting: op_code.get_bit(23).into(),
                load_psr: op_code.get_bit(22),
                write_back: op_code.get_bit(21),
                load_store: op_code.get_bit(20).into(),
                rn: op_code.get_bits(16..=19),
                register_list: op_code.get_bits(0..=15) as u16,
            },
            ArmInstructionClass::Branch => Self::Branch {
                link: op_code.get_bit(24),
                offset: (op_code.get_bits(0..=23) << 2).sign_extended(26) as i32,
            },
            ArmInstructionClass::SoftwareInterrupt => Self::SoftwareInterrupt {
                comment: op_code.get_bits(0..=23),
            },
            ArmInstructionClass::Undefined => {
                tracing::debug!("undefined instruction decode: opcode=0x{op_code:08X}");
                Self::Undefined
            }
            ArmInstructionClass::SingleDataTransfer => {
                // The I bit is inverted here compared to data processing.
                let op_kind: OperandKind = (!op_code.get_bit(25)).into();

                let offset_info = match op_kind {
                    OperandKind::Immediate => SingleDataTransferOffsetInfo::Immediate {
                        offset: op_code.get_bits(0..=11),
                    },
                    OperandKind::Register => SingleDataTransferOffsetInfo::RegisterImmediate {
                        shift_amount: op_code.get_bits(7..=11),
                        shift_kind: op_code.get_bits(5..=6).into(),
                        reg_offset: op_code.get_bits(0..=3),
                    },
                };

                Self::SingleDataTransfer {
                    load_store: op_code.get_bit(20).into(),
                    quantity: op_code.get_bit(22).into(),
                    write_back: op_code.get_bit(21),
                    indexing: op_code.get_bit(24).into(),
                    rd: op_code.get_bits(12..=15),
                    base_register: op_code.get_bits(16..=19),
                    offset_info,
                    offsetting: op_code.get_bit(23).into(),
                }
            }
            ArmInstructionClass::SingleDataSwap => Self::SingleDataSwap {
                byte: op_code.get_bit(22),
                rn: op_code.get_bits(16..=19),
                rd: op_code.get_bits(12..=15),
                rm: op_code.get_bits(0..=3),
            },
            ArmInstructionClass::Multiply => Self::Multiply {
                variant: op_code.into(),
                should_set_codes: op_code.get_bit(20),
                rd_destination_register: op_code.get_bits(16..=19),
                rn_accumulate_register: op_code.get_bits(12..=15),
                rs_operand_register: op_code.get_bits(8..=11),
                rm_operand_register: op_code.get_bits(0..=3),
            },
            ArmInstructionClass::MultiplyLong => Self::MultiplyLong {
                variant: op_code.into(),
                should_set_codes: op_code.get_bit(20),
                rdhi_destination_register: op_code.get_bits(16..=19),
                rdlo_destination_register: op_code.get_bits(12..=15),
                rs_operand_register: op_code.get_bits(8..=11),
                rm_operand_register: op_code.get_bits(0..=3),
            },
            class @ (ArmInstructionClass::HalfwordDataTransferRegisterOffset
            | ArmInstructionClass::HalfwordDataTransferImmediateOffset) => {
                let transfer_kind = HalfwordTransferKind::from(op_code.get_bits(5..=6));
                if transfer_kind == HalfwordTransferKind::Reserved {
                    tracing::debug!("reserved halfword transfer sub-type: opcode=0x{op_code:08X}");
                    return Self::Undefined;
                }

                let offset_kind = if class == ArmInstructionClass::HalfwordDataTransferRegisterOffset
                {
                    HalfwordDataTransferOffsetKind::Register {
                        register: op_code.get_bits(0..=3),
                    }
                } else {
                    HalfwordDataTransferOffsetKind::Immediate {
                        offset: (op_code.get_bits(8..=11) << 4) | op_code.get_bits(0..=3),
                    }
                };

                Self::HalfwordDataTransfer {
                    indexing: op_code.get_bit(24).into(),
                    offsetting: op_code.get_bit(23).into(),
                    write_back: op_code.get_bit(21),
                    load_store_kind: op_code.get_bit(20).into(),
                    offset_kind,
                    base_register: op_code.get_bits(16..=19),
                    source_destination_register: op_code.get_bits(12..=15),
                    transfer_kind,
                }
            }
            ArmInstructionClass::Mrs => Self::PsrTransfer {
                psr_kind: op_code.get_bit(22).into(),
                kind: PsrOpKind::Mrs {
                    destination_register: op_code.get_bits(12..=15),
                },
            },
            ArmInstructionClass::Msr => {
                let operand = if op_code.get_bit(25) {
                    MsrOperand::Immediate {
                        base: op_code.get_bits(0..=7),
                        shift: op_code.get_bits(8..=11) * 2,
                    }
                } else {
                    MsrOperand::Register(op_code.get_bits(0..=3))
                };

                Self::PsrTransfer {
                    psr_kind: op_code.get_bit(22).into(),
                    kind: PsrOpKind::Msr {
                        field_mask: PsrFieldMask::from_op_code(op_code),
                        operand,
                    },
                }
            }
            ArmInstructionClass::DataProcessing => decode_data_processing(op_code),
        }
    }
}

fn decode_data_processing(op_code: u32) -> ArmModeInstruction {
    let alu_instruction = AluOperation::from_arm_opcode(op_code.get_bits(21..=24));
    let set_conditions = op_code.get_bit(20);

    // TST/TEQ/CMP/CMN without S are the PSR transfer space. What is left
    // there after MRS/MSR had their chance is not a data processing op.
    if alu_instruction.is_comparison() && !set_conditions {
        tracing::debug!("comparison without S bit treated as undefined: opcode=0x{op_code:08X}");
        return ArmModeInstruction::Undefined;
    }

    let op_kind: OperandKind = op_code.get_bit(25).into();
    let op2 = match op_kind {
        OperandKind::Immediate => AluSecondOperandInfo::Immediate {
            base: op_code.get_bits(0..=7),
            shift: op_code.get_bits(8..=11) * 2,
        },
        OperandKind::Register => {
            let shift_op = if op_code.get_bit(4) {
                if op_code.get_bit(7) {
                    // Bit 7 set with bit 4 belongs to multiply/swap/halfword
                    // transfers. A leftover here has no meaning.
                    tracing::debug!("register shift with bit 7 set: opcode=0x{op_code:08X}");
                    return ArmModeInstruction::Undefined;
                }
                ShiftOperator::Register(op_code.get_bits(8..=11))
            } else {
                ShiftOperator::Immediate(op_code.get_bits(7..=11))
            };

            AluSecondOperandInfo::Register {
                shift_op,
                shift_kind: op_code.get_bits(5..=6).into(),
                register: op_code.get_bits(0..=3),
            }
        }
    };

    ArmModeInstruction::DataProcessing {
        alu_instruction,
        set_conditions,
        rn: op_code.get_bits(16..=19),
        destination: op_code.get_bits(12..=15),
        op2,
    }
}

#[cfg(feature = "disassembler")]
impl ArmModeInstruction {
    /// Assembly-like rendering used by trace logs.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn disassembler(&self, condition: Condition) -> String {
        match self {
            Self::DataProcessing {
                alu_instruction,
                set_conditions,
                rn,
                destination,
                op2,
            } => {
                let op2 = match op2 {
                    AluSecondOperandInfo::Immediate { base, shift } => {
                        format!("#0x{:X}", base.rotate_right(*shift))
                    }
                    AluSecondOperandInfo::Register {
                        shift_op: ShiftOperator::Immediate(0),
                        shift_kind: ShiftKind::Lsl,
                        register,
                    } => format!("R{register}"),
                    AluSecondOperandInfo::Register {
                        shift_op: ShiftOperator::Immediate(amount),
                        shift_kind,
                        register,
                    } => format!("R{register}, {shift_kind} #{amount}"),
                    AluSecondOperandInfo::Register {
                        shift_op: ShiftOperator::Register(rs),
                        shift_kind,
                        register,
                    } => format!("R{register}, {shift_kind} R{rs}"),
                };

                let s = if *set_conditions && !alu_instruction.is_comparison() {
                    "S"
                } else {
                    ""
                };
                match alu_instruction {
                    AluOperation::Tst
                    | AluOperation::Teq
                    | AluOperation::Cmp
                    | AluOperation::Cmn => format!("{alu_instruction}{condition} R{rn}, {op2}"),
                    AluOperation::Mov | AluOperation::Mvn => {
                        format!("{alu_instruction}{condition}{s} R{destination}, {op2}")
                    }
                    _ => format!("{alu_instruction}{condition}{s} R{destination}, R{rn}, {op2}"),
                }
            }
            Self::Multiply {
                variant,
                should_set_codes,
                rd_destination_register: rd,
                rn_accumulate_register: rn,
                rs_operand_register: rs,
                rm_operand_register: rm,
            } => {
                let s = if *should_set_codes { "S" } else { "" };
                match variant {
                    ArmModeMultiplyVariant::Mul => format!("MUL{condition}{s} R{rd}, R{rm}, R{rs}"),
                    ArmModeMultiplyVariant::Mla => {
                        format!("MLA{condition}{s} R{rd}, R{rm}, R{rs}, R{rn}")
                    }
                }
            }
            Self::MultiplyLong {
                variant,
                should_set_codes,
                rdhi_destination_register: rdhi,
                rdlo_destination_register: rdlo,
                rs_operand_register: rs,
                rm_operand_register: rm,
            } => {
                let s = if *should_set_codes { "S" } else { "" };
                format!("{variant}{condition}{s} R{rdlo}, R{rdhi}, R{rm}, R{rs}")
            }
            Self::PsrTransfer { psr_kind, kind } => match kind {
                PsrOpKind::Mrs {
                    destination_register,
                } => format!("MRS{condition} R{destination_register}, {psr_kind}"),
                PsrOpKind::Msr {
                    field_mask,
                    operand,
                } => {
                    let mut fields = String::new();
                    for (on, name) in [
                        (field_mask.flags, 'f'),
                        (field_mask.status, 's'),
                        (field_mask.extension, 'x'),
                        (field_mask.control, 'c'),
                    ] {
                        if on {
                            fields.push(name);
                        }
                    }
                    let operand = match operand {
                        MsrOperand::Register(register) => format!("R{register}"),
                        MsrOperand::Immediate { base, shift } => {
                            format!("#0x{:X}", base.rotate_right(*shift))
                        }
                    };
                    format!("MSR{condition} {psr_kind}_{fields}, {operand}")
                }
            },
            Self::SingleDataSwap { byte, rn, rd, rm } => {
                let b = if *byte { "B" } else { "" };
                format!("SWP{condition}{b} R{rd}, R{rm}, [R{rn}]")
            }
            Self::BranchAndExchange { register } => format!("BX{condition} R{register}"),
            Self::HalfwordDataTransfer {
                indexing,
                offsetting,
                write_back,
                load_store_kind,
                offset_kind,
                base_register,
                source_destination_register,
                transfer_kind,
            } => {
                let sign = sign(*offsetting);
                let offset = match offset_kind {
                    HalfwordDataTransferOffsetKind::Immediate { offset: 0 } => String::new(),
                    HalfwordDataTransferOffsetKind::Immediate { offset } => {
                        format!(", #{sign}{offset}")
                    }
                    HalfwordDataTransferOffsetKind::Register { register } => {
                        format!(", {sign}R{register}")
                    }
                };
                let address = address(*indexing, *write_back, *base_register, &offset);
                format!(
                    "{load_store_kind}{condition}{transfer_kind} R{source_destination_register}, {address}"
                )
            }
            Self::SingleDataTransfer {
                load_store,
                quantity,
                write_back,
                indexing,
                rd,
                base_register,
                offset_info,
                offsetting,
            } => {
                let b = match quantity {
                    ReadWriteKind::Word => "",
                    ReadWriteKind::Byte => "B",
                };
                let sign = sign(*offsetting);
                let offset = match offset_info {
                    SingleDataTransferOffsetInfo::Immediate { offset: 0 } => String::new(),
                    SingleDataTransferOffsetInfo::Immediate { offset } => {
                        format!(", #{sign}{offset}")
                    }
                    SingleDataTransferOffsetInfo::RegisterImmediate {
                        shift_amount: 0,
                        shift_kind: ShiftKind::Lsl,
                        reg_offset,
                    } => format!(", {sign}R{reg_offset}"),
                    SingleDataTransferOffsetInfo::RegisterImmediate {
                        shift_amount,
                        shift_kind,
                        reg_offset,
                    } => format!(", {sign}R{reg_offset}, {shift_kind} #{shift_amount}"),
                };
                let address = address(*indexing, *write_back, *base_register, &offset);
                format!("{load_store}{condition}{b} R{rd}, {address}")
            }
            Self::BlockDataTransfer {
                indexing,
                offsetting,
                load_psr,
                write_back,
                load_store,
                rn,
                register_list,
            } => {
                let op = match load_store {
                    LoadStoreKind::Store => "STM",
                    LoadStoreKind::Load => "LDM",
                };
                let offset_modifier = match offsetting {
                    Offsetting::Down => "D",
                    Offsetting::Up => "I",
                };
                let index_type = match indexing {
                    Indexing::Pre => "B",
                    Indexing::Post => "A",
                };
                let registers = (0..=15)
                    .filter(|i| register_list.get_bit(*i))
                    .map(|i| format!("R{i}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let w = if *write_back { "!" } else { "" };
                let f = if *load_psr { "^" } else { "" };
                format!("{op}{condition}{offset_modifier}{index_type} R{rn}{w}, {{{registers}}}{f}")
            }
            Self::Branch { link, offset } => {
                let link = if *link { "L" } else { "" };
                format!("B{link}{condition} {offset:+}")
            }
            Self::SoftwareInterrupt { comment } => format!("SWI{condition} 0x{comment:06X}"),
            Self::Undefined => "UNDEFINED".to_owned(),
        }
    }
}

#[cfg(feature = "disassembler")]
const fn sign(offsetting: Offsetting) -> &'static str {
    match offsetting {
        Offsetting::Up => "",
        Offsetting::Down => "-",
    }
}

#[cfg(feature = "disassembler")]
fn address(indexing: Indexing, write_back: bool, base_register: u32, offset: &str) -> String {
    match indexing {
        Indexing::Pre => {
            let w = if write_back { "!" } else { "" };
            format!("[R{base_register}{offset}]{w}")
        }
        Indexing::Post => format!("[R{base_register}]{offset}"),
    }
}
