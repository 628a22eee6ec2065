use crate::bitwise::Bits;
use crate::cpu::alu::{AluOperation, FlagUpdate};
use crate::cpu::arm::instructions::{
    AluSecondOperandInfo, ArmModeMultiplyLongVariant, ArmModeMultiplyVariant,
    HalfwordDataTransferOffsetKind, MsrOperand, PsrKind, PsrOpKind, ShiftOperator,
    SingleDataTransferOffsetInfo,
};
use crate::cpu::arm7tdmi::Arm7tdmi;
use crate::cpu::barrel_shifter::{ShiftSource, shift};
use crate::cpu::cpu_modes::Mode;
use crate::cpu::error::CpuError;
use crate::cpu::flags::{HalfwordTransferKind, Indexing, LoadStoreKind, Offsetting, ReadWriteKind};
use crate::cpu::psr::{CpuState, PsrFieldMask};
use crate::cpu::registers::{REG_LR, REG_PROGRAM_COUNTER};

const PC: u32 = REG_PROGRAM_COUNTER as u32;
const LR: u32 = REG_LR as u32;

impl Arm7tdmi {
    pub fn data_processing(
        &mut self,
        alu_instruction: AluOperation,
        set_conditions: bool,
        rn: u32,
        destination: u32,
        op2: AluSecondOperandInfo,
    ) -> Result<(), CpuError> {
        let (op2, shifter_carry, pc_offset) = self.get_operand(op2);
        let op1 = self.register_with_pc_offset(rn, pc_offset);

        // S=1 with Rd=R15 is an exception return: CPSR comes back from SPSR
        // instead of getting the result flags.
        let restore_spsr =
            set_conditions && destination == PC && !alu_instruction.is_comparison();

        let carry_in = alu_instruction.carry_in(shifter_carry, self.cpsr.carry_flag());
        let output = alu_instruction.apply(op1, op2, carry_in, set_conditions && !restore_spsr);

        if let Some(flags) = output.flags {
            self.cpsr.set_flags(flags);
        }

        if restore_spsr {
            self.restore_spsr()?;
        }

        if let Some(result) = output.result {
            self.set_register(destination, result);
        }

        Ok(())
    }

    /// Operand 2 with the shifter carry-out and the offset R15 gets on top
    /// of the usual +8 when the shift amount comes from a register.
    pub(crate) fn get_operand(&self, op2: AluSecondOperandInfo) -> (u32, bool, u32) {
        let carry = self.cpsr.carry_flag();

        match op2 {
            AluSecondOperandInfo::Immediate { base, shift } => {
                let value = base.rotate_right(shift);
                let carry_out = if shift == 0 { carry } else { value.get_bit(31) };
                (value, carry_out, 0)
            }
            AluSecondOperandInfo::Register {
                shift_op,
                shift_kind,
                register,
            } => {
                let (amount, source, pc_offset) = match shift_op {
                    ShiftOperator::Immediate(amount) => (amount, ShiftSource::Immediate, 0),
                    ShiftOperator::Register(rs) => (self.register(rs), ShiftSource::Register, 4),
                };
                let value = self.register_with_pc_offset(register, pc_offset);
                let (value, carry_out) = shift(value, shift_kind, amount, source, carry);

                (value, carry_out, pc_offset)
            }
        }
    }

    fn register_with_pc_offset(&self, reg: u32, pc_offset: u32) -> u32 {
        let value = self.register(reg);
        if reg == PC {
            value.wrapping_add(pc_offset)
        } else {
            value
        }
    }

    pub fn psr_transfer(&mut self, op_kind: PsrOpKind, psr_kind: PsrKind) -> Result<(), CpuError> {
        match op_kind {
            PsrOpKind::Mrs {
                destination_register,
            } => {
                let psr = match psr_kind {
                    PsrKind::Cpsr => self.cpsr,
                    PsrKind::Spsr => self.spsr()?,
                };

                self.set_register(destination_register, psr.into());
            }
            PsrOpKind::Msr {
                field_mask,
                operand,
            } => {
                let value = match operand {
                    MsrOperand::Register(register) => self.register(register),
                    MsrOperand::Immediate { base, shift } => base.rotate_right(shift),
                };

                match psr_kind {
                    PsrKind::Cpsr => {
                        // In User mode only the condition flags are writable.
                        let field_mask = if self.cpsr.mode()? == Mode::User {
                            PsrFieldMask {
                                flags: field_mask.flags,
                                status: false,
                                extension: false,
                                control: false,
                            }
                        } else {
                            field_mask
                        };

                        let psr = self.cpsr.with_fields(value, field_mask);
                        if psr.state_bit() != self.cpsr.state_bit() {
                            tracing::warn!("MSR changed the T bit: 0x{:08X}", u32::from(psr));
                        }

                        self.set_cpsr(psr)?;
                    }
                    PsrKind::Spsr => {
                        let psr = self.spsr()?.with_fields(value, field_mask);
                        self.set_spsr(psr)?;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn multiply(
        &mut self,
        variant: ArmModeMultiplyVariant,
        should_set_codes: bool,
        rd_destination_register: u32,
        rn_accumulate_register: u32,
        rs_operand_register: u32,
        rm_operand_register: u32,
    ) {
        let product = self
            .register(rm_operand_register)
            .wrapping_mul(self.register(rs_operand_register));

        let result = match variant {
            ArmModeMultiplyVariant::Mul => product,
            ArmModeMultiplyVariant::Mla => product.wrapping_add(self.register(rn_accumulate_register)),
        };

        if should_set_codes {
            self.cpsr.set_flags(FlagUpdate {
                sign: result.get_bit(31),
                zero: result == 0,
                carry: None,
                overflow: None,
            });
        }

        self.set_register(rd_destination_register, result);
    }

    pub fn multiply_long(
        &mut self,
        variant: ArmModeMultiplyLongVariant,
        should_set_codes: bool,
        rdhi_destination_register: u32,
        rdlo_destination_register: u32,
        rs_operand_register: u32,
        rm_operand_register: u32,
    ) {
        let rm = self.register(rm_operand_register);
        let rs = self.register(rs_operand_register);

        let product = if variant.is_signed() {
            (i64::from(rm as i32) * i64::from(rs as i32)) as u64
        } else {
            u64::from(rm) * u64::from(rs)
        };

        let result = if variant.accumulates() {
            let accumulator = (u64::from(self.register(rdhi_destination_register)) << 32)
                | u64::from(self.register(rdlo_destination_register));
            product.wrapping_add(accumulator)
        } else {
            product
        };

        if should_set_codes {
            self.cpsr.set_flags(FlagUpdate {
                sign: result.get_bit(63),
                zero: result == 0,
                carry: None,
                overflow: None,
            });
        }

        self.set_register(rdlo_destination_register, result as u32);
        self.set_register(rdhi_destination_register, (result >> 32) as u32);
    }

    pub fn single_data_swap(&mut self, byte: bool, rn: u32, rd: u32, rm: u32) {
        let address = self.register(rn);
        let source = self.register(rm);

        let old = if byte {
            let old = self.bus.read_byte(address);
            self.bus.write_byte(address, source as u8);
            u32::from(old)
        } else {
            let old = self.load_word(address);
            self.bus.write_word(address, source);
            old
        };

        self.set_register(rd, old);
    }

    pub fn branch_and_exchange(&mut self, register: u32) {
        let address = self.register(register);
        let state: CpuState = address.get_bit(0).into();

        self.cpsr.set_cpu_state(state);
        self.set_register(PC, address);
    }

    /// LDRH, LDRSB, LDRSH and STRH. The doubleword stores sharing the
    /// encoding are rejected before getting here.
    #[allow(clippy::too_many_arguments)]
    pub fn half_word_data_transfer(
        &mut self,
        indexing: Indexing,
        offsetting: Offsetting,
        write_back: bool,
        load_store_kind: LoadStoreKind,
        offset_kind: HalfwordDataTransferOffsetKind,
        base_register: u32,
        source_destination_register: u32,
        transfer_kind: HalfwordTransferKind,
    ) -> Result<(), CpuError> {
        let offset = match offset_kind {
            HalfwordDataTransferOffsetKind::Immediate { offset } => offset,
            HalfwordDataTransferOffsetKind::Register { register } => self.register(register),
        };

        let base = self.register(base_register);
        let effective = offsetting.apply(base, offset);
        let address = match indexing {
            Indexing::Pre => effective,
            Indexing::Post => base,
        };
        // Post-indexing always writes back.
        let write_back = (write_back || indexing == Indexing::Post) && base_register != PC;

        match load_store_kind {
            LoadStoreKind::Load => {
                let value = match transfer_kind {
                    HalfwordTransferKind::UnsignedHalfword | HalfwordTransferKind::Reserved => {
                        self.load_half_word(address)
                    }
                    HalfwordTransferKind::SignedByte => self.load_signed_byte(address),
                    HalfwordTransferKind::SignedHalfword => self.load_signed_half_word(address),
                };

                if write_back && base_register != source_destination_register {
                    self.set_register(base_register, effective);
                }
                self.set_register(source_destination_register, value);
            }
            LoadStoreKind::Store => {
                let value = self.stored_register(source_destination_register);
                self.bus.write_half_word(address, value as u16);

                if write_back {
                    self.set_register(base_register, effective);
                }
            }
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn single_data_transfer(
        &mut self,
        load_store: LoadStoreKind,
        quantity: ReadWriteKind,
        write_back: bool,
        indexing: Indexing,
        rd: u32,
        base_register: u32,
        offset_info: SingleDataTransferOffsetInfo,
        offsetting: Offsetting,
    ) {
        let offset = match offset_info {
            SingleDataTransferOffsetInfo::Immediate { offset } => offset,
            SingleDataTransferOffsetInfo::RegisterImmediate {
                shift_amount,
                shift_kind,
                reg_offset,
            } => {
                shift(
                    self.register(reg_offset),
                    shift_kind,
                    shift_amount,
                    ShiftSource::Immediate,
                    self.cpsr.carry_flag(),
                )
                .0
            }
        };

        let base = self.register(base_register);
        let effective = offsetting.apply(base, offset);
        let address = match indexing {
            Indexing::Pre => effective,
            Indexing::Post => base,
        };
        let write_back = (write_back || indexing == Indexing::Post) && base_register != PC;

        match load_store {
            LoadStoreKind::Load => {
                let value = match quantity {
                    ReadWriteKind::Word => self.load_word(address),
                    ReadWriteKind::Byte => u32::from(self.bus.read_byte(address)),
                };

                // Loading into the base register wins over the write back.
                if write_back && base_register != rd {
                    self.set_register(base_register, effective);
                }
                self.set_register(rd, value);
            }
            LoadStoreKind::Store => {
                let value = self.stored_register(rd);
                match quantity {
                    ReadWriteKind::Word => self.bus.write_word(address, value),
                    ReadWriteKind::Byte => self.bus.write_byte(address, value as u8),
                }

                if write_back {
                    self.set_register(base_register, effective);
                }
            }
        }
    }

    /// LDM/STM, also backing Thumb PUSH/POP and LDMIA/STMIA.
    ///
    /// Registers always go lowest-numbered to lowest address whatever the
    /// direction. With the S bit an LDM that loads R15 also restores CPSR,
    /// every other S-bit transfer uses the User bank.
    #[allow(clippy::too_many_arguments)]
    pub fn block_data_transfer(
        &mut self,
        indexing: Indexing,
        offsetting: Offsetting,
        load_psr: bool,
        write_back: bool,
        load_store: LoadStoreKind,
        rn: u32,
        register_list: u16,
    ) -> Result<(), CpuError> {
        let base = self.register(rn);

        // An empty list transfers R15 and moves the base as if all 16
        // registers had been transferred.
        let (registers, size): (Vec<u32>, u32) = if register_list == 0 {
            (vec![PC], 0x40)
        } else {
            let registers: Vec<u32> = (0..16u8)
                .filter(|&reg| register_list.is_bit_on(reg))
                .map(u32::from)
                .collect();
            let size = 4 * registers.len() as u32;
            (registers, size)
        };

        let lowest = match (offsetting, indexing) {
            (Offsetting::Up, Indexing::Post) => base,
            (Offsetting::Up, Indexing::Pre) => base.wrapping_add(4),
            (Offsetting::Down, Indexing::Post) => base.wrapping_sub(size).wrapping_add(4),
            (Offsetting::Down, Indexing::Pre) => base.wrapping_sub(size),
        };
        let new_base = offsetting.apply(base, size);
        let user_bank =
            load_psr && !(load_store == LoadStoreKind::Load && registers.contains(&PC));

        match load_store {
            LoadStoreKind::Store => {
                for (i, &reg) in registers.iter().enumerate() {
                    let address = lowest.wrapping_add(4 * i as u32);
                    // The base is already updated when it is not the first
                    // register stored.
                    let value = if write_back && reg == rn && i > 0 {
                        new_base
                    } else if user_bank && reg != PC {
                        self.registers.register_in_mode(reg as usize, Mode::User)
                    } else {
                        self.stored_register(reg)
                    };

                    self.bus.write_word(address, value);
                }

                if write_back {
                    self.set_register(rn, new_base);
                }
            }
            LoadStoreKind::Load => {
                // A loaded base is never overwritten by the write back.
                if write_back && !registers.contains(&rn) {
                    self.set_register(rn, new_base);
                }

                let mut program_counter = None;
                for (i, &reg) in registers.iter().enumerate() {
                    let value = self.bus.read_word(lowest.wrapping_add(4 * i as u32));

                    if reg == PC {
                        program_counter = Some(value);
                    } else if user_bank {
                        self.registers
                            .set_register_in_mode(reg as usize, Mode::User, value);
                    } else {
                        self.set_register(reg, value);
                    }
                }

                if let Some(value) = program_counter {
                    if load_psr {
                        self.restore_spsr()?;
                    }
                    self.set_register(PC, value);
                }
            }
        }

        Ok(())
    }

    pub fn branch(&mut self, link: bool, offset: i32) {
        let pc = self.register(PC);
        if link {
            self.set_register(LR, pc.wrapping_sub(4));
        }

        self.set_register(PC, pc.wrapping_add_signed(offset));
    }
}
