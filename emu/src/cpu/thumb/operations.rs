use crate::bitwise::Bits;
use crate::cpu::alu::{AluOperation, AluOutput};
use crate::cpu::arm7tdmi::Arm7tdmi;
use crate::cpu::barrel_shifter::{ShiftKind, ShiftSource, shift};
use crate::cpu::condition::Condition;
use crate::cpu::error::CpuError;
use crate::cpu::flags::{Indexing, LoadStoreKind, OperandKind, Offsetting, ReadWriteKind};
use crate::cpu::registers::{REG_LR, REG_PROGRAM_COUNTER, REG_SP};
use crate::cpu::thumb::alu_instructions::ThumbHighRegisterOperation;

const PC: u32 = REG_PROGRAM_COUNTER as u32;
const LR: u32 = REG_LR as u32;
const SP: u32 = REG_SP as u32;

impl Arm7tdmi {
    fn write_alu_output(&mut self, output: AluOutput, rd: u32) {
        if let Some(flags) = output.flags {
            self.cpsr.set_flags(flags);
        }
        if let Some(result) = output.result {
            self.set_register(rd, result);
        }
    }

    /// Loads or stores a word or byte, for the Thumb formats that do not
    /// deal with halfwords.
    fn transfer(
        &mut self,
        load_store: LoadStoreKind,
        byte_word: ReadWriteKind,
        address: u32,
        rd: u32,
    ) {
        match (load_store, byte_word) {
            (LoadStoreKind::Load, ReadWriteKind::Word) => {
                let value = self.load_word(address);
                self.set_register(rd, value);
            }
            (LoadStoreKind::Load, ReadWriteKind::Byte) => {
                let value = self.bus.read_byte(address);
                self.set_register(rd, u32::from(value));
            }
            (LoadStoreKind::Store, ReadWriteKind::Word) => {
                let value = self.register(rd);
                self.bus.write_word(address, value);
            }
            (LoadStoreKind::Store, ReadWriteKind::Byte) => {
                let value = self.register(rd);
                self.bus.write_byte(address, value as u8);
            }
        }
    }

    pub fn move_shifted_reg(
        &mut self,
        shift_operation: ShiftKind,
        offset5: u16,
        source_register: u16,
        destination_register: u16,
    ) {
        let (value, carry) = shift(
            self.register(source_register.into()),
            shift_operation,
            offset5.into(),
            ShiftSource::Immediate,
            self.cpsr.carry_flag(),
        );

        let output = AluOperation::Mov.apply(0, value, carry, true);
        self.write_alu_output(output, destination_register.into());
    }

    pub fn add_subtract(
        &mut self,
        operation_kind: OperandKind,
        op: AluOperation,
        rn_offset3: u16,
        source_register: u16,
        destination_register: u16,
    ) {
        let operand = match operation_kind {
            OperandKind::Immediate => rn_offset3.into(),
            OperandKind::Register => self.register(rn_offset3.into()),
        };

        let output = op.apply(
            self.register(source_register.into()),
            operand,
            self.cpsr.carry_flag(),
            true,
        );
        self.write_alu_output(output, destination_register.into());
    }

    pub fn move_compare_add_sub_imm(
        &mut self,
        operation: AluOperation,
        destination_register: u16,
        offset: u16,
    ) {
        let rd = destination_register.into();
        let output = operation.apply(
            self.register(rd),
            offset.into(),
            self.cpsr.carry_flag(),
            true,
        );
        self.write_alu_output(output, rd);
    }

    pub fn alu_op(
        &mut self,
        alu_operation: AluOperation,
        source_register: u16,
        destination_register: u16,
    ) {
        let rd = destination_register.into();
        let rd_value = self.register(rd);
        let rs_value = self.register(source_register.into());
        let carry = self.cpsr.carry_flag();

        // The shifts take the amount from the bottom byte of Rs.
        let shift_kind = match alu_operation {
            AluOperation::Lsl => Some(ShiftKind::Lsl),
            AluOperation::Lsr => Some(ShiftKind::Lsr),
            AluOperation::Asr => Some(ShiftKind::Asr),
            AluOperation::Ror => Some(ShiftKind::Ror),
            _ => None,
        };

        let (op2, carry_in) = match shift_kind {
            Some(kind) => shift(rd_value, kind, rs_value, ShiftSource::Register, carry),
            None => (rs_value, carry),
        };

        let output = alu_operation.apply(rd_value, op2, carry_in, true);
        self.write_alu_output(output, rd);
    }

    pub fn hi_reg_operation_branch_ex(
        &mut self,
        op: ThumbHighRegisterOperation,
        source_register: u16,
        destination_register: u16,
    ) {
        let rs = source_register.into();
        let rd = destination_register.into();

        match op {
            ThumbHighRegisterOperation::Add => {
                let output = AluOperation::Add.apply(self.register(rd), self.register(rs), false, false);
                self.write_alu_output(output, rd);
            }
            ThumbHighRegisterOperation::Cmp => {
                let output = AluOperation::Cmp.apply(self.register(rd), self.register(rs), false, true);
                self.write_alu_output(output, rd);
            }
            ThumbHighRegisterOperation::Mov => {
                let value = self.register(rs);
                self.set_register(rd, value);
            }
            ThumbHighRegisterOperation::BxOrBlx => self.branch_and_exchange(rs),
        }
    }

    pub fn pc_relative_load(&mut self, destination_register: u16, immediate_value: u16) {
        // Bit 1 of PC is ignored, the base is always word aligned.
        let base = self.register(PC) & !0b10;
        let value = self.load_word(base.wrapping_add(immediate_value.into()));

        self.set_register(destination_register.into(), value);
    }

    pub fn load_store_register_offset(
        &mut self,
        load_store: LoadStoreKind,
        byte_word: ReadWriteKind,
        offset_register: u16,
        base_register: u16,
        source_destination_register: u16,
    ) {
        let address = self
            .register(base_register.into())
            .wrapping_add(self.register(offset_register.into()));

        self.transfer(load_store, byte_word, address, source_destination_register.into());
    }

    pub fn load_store_sign_extend_byte_halfword(
        &mut self,
        h_flag: bool,
        sign_extend_flag: bool,
        offset_register: u16,
        base_register: u16,
        source_destination_register: u16,
    ) {
        let rd = source_destination_register.into();
        let address = self
            .register(base_register.into())
            .wrapping_add(self.register(offset_register.into()));

        let value = match (sign_extend_flag, h_flag) {
            (false, false) => {
                let value = self.register(rd);
                self.bus.write_half_word(address, value as u16);
                return;
            }
            (false, true) => self.load_half_word(address),
            (true, false) => self.load_signed_byte(address),
            (true, true) => self.load_signed_half_word(address),
        };

        self.set_register(rd, value);
    }

    pub fn load_store_immediate_offset(
        &mut self,
        byte_word: ReadWriteKind,
        load_store: LoadStoreKind,
        offset: u16,
        base_register: u16,
        source_destination_register: u16,
    ) {
        let address = self
            .register(base_register.into())
            .wrapping_add(offset.into());

        self.transfer(load_store, byte_word, address, source_destination_register.into());
    }

    pub fn load_store_halfword(
        &mut self,
        load_store: LoadStoreKind,
        offset: u16,
        base_register: u16,
        source_destination_register: u16,
    ) {
        let rd = source_destination_register.into();
        let address = self
            .register(base_register.into())
            .wrapping_add(offset.into());

        match load_store {
            LoadStoreKind::Load => {
                let value = self.load_half_word(address);
                self.set_register(rd, value);
            }
            LoadStoreKind::Store => {
                let value = self.register(rd);
                self.bus.write_half_word(address, value as u16);
            }
        }
    }

    pub fn sp_relative_load_store(
        &mut self,
        load_store: LoadStoreKind,
        destination_register: u16,
        word8: u16,
    ) {
        let address = self.register(SP).wrapping_add(word8.into());

        self.transfer(
            load_store,
            ReadWriteKind::Word,
            address,
            destination_register.into(),
        );
    }

    /// ADD Rd, PC/SP, #imm. Flags are left alone.
    pub fn load_address(&mut self, sp: bool, destination_register: u16, word8: u16) {
        let base = if sp {
            self.register(SP)
        } else {
            self.register(PC) & !0b10
        };

        let output = AluOperation::Add.apply(base, word8.into(), false, false);
        self.write_alu_output(output, destination_register.into());
    }

    pub fn add_offset_sp(&mut self, s: bool, word7: u16) {
        let operation = if s {
            AluOperation::Sub
        } else {
            AluOperation::Add
        };

        let output = operation.apply(self.register(SP), word7.into(), true, false);
        self.write_alu_output(output, SP);
    }

    /// PUSH is STMDB SP! and POP is LDMIA SP!, with LR or PC tacked on.
    pub fn push_pop_register(
        &mut self,
        load_store: LoadStoreKind,
        pc_lr: bool,
        register_list: u16,
    ) -> Result<(), CpuError> {
        match load_store {
            LoadStoreKind::Store => {
                let list = register_list | (u16::from(pc_lr) << LR);
                self.block_data_transfer(
                    Indexing::Pre,
                    Offsetting::Down,
                    false,
                    true,
                    LoadStoreKind::Store,
                    SP,
                    list,
                )
            }
            LoadStoreKind::Load => {
                let list = register_list | (u16::from(pc_lr) << PC);
                self.block_data_transfer(
                    Indexing::Post,
                    Offsetting::Up,
                    false,
                    true,
                    LoadStoreKind::Load,
                    SP,
                    list,
                )
            }
        }
    }

    pub fn multiple_load_store(
        &mut self,
        load_store: LoadStoreKind,
        base_register: u16,
        register_list: u16,
    ) -> Result<(), CpuError> {
        self.block_data_transfer(
            Indexing::Post,
            Offsetting::Up,
            false,
            true,
            load_store,
            base_register.into(),
            register_list,
        )
    }

    pub fn cond_branch(&mut self, condition: Condition, immediate_offset: i32) {
        if self.cpsr.can_execute(condition) {
            let pc = self.register(PC);
            self.set_register(PC, pc.wrapping_add_signed(immediate_offset));
        }
    }

    pub fn uncond_branch(&mut self, offset: i32) {
        let pc = self.register(PC);
        self.set_register(PC, pc.wrapping_add_signed(offset));
    }

    /// BL comes in two halves: the first leaves the upper part of the
    /// target in LR, the second jumps and puts the return address in LR.
    pub fn long_branch_link(&mut self, h: bool, offset: u16) {
        let pc = self.register(PC);
        let offset = u32::from(offset);

        if h {
            let next_instruction = pc.wrapping_sub(2);
            let target = self.register(LR).wrapping_add(offset << 1);

            self.set_register(PC, target);
            self.set_register(LR, next_instruction | 1);
        } else {
            let high = (offset << 12).sign_extended(23);
            self.set_register(LR, pc.wrapping_add(high));
        }
    }
}
