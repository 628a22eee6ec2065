//! # Pipeline
//!
//! The core keeps the classic three stage shape with two slots between the
//! stages:
//!
//! ```text
//!   fetch (PC) ──▶ fetched ──▶ decoded ──▶ execute
//! ```
//!
//! Each [`step`](Arm7tdmi::step) executes the `decoded` slot, shifts
//! `fetched` into `decoded` and fetches the word at PC. Because the PC runs
//! two instructions ahead of the one being executed, R15 reads as the
//! address of the executing instruction + 8 in ARM state and + 4 in Thumb.
//!
//! Any write to R15 flushes: both slots are refilled with the NOP of the
//! (possibly new) state and PC is left where the write put it, so the target
//! executes two steps later.

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::bus::Bus;
use crate::cpu::arm::mode::ArmModeOpcode;
use crate::cpu::cpu_modes::Mode;
use crate::cpu::error::CpuError;
use crate::cpu::flags::{HalfwordTransferKind, LoadStoreKind};
use crate::cpu::psr::{CpuState, Psr};
use crate::cpu::register_bank::SpsrBank;
use crate::cpu::registers::{REG_LR, REG_PROGRAM_COUNTER, REG_SP, Registers};
use crate::cpu::thumb::mode::ThumbModeOpcode;

/// First instruction of the cartridge, where execution starts when the BIOS
/// is skipped.
pub const CARTRIDGE_ENTRY: u32 = 0x0800_0000;

/// SP of User/System mode as the BIOS leaves it.
pub const INITIAL_STACK_POINTER: u32 = 0x0300_7F00;

/// SP of Supervisor mode as the BIOS leaves it.
pub const SUPERVISOR_STACK_POINTER: u32 = 0x0300_7FE0;

/// SP of IRQ mode as the BIOS leaves it.
pub const IRQ_STACK_POINTER: u32 = 0x0300_7FA0;

/// Exception vector of software interrupts.
pub const SWI_VECTOR: u32 = 0x08;

/// `MOV R0, R0`
pub const ARM_NOP: u32 = 0xE1A0_0000;

/// `MOV R8, R8`
pub const THUMB_NOP: u16 = 0x46C0;

/// One pipeline slot. `address` is `None` for the NOPs a flush leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub op_code: u32,
    pub address: Option<u32>,
}

impl Slot {
    #[must_use]
    pub const fn nop(state: CpuState) -> Self {
        let op_code = match state {
            CpuState::Arm => ARM_NOP,
            CpuState::Thumb => THUMB_NOP as u32,
        };

        Self {
            op_code,
            address: None,
        }
    }
}

pub struct Arm7tdmi {
    pub bus: Bus,

    pub cpsr: Psr,
    pub registers: Registers,
    pub spsr_bank: SpsrBank,

    fetched: Slot,
    decoded: Slot,

    /// Set by every write to R15 during the current step.
    flushed: bool,
    halt_address: Option<u32>,
}

impl Default for Arm7tdmi {
    fn default() -> Self {
        Self::new(Bus::default())
    }
}

impl Arm7tdmi {
    #[must_use]
    pub fn new(bus: Bus) -> Self {
        let mut s = Self {
            bus,
            cpsr: Psr::from(Mode::System),
            registers: Registers::default(),
            spsr_bank: SpsrBank::default(),
            fetched: Slot::nop(CpuState::Arm),
            decoded: Slot::nop(CpuState::Arm),
            flushed: false,
            halt_address: None,
        };

        s.init();

        s
    }

    /// Stops [`step`](Self::step) once the instruction at `address` reaches
    /// the execute stage.
    #[must_use]
    pub fn with_halt_address(mut self, address: u32) -> Self {
        self.halt_address = Some(address);
        self
    }

    /// Puts the core in the state the BIOS leaves it in before jumping to
    /// the cartridge.
    pub fn init(&mut self) {
        self.cpsr = Psr::from(Mode::System);
        self.cpsr.set_cpu_state(CpuState::Arm);
        self.spsr_bank = SpsrBank::default();

        self.registers = Registers::new(Mode::System);
        self.registers.set_program_counter(CARTRIDGE_ENTRY);
        self.registers.set_register_at(REG_SP, INITIAL_STACK_POINTER);
        self.registers
            .set_register_in_mode(REG_SP, Mode::Supervisor, SUPERVISOR_STACK_POINTER);
        self.registers
            .set_register_in_mode(REG_SP, Mode::Irq, IRQ_STACK_POINTER);

        self.fetched = Slot::nop(CpuState::Arm);
        self.decoded = Slot::nop(CpuState::Arm);
        self.flushed = false;
    }

    #[must_use]
    pub const fn fetched(&self) -> Slot {
        self.fetched
    }

    #[must_use]
    pub const fn decoded(&self) -> Slot {
        self.decoded
    }

    /// Whether R15 was written by the last executed instruction.
    #[must_use]
    pub const fn is_flushed(&self) -> bool {
        self.flushed
    }

    pub fn decode<T, V>(op_code: V) -> Result<T, <T as TryFrom<V>>::Error>
    where
        T: std::fmt::Display + TryFrom<V>,
    {
        let code = T::try_from(op_code)?;
        tracing::trace!("{code}");
        Ok(code)
    }

    /// Runs one pipeline step. Returns `Ok(false)` without doing anything
    /// when the instruction about to execute sits at the halt address.
    pub fn step(&mut self) -> Result<bool, CpuError> {
        if self.halt_address.is_some() && self.decoded.address == self.halt_address {
            tracing::info!("halt address 0x{:08X} reached", self.decoded.address.unwrap_or(0));
            return Ok(false);
        }

        let state = self.cpsr.cpu_state();
        let pc = self.registers.program_counter();
        let word = self.fetch(state, pc);

        self.flushed = false;
        let executing = self.decoded;
        match state {
            CpuState::Arm => {
                let op_code: ArmModeOpcode = Self::decode(executing.op_code)?;
                self.execute_arm(op_code)?;
            }
            CpuState::Thumb => {
                let op_code = ThumbModeOpcode::from(executing.op_code as u16);
                tracing::trace!("{op_code}");
                self.execute_thumb(op_code)?;
            }
        }

        if self.flushed {
            self.flush_pipeline();
        } else {
            self.decoded = self.fetched;
            self.fetched = Slot {
                op_code: word,
                address: Some(pc),
            };
            self.registers
                .advance_program_counter(state.instruction_size());
        }

        Ok(true)
    }

    fn fetch(&self, state: CpuState, pc: u32) -> u32 {
        match state {
            CpuState::Arm => self.bus.read_word(pc),
            CpuState::Thumb => u32::from(self.bus.read_half_word(pc)),
        }
    }

    fn flush_pipeline(&mut self) {
        let nop = Slot::nop(self.cpsr.cpu_state());
        self.fetched = nop;
        self.decoded = nop;
    }

    pub fn execute_arm(&mut self, op_code: ArmModeOpcode) -> Result<(), CpuError> {
        use crate::cpu::arm::instructions::ArmModeInstruction::*;

        if !self.cpsr.can_execute(op_code.condition) {
            return Ok(());
        }

        match op_code.instruction {
            DataProcessing {
                alu_instruction,
                set_conditions,
                rn,
                destination,
                op2,
            } => self.data_processing(alu_instruction, set_conditions, rn, destination, op2)?,
            Multiply {
                variant,
                should_set_codes,
                rd_destination_register,
                rn_accumulate_register,
                rs_operand_register,
                rm_operand_register,
            } => self.multiply(
                variant,
                should_set_codes,
                rd_destination_register,
                rn_accumulate_register,
                rs_operand_register,
                rm_operand_register,
            ),
            MultiplyLong {
                variant,
                should_set_codes,
                rdhi_destination_register,
                rdlo_destination_register,
                rs_operand_register,
                rm_operand_register,
            } => self.multiply_long(
                variant,
                should_set_codes,
                rdhi_destination_register,
                rdlo_destination_register,
                rs_operand_register,
                rm_operand_register,
            ),
            PsrTransfer { psr_kind, kind } => self.psr_transfer(kind, psr_kind)?,
            HalfwordDataTransfer {
                load_store_kind: LoadStoreKind::Store,
                transfer_kind: HalfwordTransferKind::SignedByte | HalfwordTransferKind::SignedHalfword,
                ..
            } => {
                return Err(CpuError::UnsupportedInstruction {
                    op_code: *op_code,
                    reason: "LDRD/STRD are not available on ARMv4T",
                });
            }
            SingleDataSwap { byte, rn, rd, rm } => self.single_data_swap(byte, rn, rd, rm),
            BranchAndExchange { register } => self.branch_and_exchange(register),
            HalfwordDataTransfer {
                indexing,
                offsetting,
                write_back,
                load_store_kind,
                offset_kind,
                base_register,
                source_destination_register,
                transfer_kind,
            } => self.half_word_data_transfer(
                indexing,
                offsetting,
                write_back,
                load_store_kind,
                offset_kind,
                base_register,
                source_destination_register,
                transfer_kind,
            )?,
            SingleDataTransfer {
                load_store,
                quantity,
                write_back,
                indexing,
                rd,
                base_register,
                offset_info,
                offsetting,
            } => self.single_data_transfer(
                load_store,
                quantity,
                write_back,
                indexing,
                rd,
                base_register,
                offset_info,
                offsetting,
            ),
            BlockDataTransfer {
                indexing,
                offsetting,
                load_psr,
                write_back,
                load_store,
                rn,
                register_list,
            } => self.block_data_transfer(
                indexing,
                offsetting,
                load_psr,
                write_back,
                load_store,
                rn,
                register_list,
            )?,
            Branch { link, offset } => self.branch(link, offset),
            SoftwareInterrupt { comment } => {
                tracing::debug!("SWI 0x{comment:06X}");
                self.software_interrupt()?;
            }
            Undefined => self.undefined(*op_code),
        }

        Ok(())
    }

    pub fn execute_thumb(&mut self, op_code: ThumbModeOpcode) -> Result<(), CpuError> {
        use crate::cpu::thumb::instruction::ThumbModeInstruction::*;

        match op_code.instruction {
            MoveShiftedRegister {
                shift_operation,
                offset5,
                source_register,
                destination_register,
            } => self.move_shifted_reg(
                shift_operation,
                offset5,
                source_register,
                destination_register,
            ),
            AddSubtract {
                operation_kind,
                op,
                rn_offset3,
                source_register,
                destination_register,
            } => self.add_subtract(
                operation_kind,
                op,
                rn_offset3,
                source_register,
                destination_register,
            ),
            MoveCompareAddSubtractImm {
                operation,
                destination_register,
                offset,
            } => self.move_compare_add_sub_imm(operation, destination_register, offset),
            AluOp {
                alu_operation,
                source_register,
                destination_register,
            } => self.alu_op(alu_operation, source_register, destination_register),
            HiRegisterOpBX {
                op,
                source_register,
                destination_register,
            } => self.hi_reg_operation_branch_ex(op, source_register, destination_register),
            PCRelativeLoad {
                destination_register,
                immediate_value,
            } => self.pc_relative_load(destination_register, immediate_value),
            LoadStoreRegisterOffset {
                load_store,
                byte_word,
                offset_register,
                base_register,
                source_destination_register,
            } => self.load_store_register_offset(
                load_store,
                byte_word,
                offset_register,
                base_register,
                source_destination_register,
            ),
            LoadStoreSignExtByteHalfword {
                h_flag,
                sign_extend_flag,
                offset_register,
                base_register,
                source_destination_register,
            } => self.load_store_sign_extend_byte_halfword(
                h_flag,
                sign_extend_flag,
                offset_register,
                base_register,
                source_destination_register,
            ),
            LoadStoreImmOffset {
                byte_word,
                load_store,
                offset,
                base_register,
                source_destination_register,
            } => self.load_store_immediate_offset(
                byte_word,
                load_store,
                offset,
                base_register,
                source_destination_register,
            ),
            LoadStoreHalfword {
                load_store,
                offset,
                base_register,
                source_destination_register,
            } => self.load_store_halfword(
                load_store,
                offset,
                base_register,
                source_destination_register,
            ),
            SPRelativeLoadStore {
                load_store,
                destination_register,
                word8,
            } => self.sp_relative_load_store(load_store, destination_register, word8),
            LoadAddress {
                sp,
                destination_register,
                word8,
            } => self.load_address(sp, destination_register, word8),
            AddOffsetSP { s, word7 } => self.add_offset_sp(s, word7),
            PushPopReg {
                load_store,
                pc_lr,
                register_list,
            } => self.push_pop_register(load_store, pc_lr, register_list)?,
            MultipleLoadStore {
                load_store,
                base_register,
                register_list,
            } => self.multiple_load_store(load_store, base_register, register_list)?,
            CondBranch {
                condition,
                immediate_offset,
            } => self.cond_branch(condition, immediate_offset),
            Swi { comment } => {
                tracing::debug!("SWI 0x{comment:02X}");
                self.software_interrupt()?;
            }
            UncondBranch { offset } => self.uncond_branch(offset),
            LongBranchLink { h, offset } => self.long_branch_link(h, offset),
            Undefined => self.undefined(u32::from(*op_code)),
        }

        Ok(())
    }

    /// Reads a register through the current bank. R15 gives the pipelined
    /// value.
    #[must_use]
    pub fn register(&self, reg: u32) -> u32 {
        self.registers.register_at(reg as usize)
    }

    /// Writes a register through the current bank. A write to R15 is
    /// aligned to the current state and flushes the pipeline.
    pub fn set_register(&mut self, reg: u32, value: u32) {
        let reg = reg as usize & 0xF;
        if reg == REG_PROGRAM_COUNTER {
            let aligned = match self.cpsr.cpu_state() {
                CpuState::Arm => value & !0b11,
                CpuState::Thumb => value & !0b1,
            };
            self.registers.set_program_counter(aligned);
            self.flushed = true;
        } else {
            self.registers.set_register_at(reg, value);
        }
    }

    /// Value a store of `reg` writes: R15 is one instruction further ahead
    /// than when it is read as an operand.
    pub(crate) fn stored_register(&self, reg: u32) -> u32 {
        let value = self.register(reg);
        if reg as usize == REG_PROGRAM_COUNTER {
            value.wrapping_add(self.cpsr.cpu_state().instruction_size())
        } else {
            value
        }
    }

    /// SPSR of the current mode.
    pub fn spsr(&self) -> Result<Psr, CpuError> {
        self.spsr_bank.get(self.cpsr.mode()?)
    }

    pub fn set_spsr(&mut self, psr: Psr) -> Result<(), CpuError> {
        self.spsr_bank.set(self.cpsr.mode()?, psr)
    }

    /// Replaces the CPSR, switching register bank if the mode changes.
    /// Fails without touching anything when `psr` holds no valid mode.
    pub fn set_cpsr(&mut self, psr: Psr) -> Result<(), CpuError> {
        let mode = psr.mode()?;
        if self.cpsr.mode().ok() != Some(mode) {
            tracing::debug!("mode switch to {mode}");
        }

        self.registers.rebank(mode);
        self.cpsr = psr;

        Ok(())
    }

    /// Copies SPSR of the current mode into CPSR.
    pub(crate) fn restore_spsr(&mut self) -> Result<(), CpuError> {
        let spsr = self.spsr()?;
        self.set_cpsr(spsr)
    }

    /// Takes the exception `mode` with `vector`, leaving `return_address`
    /// in the banked LR.
    fn enter_exception(
        &mut self,
        mode: Mode,
        vector: u32,
        return_address: u32,
    ) -> Result<(), CpuError> {
        let old_cpsr = self.cpsr;

        let mut cpsr = old_cpsr;
        cpsr.set_mode(mode);
        cpsr.set_cpu_state(CpuState::Arm);
        cpsr.set_irq_disable(true);
        self.set_cpsr(cpsr)?;

        self.set_spsr(old_cpsr)?;
        self.registers.set_register_at(REG_LR, return_address);
        self.set_register(REG_PROGRAM_COUNTER as u32, vector);

        Ok(())
    }

    /// SWI in both states: LR gets the address of the following instruction.
    pub(crate) fn software_interrupt(&mut self) -> Result<(), CpuError> {
        let size = self.cpsr.cpu_state().instruction_size();
        let return_address = self.registers.program_counter().wrapping_sub(size);

        self.enter_exception(Mode::Supervisor, SWI_VECTOR, return_address)
    }

    pub(crate) fn undefined(&self, op_code: u32) {
        let size = self.cpsr.cpu_state().instruction_size();
        let address = self.registers.program_counter().wrapping_sub(2 * size);
        tracing::warn!("undefined instruction 0x{op_code:08X} at 0x{address:08X}, skipped");
    }

    /// Word load, an unaligned address rotates the aligned word so the
    /// addressed byte ends up in the low byte.
    pub(crate) fn load_word(&self, address: u32) -> u32 {
        self.bus
            .read_word(address)
            .rotate_right(8 * address.get_bits(0..=1))
    }

    /// Halfword load, an odd address rotates the aligned halfword by a byte.
    pub(crate) fn load_half_word(&self, address: u32) -> u32 {
        u32::from(self.bus.read_half_word(address)).rotate_right(8 * address.get_bits(0..=0))
    }

    pub(crate) fn load_signed_byte(&self, address: u32) -> u32 {
        u32::from(self.bus.read_byte(address)).sign_extended(8)
    }

    /// An odd address loads the addressed byte sign extended instead.
    pub(crate) fn load_signed_half_word(&self, address: u32) -> u32 {
        if address.get_bit(0) {
            self.load_signed_byte(address)
        } else {
            u32::from(self.bus.read_half_word(address)).sign_extended(16)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal_memory::InternalMemory;
    use pretty_assertions::assert_eq;

    fn cpu_with_rom(words: &[u32]) -> Arm7tdmi {
        let rom = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        Arm7tdmi::new(Bus::with_memory(InternalMemory::new(vec![], rom)))
    }

    fn cpu_with_thumb_rom(half_words: &[u16]) -> Arm7tdmi {
        let rom = half_words.iter().flat_map(|h| h.to_le_bytes()).collect();
        let mut cpu = Arm7tdmi::new(Bus::with_memory(InternalMemory::new(vec![], rom)));
        cpu.cpsr.set_cpu_state(CpuState::Thumb);
        cpu.fetched = Slot::nop(CpuState::Thumb);
        cpu.decoded = Slot::nop(CpuState::Thumb);
        cpu
    }

    #[test]
    fn check_init() {
        let cpu = Arm7tdmi::default();
        assert_eq!(cpu.registers.program_counter(), CARTRIDGE_ENTRY);
        assert_eq!(cpu.registers.register_at(REG_SP), INITIAL_STACK_POINTER);
        assert_eq!(cpu.cpsr.mode(), Ok(Mode::System));
        assert_eq!(cpu.cpsr.cpu_state(), CpuState::Arm);
        assert_eq!(cpu.fetched(), Slot::nop(CpuState::Arm));
        assert_eq!(cpu.decoded(), Slot::nop(CpuState::Arm));
        assert_eq!(
            cpu.registers.register_in_mode(REG_SP, Mode::Supervisor),
            SUPERVISOR_STACK_POINTER
        );
        assert_eq!(
            cpu.registers.register_in_mode(REG_SP, Mode::Irq),
            IRQ_STACK_POINTER
        );
    }

    #[test]
    fn check_first_instruction_runs_on_third_step() {
        // MOV R0, #1
        let mut cpu = cpu_with_rom(&[0xE3A0_0001]);

        assert_eq!(cpu.step(), Ok(true));
        assert_eq!(cpu.step(), Ok(true));
        assert_eq!(cpu.registers.register_at(0), 0);

        assert_eq!(cpu.step(), Ok(true));
        assert_eq!(cpu.registers.register_at(0), 1);
        assert_eq!(cpu.registers.program_counter(), 0x0800_000C);
    }

    #[test]
    fn check_pc_reads_two_instructions_ahead() {
        // MOV R0, PC
        let mut cpu = cpu_with_rom(&[0xE1A0_000F]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }

        assert_eq!(cpu.registers.register_at(0), CARTRIDGE_ENTRY + 8);
    }

    #[test]
    fn check_branch_flushes_pipeline() {
        // B #+8 (to 0x08000010), MOV R0, #1, MOV R1, #1, MOV R2, #1, MOV R3, #1
        let mut cpu = cpu_with_rom(&[
            0xEA00_0002,
            0xE3A0_0001,
            0xE3A0_1001,
            0xE3A0_2001,
            0xE3A0_3001,
        ]);

        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.registers.program_counter(), 0x0800_0010);
        assert_eq!(cpu.fetched(), Slot::nop(CpuState::Arm));
        assert_eq!(cpu.decoded(), Slot::nop(CpuState::Arm));

        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.registers.register_at(0), 0);
        assert_eq!(cpu.registers.register_at(1), 0);
        assert_eq!(cpu.registers.register_at(2), 0);
        assert_eq!(cpu.registers.register_at(3), 1);
    }

    #[test]
    fn check_halt_address_stops_before_executing() {
        // MOV R0, #1
        let mut cpu = cpu_with_rom(&[0xE3A0_0001]).with_halt_address(CARTRIDGE_ENTRY);

        assert_eq!(cpu.step(), Ok(true));
        assert_eq!(cpu.step(), Ok(true));
        assert_eq!(cpu.decoded().address, Some(CARTRIDGE_ENTRY));
        assert_eq!(cpu.step(), Ok(false));
        assert_eq!(cpu.step(), Ok(false));
        assert_eq!(cpu.registers.register_at(0), 0);
    }

    #[test]
    fn check_condition_failed_only_advances() {
        // MOVEQ R0, #1 with Z clear
        let mut cpu = cpu_with_rom(&[0x03A0_0001]);
        for _ in 0..2 {
            cpu.step().unwrap();
        }
        let cpsr = cpu.cpsr;
        let registers = cpu.registers.visible();

        cpu.step().unwrap();

        assert_eq!(cpu.cpsr, cpsr);
        let mut expected = registers;
        expected[15] += 4;
        assert_eq!(cpu.registers.visible(), expected);
    }

    #[test]
    fn check_thumb_step() {
        // MOV R0, #5 ; ADD R0, #3
        let mut cpu = cpu_with_thumb_rom(&[0x2005, 0x3003]);
        for _ in 0..4 {
            cpu.step().unwrap();
        }

        assert_eq!(cpu.registers.register_at(0), 8);
        assert_eq!(cpu.registers.program_counter(), CARTRIDGE_ENTRY + 8);
    }

    #[test]
    fn check_set_register_aligns_pc() {
        let mut cpu = Arm7tdmi::default();
        cpu.set_register(15, 0x0800_0103);
        assert_eq!(cpu.registers.program_counter(), 0x0800_0100);

        cpu.cpsr.set_cpu_state(CpuState::Thumb);
        cpu.set_register(15, 0x0800_0103);
        assert_eq!(cpu.registers.program_counter(), 0x0800_0102);
    }

    #[test]
    fn check_set_cpsr_rejects_invalid_mode() {
        let mut cpu = Arm7tdmi::default();
        let before = cpu.cpsr;
        assert_eq!(
            cpu.set_cpsr(Psr::from(0b0_0000)),
            Err(CpuError::InvalidMode(0))
        );
        assert_eq!(cpu.cpsr, before);
    }

    #[test]
    fn check_spsr_in_system_mode() {
        let cpu = Arm7tdmi::default();
        assert_eq!(cpu.spsr(), Err(CpuError::NoSpsr(Mode::System)));
    }

    #[test]
    fn check_unaligned_loads() {
        let mut cpu = Arm7tdmi::default();
        cpu.bus.write_word(0x0200_0000, 0x1122_3344);

        assert_eq!(cpu.load_word(0x0200_0000), 0x1122_3344);
        assert_eq!(cpu.load_word(0x0200_0001), 0x4411_2233);
        assert_eq!(cpu.load_word(0x0200_0002), 0x3344_1122);
        assert_eq!(cpu.load_half_word(0x0200_0001), 0x4400_0033);
        assert_eq!(cpu.load_signed_half_word(0x0200_0002), 0x0000_1122);
        assert_eq!(cpu.load_signed_half_word(0x0200_0001), 0x0000_0033);

        cpu.bus.write_half_word(0x0200_0004, 0x80FF);
        assert_eq!(cpu.load_signed_half_word(0x0200_0004), 0xFFFF_80FF);
        assert_eq!(cpu.load_signed_byte(0x0200_0004), 0xFFFF_FFFF);
    }
}
