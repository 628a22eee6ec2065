//! # Program Status Registers (CPSR and SPSR)
//!
//! ```text
//! 31 30 29 28 27       8 7 6 5 4   0
//! ┌──┬──┬──┬──┬─────────┬─┬─┬─┬─────┐
//! │N │Z │C │V │Reserved │I│F│T│Mode │
//! └──┴──┴──┴──┴─────────┴─┴─┴─┴─────┘
//! ```
//!
//! - **Flags (28-31)**: tested by [`condition`](super::condition) codes
//! - **I/F (7-6)**: IRQ/FIQ disable
//! - **T (5)**: ARM (0) or Thumb (1) state, it selects the decoder
//! - **Mode (4-0)**: see [`cpu_modes`](super::cpu_modes)
//!
//! MSR writes whole byte fields of a PSR, the field mask bits pick which ones:
//! bit 19 flags (31-24), bit 18 status (23-16), bit 17 extension (15-8),
//! bit 16 control (7-0).

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::alu::FlagUpdate;
use crate::cpu::error::CpuError;
use crate::cpu::{condition::Condition, cpu_modes::Mode};

/// Program Status Register (CPSR or SPSR) wrapping the raw `u32`.
///
/// ```
/// use emu::cpu::psr::Psr;
///
/// let mut cpsr = Psr::default();
/// cpsr.set_zero_flag(true);
/// assert!(cpsr.zero_flag());
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psr(u32);

/// Byte fields an MSR may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsrFieldMask {
    pub flags: bool,
    pub status: bool,
    pub extension: bool,
    pub control: bool,
}

impl PsrFieldMask {
    /// Decodes the `fsxc` bits 19-16 of an MSR instruction.
    #[must_use]
    pub fn from_op_code(op_code: u32) -> Self {
        Self {
            flags: op_code.get_bit(19),
            status: op_code.get_bit(18),
            extension: op_code.get_bit(17),
            control: op_code.get_bit(16),
        }
    }

    /// The bits of a PSR covered by the selected fields.
    #[must_use]
    pub const fn bits(self) -> u32 {
        let mut mask = 0;
        if self.flags {
            mask |= 0xFF00_0000;
        }
        if self.status {
            mask |= 0x00FF_0000;
        }
        if self.extension {
            mask |= 0x0000_FF00;
        }
        if self.control {
            mask |= 0x0000_00FF;
        }
        mask
    }
}

impl Psr {
    /// Evaluates a condition field against N, Z, C and V.
    #[must_use]
    pub fn can_execute(self, cond: Condition) -> bool {
        use Condition::{AL, CC, CS, EQ, GE, GT, HI, LE, LS, LT, MI, NE, NV, PL, VC, VS};
        match cond {
            EQ => self.zero_flag(),
            NE => !self.zero_flag(),
            CS => self.carry_flag(),
            CC => !self.carry_flag(),
            MI => self.sign_flag(),
            PL => !self.sign_flag(),
            VS => self.overflow_flag(),
            VC => !self.overflow_flag(),
            HI => self.carry_flag() && !self.zero_flag(),
            LS => !self.carry_flag() || self.zero_flag(),
            GE => self.sign_flag() == self.overflow_flag(),
            LT => self.sign_flag() != self.overflow_flag(),
            GT => !self.zero_flag() && (self.sign_flag() == self.overflow_flag()),
            LE => self.zero_flag() || (self.sign_flag() != self.overflow_flag()),
            AL => true,
            NV => false,
        }
    }

    /// N => Bit 31, (0=Not Signed, 1=Signed)
    #[must_use]
    pub fn sign_flag(self) -> bool {
        self.0.get_bit(31)
    }

    /// Z => Bit 30, (0=Not Zero, 1=Zero)
    #[must_use]
    pub fn zero_flag(self) -> bool {
        self.0.get_bit(30)
    }

    /// C => Bit 29, (0=Borrow/No Carry, 1=Carry/No Borrow)
    #[must_use]
    pub fn carry_flag(self) -> bool {
        self.0.get_bit(29)
    }

    /// V => Bit 28, (0=No Overflow, 1=Overflow)
    #[must_use]
    pub fn overflow_flag(self) -> bool {
        self.0.get_bit(28)
    }

    /// I => Bit 7, (0=Enable, 1=Disable)
    #[must_use]
    pub fn irq_disable(self) -> bool {
        self.0.get_bit(7)
    }

    /// F => Bit 6, (0=Enable, 1=Disable)
    #[must_use]
    pub fn fiq_disable(self) -> bool {
        self.0.get_bit(6)
    }

    /// T => Bit 5, (0=ARM, 1=THUMB)
    #[must_use]
    pub fn state_bit(self) -> bool {
        self.0.get_bit(5)
    }

    /// M4-M0 => Bits 4-0. Unknown encodings are a fatal error.
    pub fn mode(self) -> Result<Mode, CpuError> {
        Mode::try_from(self.0.get_bits(0..=4))
    }

    pub fn set_sign_flag(&mut self, value: bool) {
        self.0.set_bit(31, value);
    }

    pub fn set_zero_flag(&mut self, value: bool) {
        self.0.set_bit(30, value);
    }

    pub fn set_carry_flag(&mut self, value: bool) {
        self.0.set_bit(29, value);
    }

    pub fn set_overflow_flag(&mut self, value: bool) {
        self.0.set_bit(28, value);
    }

    pub fn set_flags(&mut self, update: FlagUpdate) {
        self.set_sign_flag(update.sign);
        self.set_zero_flag(update.zero);
        if let Some(carry) = update.carry {
            self.set_carry_flag(carry);
        }
        if let Some(overflow) = update.overflow {
            self.set_overflow_flag(overflow);
        }
    }

    pub fn set_irq_disable(&mut self, value: bool) {
        self.0.set_bit(7, value);
    }

    pub fn set_fiq_disable(&mut self, value: bool) {
        self.0.set_bit(6, value);
    }

    pub fn set_state_bit(&mut self, value: bool) {
        self.0.set_bit(5, value);
    }

    /// The Mode Bits M4-M0 contain the current operating mode.
    pub const fn set_mode(&mut self, m: Mode) {
        self.0 &= !0b1_1111;
        self.0 |= m as u32;
    }

    /// Replaces the bits selected by `mask` with the ones of `value`.
    #[must_use]
    pub const fn with_fields(self, value: u32, mask: PsrFieldMask) -> Self {
        let bits = mask.bits();
        Self((self.0 & !bits) | (value & bits))
    }

    #[must_use]
    pub fn cpu_state(self) -> CpuState {
        self.state_bit().into()
    }

    pub fn set_cpu_state(&mut self, state: CpuState) {
        self.set_state_bit(state.into());
    }
}

impl From<Mode> for Psr {
    fn from(m: Mode) -> Self {
        let mut s = Self(0);

        s.set_mode(m);

        s
    }
}

impl From<u32> for Psr {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Psr> for u32 {
    fn from(p: Psr) -> Self {
        p.0
    }
}

/// The CPU execution state, selected by the T bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    /// Thumb: 16-bit instructions. See `thumb` module.
    Thumb,
    /// ARM: 32-bit instructions. See `arm` module.
    Arm,
}

impl CpuState {
    /// Size in bytes of one instruction, which is also how far PC advances
    /// on a sequential fetch.
    #[must_use]
    pub const fn instruction_size(self) -> u32 {
        match self {
            Self::Arm => 4,
            Self::Thumb => 2,
        }
    }
}

impl From<CpuState> for bool {
    fn from(state: CpuState) -> Self {
        match state {
            CpuState::Arm => false,
            CpuState::Thumb => true,
        }
    }
}

impl From<bool> for CpuState {
    fn from(state: bool) -> Self {
        if state { Self::Thumb } else { Self::Arm }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_sign_flag() {
        let mut cpsr = Psr(0);
        cpsr.set_sign_flag(true);
        assert!(cpsr.sign_flag());
        assert_eq!(cpsr.0, 1 << 31);
    }

    #[test]
    fn check_overflow_flag() {
        let cpsr = Psr(0b0001_0000_0000_0000_0000_0000_0000_0000);
        assert!(cpsr.overflow_flag());
        assert!(!cpsr.carry_flag());
    }

    #[test]
    fn check_set_flags_keeps_unset_fields() {
        let mut cpsr = Psr(0);
        cpsr.set_carry_flag(true);
        cpsr.set_overflow_flag(true);

        cpsr.set_flags(FlagUpdate {
            sign: true,
            zero: false,
            carry: None,
            overflow: None,
        });

        assert!(cpsr.sign_flag());
        assert!(cpsr.carry_flag());
        assert!(cpsr.overflow_flag());
    }

    #[test]
    fn check_modes() {
        for mode in [
            Mode::User,
            Mode::Fiq,
            Mode::Irq,
            Mode::Supervisor,
            Mode::Abort,
            Mode::Undefined,
            Mode::System,
        ] {
            let mut cpsr = Psr(0xF000_0000);
            cpsr.set_mode(mode);
            assert_eq!(cpsr.0 & 0b1_1111, mode as u32);
            assert_eq!(cpsr.mode(), Ok(mode));
            assert_eq!(cpsr.0 >> 28, 0xF);
        }
    }

    #[test]
    fn check_invalid_mode() {
        let cpsr = Psr(0b00011);
        assert_eq!(cpsr.mode(), Err(CpuError::InvalidMode(0b00011)));
    }

    #[test]
    fn check_state_bit() {
        let mut cpsr = Psr(0);
        cpsr.set_cpu_state(CpuState::Thumb);
        assert!(cpsr.state_bit());
        assert_eq!(cpsr.cpu_state(), CpuState::Thumb);
    }

    #[test]
    fn check_can_execute() {
        let mut cpsr = Psr(0);
        assert!(cpsr.can_execute(Condition::AL));
        assert!(!cpsr.can_execute(Condition::NV));
        assert!(cpsr.can_execute(Condition::NE));
        assert!(cpsr.can_execute(Condition::GE));

        cpsr.set_zero_flag(true);
        assert!(cpsr.can_execute(Condition::EQ));
        assert!(cpsr.can_execute(Condition::LS));
        assert!(cpsr.can_execute(Condition::LE));
        assert!(!cpsr.can_execute(Condition::GT));

        cpsr.set_zero_flag(false);
        cpsr.set_sign_flag(true);
        assert!(cpsr.can_execute(Condition::LT));
        assert!(cpsr.can_execute(Condition::MI));

        cpsr.set_overflow_flag(true);
        assert!(cpsr.can_execute(Condition::GT));
        assert!(cpsr.can_execute(Condition::VS));

        cpsr.set_carry_flag(true);
        assert!(cpsr.can_execute(Condition::HI));
        assert!(cpsr.can_execute(Condition::CS));
    }

    #[test]
    fn check_field_mask() {
        let mask = PsrFieldMask::from_op_code(0b1001 << 16);
        assert_eq!(mask.bits(), 0xFF00_00FF);

        let psr = Psr(0x0000_001F).with_fields(0xA000_0013, mask);
        assert_eq!(u32::from(psr), 0xA000_0013);

        let flags_only = PsrFieldMask::from_op_code(0b1000 << 16);
        let psr = Psr(0x0000_001F).with_fields(0x6000_0010, flags_only);
        assert_eq!(u32::from(psr), 0x6000_001F);
    }
}
