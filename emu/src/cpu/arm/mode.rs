use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::arm::instructions::ArmModeInstruction;
use crate::cpu::condition::Condition;
use crate::cpu::error::CpuError;

/// A decoded ARM word together with the condition it runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmModeOpcode {
    pub instruction: ArmModeInstruction,
    pub condition: Condition,
    pub raw: u32,
}

impl TryFrom<u32> for ArmModeOpcode {
    type Error = CpuError;

    fn try_from(op_code: u32) -> Result<Self, Self::Error> {
        Ok(Self {
            instruction: ArmModeInstruction::from(op_code),
            condition: Condition::try_from(op_code.get_bits(28..=31) as u8)?,
            raw: op_code,
        })
    }
}

impl std::ops::Deref for ArmModeOpcode {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

impl std::fmt::Display for ArmModeOpcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        #[cfg(feature = "disassembler")]
        {
            write!(f, "{:08X}: {}", self.raw, self.instruction.disassembler(self.condition))
        }

        #[cfg(not(feature = "disassembler"))]
        {
            write!(f, "{:08X}: {:?} {:?}", self.raw, self.condition, self.instruction)
        }
    }
}
