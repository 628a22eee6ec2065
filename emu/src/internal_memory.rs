use serde::{Deserialize, Serialize};

pub const BIOS_SIZE: usize = 0x0000_4000;
pub const WORKING_RAM_SIZE: usize = 0x0004_0000;
pub const WORKING_IRAM_SIZE: usize = 0x0000_8000;
pub const PALETTE_RAM_SIZE: usize = 0x0000_0400;
pub const VIDEO_RAM_SIZE: usize = 0x0001_8000;
pub const OBJECT_ATTRIBUTES_SIZE: usize = 0x0000_0400;

/// Backing stores of every memory region the bus routes to.
///
/// Offsets passed in here are already folded by the bus into the store's
/// physical size, the store never sees a raw bus address.
#[derive(Serialize, Deserialize)]
pub struct InternalMemory {
    /// From 0x00000000 to 0x00003FFF (16 `KBytes`).
    bios_system_rom: Vec<u8>,

    /// From 0x02000000 to 0x0203FFFF (256 `KBytes`), on board.
    pub(crate) working_ram: Vec<u8>,

    /// From 0x03000000 to 0x03007FFF (32 `KBytes`), on chip.
    pub(crate) working_iram: Vec<u8>,

    /// From 0x05000000 to 0x050003FF (1 `KByte`).
    pub(crate) palette_ram: Vec<u8>,

    /// From 0x06000000 to 0x06017FFF (96 `KBytes`).
    pub(crate) video_ram: Vec<u8>,

    /// From 0x07000000 to 0x070003FF (1 `KByte`).
    pub(crate) object_attributes: Vec<u8>,

    /// Game Pak ROM, visible from 0x08000000 and mirrored on the three wait
    /// state banks up to 0x0DFFFFFF.
    pub rom: Vec<u8>,
}

impl Default for InternalMemory {
    fn default() -> Self {
        Self::new(vec![], vec![])
    }
}

impl InternalMemory {
    /// BIOS images shorter than 16 `KBytes` are zero padded, longer ones are
    /// truncated.
    #[must_use]
    pub fn new(mut bios: Vec<u8>, rom: Vec<u8>) -> Self {
        bios.resize(BIOS_SIZE, 0);

        Self {
            bios_system_rom: bios,
            working_ram: vec![0; WORKING_RAM_SIZE],
            working_iram: vec![0; WORKING_IRAM_SIZE],
            palette_ram: vec![0; PALETTE_RAM_SIZE],
            video_ram: vec![0; VIDEO_RAM_SIZE],
            object_attributes: vec![0; OBJECT_ATTRIBUTES_SIZE],
            rom,
        }
    }

    #[must_use]
    pub fn read_bios(&self, offset: usize) -> u8 {
        self.bios_system_rom[offset]
    }

    #[must_use]
    pub fn read_rom(&self, offset: usize) -> u8 {
        if offset < self.rom.len() {
            self.rom[offset]
        } else {
            // The cartridge bus is halfword addressed and shares AD0-15
            // between address and data. Past the end of the image nothing
            // drives the data lines, so the CPU reads back the low 16 bits
            // of the halfword address it just put there.
            let open_bus = ((offset >> 1) & 0xFFFF) as u16;
            open_bus.to_le_bytes()[offset & 0b1]
        }
    }
}
