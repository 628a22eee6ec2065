//! # Address Space Router
//!
//! ```text
//! 0x00000000-0x00003FFF  BIOS                 16 KB   read only
//! 0x02000000-0x02FFFFFF  on board WRAM        256 KB  mirrored
//! 0x03000000-0x03FFFFFF  on chip WRAM         32 KB   mirrored
//! 0x04000000-0x04FFFFFF  I/O registers        -       reads 0, writes ignored
//! 0x05000000-0x05FFFFFF  palette RAM          1 KB    mirrored
//! 0x06000000-0x06FFFFFF  VRAM                 96 KB   mirrored every 128 KB
//! 0x07000000-0x07FFFFFF  OAM                  1 KB    mirrored
//! 0x08000000-0x0DFFFFFF  Game Pak ROM         32 MB   three wait state banks
//! ```
//!
//! Anything else is open bus: reads return 0 and writes are dropped.
//!
//! Halfword and word accesses are not required to be aligned. The bus only
//! aligns the index into the backing store; rotating a misaligned load is the
//! job of the instruction that issued it.

use crate::internal_memory::InternalMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Bios,
    Rom,
    OnBoardWram,
    OnChipWram,
    Io,
    Palette,
    Vram,
    Oam,
}

/// Checked in order, the first range containing the address wins.
const REGIONS: [(u32, u32, Region); 8] = [
    (0x0000_0000, 0x0000_3FFF, Region::Bios),
    (0x0800_0000, 0x0DFF_FFFF, Region::Rom),
    (0x0200_0000, 0x02FF_FFFF, Region::OnBoardWram),
    (0x0300_0000, 0x03FF_FFFF, Region::OnChipWram),
    (0x0400_0000, 0x04FF_FFFF, Region::Io),
    (0x0500_0000, 0x05FF_FFFF, Region::Palette),
    (0x0600_0000, 0x06FF_FFFF, Region::Vram),
    (0x0700_0000, 0x07FF_FFFF, Region::Oam),
];

impl Region {
    /// Finds the region owning `address`, `None` means open bus.
    #[must_use]
    pub fn of(address: u32) -> Option<Self> {
        REGIONS
            .iter()
            .find(|(start, end, _)| (*start..=*end).contains(&address))
            .map(|(_, _, region)| *region)
    }

    /// Folds a bus address into an index of the region's backing store.
    #[must_use]
    pub const fn fold(self, address: u32) -> usize {
        let offset = match self {
            Self::Bios => address & 0x3FFF,
            Self::Rom => address & 0x01FF_FFFF,
            Self::OnBoardWram => address & 0x3_FFFF,
            Self::OnChipWram => address & 0x7FFF,
            Self::Io => address & 0x00FF_FFFF,
            Self::Palette | Self::Oam => address & 0x3FF,
            Self::Vram => {
                // 96 KB in a 128 KB window: the last 32 KB repeat the
                // upper 32 KB of the first 64 KB + 32 KB block.
                let offset = address & 0x1_FFFF;
                if offset >= 0x1_8000 {
                    offset - 0x8000
                } else {
                    offset
                }
            }
        };

        offset as usize
    }

    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Bios | Self::Rom)
    }
}

#[derive(Default)]
pub struct Bus {
    pub internal_memory: InternalMemory,
}

impl Bus {
    #[must_use]
    pub const fn with_memory(memory: InternalMemory) -> Self {
        Self {
            internal_memory: memory,
        }
    }

    fn read_raw(&self, address: u32) -> u8 {
        let Some(region) = Region::of(address) else {
            tracing::trace!("read on unused memory 0x{address:08X}");
            return 0;
        };

        let offset = region.fold(address);
        let memory = &self.internal_memory;
        match region {
            Region::Bios => memory.read_bios(offset),
            Region::Rom => memory.read_rom(offset),
            Region::OnBoardWram => memory.working_ram[offset],
            Region::OnChipWram => memory.working_iram[offset],
            Region::Io => 0,
            Region::Palette => memory.palette_ram[offset],
            Region::Vram => memory.video_ram[offset],
            Region::Oam => memory.object_attributes[offset],
        }
    }

    fn write_raw(&mut self, address: u32, value: u8) {
        let Some(region) = Region::of(address) else {
            tracing::trace!("write on unused memory 0x{address:08X}");
            return;
        };

        if region.is_read_only() {
            tracing::debug!("write 0x{value:02X} to read only {region:?} at 0x{address:08X}");
            return;
        }

        let offset = region.fold(address);
        let memory = &mut self.internal_memory;
        match region {
            Region::OnBoardWram => memory.working_ram[offset] = value,
            Region::OnChipWram => memory.working_iram[offset] = value,
            Region::Palette => memory.palette_ram[offset] = value,
            Region::Vram => memory.video_ram[offset] = value,
            Region::Oam => memory.object_attributes[offset] = value,
            Region::Io | Region::Bios | Region::Rom => {}
        }
    }

    #[must_use]
    pub fn read_byte(&self, address: u32) -> u8 {
        self.read_raw(address)
    }

    pub fn write_byte(&mut self, address: u32, value: u8) {
        self.write_raw(address, value);
    }

    #[must_use]
    pub fn read_half_word(&self, address: u32) -> u16 {
        let address = address & !0b1;

        u16::from_le_bytes([self.read_raw(address), self.read_raw(address | 1)])
    }

    pub fn write_half_word(&mut self, address: u32, value: u16) {
        let address = address & !0b1;

        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.write_raw(address + i as u32, byte);
        }
    }

    #[must_use]
    pub fn read_word(&self, address: u32) -> u32 {
        let address = address & !0b11;

        u32::from_le_bytes([
            self.read_raw(address),
            self.read_raw(address + 1),
            self.read_raw(address + 2),
            self.read_raw(address + 3),
        ])
    }

    pub fn write_word(&mut self, address: u32, value: u32) {
        let address = address & !0b11;

        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.write_raw(address + i as u32, byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_region_order() {
        assert_eq!(Region::of(0x0000_0000), Some(Region::Bios));
        assert_eq!(Region::of(0x0000_4000), None);
        assert_eq!(Region::of(0x0200_0000), Some(Region::OnBoardWram));
        assert_eq!(Region::of(0x0400_0208), Some(Region::Io));
        assert_eq!(Region::of(0x0A00_0000), Some(Region::Rom));
        assert_eq!(Region::of(0x0DFF_FFFF), Some(Region::Rom));
        assert_eq!(Region::of(0x0E00_0000), None);
        assert_eq!(Region::of(0x1000_0000), None);
    }

    #[test]
    fn test_word_round_trip() {
        let mut bus = Bus::default();
        for address in [
            0x0200_0000,
            0x0203_FFFC,
            0x0300_7F00,
            0x0500_0010,
            0x0601_7FFC,
            0x0700_03FC,
        ] {
            bus.write_word(address, 0xDEAD_BEEF);
            assert_eq!(bus.read_word(address), 0xDEAD_BEEF);
        }
    }

    #[test]
    fn test_little_endian_layout() {
        let mut bus = Bus::default();
        bus.write_word(0x0300_0000, 0x1122_3344);
        assert_eq!(bus.read_byte(0x0300_0000), 0x44);
        assert_eq!(bus.read_byte(0x0300_0003), 0x11);
        assert_eq!(bus.read_half_word(0x0300_0002), 0x1122);
    }

    #[test]
    fn test_mirror_wram() {
        let mut bus = Bus::default();
        bus.write_byte(0x0201_0003, 5);

        assert_eq!(bus.read_byte(0x0205_0003), 5);
        assert_eq!(bus.read_byte(0x0235_0003), 5);
        assert_eq!(bus.read_byte(0x02F5_0003), 5);

        bus.write_byte(0x02F5_0003, 1);
        assert_eq!(bus.internal_memory.working_ram[0x01_0003], 1);
    }

    #[test]
    fn test_mirror_iram() {
        let mut bus = Bus::default();
        bus.write_word(0x0300_21FC, 0xCAFE_F00D);

        assert_eq!(bus.read_word(0x0300_A1FC), 0xCAFE_F00D);
        assert_eq!(bus.read_word(0x03FF_A1FC), 0xCAFE_F00D);

        bus.write_byte(0x03FF_FFA0, 10);
        assert_eq!(bus.internal_memory.working_iram[0x7FA0], 10);
    }

    #[test]
    fn test_mirror_vram() {
        let mut bus = Bus::default();
        bus.write_half_word(0x0601_0000, 0xABCD);

        assert_eq!(bus.read_half_word(0x0601_8000), 0xABCD);
        assert_eq!(bus.read_half_word(0x0603_0000), 0xABCD);
        assert_eq!(bus.internal_memory.video_ram[0x1_0000], 0xCD);
    }

    #[test]
    fn test_mirror_palette_and_oam() {
        let mut bus = Bus::default();
        bus.write_byte(0x0500_0401, 7);
        bus.write_byte(0x0700_0C02, 9);

        assert_eq!(bus.read_byte(0x0500_0001), 7);
        assert_eq!(bus.read_byte(0x0700_0002), 9);
    }

    #[test]
    fn test_unaligned_access_aligns_store_index() {
        let mut bus = Bus::default();
        bus.write_word(0x0200_0003, 0x0102_0304);

        assert_eq!(bus.read_word(0x0200_0000), 0x0102_0304);
        assert_eq!(bus.read_word(0x0200_0002), 0x0102_0304);
        assert_eq!(bus.read_half_word(0x0200_0001), 0x0304);
    }

    #[test]
    fn test_open_bus() {
        let mut bus = Bus::default();
        bus.write_word(0x0000_4000, 0xFFFF_FFFF);
        bus.write_word(0x1000_0000, 0xFFFF_FFFF);
        bus.write_word(0x0400_0000, 0xFFFF_FFFF);

        assert_eq!(bus.read_word(0x0000_4000), 0);
        assert_eq!(bus.read_word(0x1000_0000), 0);
        assert_eq!(bus.read_word(0x0400_0000), 0);
    }

    #[test]
    fn test_read_only_regions() {
        let mut bus = Bus::with_memory(InternalMemory::new(vec![0x11; 4], vec![0x22; 4]));

        bus.write_word(0x0000_0000, 0);
        bus.write_word(0x0800_0000, 0);

        assert_eq!(bus.read_word(0x0000_0000), 0x1111_1111);
        assert_eq!(bus.read_word(0x0800_0000), 0x2222_2222);
    }

    #[test]
    fn test_rom_wait_state_mirrors() {
        let bus = Bus::with_memory(InternalMemory::new(vec![], vec![1, 2, 3, 4]));

        assert_eq!(bus.read_word(0x0800_0000), 0x0403_0201);
        assert_eq!(bus.read_word(0x0A00_0000), 0x0403_0201);
        assert_eq!(bus.read_word(0x0C00_0000), 0x0403_0201);
    }
}
