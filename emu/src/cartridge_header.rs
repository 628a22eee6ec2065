use thiserror::Error;

/// Bytes covered by the header, starting at the beginning of the image.
pub const HEADER_SIZE: usize = 0xC0;

const FIXED_VALUE: u8 = 0x96;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartridgeHeaderError {
    #[error("image is {0} bytes, the header needs {HEADER_SIZE}")]
    TooShort(usize),

    #[error("fixed value at 0xB2 is 0x{0:02X}, expected 0x96")]
    WrongFixedValue(u8),

    #[error("header checksum is 0x{found:02X}, computed 0x{computed:02X}")]
    ChecksumMismatch { found: u8, computed: u8 },

    #[error("{0} is not a valid ASCII sequence")]
    NotAscii(&'static str),
}

/// Contains the information of the cartridge header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeHeader {
    rom_entry_point: u32,
    nintendo_logo: [u8; 156],
    game_title: String,
    game_code: String,
    maker_code: String,
    main_unit_code: u8,
    device_type: u8,
    software_version: u8,
    complement_check: u8,
}

impl CartridgeHeader {
    pub fn new(data: &[u8]) -> Result<Self, CartridgeHeaderError> {
        let header: &[u8; HEADER_SIZE] = data
            .get(..HEADER_SIZE)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(CartridgeHeaderError::TooShort(data.len()))?;

        execute_checks(header)?;

        let mut nintendo_logo = [0; 156];
        nintendo_logo.copy_from_slice(&header[0x04..0xA0]);

        Ok(Self {
            rom_entry_point: u32::from_le_bytes([header[0], header[1], header[2], header[3]]),
            nintendo_logo,
            game_title: into_ascii_str(&header[0xA0..0xAC], "game title")?,
            game_code: into_ascii_str(&header[0xAC..0xB0], "game code")?,
            maker_code: into_ascii_str(&header[0xB0..0xB2], "maker code")?,
            main_unit_code: header[0xB3],
            device_type: header[0xB4],
            software_version: header[0xBC],
            complement_check: header[0xBD],
        })
    }

    /// 32bit ARM branch opcode
    pub const fn rom_entry_point(&self) -> u32 {
        self.rom_entry_point
    }

    /// Compressed bitmap
    pub const fn nintendo_logo(&self) -> &[u8; 156] {
        &self.nintendo_logo
    }

    /// Title with the zero padding stripped.
    pub fn game_title(&self) -> &str {
        self.game_title.trim_end_matches('\0')
    }

    pub fn game_code(&self) -> &str {
        self.game_code.as_str()
    }

    pub fn maker_code(&self) -> &str {
        self.maker_code.as_str()
    }

    /// 00h for current GBA models
    pub const fn main_unit_code(&self) -> u8 {
        self.main_unit_code
    }

    pub const fn device_type(&self) -> u8 {
        self.device_type
    }

    pub const fn software_version(&self) -> u8 {
        self.software_version
    }

    pub const fn complement_check(&self) -> u8 {
        self.complement_check
    }
}

impl std::fmt::Display for CartridgeHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] maker {} v{}",
            self.game_title(),
            self.game_code,
            self.maker_code,
            self.software_version
        )
    }
}

/// Complement of the sum of 0xA0..=0xBC, minus 0x19.
pub fn header_checksum(header: &[u8]) -> u8 {
    header[0xA0..0xBD]
        .iter()
        .fold(0u8, |acc, &item| acc.wrapping_sub(item))
        .wrapping_sub(0x19)
}

fn execute_checks(header: &[u8; HEADER_SIZE]) -> Result<(), CartridgeHeaderError> {
    if header[0xB2] != FIXED_VALUE {
        return Err(CartridgeHeaderError::WrongFixedValue(header[0xB2]));
    }

    let found = header[0xBD];
    let computed = header_checksum(header);
    if found != computed {
        return Err(CartridgeHeaderError::ChecksumMismatch { found, computed });
    }

    Ok(())
}

fn into_ascii_str(data: &[u8], field: &'static str) -> Result<String, CartridgeHeaderError> {
    if !data.is_ascii() {
        return Err(CartridgeHeaderError::NotAscii(field));
    }

    String::from_utf8(data.to_vec()).map_err(|_| CartridgeHeaderError::NotAscii(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_header() -> Vec<u8> {
        let mut data = vec![0; 0x200];
        // B 0x080000C0
        data[0..4].copy_from_slice(&0xEA00_002E_u32.to_le_bytes());
        data[0xA0..0xAC].copy_from_slice(b"KUMQUAT\0\0\0\0\0");
        data[0xAC..0xB0].copy_from_slice(b"AKQE");
        data[0xB0..0xB2].copy_from_slice(b"01");
        data[0xB2] = 0x96;
        data[0xBC] = 2;
        data[0xBD] = header_checksum(&data);
        data
    }

    #[test]
    fn check_parse_header() {
        let header = CartridgeHeader::new(&valid_header()).unwrap();

        assert_eq!(header.rom_entry_point(), 0xEA00_002E);
        assert_eq!(header.game_title(), "KUMQUAT");
        assert_eq!(header.game_code(), "AKQE");
        assert_eq!(header.maker_code(), "01");
        assert_eq!(header.main_unit_code(), 0);
        assert_eq!(header.software_version(), 2);
        assert_eq!(header.to_string(), "KUMQUAT [AKQE] maker 01 v2");
    }

    #[test]
    fn check_header_checksum() {
        let mut data = vec![0; HEADER_SIZE];
        data[0xB2] = 0x96;

        // -(0x96) - 0x19 = 0x51
        assert_eq!(header_checksum(&data), 0x51);
    }

    #[test]
    fn check_too_short() {
        assert_eq!(
            CartridgeHeader::new(&[0; 0x10]),
            Err(CartridgeHeaderError::TooShort(0x10))
        );
    }

    #[test]
    fn check_wrong_fixed_value() {
        let mut data = valid_header();
        data[0xB2] = 0;

        assert_eq!(
            CartridgeHeader::new(&data),
            Err(CartridgeHeaderError::WrongFixedValue(0))
        );
    }

    #[test]
    fn check_checksum_mismatch() {
        let mut data = valid_header();
        let computed = data[0xBD];
        data[0xBD] = computed.wrapping_add(1);

        assert_eq!(
            CartridgeHeader::new(&data),
            Err(CartridgeHeaderError::ChecksumMismatch {
                found: computed.wrapping_add(1),
                computed,
            })
        );
    }

    #[test]
    fn check_non_ascii_title() {
        let mut data = valid_header();
        data[0xA0] = 0xFF;
        data[0xBD] = header_checksum(&data);

        assert_eq!(
            CartridgeHeader::new(&data),
            Err(CartridgeHeaderError::NotAscii("game title"))
        );
    }
}
