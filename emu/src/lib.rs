#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_wrap)]
pub mod bitwise;

#[allow(clippy::cast_lossless)]
#[allow(clippy::unreadable_literal)]
pub mod bus;

#[allow(clippy::similar_names)]
pub mod cartridge_header;
pub mod cpu;
pub mod internal_memory;
