use std::ops::RangeInclusive;

/// Bit helpers shared by the decoders and the register file.
///
/// Indexes go from lsb to msb (right to left), ranges are inclusive on both
/// ends so they can be copied straight from the instruction format tables
/// (`op_code.get_bits(16..=19)` is `Rn` for most ARM encodings).
pub trait Bits: Copy {
    const WIDTH: u8;

    fn is_bit_on(self, bit_idx: u8) -> bool;

    fn set_bit(&mut self, bit_idx: u8, value: bool);

    fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self;

    /// Treats the lowest `number_of_bits` bits as a two's complement value
    /// and extends its sign to the whole width of `Self`.
    fn sign_extended(self, number_of_bits: u8) -> Self;

    fn is_bit_off(self, bit_idx: u8) -> bool {
        !self.is_bit_on(bit_idx)
    }

    fn get_bit(self, bit_idx: u8) -> bool {
        self.is_bit_on(bit_idx)
    }

    fn set_bit_on(&mut self, bit_idx: u8) {
        self.set_bit(bit_idx, true);
    }

    fn set_bit_off(&mut self, bit_idx: u8) {
        self.set_bit(bit_idx, false);
    }
}

macro_rules! impl_bits {
    ($($t:ty => $signed:ty),*) => {$(
        impl Bits for $t {
            const WIDTH: u8 = <$t>::BITS as u8;

            fn is_bit_on(self, bit_idx: u8) -> bool {
                debug_assert!(bit_idx < Self::WIDTH);
                (self >> bit_idx) & 1 == 1
            }

            fn set_bit(&mut self, bit_idx: u8, value: bool) {
                debug_assert!(bit_idx < Self::WIDTH);
                let mask: $t = 1 << bit_idx;
                if value {
                    *self |= mask;
                } else {
                    *self &= !mask;
                }
            }

            fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self {
                let start = *bits_range.start();
                let end = *bits_range.end();
                debug_assert!(start <= end && end < Self::WIDTH);

                let length = u32::from(end - start + 1);
                let mask = <$t>::MAX.checked_shr(<$t>::BITS - length).unwrap_or(0);

                (self >> start) & mask
            }

            fn sign_extended(self, number_of_bits: u8) -> Self {
                debug_assert!(number_of_bits > 0 && number_of_bits <= Self::WIDTH);
                // Move the sign bit to the msb, then let the arithmetic shift
                // bring it back filling the upper bits.
                let unused = Self::WIDTH - number_of_bits;
                (((self << unused) as $signed) >> unused) as $t
            }
        }
    )*};
}

impl_bits!(u8 => i8, u16 => i16, u32 => i32, u64 => i64);
