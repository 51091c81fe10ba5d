use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpcodeError {
    #[error("field of {1} bits at bit {0} does not fit in {2} bits")]
    FieldOutOfBounds(usize, usize, usize),
}

pub type Result<T> = std::result::Result<T, OpcodeError>;

/// A single opcode byte with helpers for pulling out bit fields.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode8 {
    value: u8,
}

impl Opcode8 {
    pub const WIDTH_BITS: usize = 8;

    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Bit `idx`, counted from the least significant bit.
    pub const fn get_bit(&self, idx: usize) -> u8 {
        (self.value >> (idx % Self::WIDTH_BITS)) & 0x01
    }

    /// The `width`-bit field whose least significant bit is `lsb`.
    pub fn try_get_field(&self, lsb: usize, width: usize) -> Result<u8> {
        if width == 0 || lsb + width > Self::WIDTH_BITS {
            return Err(OpcodeError::FieldOutOfBounds(lsb, width, Self::WIDTH_BITS));
        }
        let mask = ((1u16 << width) - 1) as u8;
        Ok((self.value >> lsb) & mask)
    }
}

impl fmt::Debug for Opcode8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("0x{:02X}", self.value))
    }
}

impl fmt::Display for Opcode8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:08b}", self.value))
    }
}
