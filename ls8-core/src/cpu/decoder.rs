use crate::cpu::Instruction;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecodeError {
    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),
    #[error("instruction needs {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

pub trait DecodeOne {
    type Instruction: Instruction;

    fn decode_one(&self, bytes: &[u8]) -> Result<Self::Instruction>;
}
