use std::io;

use ls8_core::MemoryError;
use thiserror::Error;

use crate::alu::AluOp;

#[derive(Debug, Error)]
pub enum CpuError {
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("unknown opcode 0x{opcode:02X} at 0x{pc:02X}")]
    UnknownOpcode { opcode: u8, pc: usize },
    #[error("unsupported ALU operation {0}")]
    UnsupportedOperation(AluOp),
    #[error("register index {0} out of bounds, must be [0, 8)")]
    InvalidRegister(u8),
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CpuError>;
