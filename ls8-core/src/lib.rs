pub mod cpu;
pub mod memory;

pub use crate::cpu::decoder::{DecodeError, DecodeOne};
pub use crate::cpu::opcode::Opcode8;
pub use crate::cpu::Instruction;
pub use crate::memory::{Addressable, Memory, MemoryError, MemoryStats};
