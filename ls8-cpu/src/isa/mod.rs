//! LS-8 instruction set.
//!
//! Opcode layout: `AABCDDDD`
//!  - `AA`:   number of operand bytes that follow the opcode (0-2)
//!  - `B`:    1 if the instruction is an ALU operation
//!  - `C`:    1 if the instruction sets the PC itself
//!  - `DDDD`: instruction identifier
use ls8_core::Opcode8;

pub mod instruction;

pub use instruction::Ls8Instruction;

pub fn operand_count(opcode: Opcode8) -> usize {
    // Bits 6-7 always fit in the byte, so the field read cannot fail.
    usize::from(opcode.try_get_field(6, 2).unwrap_or_default())
}

pub fn len_bytes(opcode: Opcode8) -> usize {
    1 + operand_count(opcode)
}

pub fn is_alu(opcode: Opcode8) -> bool {
    opcode.get_bit(5) == 1
}

pub fn sets_pc(opcode: Opcode8) -> bool {
    opcode.get_bit(4) == 1
}
