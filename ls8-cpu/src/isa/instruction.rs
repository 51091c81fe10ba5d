use std::fmt;

use ls8_core::{Instruction, Opcode8};

use crate::alu::AluOp;
use crate::isa;

pub const HLT: u8 = 0b0000_0001;
pub const LDI: u8 = 0b1000_0010;
pub const PRN: u8 = 0b0100_0111;
pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;
pub const CALL: u8 = 0b0101_0000;
pub const RET: u8 = 0b0001_0001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ls8Instruction {
    Halt, // HLT
    LoadImmediate {
        reg: u8,
        value: u8,
    }, // LDI reg, value
    Print {
        reg: u8,
    }, // PRN reg
    Alu {
        op: AluOp,
        reg_a: u8,
        reg_b: u8,
    }, // ADD/MUL/... reg_a, reg_b
    Push {
        reg: u8,
    }, // PUSH reg
    Pop {
        reg: u8,
    }, // POP reg
    Call {
        reg: u8,
    }, // CALL reg
    Return, // RET
}

impl Ls8Instruction {
    pub fn opcode(&self) -> Opcode8 {
        let value = match self {
            Ls8Instruction::Halt => HLT,
            Ls8Instruction::LoadImmediate { .. } => LDI,
            Ls8Instruction::Print { .. } => PRN,
            Ls8Instruction::Alu { op, .. } => op.opcode(),
            Ls8Instruction::Push { .. } => PUSH,
            Ls8Instruction::Pop { .. } => POP,
            Ls8Instruction::Call { .. } => CALL,
            Ls8Instruction::Return => RET,
        };
        Opcode8::new(value)
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Ls8Instruction::Halt => "HLT",
            Ls8Instruction::LoadImmediate { .. } => "LDI",
            Ls8Instruction::Print { .. } => "PRN",
            Ls8Instruction::Alu { op, .. } => op.mnemonic(),
            Ls8Instruction::Push { .. } => "PUSH",
            Ls8Instruction::Pop { .. } => "POP",
            Ls8Instruction::Call { .. } => "CALL",
            Ls8Instruction::Return => "RET",
        }
    }

    pub fn sets_pc(&self) -> bool {
        isa::sets_pc(self.opcode())
    }
}

impl Instruction for Ls8Instruction {
    fn len_bytes(&self) -> usize {
        isa::len_bytes(self.opcode())
    }
}

impl fmt::Display for Ls8Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.mnemonic();
        match self {
            Ls8Instruction::Halt | Ls8Instruction::Return => f.write_str(mnemonic),
            Ls8Instruction::LoadImmediate { reg, value } => {
                write!(f, "{} R{}, {}", mnemonic, reg, value)
            }
            Ls8Instruction::Alu { op, reg_a, reg_b } => {
                if isa::operand_count(Opcode8::new(op.opcode())) == 2 {
                    write!(f, "{} R{}, R{}", mnemonic, reg_a, reg_b)
                } else {
                    write!(f, "{} R{}", mnemonic, reg_a)
                }
            }
            Ls8Instruction::Print { reg }
            | Ls8Instruction::Push { reg }
            | Ls8Instruction::Pop { reg }
            | Ls8Instruction::Call { reg } => write!(f, "{} R{}", mnemonic, reg),
        }
    }
}
