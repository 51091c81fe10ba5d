use std::fmt;

use crate::error::{CpuError, Result};

/// Operations named by ALU-flagged opcodes. Only `Add` and `Mul` execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AluOp {
    Add, // 0xA0
    Sub, // 0xA1
    Mul, // 0xA2
    Div, // 0xA3
    Mod, // 0xA4
    Inc, // 0x65
    Dec, // 0x66
    Cmp, // 0xA7
    And, // 0xA8
    Not, // 0x69
    Or,  // 0xAA
    Xor, // 0xAB
    Shl, // 0xAC
    Shr, // 0xAD
}

impl AluOp {
    pub const ALL: [AluOp; 14] = [
        AluOp::Add,
        AluOp::Sub,
        AluOp::Mul,
        AluOp::Div,
        AluOp::Mod,
        AluOp::Inc,
        AluOp::Dec,
        AluOp::Cmp,
        AluOp::And,
        AluOp::Not,
        AluOp::Or,
        AluOp::Xor,
        AluOp::Shl,
        AluOp::Shr,
    ];

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.opcode() == opcode)
    }

    pub const fn opcode(self) -> u8 {
        match self {
            AluOp::Add => 0b1010_0000,
            AluOp::Sub => 0b1010_0001,
            AluOp::Mul => 0b1010_0010,
            AluOp::Div => 0b1010_0011,
            AluOp::Mod => 0b1010_0100,
            AluOp::Inc => 0b0110_0101,
            AluOp::Dec => 0b0110_0110,
            AluOp::Cmp => 0b1010_0111,
            AluOp::And => 0b1010_1000,
            AluOp::Not => 0b0110_1001,
            AluOp::Or => 0b1010_1010,
            AluOp::Xor => 0b1010_1011,
            AluOp::Shl => 0b1010_1100,
            AluOp::Shr => 0b1010_1101,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::Mul => "MUL",
            AluOp::Div => "DIV",
            AluOp::Mod => "MOD",
            AluOp::Inc => "INC",
            AluOp::Dec => "DEC",
            AluOp::Cmp => "CMP",
            AluOp::And => "AND",
            AluOp::Not => "NOT",
            AluOp::Or => "OR",
            AluOp::Xor => "XOR",
            AluOp::Shl => "SHL",
            AluOp::Shr => "SHR",
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Computes `a OP b` modulo 256.
pub fn execute(op: AluOp, a: u8, b: u8) -> Result<u8> {
    match op {
        AluOp::Add => Ok(a.wrapping_add(b)),
        AluOp::Mul => Ok(a.wrapping_mul(b)),
        other => Err(CpuError::UnsupportedOperation(other)),
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn add_wraps() {
        assert_eq!(execute(AluOp::Add, 2, 3).unwrap(), 5);
        assert_eq!(execute(AluOp::Add, 200, 100).unwrap(), 44);
        assert_eq!(execute(AluOp::Add, 255, 1).unwrap(), 0);
    }

    #[test]
    fn mul_wraps() {
        assert_eq!(execute(AluOp::Mul, 5, 6).unwrap(), 30);
        assert_eq!(execute(AluOp::Mul, 200, 200).unwrap(), 64);
    }

    #[test]
    fn random_operands_reduce_mod_256() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a: u8 = rng.gen();
            let b: u8 = rng.gen();
            let sum = (a as u32 + b as u32) % 256;
            let product = (a as u32 * b as u32) % 256;
            assert_eq!(execute(AluOp::Add, a, b).unwrap() as u32, sum);
            assert_eq!(execute(AluOp::Mul, a, b).unwrap() as u32, product);
        }
    }

    #[test]
    fn other_operations_are_unsupported() {
        for op in AluOp::ALL {
            if matches!(op, AluOp::Add | AluOp::Mul) {
                continue;
            }
            let result = execute(op, 1, 1);
            assert!(matches!(result, Err(CpuError::UnsupportedOperation(o)) if o == op));
        }
    }

    #[test]
    fn opcodes_round_trip_and_carry_alu_flag() {
        for op in AluOp::ALL {
            assert_eq!(AluOp::from_opcode(op.opcode()), Some(op));
            assert_eq!(op.opcode() & 0b0010_0000, 0b0010_0000, "{}", op);
        }
        assert_eq!(AluOp::from_opcode(0xAE), None);
        assert_eq!(AluOp::from_opcode(0x82), None);
    }
}
