use ls8_core::cpu::decoder::{DecodeError, DecodeOne, Result};
use ls8_core::Opcode8;

use crate::alu::AluOp;
use crate::isa::instruction::{Ls8Instruction, CALL, HLT, LDI, POP, PRN, PUSH, RET};
use crate::isa;

#[derive(Clone, Copy, Debug, Default)]
pub struct Ls8Decoder {}

impl DecodeOne for Ls8Decoder {
    type Instruction = Ls8Instruction;

    /// Decodes the instruction at the start of `bytes`. Trailing bytes the
    /// instruction does not use are ignored.
    fn decode_one(&self, bytes: &[u8]) -> Result<Self::Instruction> {
        let first = bytes.first().ok_or(DecodeError::Truncated {
            needed: 1,
            available: 0,
        })?;
        let opcode = Opcode8::new(*first);
        let needed = isa::len_bytes(opcode);
        let operand = |idx: usize| {
            bytes.get(idx).copied().ok_or(DecodeError::Truncated {
                needed,
                available: bytes.len(),
            })
        };

        let ins = match opcode.value() {
            HLT => Ls8Instruction::Halt,
            LDI => Ls8Instruction::LoadImmediate {
                reg: operand(1)?,
                value: operand(2)?,
            },
            PRN => Ls8Instruction::Print { reg: operand(1)? },
            PUSH => Ls8Instruction::Push { reg: operand(1)? },
            POP => Ls8Instruction::Pop { reg: operand(1)? },
            CALL => Ls8Instruction::Call { reg: operand(1)? },
            RET => Ls8Instruction::Return,
            value if isa::is_alu(opcode) => {
                let op = AluOp::from_opcode(value).ok_or(DecodeError::UnknownOpcode(value))?;
                let reg_a = operand(1)?;
                let reg_b = match isa::operand_count(opcode) {
                    2 => operand(2)?,
                    _ => 0,
                };
                Ls8Instruction::Alu { op, reg_a, reg_b }
            }
            value => Err(DecodeError::UnknownOpcode(value))?,
        };
        Ok(ins)
    }
}
