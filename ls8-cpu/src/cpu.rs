use std::fmt::Write as _;
use std::io::Write;

use ls8_core::{DecodeError, DecodeOne, Instruction, Memory, MemoryError};

use crate::alu::{self, AluOp};
use crate::decoder::Ls8Decoder;
use crate::error::{CpuError, Result};
use crate::isa::Ls8Instruction;
use crate::registers::Ls8Registers;
use crate::stack::Ls8Stack;

pub const MEMORY_SIZE: usize = 256;

/// Bytes fetched at PC on every step: the opcode plus up to two operands.
const FETCH_WINDOW: usize = 3;

pub type Ls8Memory = Memory<MEMORY_SIZE>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CpuState {
    Running,
    Halted,
}

#[derive(Debug)]
pub struct Ls8Cpu<W: Write> {
    regs: Ls8Registers,
    memory: Ls8Memory,
    pc: usize,
    state: CpuState,
    decoder: Ls8Decoder,
    output: W,
    trace: bool,
    instructions_executed: usize,
}

impl<W: Write> Ls8Cpu<W> {
    pub fn new(output: W) -> Self {
        Ls8Cpu {
            regs: Ls8Registers::new(),
            memory: Ls8Memory::new(),
            pc: 0,
            state: CpuState::Running,
            decoder: Ls8Decoder::default(),
            output,
            trace: false,
            instructions_executed: 0,
        }
    }

    /// Logs [`Ls8Cpu::trace`] before every instruction when enabled.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load(program)?;
        tracing::info!("loaded {} byte program", program.len());
        Ok(())
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    pub fn registers(&self) -> &Ls8Registers {
        &self.regs
    }

    pub fn memory(&self) -> &Ls8Memory {
        &self.memory
    }

    pub fn instructions_executed(&self) -> usize {
        self.instructions_executed
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// One line of machine state: `TRACE: PC | B0 B1 B2 | R0 .. R7`, where
    /// `B0..B2` are the bytes at PC. Bytes past the end of memory show `--`.
    pub fn trace(&self) -> String {
        let mut line = format!("TRACE: {:02X} |", self.pc);
        for offset in 0..FETCH_WINDOW {
            match self.memory.peek(self.pc + offset) {
                Some(byte) => {
                    let _ = write!(line, " {:02X}", byte);
                }
                None => line.push_str(" --"),
            }
        }
        line.push_str(" |");
        for value in self.regs.as_slice() {
            let _ = write!(line, " {:02X}", value);
        }
        line
    }

    /// Runs until HLT. Returns the number of instructions executed.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<usize> {
        tracing::info!("starting LS-8 CPU at 0x{:02X}", self.pc);
        while let CpuState::Running = self.step()? {}
        self.output.flush()?;
        Ok(self.instructions_executed)
    }

    /// Fetches, decodes and executes a single instruction.
    pub fn step(&mut self) -> Result<CpuState> {
        if self.state == CpuState::Halted {
            return Ok(CpuState::Halted);
        }
        let _span = tracing::trace_span!("step", pc = self.pc).entered();

        if self.trace {
            tracing::trace!("{}", self.trace());
        }

        let window = self.memory.read_window(self.pc, FETCH_WINDOW)?;
        let instruction = self
            .decoder
            .decode_one(&window)
            .map_err(|err| self.decode_error(err))?;
        tracing::debug!("0x{:02X}: {}", self.pc, instruction);

        self.execute(instruction)?;
        self.instructions_executed += 1;
        Ok(self.state)
    }

    fn decode_error(&self, err: DecodeError) -> CpuError {
        match err {
            DecodeError::UnknownOpcode(opcode) => CpuError::UnknownOpcode {
                opcode,
                pc: self.pc,
            },
            DecodeError::Truncated { available, .. } => {
                MemoryError::OutOfBounds(self.pc + available).into()
            }
        }
    }

    fn stack(&mut self) -> Ls8Stack<'_> {
        Ls8Stack::new(self.regs.sp_mut(), &mut self.memory)
    }

    fn execute(&mut self, instruction: Ls8Instruction) -> Result<()> {
        let next_pc = self.pc + instruction.len_bytes();
        let jump_target = match instruction {
            Ls8Instruction::Halt => {
                tracing::info!("halted at 0x{:02X}", self.pc);
                self.state = CpuState::Halted;
                return Ok(());
            }
            Ls8Instruction::LoadImmediate { reg, value } => {
                self.regs.set(reg, value)?;
                None
            }
            Ls8Instruction::Print { reg } => {
                let value = self.regs.get(reg)?;
                writeln!(self.output, "{}", value)?;
                None
            }
            Ls8Instruction::Alu { op, reg_a, reg_b } => {
                self.alu(op, reg_a, reg_b)?;
                None
            }
            // SP is R7, so each step re-reads the register file: PUSH R7
            // stores the decremented SP and POP R7 increments the popped value.
            Ls8Instruction::Push { reg } => {
                self.regs.get(reg)?;
                self.stack().decrement();
                let value = self.regs.get(reg)?;
                self.stack().write_top(value)?;
                None
            }
            Ls8Instruction::Pop { reg } => {
                self.regs.get(reg)?;
                let value = self.stack().read_top()?;
                self.regs.set(reg, value)?;
                self.stack().increment();
                None
            }
            Ls8Instruction::Call { reg } => {
                self.regs.get(reg)?;
                let return_address =
                    u8::try_from(next_pc).map_err(|_| MemoryError::OutOfBounds(next_pc))?;
                self.stack().push(return_address)?;
                let target = self.regs.get(reg)?;
                tracing::debug!("call 0x{:02X}, return to 0x{:02X}", target, return_address);
                Some(target)
            }
            Ls8Instruction::Return => {
                let target = self.stack().pop()?;
                tracing::debug!("return to 0x{:02X}", target);
                Some(target)
            }
        };
        debug_assert_eq!(jump_target.is_some(), instruction.sets_pc());

        self.pc = match jump_target {
            Some(target) => target as usize,
            None => next_pc,
        };
        Ok(())
    }

    fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<()> {
        let a = self.regs.get(reg_a)?;
        let b = self.regs.get(reg_b)?;
        let result = alu::execute(op, a, b)?;
        self.regs.set(reg_a, result)
    }
}
