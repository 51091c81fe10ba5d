use std::fmt;

use ls8_core::Addressable;

use crate::cpu::Ls8Memory;
use crate::error::Result;

/// Full descending stack: the stack pointer always addresses the most
/// recently pushed byte. Push decrements then writes; pop reads then
/// increments.
pub struct Ls8Stack<'a> {
    stack_pointer: &'a mut u8,
    memory: &'a mut Ls8Memory,
}

impl fmt::Debug for Ls8Stack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LS-8 Stack")
            .field("stack_pointer", &format_args!("0x{:02X}", self.stack_pointer))
            .finish()
    }
}

impl<'a> Ls8Stack<'a> {
    pub fn new(stack_pointer: &'a mut u8, memory: &'a mut Ls8Memory) -> Self {
        Ls8Stack {
            stack_pointer,
            memory,
        }
    }

    pub fn push(&mut self, value: u8) -> Result<()> {
        self.decrement();
        self.write_top(value)
    }

    pub fn pop(&mut self) -> Result<u8> {
        let value = self.read_top()?;
        self.increment();
        Ok(value)
    }

    /// Moves the stack pointer down one slot without writing.
    pub fn decrement(&mut self) {
        *self.stack_pointer = self.stack_pointer.wrapping_sub(1);
    }

    /// Moves the stack pointer up one slot without reading.
    pub fn increment(&mut self) {
        *self.stack_pointer = self.stack_pointer.wrapping_add(1);
    }

    pub fn write_top(&mut self, value: u8) -> Result<()> {
        self.memory.write_u8(*self.stack_pointer as usize, value)?;
        Ok(())
    }

    pub fn read_top(&self) -> Result<u8> {
        Ok(self.memory.read_u8(*self.stack_pointer as usize)?)
    }
}
