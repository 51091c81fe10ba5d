use crate::error::{CpuError, Result};

pub const NUM_REGISTERS: usize = 8;

/// Register 7 holds the stack pointer.
pub const SP: u8 = 7;

/// The stack starts just below the reserved top of memory and grows down.
pub const SP_INITIAL: u8 = 0xF4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ls8Registers {
    slots: [u8; NUM_REGISTERS],
}

impl Default for Ls8Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Ls8Registers {
    pub fn new() -> Self {
        let mut slots = [0; NUM_REGISTERS];
        slots[SP as usize] = SP_INITIAL;
        Ls8Registers { slots }
    }

    pub fn get(&self, idx: u8) -> Result<u8> {
        self.slots
            .get(idx as usize)
            .copied()
            .ok_or(CpuError::InvalidRegister(idx))
    }

    pub fn set(&mut self, idx: u8, value: u8) -> Result<()> {
        let slot = self
            .slots
            .get_mut(idx as usize)
            .ok_or(CpuError::InvalidRegister(idx))?;
        *slot = value;
        Ok(())
    }

    pub fn sp(&self) -> u8 {
        self.slots[SP as usize]
    }

    pub(crate) fn sp_mut(&mut self) -> &mut u8 {
        &mut self.slots[SP as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.slots
    }
}
