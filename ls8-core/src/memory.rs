use std::cell::Cell;
use std::fmt;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Hash)]
pub enum MemoryError {
    #[error("address 0x{0:04X} is out of bounds")]
    OutOfBounds(usize),
    #[error("program of {len} bytes does not fit in {capacity} bytes of memory")]
    ProgramTooLarge { len: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, MemoryError>;

pub trait Addressable {
    fn read(&self, address: usize, length: usize) -> Result<Bytes>;
    fn write(&mut self, address: usize, data: &[u8]) -> Result<()>;

    fn read_u8(&self, address: usize) -> Result<u8> {
        let bytes = self.read(address, 1)?;
        Ok(bytes[0])
    }

    fn write_u8(&mut self, address: usize, value: u8) -> Result<()> {
        self.write(address, &[value])
    }
}

/// Access counters for a [`Memory`]. Loading a program is not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub bytes_read: usize,
    pub bytes_written: usize,
    pub num_reads: usize,
    pub num_writes: usize,
}

/// Flat, zero-initialized byte memory of `N` cells.
pub struct Memory<const N: usize> {
    buffer: [u8; N],
    stats: Cell<MemoryStats>,
}

impl<const N: usize> fmt::Debug for Memory<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("capacity", &N)
            .field("stats", &self.stats.get())
            .finish()
    }
}

impl<const N: usize> Default for Memory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Addressable for Memory<N> {
    fn read(&self, address: usize, length: usize) -> Result<Bytes> {
        let end = Self::checked_end(address, length)?;
        self.record_read(length);
        Ok(Bytes::copy_from_slice(&self.buffer[address..end]))
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<()> {
        let end = Self::checked_end(address, data.len())?;
        self.buffer[address..end].copy_from_slice(data);
        let mut stats = self.stats.get();
        stats.bytes_written += data.len();
        stats.num_writes += 1;
        self.stats.set(stats);
        Ok(())
    }
}

impl<const N: usize> Memory<N> {
    pub fn new() -> Self {
        Self {
            buffer: [0; N],
            stats: Cell::new(MemoryStats::default()),
        }
    }

    /// Reads up to `length` bytes starting at `address`, stopping early at
    /// the end of memory. Only `address` itself has to be in range.
    pub fn read_window(&self, address: usize, length: usize) -> Result<Bytes> {
        if address >= N {
            return Err(MemoryError::OutOfBounds(address));
        }
        let end = N.min(address.saturating_add(length));
        self.record_read(end - address);
        Ok(Bytes::copy_from_slice(&self.buffer[address..end]))
    }

    /// Reads a byte without touching the access counters.
    pub fn peek(&self, address: usize) -> Option<u8> {
        self.buffer.get(address).copied()
    }

    /// Copies `program` into memory starting at address 0.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > N {
            return Err(MemoryError::ProgramTooLarge {
                len: program.len(),
                capacity: N,
            });
        }
        self.buffer[..program.len()].copy_from_slice(program);
        tracing::debug!("loaded {} bytes at 0x0000", program.len());
        Ok(())
    }

    pub fn stats(&self) -> MemoryStats {
        self.stats.get()
    }

    fn checked_end(address: usize, length: usize) -> Result<usize> {
        if address >= N {
            return Err(MemoryError::OutOfBounds(address));
        }
        match address.checked_add(length) {
            Some(end) if end <= N => Ok(end),
            _ => Err(MemoryError::OutOfBounds(N)),
        }
    }

    fn record_read(&self, length: usize) {
        let mut stats = self.stats.get();
        stats.bytes_read += length;
        stats.num_reads += 1;
        self.stats.set(stats);
    }
}
