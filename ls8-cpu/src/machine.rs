use std::io::Write;
use std::path::Path;

use ls8_core::MemoryStats;
use thiserror::Error;

use crate::cpu::Ls8Cpu;
use crate::error::CpuError;
use crate::program::{self, ProgramError, DEFAULT_PROGRAM};

#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Cpu(#[from] CpuError),
    #[error(transparent)]
    Program(#[from] ProgramError),
}

pub type Result<T> = std::result::Result<T, MachineError>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ls8Config {
    /// Log CPU state before every instruction.
    pub trace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub instructions: usize,
    pub memory: MemoryStats,
}

#[derive(Debug)]
pub struct Ls8Machine<W: Write> {
    config: Ls8Config,
    cpu: Ls8Cpu<W>,
}

impl<W: Write> Ls8Machine<W> {
    pub fn new(config: Ls8Config, output: W) -> Self {
        let mut cpu = Ls8Cpu::new(output);
        cpu.set_trace(config.trace);
        Ls8Machine { config, cpu }
    }

    pub fn config(&self) -> &Ls8Config {
        &self.config
    }

    pub fn cpu(&self) -> &Ls8Cpu<W> {
        &self.cpu
    }

    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.cpu.load(program)?;
        Ok(())
    }

    pub fn load_default(&mut self) -> Result<()> {
        tracing::info!("no program given, loading built-in default");
        self.load(&DEFAULT_PROGRAM)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        tracing::info!("loading LS-8 program from '{}'", path.display());
        let program = program::load_program_file(path)?;
        self.load(&program)
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!("starting LS-8 machine");
        let instructions = self.cpu.run()?;
        let summary = RunSummary {
            instructions,
            memory: self.cpu.memory().stats(),
        };
        tracing::info!(
            "halted after {} instructions ({} reads, {} writes)",
            summary.instructions,
            summary.memory.num_reads,
            summary.memory.num_writes
        );
        Ok(summary)
    }

    pub fn into_output(self) -> W {
        self.cpu.into_output()
    }
}
