use crate::cpu::{Cpu, StepError};
use crate::memory::{ImageError, Memory};

/// High-level Game Boy machine.
///
/// Owns the CPU core and the flat address space. The CPU is the sole
/// mutator of both for the whole run, so no locking is needed anywhere.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) memory: Memory,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(),
        }
    }

    /// Build a machine with the given program image already in memory.
    pub fn from_image(image: &[u8]) -> Result<Self, ImageError> {
        Ok(Self {
            cpu: Cpu::new(),
            memory: Memory::from_image(image)?,
        })
    }

    /// Load a ROM image into the low addresses of memory.
    ///
    /// PC is already at 0x0100, where cartridge code begins.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), ImageError> {
        self.memory.load_image(rom)
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
        self.memory = Memory::new();
    }

    /// Execute a single instruction.
    pub fn step(&mut self) -> Result<(), StepError> {
        self.cpu.step(&mut self.memory)
    }

    /// Run fetch-decode-execute cycles until one fails.
    ///
    /// The instruction set in scope has no halt, so the loop has no normal
    /// exit; the returned value is always the error that stopped it.
    pub fn run(&mut self) -> Result<(), StepError> {
        loop {
            self.step()?;
        }
    }
}
