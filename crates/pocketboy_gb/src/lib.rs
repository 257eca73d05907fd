pub mod cpu;
pub mod machine;
pub mod memory;

pub use cpu::{Cpu, StepError};
pub use machine::GameBoy;
pub use memory::{Bus, ImageError, Memory};

/// Size of the flat Game Boy address space in bytes.
pub const MEMORY_SIZE: usize = 0x10000;
/// Address at which execution starts, matching the point where the DMG boot
/// ROM hands control to cartridge code.
pub const ENTRY_POINT: u16 = 0x0100;
