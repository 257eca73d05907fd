use std::fmt;

use crate::MEMORY_SIZE;

/// Abstraction over the Game Boy bus (memory and IO).
///
/// We keep this intentionally small; it may later grow to include separate
/// methods for VRAM, IO registers, and cartridge space.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Read a little-endian 16-bit word from `addr` and `addr + 1`.
    ///
    /// Callers are responsible for ensuring `addr + 1` does not pass the top
    /// of the address space; the CPU checks this before fetching a 16-bit
    /// immediate.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr) as u16;
        let hi = self.read8(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Error raised when a program image cannot be placed into memory.
#[derive(Debug)]
pub enum ImageError {
    /// The image is larger than the 64 KiB address space.
    TooLarge { len: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { len } => write!(
                f,
                "program image of {} bytes does not fit in {} bytes of memory",
                len, MEMORY_SIZE,
            ),
        }
    }
}

impl std::error::Error for ImageError {}

/// Flat 64 KiB address space.
///
/// Every 16-bit address is readable and writable; the address type itself
/// rules out out-of-range accesses.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Create a zero-filled address space.
    pub fn new() -> Self {
        Self {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Create an address space initialized from a program image.
    ///
    /// The image is copied verbatim into the low addresses; the unused tail
    /// stays zero-filled. Images larger than the address space are a
    /// configuration error and are rejected.
    pub fn from_image(image: &[u8]) -> Result<Self, ImageError> {
        let mut memory = Self::new();
        memory.load_image(image)?;
        Ok(memory)
    }

    /// Copy a program image into the low addresses, zeroing the rest.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), ImageError> {
        if image.len() > MEMORY_SIZE {
            return Err(ImageError::TooLarge { len: image.len() });
        }
        log::info!("loading {} byte program image", image.len());
        self.bytes.fill(0);
        self.bytes[..image.len()].copy_from_slice(image);
        Ok(())
    }
}

impl Bus for Memory {
    fn read8(&mut self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}
