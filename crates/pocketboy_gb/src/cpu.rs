pub mod opcodes;
mod regs;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::memory::Bus;
use crate::ENTRY_POINT;

use opcodes::{Op, OperandWidth, PcMode};
pub use regs::{Flag, Registers};

/// Error that terminates the execution loop.
///
/// Every variant carries the program counter at the time of the fault so
/// the caller can reproduce it. A failed cycle applies no state changes:
/// registers and memory are exactly as they were when the cycle began.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The byte at PC is not present in the opcode table.
    UnsupportedOpcode { opcode: u8, pc: u16 },
    /// An operand fetch or a sequential PC advance would run past the top
    /// of the address space.
    AddressRange { pc: u16 },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOpcode { opcode, pc } => {
                write!(f, "unsupported opcode 0x{opcode:02X} at PC=0x{pc:04X}")
            }
            Self::AddressRange { pc } => {
                write!(
                    f,
                    "execution ran past the top of the address space at PC=0x{pc:04X}"
                )
            }
        }
    }
}

impl std::error::Error for StepError {}

/// Game Boy CPU core.
///
/// Owns the register file; memory is borrowed per step through the [`Bus`]
/// trait, so the CPU is the sole mutator of both for the duration of a run.
#[derive(Clone, Copy, Debug)]
pub struct Cpu {
    pub regs: Registers,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Create a CPU with zeroed registers and PC at the entry point.
    pub fn new() -> Self {
        let mut regs = Registers::default();
        regs.pc = ENTRY_POINT;
        Self { regs }
    }

    /// Reset the CPU to its power-on state.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.regs.pc = ENTRY_POINT;
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.regs.f |= 1 << bit;
        } else {
            self.regs.f &= !(1 << bit);
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    #[inline]
    fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        // N, H, and C are already cleared.
    }

    /// Run a single fetch-decode-execute cycle.
    ///
    /// All failure conditions are detected before any register or memory
    /// write, so an `Err` leaves the machine in the state it had when the
    /// cycle started.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let pc = self.regs.pc;
        let opcode = bus.read8(pc);

        let instr = opcodes::decode(opcode).ok_or_else(|| {
            log::error!(
                "unsupported opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                sp = self.regs.sp,
                af = self.regs.af(),
                bc = self.regs.bc(),
                de = self.regs.de(),
                hl = self.regs.hl(),
            );
            StepError::UnsupportedOpcode { opcode, pc }
        })?;

        // The last operand byte sits at PC + width; reject instructions
        // whose encoding would extend past 0xFFFF instead of wrapping.
        pc.checked_add(instr.width.bytes())
            .ok_or(StepError::AddressRange { pc })?;

        let operand = match instr.width {
            OperandWidth::None => 0,
            OperandWidth::Byte => bus.read8(pc.wrapping_add(1)) as u16,
            OperandWidth::Word => bus.read16(pc.wrapping_add(1)),
        };

        // Decide where PC lands before applying any effect, so a fault at
        // the top of memory cannot leave a half-executed cycle behind.
        let next_pc = match instr.pc {
            PcMode::Next => pc
                .checked_add(1 + instr.width.bytes())
                .ok_or(StepError::AddressRange { pc })?,
            PcMode::Jump => operand,
        };

        log::trace!("0x{pc:04X}: {}", instr.mnemonic);

        match instr.op {
            Op::Nop => {}
            Op::JpA16 => {}
            Op::XorA => self.alu_xor(self.regs.a),
            Op::LdHlD16 => self.regs.set_hl(operand),
        }

        self.regs.pc = next_pc;
        Ok(())
    }
}
