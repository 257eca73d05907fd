use lazy_static::lazy_static;

/// Number of operand bytes an instruction fetches after its opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandWidth {
    None,
    Byte,
    Word,
}

impl OperandWidth {
    #[inline]
    pub fn bytes(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Byte => 1,
            Self::Word => 2,
        }
    }
}

/// How the program counter advances after an instruction executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcMode {
    /// PC moves past the opcode and its operand bytes.
    Next,
    /// PC is replaced by the 16-bit operand (absolute control transfer).
    Jump,
}

/// Semantics selector for a decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    JpA16,
    XorA,
    LdHlD16,
}

/// Descriptor for one entry of the opcode table.
///
/// The table is the single source of truth for the instruction set: each
/// entry fixes the operand width, the semantics selector the CPU matches
/// on, and the PC-advance rule. Extending the instruction set means adding
/// table rows and `Op` variants, not new decode branches.
#[derive(Clone, Copy, Debug)]
pub struct Instruction {
    pub op: Op,
    pub mnemonic: &'static str,
    pub width: OperandWidth,
    pub pc: PcMode,
}

lazy_static! {
    static ref OPCODES: [Option<Instruction>; 256] = build_table();
}

fn build_table() -> [Option<Instruction>; 256] {
    let mut table: [Option<Instruction>; 256] = [None; 256];

    table[0x00] = Some(Instruction {
        op: Op::Nop,
        mnemonic: "NOP",
        width: OperandWidth::None,
        pc: PcMode::Next,
    });
    table[0x21] = Some(Instruction {
        op: Op::LdHlD16,
        mnemonic: "LD HL,d16",
        width: OperandWidth::Word,
        pc: PcMode::Next,
    });
    table[0xAF] = Some(Instruction {
        op: Op::XorA,
        mnemonic: "XOR A",
        width: OperandWidth::None,
        pc: PcMode::Next,
    });
    table[0xC3] = Some(Instruction {
        op: Op::JpA16,
        mnemonic: "JP a16",
        width: OperandWidth::Word,
        pc: PcMode::Jump,
    });

    table
}

/// Look up the table entry for an opcode byte.
///
/// Opcodes absent from the table decode to `None`; the CPU turns that into
/// a fatal `UnsupportedOpcode` error rather than skipping the byte.
#[inline]
pub fn decode(opcode: u8) -> Option<&'static Instruction> {
    OPCODES[opcode as usize].as_ref()
}
