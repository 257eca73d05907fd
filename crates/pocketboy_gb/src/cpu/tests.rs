use super::*;
use crate::memory::{Bus, Memory};

/// CPU plus a memory image whose bytes start at the current PC.
fn cpu_with_program(pc: u16, program: &[u8]) -> (Cpu, Memory) {
    let mut cpu = Cpu::new();
    cpu.regs.pc = pc;
    let mut memory = Memory::new();
    for (i, byte) in program.iter().enumerate() {
        memory.write8(pc.wrapping_add(i as u16), *byte);
    }
    (cpu, memory)
}

#[test]
fn new_cpu_is_zeroed_with_pc_at_entry_point() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.pc, crate::ENTRY_POINT);
    let zeroed = Registers {
        pc: crate::ENTRY_POINT,
        ..Registers::default()
    };
    assert_eq!(cpu.regs, zeroed);
}

#[test]
fn register_pairs_round_trip() {
    let mut regs = Registers::default();
    for v in [0x0000u16, 0x0001, 0x00FF, 0x0100, 0x1234, 0xABCD, 0xFFFF] {
        regs.set_hl(v);
        assert_eq!(regs.hl(), v);
        assert_eq!(regs.h, (v >> 8) as u8);
        assert_eq!(regs.l, (v & 0xFF) as u8);

        regs.set_bc(v);
        assert_eq!(regs.bc(), v);
        regs.set_de(v);
        assert_eq!(regs.de(), v);
    }
}

#[test]
fn af_pair_masks_low_flag_bits() {
    let mut regs = Registers::default();
    regs.set_af(0x12FF);
    assert_eq!(regs.a, 0x12);
    // Lower 4 bits of F always read back as zero.
    assert_eq!(regs.f, 0xF0);
    assert_eq!(regs.af(), 0x12F0);
}

#[test]
fn pair_views_do_not_touch_flags() {
    let mut cpu = Cpu::new();
    cpu.regs.f = 0xB0;
    cpu.regs.set_hl(0xBEEF);
    cpu.regs.set_bc(0xCAFE);
    cpu.regs.set_de(0xF00D);
    assert_eq!(cpu.regs.f, 0xB0);
}

#[test]
fn decode_is_deterministic() {
    for opcode in 0..=0xFFu8 {
        let first = opcodes::decode(opcode);
        let second = opcodes::decode(opcode);
        match (first, second) {
            (Some(a), Some(b)) => {
                assert_eq!(a.op, b.op);
                assert_eq!(a.width, b.width);
                assert_eq!(a.pc, b.pc);
            }
            (None, None) => {}
            _ => panic!("decode of 0x{opcode:02X} is not deterministic"),
        }
    }
}

#[test]
fn nop_only_advances_pc() {
    let (mut cpu, mut memory) = cpu_with_program(0x0200, &[0x00]);
    cpu.regs.a = 0x42;
    cpu.regs.f = 0xB0;
    cpu.regs.sp = 0xFFFE;
    let before = cpu.regs;

    cpu.step(&mut memory).unwrap();

    assert_eq!(cpu.regs.pc, 0x0201);
    let expected = Registers {
        pc: 0x0201,
        ..before
    };
    assert_eq!(cpu.regs, expected);
}

#[test]
fn jp_sets_pc_to_immediate_target() {
    for from in [0x0100u16, 0x0200, 0x4000] {
        let (mut cpu, mut memory) = cpu_with_program(from, &[0xC3, 0xCD, 0xAB]);
        cpu.regs.f = 0x50;
        let before = cpu.regs;

        cpu.step(&mut memory).unwrap();

        // Target is independent of where the jump executed from, and no
        // register or flag is touched.
        assert_eq!(cpu.regs.pc, 0xABCD);
        let expected = Registers {
            pc: 0xABCD,
            ..before
        };
        assert_eq!(cpu.regs, expected);
    }
}

#[test]
fn xor_a_zeroes_a_and_rewrites_all_flags() {
    for a in [0x00u8, 0x01, 0x5A, 0xFF] {
        let (mut cpu, mut memory) = cpu_with_program(0x0100, &[0xAF]);
        cpu.regs.a = a;
        // Pre-set every flag to prove each one is rewritten.
        cpu.regs.f = 0xF0;

        cpu.step(&mut memory).unwrap();

        assert_eq!(cpu.regs.a, 0);
        assert!(cpu.get_flag(Flag::Z));
        assert!(!cpu.get_flag(Flag::N));
        assert!(!cpu.get_flag(Flag::H));
        assert!(!cpu.get_flag(Flag::C));
        assert_eq!(cpu.regs.pc, 0x0101);
    }
}

#[test]
fn ld_hl_d16_loads_pair_and_leaves_flags_alone() {
    let (mut cpu, mut memory) = cpu_with_program(0x0100, &[0x21, 0x34, 0x12]);
    cpu.regs.f = 0xB0;

    cpu.step(&mut memory).unwrap();

    assert_eq!(cpu.regs.hl(), 0x1234);
    assert_eq!(cpu.regs.h, 0x12);
    assert_eq!(cpu.regs.l, 0x34);
    assert_eq!(cpu.regs.f, 0xB0);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn unsupported_opcode_reports_opcode_and_pc_without_mutation() {
    let (mut cpu, mut memory) = cpu_with_program(0x0150, &[0xFF]);
    cpu.regs.a = 0x42;
    cpu.regs.f = 0x80;
    let before = cpu.regs;

    let err = cpu.step(&mut memory).unwrap_err();

    assert_eq!(
        err,
        StepError::UnsupportedOpcode {
            opcode: 0xFF,
            pc: 0x0150,
        }
    );
    assert_eq!(cpu.regs, before);
    assert_eq!(memory.read8(0x0150), 0xFF);
}

#[test]
fn operand_fetch_past_top_of_memory_faults() {
    // LD HL,d16 at 0xFFFE would need operand bytes at 0xFFFF and 0x10000.
    let (mut cpu, mut memory) = cpu_with_program(0xFFFE, &[0x21]);
    let before = cpu.regs;

    let err = cpu.step(&mut memory).unwrap_err();

    assert_eq!(err, StepError::AddressRange { pc: 0xFFFE });
    assert_eq!(cpu.regs, before);
}

#[test]
fn sequential_advance_past_top_of_memory_faults() {
    let (mut cpu, mut memory) = cpu_with_program(0xFFFF, &[0x00]);

    let err = cpu.step(&mut memory).unwrap_err();

    assert_eq!(err, StepError::AddressRange { pc: 0xFFFF });
    assert_eq!(cpu.regs.pc, 0xFFFF);
}

#[test]
fn jump_at_top_of_memory_is_still_valid() {
    // The jump's operand bytes end exactly at 0xFFFF and the new PC comes
    // from the operand, so nothing here runs out of range.
    let (mut cpu, mut memory) = cpu_with_program(0xFFFD, &[0xC3, 0x00, 0x01]);

    cpu.step(&mut memory).unwrap();

    assert_eq!(cpu.regs.pc, 0x0100);
}
