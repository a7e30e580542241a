//! Integration tests for the ISA tables and memory layout

use proptest::prelude::*;
use toy32_spec::{
    Instruction, IsaError, LayoutError, MemoryLayout, Opcode, OpcodeClass, Register, Segment,
    ENTRY_CALL_LEN, WORD_SIZE,
};

// ============================================================================
// Opcode Table
// ============================================================================

#[test]
fn test_opcode_bytes() {
    let table = [
        (Opcode::Mov, 0x01),
        (Opcode::MovImm, 0x02),
        (Opcode::Load, 0x03),
        (Opcode::Store, 0x04),
        (Opcode::Add, 0x10),
        (Opcode::Sub, 0x11),
        (Opcode::Mul, 0x12),
        (Opcode::Div, 0x13),
        (Opcode::And, 0x20),
        (Opcode::Or, 0x21),
        (Opcode::Xor, 0x22),
        (Opcode::Not, 0x23),
        (Opcode::Jmp, 0x30),
        (Opcode::Jz, 0x31),
        (Opcode::Jnz, 0x32),
        (Opcode::Call, 0x33),
        (Opcode::Ret, 0x34),
        (Opcode::Push, 0x40),
        (Opcode::Pop, 0x41),
    ];
    assert_eq!(table.len(), Opcode::ALL.len());
    for (op, byte) in table {
        assert_eq!(op.to_u8(), byte, "{}", op);
    }
}

#[test]
fn test_every_class_has_fixed_length() {
    for op in Opcode::ALL {
        let expected = match op.class() {
            OpcodeClass::RegisterWide | OpcodeClass::Jump => 8,
            _ => 4,
        };
        assert_eq!(op.encoded_len(), expected, "{:?}", op);
    }
    assert_eq!(Opcode::Call.encoded_len(), ENTRY_CALL_LEN);
}

#[test]
fn test_register_ids() {
    let names = ["EAX", "EBX", "ECX", "EDX", "ESI", "EDI", "ESP", "EBP", "IP", "ZF"];
    for (id, name) in names.iter().enumerate() {
        let reg: Register = name.parse().unwrap();
        assert_eq!(reg.to_u8() as usize, id);
        assert_eq!(reg.to_string(), *name);
    }
    assert_eq!(
        "R9".parse::<Register>(),
        Err(IsaError::UnknownRegisterName("R9".to_string()))
    );
}

#[test]
fn test_instruction_opcode_and_length_agree() {
    let instr = Instruction::Store {
        address: 4,
        reg: Register::Eax,
    };
    assert_eq!(instr.opcode(), Opcode::Store);
    assert_eq!(instr.encoded_len(), 8);
    assert!(instr.target().is_none());
}

// ============================================================================
// Memory Layout
// ============================================================================

#[test]
fn test_default_layout() {
    let layout = MemoryLayout::default();
    assert_eq!(layout.program(), Segment::new(0, 1024));
    assert_eq!(layout.data(), Segment::new(1024, 2048));
    assert_eq!(layout.stack(), Segment::new(2048, 3072));
    assert_eq!(layout.total_size(), 3072);
}

#[test]
fn test_layout_validation() {
    assert!(matches!(
        MemoryLayout::new(1024, 0, 1024),
        Err(LayoutError::EmptySegment { segment: "data" })
    ));
    assert!(matches!(
        MemoryLayout::new(1024, 1024, 1022),
        Err(LayoutError::UnalignedSegment { segment: "stack", size: 1022 })
    ));
    assert!(matches!(
        MemoryLayout::new(4, 4, 4),
        Err(LayoutError::ProgramTooSmall { size: 4 })
    ));
    assert!(matches!(
        MemoryLayout::new(u32::MAX - 3, 4, 4),
        Err(LayoutError::TooLarge { .. })
    ));
}

proptest! {
    #[test]
    fn prop_segments_are_disjoint_and_tile(p in 2u32..1000, d in 1u32..1000, s in 1u32..1000) {
        let layout = MemoryLayout::new(p * WORD_SIZE, d * WORD_SIZE, s * WORD_SIZE).unwrap();
        let (prog, data, stack) = (layout.program(), layout.data(), layout.stack());

        prop_assert_eq!(prog.start, 0);
        prop_assert_eq!(prog.end, data.start);
        prop_assert_eq!(data.end, stack.start);
        prop_assert_eq!(stack.end, layout.total_size());
        prop_assert_eq!(prog.size() + data.size() + stack.size(), layout.total_size());
    }
}
