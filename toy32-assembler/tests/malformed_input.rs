//! Tests for malformed input handling in the assembler

use toy32_assembler::{assemble, AssemblerError};

// ============================================================================
// Invalid Instruction Tests
// ============================================================================

#[test]
fn test_unknown_instruction() {
    let result = assemble(".start\nHALT\n");
    if let Err(AssemblerError::UnknownInstruction { line, instruction }) = result {
        assert_eq!(line, 2);
        assert_eq!(instruction, "HALT");
    } else {
        panic!("Expected UnknownInstruction error");
    }
}

#[test]
fn test_instruction_typo() {
    // typo: ADDD instead of ADD
    assert!(assemble(".start\nADDD EAX EBX\n").is_err());
}

#[test]
fn test_unknown_register_is_undefined_symbol() {
    assert!(matches!(
        assemble(".start\nPUSH R1\n"),
        Err(AssemblerError::UndefinedSymbol { line: 2, .. })
    ));
}

#[test]
fn test_bad_character() {
    assert!(matches!(
        assemble(".start\nMOV EAX, $1\n"),
        Err(AssemblerError::SyntaxError { line: 2, .. })
    ));
}

// ============================================================================
// Invalid Operand Tests
// ============================================================================

#[test]
fn test_alu_missing_operands() {
    assert!(matches!(
        assemble(".start\nADD EAX\n"),
        Err(AssemblerError::InvalidOperands { line: 2, .. })
    ));
}

#[test]
fn test_alu_immediate_rejected() {
    assert!(matches!(
        assemble(".start\nADD EAX 5\n"),
        Err(AssemblerError::InvalidOperands { .. })
    ));
}

#[test]
fn test_ret_with_operand() {
    assert!(assemble(".start\nRET EAX\n").is_err());
}

#[test]
fn test_jump_to_register() {
    assert!(assemble(".start\nJMP EAX\n").is_err());
}

#[test]
fn test_mov_immediate_destination() {
    assert!(assemble(".start\nMOV 5 EAX\n").is_err());
}

#[test]
fn test_immediate_out_of_range() {
    assert!(matches!(
        assemble(".start\nMOV EAX 4294967296\n"),
        Err(AssemblerError::InvalidImmediate { line: 2, .. })
    ));
    assert!(assemble(".start\nMOV EAX 4294967295\n").is_ok());
    assert!(assemble(".start\nMOV EAX -2147483648\n").is_ok());
}

// ============================================================================
// Data Section Tests
// ============================================================================

#[test]
fn test_malformed_assignment() {
    assert!(matches!(
        assemble(".data\nx = \n.start\n"),
        Err(AssemblerError::InvalidDataDefinition { line: 2, .. })
    ));
    assert!(assemble(".data\nx = y\n.start\n").is_err());
    assert!(assemble(".data\nx 5\n.start\n").is_err());
}

#[test]
fn test_duplicate_constant() {
    assert!(matches!(
        assemble(".data\nx = 1\nx = 2\n.start\n"),
        Err(AssemblerError::DuplicateSymbol { line: 3, .. })
    ));
}

#[test]
fn test_constant_named_after_register() {
    assert!(matches!(
        assemble(".data\nesp = 1\n.start\n"),
        Err(AssemblerError::ReservedName { line: 2, .. })
    ));
}

// ============================================================================
// Label Tests
// ============================================================================

#[test]
fn test_forward_call_rejected() {
    let source = ".start\nCALL helper\n.helper\nRET\n";
    match assemble(source) {
        Err(AssemblerError::UndefinedSymbol { line, name }) => {
            assert_eq!(line, 2);
            assert_eq!(name, "helper");
        }
        other => panic!("Expected UndefinedSymbol, got {:?}", other),
    }
}

#[test]
fn test_duplicate_label() {
    assert!(matches!(
        assemble(".f\nRET\n.f\nRET\n.start\n"),
        Err(AssemblerError::DuplicateLabel { line: 3, .. })
    ));
    assert!(matches!(
        assemble(".start\n.start\n"),
        Err(AssemblerError::DuplicateLabel { line: 2, .. })
    ));
}

#[test]
fn test_missing_entry_point() {
    assert!(matches!(assemble(""), Err(AssemblerError::MissingEntryPoint)));
    assert!(matches!(
        assemble(".data\nx = 1\n"),
        Err(AssemblerError::MissingEntryPoint)
    ));
}

#[test]
fn test_error_reports_line() {
    let err = assemble(".start\nMOV EAX 1\nBOGUS\n").unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().contains("line 3"));
}
