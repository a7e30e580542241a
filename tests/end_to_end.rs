//! End-to-end integration tests for the toy32 toolchain
//!
//! These tests verify the complete workflow:
//! 1. Assemble source code into a Program image
//! 2. Boot a machine, load the image and run it
//! 3. Inspect registers and memory afterwards
//! 4. Disassemble the program back to source

use toy32_assembler::assemble;
use toy32_disassembler::disassemble;
use toy32_runtime::{run, HaltReason, Machine, MachineConfig, RuntimeError};
use toy32_spec::{MemoryLayout, Register};

const SUM: &str = include_str!("../demos/sum.asm");
const FACTORIAL: &str = include_str!("../demos/factorial.asm");
const FIBONACCI: &str = include_str!("../demos/fibonacci.asm");
const RUNAWAY: &str = include_str!("../demos/runaway.asm");

fn eax(machine: &Machine) -> u32 {
    machine.state().read_reg(Register::Eax)
}

// ============================================================================
// Demo Programs
// ============================================================================

#[test]
fn test_sum_demo() {
    let machine = run(SUM).expect("Execution failed");
    assert_eq!(eax(&machine), 10);
    assert!(!machine.state().zero_flag);
}

#[test]
fn test_factorial_demo() {
    let mut machine = Machine::boot(MachineConfig::default()).unwrap();
    let result_addr = machine.load_program(FACTORIAL).unwrap().constants["result"].address;
    let result = machine.run().expect("Execution failed");

    assert_eq!(result.halt_reason, HaltReason::EndOfProgram);
    assert_eq!(eax(&machine), 120);
    assert_eq!(machine.memory().read_word(result_addr), 120);
    // only the entry call's return address remains
    assert_eq!(machine.state().sp(), 3068);
}

#[test]
fn test_fibonacci_demo() {
    let mut machine = Machine::boot(MachineConfig::default()).unwrap();
    let result_addr = machine.load_program(FIBONACCI).unwrap().constants["fib_result"].address;
    machine.run().expect("Execution failed");

    assert_eq!(eax(&machine), 55);
    assert_eq!(machine.memory().read_word(result_addr), 55);
    assert_eq!(machine.state().sp(), 3068);
}

#[test]
fn test_runaway_demo_overflows() {
    let mut machine = Machine::boot(MachineConfig::default()).unwrap();
    machine.load_program(RUNAWAY).unwrap();
    match machine.run() {
        Err(RuntimeError::StackOverflow { sp }) => {
            assert!(sp < machine.memory().stack().start);
        }
        other => panic!("expected stack overflow, got {:?}", other),
    }
    // SP was decremented before the bound check failed
    assert_eq!(machine.state().sp(), machine.memory().stack().start - 4);
}

#[test]
fn test_demos_disassemble() {
    for source in [SUM, FACTORIAL, FIBONACCI, RUNAWAY] {
        let program = assemble(source).expect("Assembly failed");
        let listing = disassemble(&program, &MemoryLayout::DEFAULT).unwrap();
        assert!(listing.contains(".start"));
        assert!(!listing.contains("ERROR"));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_forward_reference_rejected_before_running() {
    let mut machine = Machine::boot(MachineConfig::default()).unwrap();
    let err = machine
        .load_program(".start\nCALL helper\n.helper\nRET\n")
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Assembly(_)));
    assert!(machine.program().is_none());
    assert_eq!(machine.run().unwrap().cycles, 0);
}

#[test]
fn test_small_machine() {
    let layout = MemoryLayout::new(64, 16, 16).unwrap();
    let mut machine = Machine::boot(MachineConfig::new(layout)).unwrap();
    machine
        .load_program(".data\na = 6\nb = 7\n.start\nLOAD EAX &a\nLOAD EBX &b\nMUL EAX EBX\n")
        .unwrap();
    machine.run().unwrap();
    assert_eq!(eax(&machine), 42);
    assert_eq!(machine.state().sp(), 92);
}

#[test]
fn test_small_stack_overflows_quickly() {
    let layout = MemoryLayout::new(64, 4, 8).unwrap();
    let mut machine = Machine::boot(MachineConfig::new(layout)).unwrap();
    machine.load_program(".start\nPUSH EAX\nPUSH EAX\n").unwrap();
    // entry call plus one push fill the stack
    assert!(matches!(machine.run(), Err(RuntimeError::StackOverflow { .. })));
    assert_eq!(machine.cpu().cycles(), 2);
}

#[test]
fn test_reload_replaces_program() {
    let mut machine = Machine::boot(MachineConfig::default()).unwrap();
    machine.load_program(FACTORIAL).unwrap();
    machine.run().unwrap();

    machine.load_program(SUM).unwrap();
    assert_eq!(eax(&machine), 0);
    assert_eq!(machine.memory().read_word(1028), 0);
    machine.run().unwrap();
    assert_eq!(eax(&machine), 10);
}
