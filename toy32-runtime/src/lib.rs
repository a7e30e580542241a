//! # toy32 Runtime
//!
//! Execute toy32 programs on a segmented-memory virtual machine.
//!
//! ## Features
//!
//! - **Segmented memory**: program, data and stack in one byte array
//! - **19 instructions**: data transfer, arithmetic, logic, control flow, stack
//! - **Call/return** through a downward-growing stack
//! - **Lenient memory**: out-of-range accesses are reported, not fatal
//!
//! ## Example
//!
//! ```rust
//! use toy32_runtime::{Machine, MachineConfig};
//! use toy32_spec::Register;
//!
//! let mut machine = Machine::boot(MachineConfig::default()).unwrap();
//! machine.load_program(".start\nMOV EAX 2\nMOV EBX 3\nMUL EAX EBX\n").unwrap();
//! let result = machine.run().unwrap();
//! assert_eq!(machine.state().read_reg(Register::Eax), 6);
//! println!("Cycles: {}", result.cycles);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod stack;
pub mod execute;
pub mod vm;
pub mod dump;

pub use state::{CpuState, HaltReason};
pub use memory::{Memory, MemoryRegion};
pub use vm::{Cpu, ExecutionResult, Machine, MachineConfig};
pub use error::{Result, RuntimeError};

/// Simple execution helper
///
/// Boots a machine with the default layout, loads `source` and runs it. The
/// machine is returned for inspection.
pub fn run(source: &str) -> Result<Machine> {
    let mut machine = Machine::boot(MachineConfig::default())?;
    machine.load_program(source)?;
    machine.run()?;
    Ok(machine)
}
