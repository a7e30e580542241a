//! # toy32 ISA Specification
//!
//! A small 32-bit stored-program machine.
//!
//! ## Key Features
//! - One-byte opcodes, 4- or 8-byte instructions (see [`OpcodeClass`])
//! - Eight 32-bit registers plus instruction pointer and zero flag
//! - Little-endian 32-bit words
//! - One byte array split into program, data and stack segments
//! - Call/return through a downward-growing stack

pub mod opcode;
pub mod register;
pub mod instruction;
pub mod layout;
pub mod program;
pub mod error;

pub use opcode::{Opcode, OpcodeClass};
pub use register::{Register, NUM_REGISTERS};
pub use instruction::Instruction;
pub use layout::{MemoryLayout, Segment, WORD_SIZE};
pub use program::{DataSymbol, Program};
pub use error::{IsaError, LayoutError};

/// Word type (32-bit)
pub type Word = u32;

/// Address type (32-bit)
pub type Address = u32;

/// Length of the synthetic `CALL start` at the program segment's first byte
pub const ENTRY_CALL_LEN: u32 = 8;

/// Label name bound by the `.start` directive
pub const START_LABEL: &str = "start";
