//! # toy32 Assembler
//!
//! Turns toy32 assembly text into a [`Program`](toy32_spec::Program) image.
//!
//! ```text
//! .data
//! x = 5
//! .double
//! ADD EAX EAX EAX
//! RET
//! .start
//! MOV EAX x
//! CALL double
//! ```
//!
//! ## Example
//!
//! ```
//! use toy32_assembler::assemble;
//!
//! let program = assemble(".data\nx = 5\n.start\nMOV EAX x\n").unwrap();
//! assert_eq!(program.entry_point, 8);
//! ```

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbols;

pub use assembler::{assemble, assemble_with_layout, Assembler};
pub use encoder::{encode, encode_into};
pub use error::{AssemblerError, Result};
pub use parser::{build_instruction, parse_line, Line, Operand};
pub use symbols::{Resolved, SymbolTable};
