//! # toy32 Disassembler
//!
//! Decodes toy32 machine code and renders it as assembly text. The decoder is
//! shared with the runtime, which uses it for its fetch stage.
//!
//! ## Example
//!
//! ```rust
//! use toy32_disassembler::{decode, format};
//!
//! let instr = decode(&[0x10, 0x01, 0x02, 0x00]).unwrap();
//! assert_eq!(format(&instr), "ADD EAX, EBX, ECX");
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::disassemble;
pub use decoder::decode;
pub use formatter::{format, format_address};
