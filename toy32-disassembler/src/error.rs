//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisassemblerError {
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("Invalid register 0x{register:02X} in {opcode:#04x} instruction")]
    InvalidRegister { opcode: u8, register: u8 },

    #[error("Truncated instruction {opcode:#04x}: needs {needed} bytes, {available} available")]
    Truncated {
        opcode: u8,
        needed: usize,
        available: usize,
    },

    #[error("Formatting error")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
