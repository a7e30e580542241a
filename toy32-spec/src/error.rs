//! # Error Types for the toy32 ISA

use thiserror::Error;

pub use crate::layout::LayoutError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsaError {
    #[error("Invalid opcode: {0:#04x}")]
    InvalidOpcode(u8),

    #[error("Invalid register identifier: {0:#04x} (valid range: 0x00-0x09)")]
    InvalidRegister(u8),

    #[error("Unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("Unknown register name: {0}")]
    UnknownRegisterName(String),
}
