//! Runtime error types for toy32

use thiserror::Error;
use toy32_assembler::AssemblerError;
use toy32_disassembler::DisassemblerError;
use toy32_spec::LayoutError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Stack overflow: SP {sp:#x} below the stack segment")]
    StackOverflow { sp: u32 },

    #[error("Stack underflow: SP {sp:#x} at or above the stack end")]
    StackUnderflow { sp: u32 },

    #[error("Division by zero at IP {ip:#x}")]
    DivisionByZero { ip: u32 },

    #[error("Invalid opcode {opcode:#04x} at IP {ip:#x}")]
    InvalidOpcode { ip: u32, opcode: u8 },

    #[error("Invalid register {register:#04x} at IP {ip:#x}")]
    InvalidRegister { ip: u32, register: u8 },

    #[error("Decode error at IP {ip:#x}: {source}")]
    Decode {
        ip: u32,
        source: DisassemblerError,
    },

    #[error("Memory out of bounds: address {address:#x}")]
    OutOfBounds { address: u32 },

    #[error("Program image does not fit: {segment} needs {size} bytes, segment holds {capacity}")]
    ImageTooLarge {
        segment: &'static str,
        size: u32,
        capacity: u32,
    },

    #[error("Assembly failed: {0}")]
    Assembly(#[from] AssemblerError),

    #[error("Invalid memory layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl RuntimeError {
    /// Map a decoder failure at `ip` to the matching runtime error
    pub fn from_decode(ip: u32, err: DisassemblerError) -> Self {
        match err {
            DisassemblerError::UnknownOpcode(opcode) => RuntimeError::InvalidOpcode { ip, opcode },
            DisassemblerError::InvalidRegister { register, .. } => {
                RuntimeError::InvalidRegister { ip, register }
            }
            source => RuntimeError::Decode { ip, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
