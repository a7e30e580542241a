//! Assembler errors

use thiserror::Error;
use toy32_spec::LayoutError;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown instruction at line {line}: {instruction}")]
    UnknownInstruction { line: usize, instruction: String },

    #[error("Invalid operands for {mnemonic} at line {line}: {message}")]
    InvalidOperands {
        line: usize,
        mnemonic: String,
        message: String,
    },

    #[error("Invalid immediate value at line {line}: {value}")]
    InvalidImmediate { line: usize, value: String },

    #[error("Invalid data definition at line {line}: {message}")]
    InvalidDataDefinition { line: usize, message: String },

    #[error("Undefined symbol at line {line}: {name}")]
    UndefinedSymbol { line: usize, name: String },

    #[error("Duplicate label at line {line}: {name}")]
    DuplicateLabel { line: usize, name: String },

    #[error("Duplicate data symbol at line {line}: {name}")]
    DuplicateSymbol { line: usize, name: String },

    #[error("Reserved name at line {line}: {name} is a register")]
    ReservedName { line: usize, name: String },

    #[error("Statement outside of a section at line {line}")]
    StatementOutsideSection { line: usize },

    #[error("Program segment full at line {line}: {needed} bytes needed, {capacity} available")]
    ProgramSegmentFull {
        line: usize,
        needed: u32,
        capacity: u32,
    },

    #[error("Data segment full at line {line}: capacity is {capacity} bytes")]
    DataSegmentFull { line: usize, capacity: u32 },

    #[error("Missing entry point: no .start section")]
    MissingEntryPoint,

    #[error("Invalid memory layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssemblerError {
    /// Source line the error was reported at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::SyntaxError { line, .. }
            | AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::InvalidOperands { line, .. }
            | AssemblerError::InvalidImmediate { line, .. }
            | AssemblerError::InvalidDataDefinition { line, .. }
            | AssemblerError::UndefinedSymbol { line, .. }
            | AssemblerError::DuplicateLabel { line, .. }
            | AssemblerError::DuplicateSymbol { line, .. }
            | AssemblerError::ReservedName { line, .. }
            | AssemblerError::StatementOutsideSection { line }
            | AssemblerError::ProgramSegmentFull { line, .. }
            | AssemblerError::DataSegmentFull { line, .. } => Some(*line),
            AssemblerError::MissingEntryPoint
            | AssemblerError::Layout(_)
            | AssemblerError::IoError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
