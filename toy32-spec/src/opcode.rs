//! # toy32 Opcode Definitions
//!
//! Every opcode is a single byte. Opcodes are grouped by family:
//! - 0x01-0x04: Data transfer (MOV, MOV immediate, LOAD, STORE)
//! - 0x10-0x13: Arithmetic (ADD, SUB, MUL, DIV)
//! - 0x20-0x23: Logical (AND, OR, XOR, NOT)
//! - 0x30-0x34: Control flow (JMP, JZ, JNZ, CALL, RET)
//! - 0x40-0x41: Stack (PUSH, POP)
//!
//! The byte length of an instruction is a function of its opcode class alone,
//! see [`OpcodeClass::encoded_len`].

use crate::error::IsaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Data transfer (0x01-0x04) ==========
    /// MOV: dst = src (register to register)
    Mov = 0x01,
    /// MOV: dst = imm
    MovImm = 0x02,
    /// LOAD: reg = mem[address]
    Load = 0x03,
    /// STORE: mem[address] = reg
    Store = 0x04,

    // ========== Arithmetic (0x10-0x13) ==========
    /// ADD: dst = src1 + src2, sets ZF
    Add = 0x10,
    /// SUB: dst = src1 - src2, sets ZF
    Sub = 0x11,
    /// MUL: dst = src1 * src2, sets ZF
    Mul = 0x12,
    /// DIV: dst = src1 / src2 (signed), sets ZF
    Div = 0x13,

    // ========== Logical (0x20-0x23) ==========
    /// AND: dst = src1 & src2
    And = 0x20,
    /// OR: dst = src1 | src2
    Or = 0x21,
    /// XOR: dst = src1 ^ src2
    Xor = 0x22,
    /// NOT: reg = !reg
    Not = 0x23,

    // ========== Control flow (0x30-0x34) ==========
    /// JMP: push IP; IP = address
    Jmp = 0x30,
    /// JZ: if ZF { push IP; IP = address }
    Jz = 0x31,
    /// JNZ: if !ZF { push IP; IP = address }
    Jnz = 0x32,
    /// CALL: push IP; IP = address
    Call = 0x33,
    /// RET: IP = pop() + 8
    Ret = 0x34,

    // ========== Stack (0x40-0x41) ==========
    /// PUSH: push reg
    Push = 0x40,
    /// POP: reg = pop()
    Pop = 0x41,
}

/// Opcode class, which fixes the byte layout of an instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpcodeClass {
    /// `[op][dst][src][pad]`
    RegisterMove,
    /// `[op][reg][pad][pad][imm32/address]`
    RegisterWide,
    /// `[op][src1][src2][dst]`
    Alu,
    /// `[op][reg][pad][pad]`
    Unary,
    /// `[op][pad][pad][pad][address]`
    Jump,
    /// `[op][pad][pad][pad]`
    Return,
}

impl OpcodeClass {
    /// Encoded instruction length in bytes
    #[inline]
    pub const fn encoded_len(self) -> u32 {
        match self {
            OpcodeClass::RegisterMove
            | OpcodeClass::Alu
            | OpcodeClass::Unary
            | OpcodeClass::Return => 4,
            OpcodeClass::RegisterWide | OpcodeClass::Jump => 8,
        }
    }
}

impl Opcode {
    /// All opcodes, in encoding order
    pub const ALL: [Opcode; 19] = [
        Opcode::Mov,
        Opcode::MovImm,
        Opcode::Load,
        Opcode::Store,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Not,
        Opcode::Jmp,
        Opcode::Jz,
        Opcode::Jnz,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Push,
        Opcode::Pop,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Opcode::Mov),
            0x02 => Some(Opcode::MovImm),
            0x03 => Some(Opcode::Load),
            0x04 => Some(Opcode::Store),

            0x10 => Some(Opcode::Add),
            0x11 => Some(Opcode::Sub),
            0x12 => Some(Opcode::Mul),
            0x13 => Some(Opcode::Div),

            0x20 => Some(Opcode::And),
            0x21 => Some(Opcode::Or),
            0x22 => Some(Opcode::Xor),
            0x23 => Some(Opcode::Not),

            0x30 => Some(Opcode::Jmp),
            0x31 => Some(Opcode::Jz),
            0x32 => Some(Opcode::Jnz),
            0x33 => Some(Opcode::Call),
            0x34 => Some(Opcode::Ret),

            0x40 => Some(Opcode::Push),
            0x41 => Some(Opcode::Pop),

            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Layout class of this opcode
    pub const fn class(self) -> OpcodeClass {
        match self {
            Opcode::Mov => OpcodeClass::RegisterMove,
            Opcode::MovImm | Opcode::Load | Opcode::Store => OpcodeClass::RegisterWide,
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor => OpcodeClass::Alu,
            Opcode::Not | Opcode::Push | Opcode::Pop => OpcodeClass::Unary,
            Opcode::Jmp | Opcode::Jz | Opcode::Jnz | Opcode::Call => OpcodeClass::Jump,
            Opcode::Ret => OpcodeClass::Return,
        }
    }

    /// Encoded instruction length in bytes
    #[inline]
    pub const fn encoded_len(self) -> u32 {
        self.class().encoded_len()
    }

    /// Check if this opcode updates the zero flag
    #[inline]
    pub const fn sets_zero_flag(self) -> bool {
        matches!(self, Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div)
    }

    /// Check if this is a control transfer that pushes its own address
    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(self.class(), OpcodeClass::Jump)
    }

    /// Assembly mnemonic. `MovImm` shares `MOV` with the register form.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Mov | Opcode::MovImm => "MOV",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Not => "NOT",
            Opcode::Jmp => "JMP",
            Opcode::Jz => "JZ",
            Opcode::Jnz => "JNZ",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
        }
    }

    /// Look up a mnemonic (case-insensitive). `MOV` maps to the register form;
    /// the assembler picks `MovImm` from the operand shape.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        let opcode = match upper.as_str() {
            "MOV" => Opcode::Mov,
            "LOAD" => Opcode::Load,
            "STORE" => Opcode::Store,
            "ADD" => Opcode::Add,
            "SUB" => Opcode::Sub,
            "MUL" => Opcode::Mul,
            "DIV" => Opcode::Div,
            "AND" => Opcode::And,
            "OR" => Opcode::Or,
            "XOR" => Opcode::Xor,
            "NOT" => Opcode::Not,
            "JMP" => Opcode::Jmp,
            "JZ" => Opcode::Jz,
            "JNZ" => Opcode::Jnz,
            "CALL" => Opcode::Call,
            "RET" => Opcode::Ret,
            "PUSH" => Opcode::Push,
            "POP" => Opcode::Pop,
            _ => return None,
        };
        Some(opcode)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = IsaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Opcode::from_u8(value).ok_or(IsaError::InvalidOpcode(value))
    }
}

impl FromStr for Opcode {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::from_mnemonic(s).ok_or_else(|| IsaError::UnknownMnemonic(s.to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
