//! Register definitions for toy32

use crate::error::IsaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of general/pointer registers in the register file
pub const NUM_REGISTERS: usize = 8;

/// Register identifier as encoded in operand bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    Eax = 0x00, // accumulator
    Ebx = 0x01, // base
    Ecx = 0x02, // counter
    Edx = 0x03, // data
    Esi = 0x04, // source index
    Edi = 0x05, // destination index
    Esp = 0x06, // stack pointer
    Ebp = 0x07, // base pointer
    Ip = 0x08,  // instruction pointer
    Zf = 0x09,  // zero flag, reads as 0/1
}

impl Register {
    /// Registers backed by the general register file
    pub const GENERAL: [Register; NUM_REGISTERS] = [
        Register::Eax,
        Register::Ebx,
        Register::Ecx,
        Register::Edx,
        Register::Esi,
        Register::Edi,
        Register::Esp,
        Register::Ebp,
    ];

    #[inline]
    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            0x00 => Some(Register::Eax),
            0x01 => Some(Register::Ebx),
            0x02 => Some(Register::Ecx),
            0x03 => Some(Register::Edx),
            0x04 => Some(Register::Esi),
            0x05 => Some(Register::Edi),
            0x06 => Some(Register::Esp),
            0x07 => Some(Register::Ebp),
            0x08 => Some(Register::Ip),
            0x09 => Some(Register::Zf),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Index into the general register file, `None` for IP and ZF
    #[inline]
    pub fn file_index(self) -> Option<usize> {
        match self {
            Register::Ip | Register::Zf => None,
            reg => Some(reg as usize),
        }
    }

    /// Parse a register name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            "EAX" => Some(Register::Eax),
            "EBX" => Some(Register::Ebx),
            "ECX" => Some(Register::Ecx),
            "EDX" => Some(Register::Edx),
            "ESI" => Some(Register::Esi),
            "EDI" => Some(Register::Edi),
            "ESP" => Some(Register::Esp),
            "EBP" => Some(Register::Ebp),
            "IP" => Some(Register::Ip),
            "ZF" => Some(Register::Zf),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::Eax => "EAX",
            Register::Ebx => "EBX",
            Register::Ecx => "ECX",
            Register::Edx => "EDX",
            Register::Esi => "ESI",
            Register::Edi => "EDI",
            Register::Esp => "ESP",
            Register::Ebp => "EBP",
            Register::Ip => "IP",
            Register::Zf => "ZF",
        }
    }
}

impl TryFrom<u8> for Register {
    type Error = IsaError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Register::from_u8(id).ok_or(IsaError::InvalidRegister(id))
    }
}

impl FromStr for Register {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Register::from_name(s).ok_or_else(|| IsaError::UnknownRegisterName(s.to_string()))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
