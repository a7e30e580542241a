//! Instruction decoder
//!
//! Decodes one instruction from the front of a byte slice. Padding bytes are
//! not checked, only the fields an opcode class actually uses.

use toy32_spec::{Instruction, Opcode, OpcodeClass, Register};

use crate::error::{DisassemblerError, Result};

/// Decode the instruction starting at `bytes[0]`
pub fn decode(bytes: &[u8]) -> Result<Instruction> {
    let Some(&byte) = bytes.first() else {
        return Err(DisassemblerError::Truncated {
            opcode: 0,
            needed: 1,
            available: 0,
        });
    };
    let opcode = Opcode::from_u8(byte).ok_or(DisassemblerError::UnknownOpcode(byte))?;

    let needed = opcode.encoded_len() as usize;
    if bytes.len() < needed {
        return Err(DisassemblerError::Truncated {
            opcode: byte,
            needed,
            available: bytes.len(),
        });
    }

    let reg = |index: usize| decode_register(byte, bytes[index]);
    let word = || u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

    let instr = match opcode.class() {
        OpcodeClass::RegisterMove => Instruction::Mov {
            dst: reg(1)?,
            src: reg(2)?,
        },
        OpcodeClass::RegisterWide => match opcode {
            Opcode::MovImm => Instruction::MovImm {
                dst: reg(1)?,
                imm: word(),
            },
            Opcode::Load => Instruction::Load {
                reg: reg(1)?,
                address: word(),
            },
            _ => Instruction::Store {
                address: word(),
                reg: reg(1)?,
            },
        },
        OpcodeClass::Alu => Instruction::alu(opcode, reg(1)?, reg(2)?, reg(3)?)
            .ok_or(DisassemblerError::UnknownOpcode(byte))?,
        OpcodeClass::Unary => {
            Instruction::unary(opcode, reg(1)?).ok_or(DisassemblerError::UnknownOpcode(byte))?
        }
        OpcodeClass::Jump => {
            Instruction::jump(opcode, word()).ok_or(DisassemblerError::UnknownOpcode(byte))?
        }
        OpcodeClass::Return => Instruction::Ret,
    };

    Ok(instr)
}

fn decode_register(opcode: u8, register: u8) -> Result<Register> {
    Register::from_u8(register).ok_or(DisassemblerError::InvalidRegister { opcode, register })
}
