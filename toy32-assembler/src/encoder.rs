//! Instruction encoding to the toy32 byte layout
//!
//! | class         | bytes                                   |
//! |---------------|-----------------------------------------|
//! | register move | `[op][dst][src][0]`                     |
//! | wide          | `[op][reg][0][0][imm32 LE]`             |
//! | alu           | `[op][src1][src2][dst]`                 |
//! | unary         | `[op][reg][0][0]`                       |
//! | jump          | `[op][0][0][0][address LE]`             |
//! | return        | `[op][0][0][0]`                         |

use toy32_spec::{Instruction, Register};

/// Encode an instruction into its 4 or 8 bytes
pub fn encode(instr: &Instruction) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(instr.encoded_len() as usize);
    encode_into(instr, &mut bytes);
    bytes
}

/// Append the encoding of `instr` to `out`
pub fn encode_into(instr: &Instruction, out: &mut Vec<u8>) {
    let op = instr.opcode().to_u8();

    match *instr {
        Instruction::Mov { dst, src } => out.extend_from_slice(&[op, dst.to_u8(), src.to_u8(), 0]),

        Instruction::MovImm { dst: reg, imm: word }
        | Instruction::Load { reg, address: word }
        | Instruction::Store { address: word, reg } => encode_wide(out, op, Some(reg), word),

        Instruction::Add { src1, src2, dst }
        | Instruction::Sub { src1, src2, dst }
        | Instruction::Mul { src1, src2, dst }
        | Instruction::Div { src1, src2, dst }
        | Instruction::And { src1, src2, dst }
        | Instruction::Or { src1, src2, dst }
        | Instruction::Xor { src1, src2, dst } => {
            out.extend_from_slice(&[op, src1.to_u8(), src2.to_u8(), dst.to_u8()])
        }

        Instruction::Not { reg } | Instruction::Push { reg } | Instruction::Pop { reg } => {
            out.extend_from_slice(&[op, reg.to_u8(), 0, 0])
        }

        Instruction::Jmp { address }
        | Instruction::Jz { address }
        | Instruction::Jnz { address }
        | Instruction::Call { address } => encode_wide(out, op, None, address),

        Instruction::Ret => out.extend_from_slice(&[op, 0, 0, 0]),
    }
}

fn encode_wide(out: &mut Vec<u8>, op: u8, reg: Option<Register>, word: u32) {
    out.extend_from_slice(&[op, reg.map_or(0, Register::to_u8), 0, 0]);
    out.extend_from_slice(&word.to_le_bytes());
}
