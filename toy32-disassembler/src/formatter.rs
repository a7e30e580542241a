//! Instruction formatting to assembly text
//!
//! Output is accepted by the assembler and encodes back to the same bytes.

use toy32_spec::Instruction;

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    let mnemonic = instr.opcode().mnemonic();
    match *instr {
        Instruction::Mov { dst, src } => format!("{} {}, {}", mnemonic, dst, src),
        Instruction::MovImm { dst, imm } => format!("{} {}, {}", mnemonic, dst, imm as i32),
        Instruction::Load { reg, address } => {
            format!("{} {}, {}", mnemonic, reg, format_address(address))
        }
        Instruction::Store { address, reg } => {
            format!("{} {}, {}", mnemonic, format_address(address), reg)
        }

        Instruction::Add { src1, src2, dst }
        | Instruction::Sub { src1, src2, dst }
        | Instruction::Mul { src1, src2, dst }
        | Instruction::Div { src1, src2, dst }
        | Instruction::And { src1, src2, dst }
        | Instruction::Or { src1, src2, dst }
        | Instruction::Xor { src1, src2, dst } => {
            format!("{} {}, {}, {}", mnemonic, dst, src1, src2)
        }

        Instruction::Not { reg } | Instruction::Push { reg } | Instruction::Pop { reg } => {
            format!("{} {}", mnemonic, reg)
        }

        Instruction::Jmp { address }
        | Instruction::Jz { address }
        | Instruction::Jnz { address }
        | Instruction::Call { address } => format!("{} {}", mnemonic, format_address(address)),

        Instruction::Ret => mnemonic.to_string(),
    }
}

/// Format an address as hex
pub fn format_address(address: u32) -> String {
    format!("0x{:04X}", address)
}
