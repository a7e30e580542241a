//! Instruction definitions for toy32

use crate::opcode::Opcode;
use crate::register::Register;

/// A decoded instruction.
///
/// Immediates and addresses are raw 32-bit words; immediates are interpreted
/// as two's complement where signedness matters (DIV).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    // ========== Data transfer ==========
    /// dst = src
    Mov { dst: Register, src: Register },
    /// dst = imm
    MovImm { dst: Register, imm: u32 },
    /// reg = mem[address]
    Load { reg: Register, address: u32 },
    /// mem[address] = reg
    Store { address: u32, reg: Register },

    // ========== Arithmetic (sets ZF) ==========
    Add { src1: Register, src2: Register, dst: Register },
    Sub { src1: Register, src2: Register, dst: Register },
    Mul { src1: Register, src2: Register, dst: Register },
    Div { src1: Register, src2: Register, dst: Register },

    // ========== Logical ==========
    And { src1: Register, src2: Register, dst: Register },
    Or { src1: Register, src2: Register, dst: Register },
    Xor { src1: Register, src2: Register, dst: Register },
    Not { reg: Register },

    // ========== Control flow ==========
    Jmp { address: u32 },
    Jz { address: u32 },
    Jnz { address: u32 },
    Call { address: u32 },
    Ret,

    // ========== Stack ==========
    Push { reg: Register },
    Pop { reg: Register },
}

impl Instruction {
    /// Longest encoding in bytes
    pub const MAX_LEN: u32 = 8;

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Mov { .. } => Opcode::Mov,
            Instruction::MovImm { .. } => Opcode::MovImm,
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Store { .. } => Opcode::Store,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Sub { .. } => Opcode::Sub,
            Instruction::Mul { .. } => Opcode::Mul,
            Instruction::Div { .. } => Opcode::Div,
            Instruction::And { .. } => Opcode::And,
            Instruction::Or { .. } => Opcode::Or,
            Instruction::Xor { .. } => Opcode::Xor,
            Instruction::Not { .. } => Opcode::Not,
            Instruction::Jmp { .. } => Opcode::Jmp,
            Instruction::Jz { .. } => Opcode::Jz,
            Instruction::Jnz { .. } => Opcode::Jnz,
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
            Instruction::Push { .. } => Opcode::Push,
            Instruction::Pop { .. } => Opcode::Pop,
        }
    }

    /// Encoded length in bytes
    #[inline]
    pub fn encoded_len(&self) -> u32 {
        self.opcode().encoded_len()
    }

    /// Build an ALU instruction from its opcode. Returns `None` for non-ALU opcodes.
    pub fn alu(opcode: Opcode, src1: Register, src2: Register, dst: Register) -> Option<Self> {
        let instr = match opcode {
            Opcode::Add => Instruction::Add { src1, src2, dst },
            Opcode::Sub => Instruction::Sub { src1, src2, dst },
            Opcode::Mul => Instruction::Mul { src1, src2, dst },
            Opcode::Div => Instruction::Div { src1, src2, dst },
            Opcode::And => Instruction::And { src1, src2, dst },
            Opcode::Or => Instruction::Or { src1, src2, dst },
            Opcode::Xor => Instruction::Xor { src1, src2, dst },
            _ => return None,
        };
        Some(instr)
    }

    /// Build a jump-class instruction from its opcode
    pub fn jump(opcode: Opcode, address: u32) -> Option<Self> {
        let instr = match opcode {
            Opcode::Jmp => Instruction::Jmp { address },
            Opcode::Jz => Instruction::Jz { address },
            Opcode::Jnz => Instruction::Jnz { address },
            Opcode::Call => Instruction::Call { address },
            _ => return None,
        };
        Some(instr)
    }

    /// Build a single-register instruction from its opcode
    pub fn unary(opcode: Opcode, reg: Register) -> Option<Self> {
        let instr = match opcode {
            Opcode::Not => Instruction::Not { reg },
            Opcode::Push => Instruction::Push { reg },
            Opcode::Pop => Instruction::Pop { reg },
            _ => return None,
        };
        Some(instr)
    }

    /// Jump target, if this is a jump-class instruction
    pub fn target(&self) -> Option<u32> {
        match self {
            Instruction::Jmp { address }
            | Instruction::Jz { address }
            | Instruction::Jnz { address }
            | Instruction::Call { address } => Some(*address),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_follow_opcode_class() {
        let mov = Instruction::Mov { dst: Register::Eax, src: Register::Ebx };
        assert_eq!(mov.encoded_len(), 4);

        let movi = Instruction::MovImm { dst: Register::Eax, imm: 5 };
        assert_eq!(movi.encoded_len(), 8);

        assert_eq!(Instruction::Call { address: 0 }.encoded_len(), 8);
        assert_eq!(Instruction::Ret.encoded_len(), 4);
    }

    #[test]
    fn test_constructors_reject_wrong_class() {
        assert!(Instruction::alu(Opcode::Push, Register::Eax, Register::Eax, Register::Eax).is_none());
        assert!(Instruction::jump(Opcode::Ret, 0).is_none());
        assert!(Instruction::unary(Opcode::Add, Register::Eax).is_none());
    }

    #[test]
    fn test_constructors_match_opcode() {
        for op in [Opcode::Add, Opcode::Sub, Opcode::Mul, Opcode::Div, Opcode::And, Opcode::Or, Opcode::Xor] {
            let instr = Instruction::alu(op, Register::Eax, Register::Ebx, Register::Ecx).unwrap();
            assert_eq!(instr.opcode(), op);
        }
        for op in [Opcode::Jmp, Opcode::Jz, Opcode::Jnz, Opcode::Call] {
            let instr = Instruction::jump(op, 64).unwrap();
            assert_eq!(instr.opcode(), op);
            assert_eq!(instr.target(), Some(64));
        }
    }
}
