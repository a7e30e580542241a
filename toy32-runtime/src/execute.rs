//! Instruction execution for toy32
//!
//! [`execute`] applies one decoded instruction and moves IP: by the encoded
//! length for ordinary instructions, straight to the target for a taken jump.

use toy32_spec::{Instruction, Opcode, Register};

use crate::error::{Result, RuntimeError};
use crate::memory::Memory;
use crate::stack::{pop, push};
use crate::state::CpuState;

/// Execute a single instruction located at `state.ip`
pub fn execute(instr: &Instruction, state: &mut CpuState, memory: &mut Memory) -> Result<()> {
    let ip = state.ip;
    let len = instr.encoded_len();

    match *instr {
        // ========== Data transfer ==========
        Instruction::Mov { dst, src } => {
            let value = state.read_reg(src);
            state.write_reg(dst, value);
        }
        Instruction::MovImm { dst, imm } => state.write_reg(dst, imm),
        Instruction::Load { reg, address } => {
            let value = memory.read_word(address);
            state.write_reg(reg, value);
        }
        Instruction::Store { address, reg } => memory.write_word(address, state.read_reg(reg)),

        // ========== Arithmetic ==========
        Instruction::Add { src1, src2, dst } => {
            arith(state, src1, src2, dst, |a, b| Ok(a.wrapping_add(b)))?
        }
        Instruction::Sub { src1, src2, dst } => {
            arith(state, src1, src2, dst, |a, b| Ok(a.wrapping_sub(b)))?
        }
        Instruction::Mul { src1, src2, dst } => {
            arith(state, src1, src2, dst, |a, b| Ok(a.wrapping_mul(b)))?
        }
        Instruction::Div { src1, src2, dst } => arith(state, src1, src2, dst, |a, b| {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { ip });
            }
            Ok((a as i32).wrapping_div(b as i32) as u32)
        })?,

        // ========== Logical ==========
        Instruction::And { src1, src2, dst } => {
            state.write_reg(dst, state.read_reg(src1) & state.read_reg(src2))
        }
        Instruction::Or { src1, src2, dst } => {
            state.write_reg(dst, state.read_reg(src1) | state.read_reg(src2))
        }
        Instruction::Xor { src1, src2, dst } => {
            state.write_reg(dst, state.read_reg(src1) ^ state.read_reg(src2))
        }
        Instruction::Not { reg } => state.write_reg(reg, !state.read_reg(reg)),

        // ========== Control flow ==========
        Instruction::Jmp { address } | Instruction::Call { address } => {
            return jump(state, memory, address);
        }
        Instruction::Jz { address } if state.zero_flag => return jump(state, memory, address),
        Instruction::Jnz { address } if !state.zero_flag => return jump(state, memory, address),
        Instruction::Jz { .. } | Instruction::Jnz { .. } => {}
        Instruction::Ret => {
            let origin = pop(state, memory)?;
            // land after the call or jump that pushed `origin`
            state.ip = origin.wrapping_add(Opcode::Call.encoded_len());
            return Ok(());
        }

        // ========== Stack ==========
        Instruction::Push { reg } => {
            let value = state.read_reg(reg);
            push(state, memory, value)?;
        }
        Instruction::Pop { reg } => {
            let value = pop(state, memory)?;
            state.write_reg(reg, value);
        }
    }

    state.ip = state.ip.wrapping_add(len);
    Ok(())
}

/// Arithmetic op: result into dst, ZF = (result == 0)
#[inline]
fn arith(
    state: &mut CpuState,
    src1: Register,
    src2: Register,
    dst: Register,
    op: impl FnOnce(u32, u32) -> Result<u32>,
) -> Result<()> {
    let result = op(state.read_reg(src1), state.read_reg(src2))?;
    state.write_reg(dst, result);
    state.zero_flag = result == 0;
    Ok(())
}

/// Push the address of the jump itself, then transfer control
#[inline]
fn jump(state: &mut CpuState, memory: &mut Memory, target: u32) -> Result<()> {
    let origin = state.ip;
    push(state, memory, origin)?;
    state.ip = target;
    Ok(())
}
