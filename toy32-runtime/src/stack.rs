//! Stack discipline
//!
//! The stack is the highest segment and grows down from its end. SP points at
//! the last pushed word.

use toy32_spec::WORD_SIZE;

use crate::error::{Result, RuntimeError};
use crate::memory::Memory;
use crate::state::CpuState;

/// Push a word. SP is decremented before the bound check, so after an
/// overflow it points below the stack segment and nothing was written.
pub fn push(state: &mut CpuState, memory: &mut Memory, value: u32) -> Result<()> {
    let below_start = (state.sp() as i64 - WORD_SIZE as i64) < memory.stack().start as i64;
    let sp = state.sp().wrapping_sub(WORD_SIZE);
    state.set_sp(sp);
    if below_start {
        return Err(RuntimeError::StackOverflow { sp });
    }
    memory.write_word(sp, value);
    Ok(())
}

/// Pop a word
pub fn pop(state: &mut CpuState, memory: &Memory) -> Result<u32> {
    let sp = state.sp();
    if sp >= memory.stack().end {
        return Err(RuntimeError::StackUnderflow { sp });
    }
    let value = memory.read_word(sp);
    state.set_sp(sp.wrapping_add(WORD_SIZE));
    Ok(value)
}

/// Number of words currently on the stack. An SP outside the segment is
/// clamped to it.
pub fn depth(state: &CpuState, memory: &Memory) -> u32 {
    let stack = memory.stack();
    let sp = state.sp().clamp(stack.start, stack.end);
    (stack.end - sp) / WORD_SIZE
}
