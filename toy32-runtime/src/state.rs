//! CPU state for toy32

use serde::Serialize;
use toy32_spec::{Register, NUM_REGISTERS};

use crate::memory::Memory;

/// Register file, instruction pointer and zero flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuState {
    /// EAX..EBP
    pub regs: [u32; NUM_REGISTERS],

    /// Instruction pointer
    pub ip: u32,

    /// Zero flag
    pub zero_flag: bool,
}

/// Why the machine stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HaltReason {
    /// IP reached the end of the loaded program
    EndOfProgram,
    /// The configured cycle limit was hit
    CycleLimit,
}

impl CpuState {
    /// Power-on state: registers cleared, SP at the top of the stack, IP at
    /// the entry call
    pub fn new(memory: &Memory) -> Self {
        let mut state = CpuState {
            regs: [0; NUM_REGISTERS],
            ip: memory.program().start,
            zero_flag: false,
        };
        state.write_reg(Register::Esp, memory.stack().end);
        state
    }

    /// Read a register. ZF reads as 0 or 1.
    #[inline]
    pub fn read_reg(&self, reg: Register) -> u32 {
        match reg {
            Register::Ip => self.ip,
            Register::Zf => self.zero_flag as u32,
            _ => reg.file_index().map_or(0, |index| self.regs[index]),
        }
    }

    /// Write a register. Writing ZF sets it to `value != 0`.
    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: u32) {
        match reg {
            Register::Ip => self.ip = value,
            Register::Zf => self.zero_flag = value != 0,
            _ => {
                if let Some(index) = reg.file_index() {
                    self.regs[index] = value;
                }
            }
        }
    }

    #[inline]
    pub fn sp(&self) -> u32 {
        self.read_reg(Register::Esp)
    }

    #[inline]
    pub fn set_sp(&mut self, sp: u32) {
        self.write_reg(Register::Esp, sp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toy32_spec::MemoryLayout;

    #[test]
    fn test_power_on_state() {
        let memory = Memory::new(MemoryLayout::DEFAULT).unwrap();
        let state = CpuState::new(&memory);
        assert_eq!(state.ip, 0);
        assert_eq!(state.sp(), 3072);
        assert!(!state.zero_flag);
        assert_eq!(state.read_reg(Register::Eax), 0);
    }

    #[test]
    fn test_special_registers() {
        let memory = Memory::new(MemoryLayout::DEFAULT).unwrap();
        let mut state = CpuState::new(&memory);

        state.write_reg(Register::Zf, 42);
        assert!(state.zero_flag);
        assert_eq!(state.read_reg(Register::Zf), 1);

        state.write_reg(Register::Ip, 16);
        assert_eq!(state.ip, 16);

        state.write_reg(Register::Ebp, 7);
        assert_eq!(state.regs[7], 7);
    }
}
