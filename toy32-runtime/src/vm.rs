//! Virtual machine for toy32
//!
//! [`Machine`] owns the memory and the CPU. The CPU borrows the memory for
//! each step and never holds on to it.

use std::path::Path;

use serde::Serialize;
use toy32_assembler::assemble_with_layout;
use toy32_disassembler::{decode, format};
use toy32_spec::{Instruction, MemoryLayout, Program};
use tracing::{error, info, trace};

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::memory::Memory;
use crate::stack;
use crate::state::{CpuState, HaltReason};

/// Machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MachineConfig {
    /// Segment sizes
    pub layout: MemoryLayout,

    /// Stop after this many instructions. `None` runs until IP leaves the
    /// program.
    pub max_cycles: Option<u64>,
}

impl MachineConfig {
    pub fn new(layout: MemoryLayout) -> Self {
        Self {
            layout,
            max_cycles: None,
        }
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Number of instructions executed
    pub cycles: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Out-of-range memory accesses reported during the run
    pub memory_faults: u64,

    /// Final instruction pointer
    pub ip: u32,

    /// Words left on the stack at halt
    pub stack_depth: u32,
}

/// Fetch-decode-execute engine
#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    cycles: u64,
}

impl Cpu {
    pub fn new(memory: &Memory) -> Self {
        Self {
            state: CpuState::new(memory),
            cycles: 0,
        }
    }

    /// Back to the power-on state
    pub fn reset(&mut self, memory: &Memory) {
        self.state = CpuState::new(memory);
        self.cycles = 0;
    }

    /// Running while IP is inside the loaded program
    pub fn is_running(&self, memory: &Memory) -> bool {
        self.state.ip < memory.program_end()
    }

    /// Decode the instruction at IP
    pub fn fetch(&self, memory: &Memory) -> Result<Instruction> {
        let ip = self.state.ip;
        let window = memory.window(ip, Instruction::MAX_LEN);
        decode(window).map_err(|e| RuntimeError::from_decode(ip, e))
    }

    /// Execute one instruction
    pub fn step(&mut self, memory: &mut Memory) -> Result<Instruction> {
        let instr = self.fetch(memory)?;
        trace!(cycle = self.cycles, ip = self.state.ip, instr = %format(&instr), "execute");
        execute(&instr, &mut self.state, memory)?;
        self.cycles += 1;
        Ok(instr)
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Instructions executed since the last reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// toy32 machine: memory plus CPU
#[derive(Debug)]
pub struct Machine {
    config: MachineConfig,
    memory: Memory,
    cpu: Cpu,
    program: Option<Program>,
}

impl Machine {
    /// Allocate memory and power on the CPU
    pub fn boot(config: MachineConfig) -> Result<Self> {
        let memory = Memory::new(config.layout)?;
        let cpu = Cpu::new(&memory);
        info!(
            program = %memory.program(),
            data = %memory.data(),
            stack = %memory.stack(),
            "booted"
        );
        Ok(Self {
            config,
            memory,
            cpu,
            program: None,
        })
    }

    /// Assemble `source` and load the image. Nothing is written to memory
    /// unless assembly succeeds.
    pub fn load_program(&mut self, source: &str) -> Result<&Program> {
        let program = assemble_with_layout(source, &self.config.layout)?;
        self.load_image(program)
    }

    /// Read a source file and load it
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&Program> {
        let source = std::fs::read_to_string(path)?;
        self.load_program(&source)
    }

    /// Load an already assembled image, replacing any previous program. An
    /// image that does not fit leaves the machine untouched.
    pub fn load_image(&mut self, program: Program) -> Result<&Program> {
        self.memory.check_image(&program)?;
        self.memory.reset();
        self.memory.load_program(&program)?;
        self.cpu.reset(&self.memory);
        info!(
            code_bytes = program.code_size(),
            data_bytes = program.data_size(),
            entry_point = program.entry_point,
            "program loaded"
        );
        Ok(self.program.insert(program))
    }

    /// Run until IP leaves the program, the cycle limit is hit, or a fatal
    /// error occurs. On error the registers and memory are left as they were
    /// when it happened.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        let halt_reason = loop {
            if !self.cpu.is_running(&self.memory) {
                break HaltReason::EndOfProgram;
            }
            if self.config.max_cycles.is_some_and(|max| self.cpu.cycles() >= max) {
                break HaltReason::CycleLimit;
            }
            if let Err(e) = self.cpu.step(&mut self.memory) {
                error!(ip = self.cpu.state().ip, cycle = self.cpu.cycles(), "{}", e);
                return Err(e);
            }
        };

        let result = self.result(halt_reason);
        info!(cycles = result.cycles, reason = ?result.halt_reason, "halted");
        Ok(result)
    }

    /// Execute one instruction. Returns `None` once the program has ended.
    pub fn step(&mut self) -> Result<Option<Instruction>> {
        if !self.cpu.is_running(&self.memory) {
            return Ok(None);
        }
        self.cpu.step(&mut self.memory).map(Some)
    }

    /// Clear memory and CPU and forget the loaded program
    pub fn reset(&mut self) {
        self.memory.reset();
        self.cpu.reset(&self.memory);
        self.program = None;
    }

    fn result(&self, halt_reason: HaltReason) -> ExecutionResult {
        ExecutionResult {
            cycles: self.cpu.cycles(),
            halt_reason,
            memory_faults: self.memory.faults(),
            ip: self.cpu.state().ip,
            stack_depth: self.stack_depth(),
        }
    }

    /// Number of words currently on the stack
    pub fn stack_depth(&self) -> u32 {
        stack::depth(self.cpu.state(), &self.memory)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Current register state (for inspection)
    pub fn state(&self) -> &CpuState {
        self.cpu.state()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.cpu.is_running(&self.memory)
    }
}
