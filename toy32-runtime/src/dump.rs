//! Human-readable dumps of registers and memory

use std::fmt::Write;

use toy32_disassembler::{decode, format};
use toy32_spec::{Register, WORD_SIZE};

use crate::error::Result;
use crate::memory::{Memory, MemoryRegion};
use crate::state::CpuState;

/// One line per register, hex and signed decimal
pub fn dump_registers(state: &CpuState) -> Result<String> {
    let mut out = String::new();
    for reg in Register::GENERAL {
        let value = state.read_reg(reg);
        writeln!(out, "{:<3} = 0x{:08X} ({})", reg.name(), value, value as i32)?;
    }
    writeln!(out, "{:<3} = 0x{:08X}", "IP", state.ip)?;
    writeln!(out, "{:<3} = {}", "ZF", state.zero_flag as u8)?;
    Ok(out)
}

/// Per-segment dump. The loaded program is listed as instructions, data and
/// stack segments as their non-zero words.
pub fn dump_memory(memory: &Memory) -> Result<String> {
    let mut out = String::new();
    for region in MemoryRegion::ALL {
        let segment = memory.segment(region);
        writeln!(out, "{} {}", region.name(), segment)?;
        match region {
            MemoryRegion::Program => dump_code(memory, &mut out)?,
            _ => dump_words(memory, region, &mut out)?,
        }
    }
    Ok(out)
}

fn dump_code(memory: &Memory, out: &mut String) -> Result<()> {
    let mut addr = memory.program().start;
    while addr < memory.program_end() {
        match decode(memory.window(addr, 8)) {
            Ok(instr) => {
                writeln!(out, "  0x{:04X}: {}", addr, format(&instr))?;
                addr += instr.encoded_len();
            }
            Err(e) => {
                writeln!(out, "  0x{:04X}: 0x{:08X} ; {}", addr, memory.read_word(addr), e)?;
                addr += WORD_SIZE;
            }
        }
    }
    Ok(())
}

fn dump_words(memory: &Memory, region: MemoryRegion, out: &mut String) -> Result<()> {
    let segment = memory.segment(region);
    for (i, chunk) in memory.segment_bytes(region).chunks(WORD_SIZE as usize).enumerate() {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let value = u32::from_le_bytes(word);
        if value != 0 {
            let addr = segment.start + i as u32 * WORD_SIZE;
            writeln!(out, "  0x{:04X}: 0x{:08X} ({})", addr, value, value as i32)?;
        }
    }
    Ok(())
}

/// Classic hex dump of one segment, 16 bytes per row
pub fn dump_hex(memory: &Memory, region: MemoryRegion) -> Result<String> {
    let mut out = String::new();
    let start = memory.segment(region).start;
    for (i, row) in memory.segment_bytes(region).chunks(16).enumerate() {
        write!(out, "0x{:04X}:", start as usize + i * 16)?;
        for byte in row {
            write!(out, " {:02X}", byte)?;
        }
        out.push('\n');
    }
    Ok(out)
}
