//! Main disassembler logic

use std::fmt::Write;

use toy32_spec::{MemoryLayout, Program};

use crate::decoder::decode;
use crate::error::Result;
use crate::formatter::{format, format_address};

/// Disassemble a program image into an annotated listing
pub fn disassemble(program: &Program, layout: &MemoryLayout) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "; toy32 disassembly")?;
    writeln!(output, "; Entry point: {}", format_address(program.entry_point))?;
    writeln!(
        output,
        "; Code size: {} bytes, data size: {} bytes",
        program.code_size(),
        program.data_size()
    )?;

    if !program.constants.is_empty() {
        writeln!(output)?;
        writeln!(output, ".data")?;
        let mut constants: Vec<_> = program.constants.iter().collect();
        constants.sort_by_key(|(_, symbol)| symbol.address);
        for (name, symbol) in constants {
            writeln!(
                output,
                "{} = {}  ; {}",
                name,
                symbol.value as i32,
                format_address(symbol.address)
            )?;
        }
    }

    writeln!(output)?;

    let base = layout.program().start;
    let mut offset = 0usize;
    while offset < program.code.len() {
        let addr = base + offset as u32;
        for label in program.labels_at(addr) {
            writeln!(output, ".{}", label)?;
        }

        match decode(&program.code[offset..]) {
            Ok(instr) => {
                let len = instr.encoded_len() as usize;
                write!(
                    output,
                    "{}:  {:<24}  {}",
                    format_address(addr),
                    hex(&program.code[offset..offset + len]),
                    format(&instr)
                )?;
                if let Some(target) = instr.target() {
                    let names: Vec<&str> = program.labels_at(target).collect();
                    if !names.is_empty() {
                        write!(output, "  ; {}", names.join(", "))?;
                    }
                }
                writeln!(output)?;
                offset += len;
            }
            Err(e) => {
                let end = (offset + 4).min(program.code.len());
                writeln!(
                    output,
                    "{}:  {:<24}  ; ERROR: {}",
                    format_address(addr),
                    hex(&program.code[offset..end]),
                    e
                )?;
                offset = end;
            }
        }
    }

    Ok(output)
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
