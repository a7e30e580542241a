//! Main assembler logic
//!
//! A single top-to-bottom pass. Directives switch the current section:
//! `.data` opens a data section, `.start` the entry function, any other
//! `.name` a function labelled `name`. Names must be defined before use.

use toy32_spec::{DataSymbol, Instruction, MemoryLayout, Program, ENTRY_CALL_LEN, START_LABEL, WORD_SIZE};
use tracing::{debug, info};

use crate::encoder::{encode, encode_into};
use crate::error::{AssemblerError, Result};
use crate::parser::{build_instruction, parse_line, Line};
use crate::symbols::{to_word, Resolved, SymbolTable};

/// Assemble source code with the default memory layout
pub fn assemble(source: &str) -> Result<Program> {
    assemble_with_layout(source, &MemoryLayout::DEFAULT)
}

/// Assemble source code for a specific memory layout
pub fn assemble_with_layout(source: &str, layout: &MemoryLayout) -> Result<Program> {
    let mut assembler = Assembler::new(layout)?;
    for (index, text) in source.lines().enumerate() {
        assembler.feed_line(text, index + 1)?;
    }
    assembler.finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    None,
    Data,
    Start,
    Function(String),
}

/// Incremental assembler state for one run
#[derive(Debug)]
pub struct Assembler {
    layout: MemoryLayout,
    section: Section,
    symbols: SymbolTable,
    code: Vec<u8>,
    data: Vec<u8>,
}

impl Assembler {
    pub fn new(layout: &MemoryLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout: *layout,
            section: Section::None,
            symbols: SymbolTable::new(),
            // reserved for the entry call
            code: vec![0; ENTRY_CALL_LEN as usize],
            data: Vec::new(),
        })
    }

    /// Current program pointer
    pub fn program_pointer(&self) -> u32 {
        self.layout.program().start + self.code.len() as u32
    }

    /// Current data pointer
    pub fn data_pointer(&self) -> u32 {
        self.layout.data().start + self.data.len() as u32
    }

    /// Process one source line
    pub fn feed_line(&mut self, text: &str, line: usize) -> Result<()> {
        let Some(parsed) = parse_line(text, line)? else {
            return Ok(());
        };

        match parsed {
            Line::Directive(name) => self.enter_section(name, line),
            Line::Assignment { name, value } => match self.section {
                Section::Data => self.define_data(&name, value, line),
                Section::None => Err(AssemblerError::StatementOutsideSection { line }),
                _ => Err(AssemblerError::InvalidDataDefinition {
                    line,
                    message: format!("`{}` assigned outside a .data section", name),
                }),
            },
            Line::Statement { mnemonic, operands } => match self.section {
                Section::Start | Section::Function(_) => {
                    let resolved = operands
                        .iter()
                        .map(|op| self.symbols.resolve(op, line))
                        .collect::<Result<Vec<Resolved>>>()?;
                    let instr = build_instruction(&mnemonic, &resolved, line)?;
                    self.emit(&instr, line)
                }
                Section::Data => Err(AssemblerError::InvalidDataDefinition {
                    line,
                    message: format!("expected `name = integer`, found `{}`", mnemonic),
                }),
                Section::None => Err(AssemblerError::StatementOutsideSection { line }),
            },
        }
    }

    fn enter_section(&mut self, name: String, line: usize) -> Result<()> {
        let lower = name.to_ascii_lowercase();
        self.section = if lower == "data" {
            Section::Data
        } else if lower == START_LABEL {
            self.symbols
                .define_label(START_LABEL, self.program_pointer(), line)?;
            Section::Start
        } else {
            self.symbols.define_label(&name, self.program_pointer(), line)?;
            Section::Function(name)
        };
        debug!(line, section = ?self.section, address = self.program_pointer(), "section");
        Ok(())
    }

    fn define_data(&mut self, name: &str, value: i64, line: usize) -> Result<()> {
        let value = to_word(value, line)?;
        if self.data.len() as u32 + WORD_SIZE > self.layout.data_size {
            return Err(AssemblerError::DataSegmentFull {
                line,
                capacity: self.layout.data_size,
            });
        }
        let address = self.data_pointer();
        self.symbols
            .define_constant(name, DataSymbol { address, value }, line)?;
        self.data.extend_from_slice(&value.to_le_bytes());
        debug!(line, name, address, value, "data");
        Ok(())
    }

    fn emit(&mut self, instr: &Instruction, line: usize) -> Result<()> {
        let needed = instr.encoded_len();
        let used = self.code.len() as u32;
        let capacity = self.layout.program_size.saturating_sub(used);
        if needed > capacity {
            return Err(AssemblerError::ProgramSegmentFull {
                line,
                needed,
                capacity,
            });
        }
        let address = self.program_pointer();
        encode_into(instr, &mut self.code);
        debug!(line, address, ?instr, "encoded");
        Ok(())
    }

    /// Seal the image and patch the entry call over the reserved bytes
    pub fn finish(self) -> Result<Program> {
        let entry_point = self
            .symbols
            .label(START_LABEL)
            .ok_or(AssemblerError::MissingEntryPoint)?;

        let mut code = self.code;
        let call = encode(&Instruction::Call { address: entry_point });
        code[..call.len()].copy_from_slice(&call);

        let (labels, constants) = self.symbols.into_parts();
        info!(
            code_bytes = code.len(),
            data_bytes = self.data.len(),
            entry_point,
            labels = labels.len(),
            "assembled program"
        );

        Ok(Program {
            code,
            data: self.data,
            entry_point,
            labels,
            constants,
        })
    }
}
