//! Symbol tables for a single assembly run
//!
//! Names are resolved by token identity: an operand either is a symbol or it
//! is not, no substring matching takes place.

use std::collections::BTreeMap;
use toy32_spec::{DataSymbol, Register};

use crate::error::{AssemblerError, Result};
use crate::parser::Operand;

/// A fully resolved operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Register(Register),
    Word(u32),
}

/// Labels and data constants seen so far
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    labels: BTreeMap<String, u32>,
    constants: BTreeMap<String, DataSymbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a function label to a program address
    pub fn define_label(&mut self, name: &str, address: u32, line: usize) -> Result<()> {
        check_name(name, line)?;
        if self.labels.contains_key(name) {
            return Err(AssemblerError::DuplicateLabel {
                line,
                name: name.to_string(),
            });
        }
        self.labels.insert(name.to_string(), address);
        Ok(())
    }

    /// Bind a data constant
    pub fn define_constant(&mut self, name: &str, symbol: DataSymbol, line: usize) -> Result<()> {
        check_name(name, line)?;
        if self.constants.contains_key(name) {
            return Err(AssemblerError::DuplicateSymbol {
                line,
                name: name.to_string(),
            });
        }
        self.constants.insert(name.to_string(), symbol);
        Ok(())
    }

    pub fn label(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    pub fn constant(&self, name: &str) -> Option<DataSymbol> {
        self.constants.get(name).copied()
    }

    /// Resolve an operand.
    ///
    /// Literals come first, then register names, data constants and labels.
    pub fn resolve(&self, operand: &Operand, line: usize) -> Result<Resolved> {
        match operand {
            Operand::Number(value) => to_word(*value, line).map(Resolved::Word),
            Operand::Symbol(name) => {
                if let Some(reg) = Register::from_name(name) {
                    Ok(Resolved::Register(reg))
                } else if let Some(symbol) = self.constant(name) {
                    Ok(Resolved::Word(symbol.value))
                } else if let Some(address) = self.label(name) {
                    Ok(Resolved::Word(address))
                } else {
                    Err(AssemblerError::UndefinedSymbol {
                        line,
                        name: name.clone(),
                    })
                }
            }
            Operand::AddressOf(name) => self
                .constant(name)
                .map(|symbol| Resolved::Word(symbol.address))
                .ok_or_else(|| AssemblerError::UndefinedSymbol {
                    line,
                    name: format!("&{}", name),
                }),
        }
    }

    pub fn into_parts(self) -> (BTreeMap<String, u32>, BTreeMap<String, DataSymbol>) {
        (self.labels, self.constants)
    }
}

fn check_name(name: &str, line: usize) -> Result<()> {
    if Register::from_name(name).is_some() {
        return Err(AssemblerError::ReservedName {
            line,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Fit an integer literal into a 32-bit word. Both the signed and the
/// unsigned 32-bit ranges are accepted.
pub fn to_word(value: i64, line: usize) -> Result<u32> {
    if value < i32::MIN as i64 || value > u32::MAX as i64 {
        return Err(AssemblerError::InvalidImmediate {
            line,
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_word_ranges() {
        assert_eq!(to_word(0, 1).unwrap(), 0);
        assert_eq!(to_word(-1, 1).unwrap(), u32::MAX);
        assert_eq!(to_word(i32::MIN as i64, 1).unwrap(), 0x8000_0000);
        assert_eq!(to_word(u32::MAX as i64, 1).unwrap(), u32::MAX);
        assert!(to_word(u32::MAX as i64 + 1, 1).is_err());
        assert!(to_word(i32::MIN as i64 - 1, 1).is_err());
    }

    #[test]
    fn test_resolution_order() {
        let mut table = SymbolTable::new();
        table
            .define_constant("limit", DataSymbol { address: 1024, value: 10 }, 1)
            .unwrap();
        table.define_label("loop", 16, 2).unwrap();

        assert_eq!(
            table.resolve(&Operand::Symbol("ebx".to_string()), 3).unwrap(),
            Resolved::Register(Register::Ebx)
        );
        assert_eq!(
            table.resolve(&Operand::Symbol("limit".to_string()), 3).unwrap(),
            Resolved::Word(10)
        );
        assert_eq!(
            table.resolve(&Operand::AddressOf("limit".to_string()), 3).unwrap(),
            Resolved::Word(1024)
        );
        assert_eq!(
            table.resolve(&Operand::Symbol("loop".to_string()), 3).unwrap(),
            Resolved::Word(16)
        );
        assert_eq!(
            table.resolve(&Operand::Number(-2), 3).unwrap(),
            Resolved::Word(0xFFFF_FFFE)
        );
    }

    #[test]
    fn test_no_substring_matching() {
        let mut table = SymbolTable::new();
        table.define_label("add", 8, 1).unwrap();
        table
            .define_constant("x", DataSymbol { address: 1024, value: 5 }, 2)
            .unwrap();

        // "addx" contains both names but is neither
        assert!(matches!(
            table.resolve(&Operand::Symbol("addx".to_string()), 3),
            Err(AssemblerError::UndefinedSymbol { line: 3, .. })
        ));
    }

    #[test]
    fn test_duplicates_and_reserved_names() {
        let mut table = SymbolTable::new();
        table.define_label("helper", 8, 1).unwrap();
        assert!(matches!(
            table.define_label("helper", 16, 5),
            Err(AssemblerError::DuplicateLabel { line: 5, .. })
        ));

        let symbol = DataSymbol { address: 1024, value: 1 };
        table.define_constant("x", symbol, 2).unwrap();
        assert!(matches!(
            table.define_constant("x", symbol, 6),
            Err(AssemblerError::DuplicateSymbol { line: 6, .. })
        ));

        assert!(matches!(
            table.define_constant("EAX", symbol, 7),
            Err(AssemblerError::ReservedName { line: 7, .. })
        ));
        assert!(matches!(
            table.define_label("esp", 8, 8),
            Err(AssemblerError::ReservedName { line: 8, .. })
        ));
    }

    #[test]
    fn test_address_of_requires_constant() {
        let mut table = SymbolTable::new();
        table.define_label("func", 8, 1).unwrap();
        assert!(table.resolve(&Operand::AddressOf("func".to_string()), 2).is_err());
    }
}
