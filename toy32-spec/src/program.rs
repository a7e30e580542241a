//! Assembled program image

use std::collections::BTreeMap;

/// A data constant declared in a `.data` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSymbol {
    /// Address of the constant in the data segment
    pub address: u32,
    /// Value stored at that address
    pub value: u32,
}

/// Output of the assembler, ready to be written into memory.
///
/// `code` is the program segment image starting at the program segment's
/// first byte, entry call included. `data` is the data segment image starting
/// at the data segment's first byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub code: Vec<u8>,
    pub data: Vec<u8>,
    /// Address of the `.start` label
    pub entry_point: u32,
    /// Function labels and their program addresses
    pub labels: BTreeMap<String, u32>,
    /// Data constants
    pub constants: BTreeMap<String, DataSymbol>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the code image in bytes
    #[inline]
    pub fn code_size(&self) -> u32 {
        self.code.len() as u32
    }

    /// Size of the data image in bytes
    #[inline]
    pub fn data_size(&self) -> u32 {
        self.data.len() as u32
    }

    /// Labels declared at `address`, in name order
    pub fn labels_at(&self, address: u32) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .filter(move |(_, addr)| **addr == address)
            .map(|(name, _)| name.as_str())
    }
}
