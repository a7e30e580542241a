//! Memory subsystem
//!
//! One byte array covering the program, data and stack segments. Plain reads
//! and writes never fail: an out-of-range access is reported through
//! `tracing`, counted, reads yield zero and writes are dropped.

use std::cell::Cell;

use serde::Serialize;
use toy32_spec::{MemoryLayout, Program, Segment, WORD_SIZE};
use tracing::warn;

use crate::error::{Result, RuntimeError};

/// Segment an address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MemoryRegion {
    Program,
    Data,
    Stack,
}

impl MemoryRegion {
    pub const ALL: [MemoryRegion; 3] = [MemoryRegion::Program, MemoryRegion::Data, MemoryRegion::Stack];

    pub fn name(self) -> &'static str {
        match self {
            MemoryRegion::Program => "program",
            MemoryRegion::Data => "data",
            MemoryRegion::Stack => "stack",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Memory {
    bytes: Vec<u8>,
    layout: MemoryLayout,
    /// End of the loaded code, sealed at load time
    program_end: u32,
    faults: Cell<u64>,
}

impl Memory {
    /// Allocate zeroed memory for a layout
    pub fn new(layout: MemoryLayout) -> Result<Self> {
        layout.validate()?;
        let program_end = layout.program().start;
        Ok(Memory {
            bytes: vec![0; layout.total_size() as usize],
            layout,
            program_end,
            faults: Cell::new(0),
        })
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    /// Total size in bytes
    pub fn size(&self) -> u32 {
        self.bytes.len() as u32
    }

    pub fn program(&self) -> Segment {
        self.layout.program()
    }

    pub fn data(&self) -> Segment {
        self.layout.data()
    }

    pub fn stack(&self) -> Segment {
        self.layout.stack()
    }

    pub fn segment(&self, region: MemoryRegion) -> Segment {
        match region {
            MemoryRegion::Program => self.program(),
            MemoryRegion::Data => self.data(),
            MemoryRegion::Stack => self.stack(),
        }
    }

    /// Segment containing `addr`, `None` past the end of memory
    pub fn region(&self, addr: u32) -> Option<MemoryRegion> {
        MemoryRegion::ALL
            .into_iter()
            .find(|region| self.segment(*region).contains(addr))
    }

    /// End of the loaded program. The CPU runs while IP is below it.
    pub fn program_end(&self) -> u32 {
        self.program_end
    }

    /// Seal the program end. Clamped to the program segment.
    pub fn seal_program_end(&mut self, end: u32) {
        let segment = self.program();
        self.program_end = end.clamp(segment.start, segment.end);
    }

    /// Number of out-of-range accesses since the last reset
    pub fn faults(&self) -> u64 {
        self.faults.get()
    }

    fn fault(&self, addr: u32, access: &'static str) {
        self.faults.set(self.faults.get() + 1);
        warn!(address = addr, size = self.size(), access, "memory access out of bounds");
    }

    pub fn read_u8(&self, addr: u32) -> u8 {
        match self.bytes.get(addr as usize) {
            Some(&byte) => byte,
            None => {
                self.fault(addr, "read");
                0
            }
        }
    }

    /// Read a byte, failing instead of reporting
    pub fn checked_read_u8(&self, addr: u32) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(RuntimeError::OutOfBounds { address: addr })
    }

    pub fn write_u8(&mut self, addr: u32, value: u8) {
        match self.bytes.get_mut(addr as usize) {
            Some(byte) => *byte = value,
            None => self.fault(addr, "write"),
        }
    }

    /// Read a little-endian word, byte by byte
    pub fn read_word(&self, addr: u32) -> u32 {
        let mut bytes = [0u8; WORD_SIZE as usize];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u32));
        }
        u32::from_le_bytes(bytes)
    }

    /// Write a little-endian word, byte by byte
    pub fn write_word(&mut self, addr: u32, value: u32) {
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), byte);
        }
    }

    /// Up to `len` bytes starting at `addr`, cut at the end of memory
    pub fn window(&self, addr: u32, len: u32) -> &[u8] {
        let start = (addr as usize).min(self.bytes.len());
        let end = (addr as usize).saturating_add(len as usize).min(self.bytes.len());
        &self.bytes[start..end]
    }

    /// Raw bytes of one segment
    pub fn segment_bytes(&self, region: MemoryRegion) -> &[u8] {
        let segment = self.segment(region);
        &self.bytes[segment.start as usize..segment.end as usize]
    }

    /// Whole memory
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Check that an image fits the program and data segments
    pub fn check_image(&self, program: &Program) -> Result<()> {
        let code = self.program();
        let data = self.data();
        if program.code_size() > code.size() {
            return Err(RuntimeError::ImageTooLarge {
                segment: "program",
                size: program.code_size(),
                capacity: code.size(),
            });
        }
        if program.data_size() > data.size() {
            return Err(RuntimeError::ImageTooLarge {
                segment: "data",
                size: program.data_size(),
                capacity: data.size(),
            });
        }
        Ok(())
    }

    /// Write an assembled image into the program and data segments and seal
    /// the program end
    pub fn load_program(&mut self, program: &Program) -> Result<()> {
        self.check_image(program)?;
        let code = self.program();
        let data = self.data();

        let code_start = code.start as usize;
        self.bytes[code_start..code_start + program.code.len()].copy_from_slice(&program.code);
        let data_start = data.start as usize;
        self.bytes[data_start..data_start + program.data.len()].copy_from_slice(&program.data);

        self.seal_program_end(code.start + program.code_size());
        Ok(())
    }

    /// Zero all bytes, unseal the program and clear the fault counter
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        self.program_end = self.program().start;
        self.faults.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Memory {
        Memory::new(MemoryLayout::new(16, 8, 8).unwrap()).unwrap()
    }

    #[test]
    fn test_segments_tile_memory() {
        let mem = small();
        assert_eq!(mem.size(), 32);
        assert_eq!(mem.program(), Segment::new(0, 16));
        assert_eq!(mem.data(), Segment::new(16, 24));
        assert_eq!(mem.stack(), Segment::new(24, 32));
    }

    #[test]
    fn test_region_lookup() {
        let mem = small();
        assert_eq!(mem.region(0), Some(MemoryRegion::Program));
        assert_eq!(mem.region(15), Some(MemoryRegion::Program));
        assert_eq!(mem.region(16), Some(MemoryRegion::Data));
        assert_eq!(mem.region(31), Some(MemoryRegion::Stack));
        assert_eq!(mem.region(32), None);
    }

    #[test]
    fn test_word_little_endian() {
        let mut mem = small();
        mem.write_word(16, 0x1122_3344);
        assert_eq!(mem.read_u8(16), 0x44);
        assert_eq!(mem.read_u8(19), 0x11);
        assert_eq!(mem.read_word(16), 0x1122_3344);
    }

    #[test]
    fn test_out_of_range_is_reported_not_fatal() {
        let mut mem = small();
        assert_eq!(mem.read_u8(100), 0);
        mem.write_u8(100, 7);
        assert_eq!(mem.faults(), 2);
        assert!(mem.checked_read_u8(100).is_err());
        assert_eq!(mem.checked_read_u8(0).unwrap(), 0);
    }

    #[test]
    fn test_word_straddling_end() {
        let mut mem = small();
        mem.write_word(30, 0xAABB_CCDD);
        // two bytes land, two are dropped
        assert_eq!(mem.faults(), 2);
        assert_eq!(mem.read_u8(30), 0xDD);
        assert_eq!(mem.read_u8(31), 0xCC);
        assert_eq!(mem.read_word(30), 0x0000_CCDD);
    }

    #[test]
    fn test_load_program_seals_end() {
        let mut mem = small();
        let mut program = Program::new();
        program.code = vec![0x34, 0, 0, 0];
        program.data = vec![9, 0, 0, 0];
        mem.load_program(&program).unwrap();
        assert_eq!(mem.program_end(), 4);
        assert_eq!(mem.read_word(16), 9);

        program.code = vec![0; 20];
        assert!(matches!(
            mem.load_program(&program),
            Err(RuntimeError::ImageTooLarge { segment: "program", size: 20, capacity: 16 })
        ));
    }

    #[test]
    fn test_reset() {
        let mut mem = small();
        mem.write_word(0, 1);
        mem.seal_program_end(4);
        mem.read_u8(99);
        mem.reset();
        assert_eq!(mem.read_word(0), 0);
        assert_eq!(mem.program_end(), 0);
        assert_eq!(mem.faults(), 0);
    }

    #[test]
    fn test_window_is_cut_at_end() {
        let mem = small();
        assert_eq!(mem.window(28, 8).len(), 4);
        assert!(mem.window(40, 8).is_empty());
    }
}
