//! # Memory Layout for toy32
//!
//! Memory is one contiguous byte array split into three segments, low to high:
//!
//! ```text
//! 0                 P                 P+D                P+D+S
//! [ program segment ][ data segment   ][ stack segment    ]
//! ```
//!
//! The stack grows downward from `stack().end`, which is also the initial
//! stack pointer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word size in bytes
pub const WORD_SIZE: u32 = 4;

/// Default segment size (1 KB each)
pub const DEFAULT_SEGMENT_SIZE: u32 = 1024;

/// A half-open address range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
}

impl Segment {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn contains(&self, address: u32) -> bool {
        address >= self.start && address < self.end
    }

    /// Size in bytes
    #[inline]
    pub const fn size(&self) -> u32 {
        self.end - self.start
    }

    /// Check whether `[address, address + len)` fits inside the segment
    #[inline]
    pub fn fits(&self, address: u32, len: u32) -> bool {
        address >= self.start
            && (address as u64 + len as u64) <= self.end as u64
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#06x}, {:#06x})", self.start, self.end)
    }
}

/// Segment sizes of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryLayout {
    pub program_size: u32,
    pub data_size: u32,
    pub stack_size: u32,
}

impl MemoryLayout {
    /// 1 KB program, 1 KB data, 1 KB stack
    pub const DEFAULT: Self = Self {
        program_size: DEFAULT_SEGMENT_SIZE,
        data_size: DEFAULT_SEGMENT_SIZE,
        stack_size: DEFAULT_SEGMENT_SIZE,
    };

    /// Create a new layout with validation
    pub fn new(program_size: u32, data_size: u32, stack_size: u32) -> Result<Self, LayoutError> {
        let layout = Self {
            program_size,
            data_size,
            stack_size,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Validate segment sizes
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (segment, size) in [
            ("program", self.program_size),
            ("data", self.data_size),
            ("stack", self.stack_size),
        ] {
            if size == 0 {
                return Err(LayoutError::EmptySegment { segment });
            }
            if size % WORD_SIZE != 0 {
                return Err(LayoutError::UnalignedSegment { segment, size });
            }
        }

        // Room for the synthetic entry call
        if self.program_size < 8 {
            return Err(LayoutError::ProgramTooSmall {
                size: self.program_size,
            });
        }

        let total = self.program_size as u64 + self.data_size as u64 + self.stack_size as u64;
        if total > u32::MAX as u64 {
            return Err(LayoutError::TooLarge { total });
        }

        Ok(())
    }

    /// Total memory size in bytes
    #[inline]
    pub const fn total_size(&self) -> u32 {
        self.program_size + self.data_size + self.stack_size
    }

    #[inline]
    pub const fn program(&self) -> Segment {
        Segment::new(0, self.program_size)
    }

    #[inline]
    pub const fn data(&self) -> Segment {
        Segment::new(self.program_size, self.program_size + self.data_size)
    }

    #[inline]
    pub const fn stack(&self) -> Segment {
        let start = self.program_size + self.data_size;
        Segment::new(start, start + self.stack_size)
    }
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Layout validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("{segment} segment must not be empty")]
    EmptySegment { segment: &'static str },

    #[error("{segment} segment size {size} is not a multiple of 4")]
    UnalignedSegment { segment: &'static str, size: u32 },

    #[error("program segment of {size} bytes cannot hold the entry call (8 bytes)")]
    ProgramTooSmall { size: u32 },

    #[error("total memory size {total} exceeds the 32-bit address space")]
    TooLarge { total: u64 },
}
