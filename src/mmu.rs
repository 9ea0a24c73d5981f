/*!
mmu.rs - 64KiB address space partitioned into fixed, disjoint blocks.

Overview
========
The MMU owns every byte the CPU and disassembler can see. It knows nothing
about opcodes, registers, or cycles; its entire job is range dispatch: given
an address, find the one block that covers it and read or write through to
that block's backing array.

Blocks
======
A block is a contiguous run of the 16-bit address space: a base address, a
length, a read-only flag, and a byte array of that length. Blocks never
overlap; `add_block` rejects an overlapping range with `MmuError::Overlap`
before mutating any state. Reads and writes to an address not covered by
any block fail with `MmuError::OutOfRange`; writes to a read-only block
fail with `MmuError::ReadOnly`.

Host-facing accessors (`read`, `write`, `read_word`) return `Result` so a
host embedding this crate can handle a misconfigured memory map instead of
crashing. The CPU core treats those same failures as a programming error
(see `cpu::dispatch::mmu_read` / `mmu_write`) and panics instead of
threading `Result` through every instruction handler — a faulty memory map
is not emulated-program behavior.
*/

use std::error::Error;
use std::fmt;

/// One block descriptor as accepted by `Mmu::new` / `Mmu::add_block`:
/// `(start, length, read_only, initial_contents, content_offset)`.
pub type BlockSpec = (u16, usize, bool, Option<Vec<u8>>, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmuError {
    /// A new block's range intersects an already-registered block.
    Overlap { start: u16, length: usize },
    /// No registered block covers this address.
    OutOfRange { addr: u16 },
    /// A write landed on a read-only block.
    ReadOnly { addr: u16 },
}

impl fmt::Display for MmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmuError::Overlap { start, length } => write!(
                f,
                "block [${:04x}, ${:04x}) overlaps an existing block",
                start,
                *start as u32 + *length as u32
            ),
            MmuError::OutOfRange { addr } => {
                write!(f, "address ${:04x} is not covered by any block", addr)
            }
            MmuError::ReadOnly { addr } => {
                write!(f, "write to read-only address ${:04x}", addr)
            }
        }
    }
}

impl Error for MmuError {}

struct Block {
    start: u16,
    length: usize,
    read_only: bool,
    default: u8,
    data: Vec<u8>,
}

impl Block {
    fn end(&self) -> u32 {
        self.start as u32 + self.length as u32
    }

    fn contains(&self, addr: u16) -> bool {
        let addr = addr as u32;
        addr >= self.start as u32 && addr < self.end()
    }

    fn reset(&mut self) {
        if !self.read_only {
            for b in self.data.iter_mut() {
                *b = self.default;
            }
        }
    }
}

/// Partitions the 64KiB 6502 address space into disjoint, fixed blocks.
pub struct Mmu {
    blocks: Vec<Block>,
}

impl Mmu {
    /// Build an MMU from a list of block descriptors, added in order.
    pub fn new<I>(blocks: I) -> Result<Self, MmuError>
    where
        I: IntoIterator<Item = BlockSpec>,
    {
        let mut mmu = Mmu { blocks: Vec::new() };
        for (start, length, read_only, initial, offset) in blocks {
            mmu.add_block(start, length, read_only, initial, offset)?;
        }
        Ok(mmu)
    }

    /// Register a new block. Fails if it overlaps any existing block.
    ///
    /// `initial` is copied into the block's backing array starting at
    /// `offset`; bytes that would land past the block's length are dropped.
    pub fn add_block(
        &mut self,
        start: u16,
        length: usize,
        read_only: bool,
        initial: Option<Vec<u8>>,
        offset: usize,
    ) -> Result<(), MmuError> {
        let new_start = start as u32;
        let new_end = new_start + length as u32;
        for b in &self.blocks {
            if new_start < b.end() && new_end > b.start as u32 {
                return Err(MmuError::Overlap { start, length });
            }
        }

        let mut data = vec![0u8; length];
        if let Some(bytes) = initial {
            for (i, byte) in bytes.into_iter().enumerate() {
                if let Some(slot) = data.get_mut(i + offset) {
                    *slot = byte;
                }
            }
        }

        self.blocks.push(Block {
            start,
            length,
            read_only,
            default: 0,
            data,
        });
        Ok(())
    }

    fn block(&self, addr: u16) -> Result<&Block, MmuError> {
        self.blocks
            .iter()
            .find(|b| b.contains(addr))
            .ok_or(MmuError::OutOfRange { addr })
    }

    fn block_mut(&mut self, addr: u16) -> Result<&mut Block, MmuError> {
        self.blocks
            .iter_mut()
            .find(|b| b.contains(addr))
            .ok_or(MmuError::OutOfRange { addr })
    }

    /// Read a single byte. Fails if no block covers `addr`.
    pub fn read(&self, addr: u16) -> Result<u8, MmuError> {
        let b = self.block(addr)?;
        Ok(b.data[(addr as u32 - b.start as u32) as usize])
    }

    /// Write a single byte, masked to 8 bits. Fails if no block covers
    /// `addr`, or the covering block is read-only.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), MmuError> {
        let b = self.block_mut(addr)?;
        if b.read_only {
            return Err(MmuError::ReadOnly { addr });
        }
        let idx = (addr as u32 - b.start as u32) as usize;
        b.data[idx] = value;
        Ok(())
    }

    /// Read a little-endian word: low byte at `addr`, high byte at `addr+1`.
    pub fn read_word(&self, addr: u16) -> Result<u16, MmuError> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Refill every writable block with its default byte. Read-only blocks
    /// (ROM) are left untouched.
    pub fn reset(&mut self) {
        for b in &mut self.blocks {
            b.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_after_write_round_trips() {
        let mut mmu = Mmu::new([(0x0000, 0x0800, false, None, 0)]).unwrap();
        mmu.write(0x10, 0xAB).unwrap();
        assert_eq!(mmu.read(0x10).unwrap(), 0xAB);
    }

    #[test]
    fn write_masks_to_eight_bits() {
        let mut mmu = Mmu::new([(0x0000, 0x10, false, None, 0)]).unwrap();
        mmu.write(0x00, 0x1FF as u8).unwrap();
        assert_eq!(mmu.read(0x00).unwrap(), 0xFF);
    }

    #[test]
    fn out_of_range_read_fails() {
        let mmu = Mmu::new([(0x0000, 0x10, false, None, 0)]).unwrap();
        assert_eq!(mmu.read(0x10), Err(MmuError::OutOfRange { addr: 0x10 }));
    }

    #[test]
    fn write_to_readonly_block_fails() {
        let mut mmu = Mmu::new([(0x8000, 0x10, true, Some(vec![0xEA]), 0)]).unwrap();
        assert_eq!(
            mmu.write(0x8000, 0x00),
            Err(MmuError::ReadOnly { addr: 0x8000 })
        );
        assert_eq!(mmu.read(0x8000).unwrap(), 0xEA);
    }

    #[test]
    fn overlapping_block_rejected() {
        let mut mmu = Mmu::new([(0x0000, 0x10, false, None, 0)]).unwrap();
        assert_eq!(
            mmu.add_block(0x0008, 0x10, false, None, 0),
            Err(MmuError::Overlap {
                start: 0x0008,
                length: 0x10
            })
        );
    }

    #[test]
    fn adjacent_blocks_do_not_overlap() {
        let mut mmu = Mmu::new([(0x0000, 0x10, false, None, 0)]).unwrap();
        assert!(mmu.add_block(0x0010, 0x10, false, None, 0).is_ok());
    }

    #[test]
    fn reset_refills_writable_preserves_readonly() {
        let mut mmu = Mmu::new([
            (0x0000, 0x10, false, None, 0),
            (0x8000, 0x10, true, Some(vec![0x42]), 0),
        ])
        .unwrap();
        mmu.write(0x0000, 0xFF).unwrap();
        mmu.reset();
        assert_eq!(mmu.read(0x0000).unwrap(), 0x00);
        assert_eq!(mmu.read(0x8000).unwrap(), 0x42);
    }

    #[test]
    fn read_word_is_little_endian() {
        let mut mmu = Mmu::new([(0x0000, 0x10, false, None, 0)]).unwrap();
        mmu.write(0x02, 0x34).unwrap();
        mmu.write(0x03, 0x12).unwrap();
        assert_eq!(mmu.read_word(0x02).unwrap(), 0x1234);
    }

    #[test]
    fn initial_contents_respect_offset() {
        let mmu = Mmu::new([(0x0000, 0x10, false, Some(vec![0xAA, 0xBB]), 4)]).unwrap();
        assert_eq!(mmu.read(0x04).unwrap(), 0xAA);
        assert_eq!(mmu.read(0x05).unwrap(), 0xBB);
        assert_eq!(mmu.read(0x00).unwrap(), 0x00);
    }
}
