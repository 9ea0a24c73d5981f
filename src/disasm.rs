/*!
disasm.rs - a read-only walker over the same opcode table the CPU executes.

`Disassembler` never mutates the `Mmu` it borrows and has no notion of
registers beyond the stack page needed for `stack_dump`. It shares
`cpu::table::OPCODE_TABLE` with the execution core so a disassembly can
never name a mnemonic or length the CPU itself wouldn't use for that byte.
*/

use crate::cpu::table::{self, AddrMode};
use crate::mmu::Mmu;

/// One decoded instruction: its address, raw bytes, and a mode-formatted
/// operand string ready to print next to the mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledLine {
    pub address: u16,
    pub opcode: u8,
    pub bytes: Vec<u8>,
    pub mnemonic: &'static str,
    pub operand: String,
}

impl std::fmt::Display for DisassembledLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04X}: {} {}", self.address, self.mnemonic, self.operand)
    }
}

/// Read-only over an `Mmu`; `stack_page` is needed only by `stack_dump`.
pub struct Disassembler<'a> {
    mmu: &'a Mmu,
    stack_page: u8,
}

fn read(mmu: &Mmu, addr: u16) -> u8 {
    mmu.read(addr).unwrap_or(0)
}

impl<'a> Disassembler<'a> {
    pub fn new(mmu: &'a Mmu, stack_page: u8) -> Self {
        Disassembler { mmu, stack_page }
    }

    /// Decode the instruction at `addr`; returns the decoded line and the
    /// address immediately after it (for the caller to continue walking).
    pub fn disassemble_one(&self, addr: u16) -> (DisassembledLine, u16) {
        let opcode = read(self.mmu, addr);
        let info = table::opcode_info(opcode);
        let len = info.len() as u16;

        let mut bytes = vec![opcode];
        for i in 1..len {
            bytes.push(read(self.mmu, addr.wrapping_add(i)));
        }

        let operand = match info.mode {
            AddrMode::Acc => "A".to_string(),
            AddrMode::Imp => String::new(),
            AddrMode::Imm => format!("#${:02X}", bytes[1]),
            AddrMode::Zp => format!("${:02X}", bytes[1]),
            AddrMode::ZpX => format!("${:02X},X", bytes[1]),
            AddrMode::ZpY => format!("${:02X},Y", bytes[1]),
            AddrMode::Abs => format!("${:04X}", word(&bytes)),
            AddrMode::AbsX => format!("${:04X},X", word(&bytes)),
            AddrMode::AbsY => format!("${:04X},Y", word(&bytes)),
            AddrMode::Ind => format!("(${:04X})", word(&bytes)),
            AddrMode::IndX => format!("(${:02X},X)", bytes[1]),
            AddrMode::IndY => format!("(${:02X}),Y", bytes[1]),
            AddrMode::Rel => {
                let offset = bytes[1] as i8;
                let next = addr.wrapping_add(len);
                format!("${:04X}", next.wrapping_add(offset as i16 as u16))
            }
        };

        (
            DisassembledLine {
                address: addr,
                opcode,
                bytes,
                mnemonic: info.mnemonic,
                operand,
            },
            addr.wrapping_add(len),
        )
    }

    /// Walk instructions from `start` until the next address would exceed
    /// `stop`.
    pub fn disassemble(&self, start: u16, stop: u16) -> Vec<DisassembledLine> {
        let mut lines = Vec::new();
        let mut addr = start;
        loop {
            let (line, next) = self.disassemble_one(addr);
            lines.push(line);
            if addr > stop || next <= addr {
                break;
            }
            addr = next;
            if addr > stop {
                break;
            }
        }
        lines
    }

    /// 16-byte rows aligned to 16-byte boundaries: `AAAA: xx xx .. xx`.
    pub fn memory_dump(&self, start: u16, stop: u16) -> String {
        let mut out = String::new();
        let row_start = start & 0xFFF0;
        let mut addr = row_start;
        loop {
            out.push_str(&format!("{:04X}:", addr));
            for i in 0..16u16 {
                out.push_str(&format!(" {:02X}", read(self.mmu, addr.wrapping_add(i))));
            }
            out.push('\n');
            if addr as u32 + 16 > stop as u32 {
                break;
            }
            addr = addr.wrapping_add(16);
        }
        out
    }

    /// Memory-dump of the stack page from `stack_page*0x100 + pointer`
    /// through the top of that page.
    pub fn stack_dump(&self, pointer: u8) -> String {
        let base = (self.stack_page as u16) << 8;
        self.memory_dump(base + pointer as u16, base + 0xFF)
    }
}

fn word(bytes: &[u8]) -> u16 {
    (bytes[2] as u16) << 8 | bytes[1] as u16
}
