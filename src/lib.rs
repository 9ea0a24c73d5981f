#![doc = r#"
A MOS 6502 instruction-level emulator core.

Three components, leaves-first:
- `mmu`: a 64KiB address space partitioned into fixed, disjoint blocks.
- `cpu`: fetch-decode-execute, all addressing modes, BCD, interrupts, and
  the full documented + illegal opcode set, driven one `step()` at a time.
- `disasm`: a read-only walker sharing the CPU's opcode table.

Host I/O, ROM loading, and peripheral chips are out of scope; they reach
this crate only through the memory map the host builds.
"#]

pub mod cpu;
pub mod disasm;
pub mod mmu;

pub use cpu::{Cpu, Registers};
pub use disasm::{DisassembledLine, Disassembler};
pub use mmu::{BlockSpec, Mmu, MmuError};
