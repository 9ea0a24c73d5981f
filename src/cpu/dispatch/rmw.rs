//! ASL/LSR/ROL/ROR/INC/DEC memory forms (accumulator forms live in dispatch::misc).

use crate::mmu::Mmu;

use super::super::execute::{asl_mem, dec_mem, inc_mem, lsr_mem, rol_mem, ror_mem};
use super::super::state::CpuState;
use super::super::table::opcode_info;
use super::resolve_addr;

pub(crate) fn handle(opcode: u8, cpu: &mut CpuState, mmu: &mut Mmu, cycles: &mut u32) -> bool {
    let info = opcode_info(opcode);
    let op: fn(&mut CpuState, &mut Mmu, u16) -> u8 = match info.mnemonic {
        "ASL" => asl_mem,
        "LSR" => lsr_mem,
        "ROL" => rol_mem,
        "ROR" => ror_mem,
        "INC" => inc_mem,
        "DEC" => dec_mem,
        _ => return false,
    };
    let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
    op(cpu, mmu, addr);
    *cycles += extra;
    true
}
