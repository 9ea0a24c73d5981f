//! AND/ORA/EOR/BIT across every addressing mode they support.

use crate::mmu::Mmu;

use super::super::execute::{and, bit, eor, ora};
use super::super::state::CpuState;
use super::super::table::opcode_info;
use super::operand_value;

pub(crate) fn handle(opcode: u8, cpu: &mut CpuState, mmu: &Mmu, cycles: &mut u32) -> bool {
    let info = opcode_info(opcode);
    let op: fn(&mut CpuState, u8) = match info.mnemonic {
        "AND" => and,
        "ORA" => ora,
        "EOR" => eor,
        "BIT" => bit,
        _ => return false,
    };
    let (v, extra) = operand_value(opcode, info.mode, cpu, mmu);
    op(cpu, v);
    *cycles += extra;
    true
}
