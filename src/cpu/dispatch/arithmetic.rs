//! ADC/SBC across every addressing mode they support, including BCD.

use crate::mmu::Mmu;

use super::super::execute::{adc, sbc};
use super::super::state::CpuState;
use super::super::table::opcode_info;
use super::operand_value;

pub(crate) fn handle(opcode: u8, cpu: &mut CpuState, mmu: &Mmu, cycles: &mut u32) -> bool {
    let info = opcode_info(opcode);
    let op: fn(&mut CpuState, u8) = match info.mnemonic {
        "ADC" => adc,
        "SBC" => sbc,
        _ => return false,
    };
    let (v, extra) = operand_value(opcode, info.mode, cpu, mmu);
    op(cpu, v);
    *cycles += extra;
    true
}
