//! LDA/LDX/LDY/STA/STX/STY across every addressing mode they support.

use crate::mmu::Mmu;

use super::super::addressing::mmu_write;
use super::super::execute::{lda, ldx, ldy};
use super::super::state::CpuState;
use super::super::table::{opcode_info, AddrMode};
use super::{operand_value, resolve_addr};

pub(crate) fn handle(opcode: u8, cpu: &mut CpuState, mmu: &mut Mmu, cycles: &mut u32) -> bool {
    let info = opcode_info(opcode);
    match info.mnemonic {
        "LDA" => {
            let (v, extra) = operand_value(opcode, info.mode, cpu, mmu);
            lda(cpu, v);
            *cycles += extra;
        }
        "LDX" => {
            let (v, extra) = operand_value(opcode, info.mode, cpu, mmu);
            ldx(cpu, v);
            *cycles += extra;
        }
        "LDY" => {
            let (v, extra) = operand_value(opcode, info.mode, cpu, mmu);
            ldy(cpu, v);
            *cycles += extra;
        }
        "STA" => store(opcode, info.mode, cpu, mmu, cycles, cpu.a),
        "STX" => store(opcode, info.mode, cpu, mmu, cycles, cpu.x),
        "STY" => store(opcode, info.mode, cpu, mmu, cycles, cpu.y),
        _ => return false,
    }
    true
}

fn store(opcode: u8, mode: AddrMode, cpu: &mut CpuState, mmu: &mut Mmu, cycles: &mut u32, value: u8) {
    let (addr, extra) = resolve_addr(opcode, mode, cpu, mmu);
    mmu_write(mmu, addr, value);
    *cycles += extra;
}
