//! CMP/CPX/CPY across every addressing mode they support.

use crate::mmu::Mmu;

use super::super::execute::cmp_generic;
use super::super::state::CpuState;
use super::super::table::opcode_info;
use super::operand_value;

pub(crate) fn handle(opcode: u8, cpu: &mut CpuState, mmu: &Mmu, cycles: &mut u32) -> bool {
    let info = opcode_info(opcode);
    let reg = match info.mnemonic {
        "CMP" => cpu.a,
        "CPX" => cpu.x,
        "CPY" => cpu.y,
        _ => return false,
    };
    let (v, extra) = operand_value(opcode, info.mode, cpu, mmu);
    cmp_generic(cpu, reg, v);
    *cycles += extra;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::addressing::fetch_byte;
    use super::super::super::state::{CARRY, ZERO};

    fn mmu_with(bytes: &[(u16, u8)]) -> Mmu {
        let mut mmu = Mmu::new([(0x0000, 0x10000, false, None, 0)]).unwrap();
        for &(addr, value) in bytes {
            mmu.write(addr, value).unwrap();
        }
        mmu
    }

    #[test]
    fn cmp_equal_sets_zero_and_carry() {
        let mmu = mmu_with(&[(0, 0xC9), (1, 0x10)]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        cpu.a = 0x10;
        let mut cycles = opcode_info(0xC9).cycles;
        let opcode = fetch_byte(&mut cpu, &mmu);
        handle(opcode, &mut cpu, &mmu, &mut cycles);
        assert!(cpu.is_flag_set(ZERO));
        assert!(cpu.is_flag_set(CARRY));
    }

    #[test]
    fn cpx_abs_x_register_unaffected() {
        let mmu = mmu_with(&[(0, 0xEC), (1, 0x00), (2, 0x10), (0x1000, 0x05)]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        cpu.x = 0x07;
        let mut cycles = opcode_info(0xEC).cycles;
        let opcode = fetch_byte(&mut cpu, &mmu);
        handle(opcode, &mut cpu, &mmu, &mut cycles);
        assert_eq!(cpu.x, 0x07);
        assert!(cpu.is_flag_set(CARRY));
        assert!(!cpu.is_flag_set(ZERO));
    }
}
