//! Relative branch opcodes (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ).

use crate::mmu::Mmu;

use super::super::execute::{branch_cond, get_flag};
use super::super::state::{CpuState, CARRY, NEGATIVE, OVERFLOW, ZERO};

/// `None` if `opcode` isn't a branch; otherwise the extra cycles `branch_cond`
/// charged (0 not taken, 1 taken, 2 taken across a page boundary).
pub(crate) fn handle(opcode: u8, cpu: &mut CpuState, mmu: &Mmu) -> Option<u32> {
    let extra = match opcode {
        0x10 => branch_cond(cpu, mmu, !get_flag(cpu, NEGATIVE)), // BPL
        0x30 => branch_cond(cpu, mmu, get_flag(cpu, NEGATIVE)),  // BMI
        0x50 => branch_cond(cpu, mmu, !get_flag(cpu, OVERFLOW)), // BVC
        0x70 => branch_cond(cpu, mmu, get_flag(cpu, OVERFLOW)),  // BVS
        0x90 => branch_cond(cpu, mmu, !get_flag(cpu, CARRY)),    // BCC
        0xB0 => branch_cond(cpu, mmu, get_flag(cpu, CARRY)),     // BCS
        0xD0 => branch_cond(cpu, mmu, !get_flag(cpu, ZERO)),     // BNE
        0xF0 => branch_cond(cpu, mmu, get_flag(cpu, ZERO)),      // BEQ
        _ => return None,
    };
    Some(extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mmu_with(bytes: &[(u16, u8)]) -> Mmu {
        let mut mmu = Mmu::new([(0x0000, 0x10000, false, None, 0)]).unwrap();
        for &(addr, value) in bytes {
            mmu.write(addr, value).unwrap();
        }
        mmu
    }

    #[test]
    fn bcs_not_taken_when_carry_clear() {
        let mmu = mmu_with(&[(0, 0x02)]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        let extra = handle(0xB0, &mut cpu, &mmu).unwrap();
        assert_eq!(extra, 0);
        assert_eq!(cpu.pc, 1);
    }

    #[test]
    fn bcc_taken_no_cross() {
        let mmu = mmu_with(&[(0, 0x02)]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        let extra = handle(0x90, &mut cpu, &mmu).unwrap();
        assert_eq!(extra, 1);
        assert_eq!(cpu.pc, 0x03);
    }

    #[test]
    fn non_branch_opcode_returns_none() {
        let mmu = mmu_with(&[]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        assert!(handle(0xEA, &mut cpu, &mmu).is_none());
    }
}
