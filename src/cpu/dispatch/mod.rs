/*!
dispatch/mod.rs - per-step orchestration: opcode fetch, family dispatch,
and the deferred interrupt poll.

`step` is the only entry point the facade calls for ordinary execution
(`Cpu::step`); `execute_opcode` is also reused verbatim by `Cpu::execute`
for the ad-hoc instruction-stream path, so the two never diverge.

Interrupt deferral
==================
`CpuState::prev_interrupt` is a one-step-old decision: `nmi_pending ||
(irq_pending && !I)`, computed at the *end* of a step from the flags as
they stood after that step's instruction ran. The *next* step acts on that
already-made decision without re-checking `I` — this is what makes `SEI`
executed with an already-pending IRQ let that IRQ through one more
instruction before the mask takes effect: the decision to fire was locked
in before `SEI` ran, and checking `prev_interrupt` again afterward doesn't
re-examine the flag that just changed.
*/

mod arithmetic;
mod branches;
mod compare;
mod control_flow;
mod illegal;
mod load_store;
mod logical;
mod rmw;

use crate::mmu::Mmu;

use super::addressing;
use super::execute;
use super::state::{CpuState, IRQ_DISABLE};
use super::table::{self, AddrMode};

pub(crate) const VECTOR_NMI: u16 = 0xFFFA;
pub(crate) const VECTOR_RESET: u16 = 0xFFFC;
pub(crate) const VECTOR_IRQ: u16 = 0xFFFE;

/// Run one instruction (plus any interrupt service latched from the
/// previous step) and return the number of cycles it took.
pub(crate) fn step(cpu: &mut CpuState, mmu: &mut Mmu) -> u32 {
    cpu.cycles = 0;

    let opcode = addressing::fetch_byte(cpu, mmu);
    cpu.opcode = opcode;
    cpu.cycles += execute_opcode(cpu, mmu, opcode) as u64;

    if cpu.prev_interrupt {
        if cpu.nmi_pending {
            cpu.nmi_pending = false;
            execute::service_interrupt(cpu, mmu, VECTOR_NMI);
            cpu.cycles += 7;
        } else if cpu.irq_pending {
            cpu.irq_pending = false;
            execute::service_interrupt(cpu, mmu, VECTOR_IRQ);
            cpu.cycles += 7;
        }
    }

    cpu.prev_interrupt = cpu.nmi_pending || (cpu.irq_pending && !cpu.is_flag_set(IRQ_DISABLE));
    cpu.cycles as u32
}

/// Effective address for the eight non-immediate, non-implied addressing
/// modes used by load/store/compare/logical/arithmetic/RMW opcodes, along
/// with any page-cross penalty still owed on top of the table's base cycle
/// count. `always_pays_index_penalty` opcodes (stores and RMW forms, which
/// always perform the dummy read regardless of crossing) already have that
/// cycle baked into their static table entry, so they owe nothing dynamic
/// here; only the plain read-family opcodes owe a +1 when a page is
/// actually crossed.
pub(crate) fn resolve_addr(
    opcode: u8,
    mode: AddrMode,
    cpu: &mut CpuState,
    mmu: &Mmu,
) -> (u16, u32) {
    let forced = table::always_pays_index_penalty(opcode);
    match mode {
        AddrMode::Zp => (addressing::addr_zp(cpu, mmu), 0),
        AddrMode::ZpX => (addressing::addr_zp_x(cpu, mmu), 0),
        AddrMode::ZpY => (addressing::addr_zp_y(cpu, mmu), 0),
        AddrMode::Abs => (addressing::addr_abs(cpu, mmu), 0),
        AddrMode::AbsX => {
            let (addr, crossed) = addressing::addr_abs_x_pc(cpu, mmu);
            (addr, if !forced && crossed { 1 } else { 0 })
        }
        AddrMode::AbsY => {
            let (addr, crossed) = addressing::addr_abs_y_pc(cpu, mmu);
            (addr, if !forced && crossed { 1 } else { 0 })
        }
        AddrMode::IndX => (addressing::addr_ind_x(cpu, mmu), 0),
        AddrMode::IndY => {
            let (addr, crossed) = addressing::addr_ind_y_pc(cpu, mmu);
            (addr, if !forced && crossed { 1 } else { 0 })
        }
        _ => unreachable!("resolve_addr called with non-memory addressing mode {:?}", mode),
    }
}

/// Operand byte for a read-family opcode (LDA/AND/ADC/CMP/...), handling
/// `Imm` directly and delegating to `resolve_addr` for every other mode.
pub(crate) fn operand_value(
    opcode: u8,
    mode: AddrMode,
    cpu: &mut CpuState,
    mmu: &Mmu,
) -> (u8, u32) {
    if mode == AddrMode::Imm {
        return (addressing::fetch_byte(cpu, mmu), 0);
    }
    let (addr, extra) = resolve_addr(opcode, mode, cpu, mmu);
    (addressing::mmu_read(mmu, addr), extra)
}

/// Dispatch a single already-fetched opcode byte: resolve its addressing
/// mode, run its handler, and return the total cycle cost (base + any
/// page-cross / RMW / branch penalty).
pub(crate) fn execute_opcode(cpu: &mut CpuState, mmu: &mut Mmu, opcode: u8) -> u32 {
    let info = table::opcode_info(opcode);
    let mut cycles = info.cycles;

    if control_flow::handle(opcode, cpu, mmu) {
        return cycles;
    }
    if let Some(extra) = branches::handle(opcode, cpu, mmu) {
        return cycles + extra;
    }
    if load_store::handle(opcode, cpu, mmu, &mut cycles) {
        return cycles;
    }
    if logical::handle(opcode, cpu, mmu, &mut cycles) {
        return cycles;
    }
    if arithmetic::handle(opcode, cpu, mmu, &mut cycles) {
        return cycles;
    }
    if compare::handle(opcode, cpu, mmu, &mut cycles) {
        return cycles;
    }
    if rmw::handle(opcode, cpu, mmu, &mut cycles) {
        return cycles;
    }
    if illegal::handle(opcode, cpu, mmu, &mut cycles) {
        return cycles;
    }

    cycles + misc(opcode, cpu, mmu)
}

/// Status flag toggles, register transfers, PHP/PLP/PHA/PLA, NOP, and the
/// handful of opcodes that don't belong to any family above. Returns any
/// page-cross penalty owed on top of the table's base cycle count (only
/// the indexed unofficial NOPs can owe one).
fn misc(opcode: u8, cpu: &mut CpuState, mmu: &mut Mmu) -> u32 {
    use super::state::{CARRY, DECIMAL, IRQ_DISABLE as I, OVERFLOW};
    match opcode {
        0x18 => cpu.assign_flag(CARRY, false),  // CLC
        0x38 => cpu.assign_flag(CARRY, true),   // SEC
        0x58 => cpu.assign_flag(I, false),      // CLI
        0x78 => cpu.assign_flag(I, true),       // SEI
        0xB8 => cpu.assign_flag(OVERFLOW, false), // CLV
        0xD8 => cpu.assign_flag(DECIMAL, false), // CLD
        0xF8 => cpu.assign_flag(DECIMAL, true),  // SED
        0x08 => execute::php(cpu, mmu),
        0x28 => execute::plp(cpu, mmu),
        0x48 => execute::pha(cpu, mmu),
        0x68 => execute::pla(cpu, mmu),
        0xAA => execute::tax(cpu),
        0xA8 => execute::tay(cpu),
        0x8A => execute::txa(cpu),
        0x98 => execute::tya(cpu),
        0xBA => execute::tsx(cpu),
        0x9A => execute::txs(cpu),
        0xE8 => execute::inx(cpu),
        0xC8 => execute::iny(cpu),
        0xCA => execute::dex(cpu),
        0x88 => execute::dey(cpu),
        0x0A => execute::asl_acc(cpu),
        0x4A => execute::lsr_acc(cpu),
        0x2A => execute::rol_acc(cpu),
        0x6A => execute::ror_acc(cpu),
        0xEA => {} // NOP
        0x1A | 0x3A | 0x5A | 0x7A | 0xDA | 0xFA => {} // unofficial single-byte NOPs
        _ if table::opcode_info(opcode).mnemonic == "NOP" => {
            // multi-byte unofficial NOP (DOP/TOP): consume operand bytes, and
            // for the indexed TOP forms, return below.
            return consume_operand(opcode, cpu, mmu);
        }
        0x02 | 0x12 | 0x22 | 0x32 | 0x42 | 0x52 | 0x62 | 0x72 | 0x92 | 0xB2 | 0xD2 | 0xF2 => {
            cpu.running = false; // KIL/JAM/HLT
        }
        _ => unreachable!("opcode ${:02X} not claimed by any dispatch family", opcode),
    }
    0
}

/// For the multi-byte NOP forms (DOP zp/zpx/imm, TOP abs/absx) that have no
/// side effect beyond consuming bytes and (for the indexed forms) charging
/// a page-cross cycle on top of the table's base cost.
fn consume_operand(opcode: u8, cpu: &mut CpuState, mmu: &mut Mmu) -> u32 {
    let mode = table::opcode_info(opcode).mode;
    match mode {
        AddrMode::Imm | AddrMode::Zp => {
            addressing::fetch_byte(cpu, mmu);
            0
        }
        AddrMode::ZpX => {
            addressing::addr_zp_x(cpu, mmu);
            0
        }
        AddrMode::Abs => {
            addressing::addr_abs(cpu, mmu);
            0
        }
        AddrMode::AbsX => {
            let (_, crossed) = addressing::addr_abs_x_pc(cpu, mmu);
            if crossed { 1 } else { 0 }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mmu_with_program(bytes: &[u8]) -> Mmu {
        let mut mmu = Mmu::new([(0x0000, 0x10000, false, None, 0)]).unwrap();
        for (i, &b) in bytes.iter().enumerate() {
            mmu.write(i as u16, b).unwrap();
        }
        mmu
    }

    #[test]
    fn nop_costs_two_cycles() {
        let mut mmu = mmu_with_program(&[0xEA]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        let cycles = step(&mut cpu, &mut mmu);
        assert_eq!(cycles, 2);
        assert_eq!(cpu.pc, 1);
    }

    #[test]
    fn sei_one_instruction_delay_still_fires_latched_irq() {
        let mut mmu = mmu_with_program(&[0x78, 0xEA]); // SEI, NOP
        mmu.write(VECTOR_IRQ, 0x00).unwrap();
        mmu.write(VECTOR_IRQ + 1, 0x90).unwrap();
        let mut cpu = CpuState::new(0, 1, 0xFF);
        cpu.irq_pending = true;
        cpu.prev_interrupt = true; // latched before SEI ran
        let cycles = step(&mut cpu, &mut mmu);
        assert!(cpu.is_flag_set(IRQ_DISABLE));
        assert_eq!(cpu.pc, 0x9000);
        assert_eq!(cycles, 2 + 7);
        assert!(!cpu.irq_pending);
    }

    #[test]
    fn irq_masked_when_not_previously_latched() {
        let mut mmu = mmu_with_program(&[0xEA]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        cpu.p |= IRQ_DISABLE;
        cpu.irq_pending = true;
        let cycles = step(&mut cpu, &mut mmu);
        assert_eq!(cycles, 2);
        assert_eq!(cpu.pc, 1);
        assert!(cpu.irq_pending);
    }

    #[test]
    fn kil_halts_running() {
        let mut mmu = mmu_with_program(&[0x02]);
        let mut cpu = CpuState::new(0, 1, 0xFF);
        step(&mut cpu, &mut mmu);
        assert!(!cpu.running);
    }
}
