/*!
cpu::mod - Public façade for the 6502 CPU core.

Internals are split the way the dispatch layer needs them:

    state.rs      - Register file, status flags, CpuState constructor.
    addressing.rs - Instruction-stream fetch & effective-address rules for
                    all thirteen addressing modes.
    execute.rs    - ALU/stack/shift/branch semantics shared by dispatch.
    table.rs      - The 256-entry opcode metadata table, shared with the
                    disassembler so the two can't drift apart.
    dispatch/     - Per-step orchestration and the opcode-family handlers.

Only `Cpu` and `Registers` (re-exported from `state`) are public; everything
else is `pub(crate)` and subject to change.
*/

pub(crate) mod addressing;
mod dispatch;
pub(crate) mod execute;
pub(crate) mod state;
pub(crate) mod table;

use crate::mmu::Mmu;

pub use state::Registers;

use dispatch::{VECTOR_IRQ, VECTOR_NMI, VECTOR_RESET};
use state::{CpuState, IRQ_DISABLE, UNUSED};

/// The three hardware vectors a reset or interrupt can target.
#[derive(Debug, Clone, Copy)]
enum Vector {
    Reset,
}

impl Vector {
    fn addr(self) -> u16 {
        match self {
            Vector::Reset => VECTOR_RESET,
        }
    }
}

/// A 6502 core borrowing an `Mmu` for the lifetime of the emulation.
pub struct Cpu<'a> {
    state: CpuState,
    mmu: &'a mut Mmu,
}

impl<'a> Cpu<'a> {
    /// Construct a CPU with an explicit starting `pc` (bypassing a vector
    /// read) and the given stack page / XAA magic byte. Most hosts will
    /// call `reset()` immediately afterward to load `pc` from the RESET
    /// vector instead.
    pub fn new(mmu: &'a mut Mmu, pc: u16, stack_page: u8, magic: u8) -> Self {
        Cpu {
            state: CpuState::new(pc, stack_page, magic),
            mmu,
        }
    }

    /// Reload `pc` from the RESET vector, set `S=0xFF`, `P` with only I and
    /// the unused bit set, clear `A`/`X`/`Y` and any pending interrupts, and
    /// charge the conventional 7-cycle reset cost.
    pub fn reset(&mut self) {
        self.state.a = 0;
        self.state.x = 0;
        self.state.y = 0;
        self.state.s = 0xFF;
        self.state.p = UNUSED | IRQ_DISABLE;
        self.state.nmi_pending = false;
        self.state.irq_pending = false;
        self.state.prev_interrupt = false;
        self.state.pc = self
            .mmu
            .read_word(Vector::Reset.addr())
            .unwrap_or_else(|e| panic!("6502 core: {e}"));
        self.state.cycles = 7;
    }

    /// Run exactly one instruction (plus any interrupt latched from the
    /// previous step) and return the cycles it cost.
    pub fn step(&mut self) -> u32 {
        dispatch::step(&mut self.state, self.mmu)
    }

    /// Run a literal instruction stream without touching the Mmu's `pc`
    /// contents — the bytes themselves stand in for the fetch source.
    /// Returns the cycle cost of the single instruction decoded from
    /// `bytes`. Intended for host test harnesses exercising one opcode at
    /// a time without constructing a full memory map around it.
    pub fn execute(&mut self, bytes: &[u8]) -> u32 {
        self.state.adhoc = Some(state::AdhocStream {
            bytes: bytes.to_vec(),
            pos: 0,
        });
        self.state.pc = 0;
        let opcode = addressing::fetch_byte(&mut self.state, self.mmu);
        let cycles = dispatch::execute_opcode(&mut self.state, self.mmu, opcode);
        self.state.adhoc = None;
        cycles
    }

    /// Assert the IRQ line; taken on the step after the one currently in
    /// flight, and only if `I` is clear when that step's poll runs.
    pub fn irq(&mut self) {
        self.state.irq_pending = true;
    }

    /// Assert the NMI line; always taken on the next poll regardless of `I`.
    pub fn nmi(&mut self) {
        self.state.nmi_pending = true;
    }

    pub fn registers(&self) -> Registers {
        self.state.registers()
    }

    /// Cycles consumed by the most recent `step`/`execute` call.
    pub fn cycles(&self) -> u64 {
        self.state.cycles
    }

    /// `false` once a KIL/JAM/HLT opcode has run; the host should stop
    /// calling `step()`.
    pub fn running(&self) -> bool {
        self.state.running
    }
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
    fn reset_loads_pc_from_vector_and_charges_seven_cycles() {
        let mut mmu = mmu_with(&[(VECTOR_RESET, 0x00), (VECTOR_RESET + 1, 0x80)]);
        let mut cpu = Cpu::new(&mut mmu, 0, 1, 0xFF);
        cpu.reset();
        let regs = cpu.registers();
        assert_eq!(regs.pc, 0x8000);
        assert_eq!(regs.s, 0xFF);
        assert_eq!(regs.p, UNUSED | IRQ_DISABLE);
        assert_eq!(cpu.cycles(), 7);
    }

    #[test]
    fn execute_runs_an_adhoc_instruction_stream() {
        let mut mmu = mmu_with(&[]);
        let mut cpu = Cpu::new(&mut mmu, 0, 1, 0xFF);
        let cycles = cpu.execute(&[0x69, 0x01]); // ADC #$01
        assert_eq!(cpu.registers().a, 1);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn jsr_then_rts_round_trip_through_the_facade() {
        let mut mmu = mmu_with(&[
            (0xBBAA, 0x20),
            (0xBBAB, 0xCC),
            (0xBBAC, 0xCC),
            (0xCCCC, 0x60),
        ]);
        let mut cpu = Cpu::new(&mut mmu, 0xBBAA, 1, 0xFF);
        cpu.state.s = 0xFD;
        cpu.step();
        assert_eq!(cpu.registers().pc, 0xCCCC);
        assert_eq!(cpu.registers().s, 0xFB);
        cpu.step();
        assert_eq!(cpu.registers().pc, 0xBBAD);
        assert_eq!(cpu.registers().s, 0xFD);
    }

    #[test]
    fn brk_then_rti_round_trip_through_the_facade() {
        let mut mmu = mmu_with(&[(VECTOR_IRQ, 0x34), (VECTOR_IRQ + 1, 0x12), (0x1234, 0x40)]);
        let mut cpu = Cpu::new(&mut mmu, 0x8000, 1, 0xFF);
        cpu.state.p = 0x24;
        cpu.state.s = 0xFF;
        cpu.step(); // BRK
        assert_eq!(cpu.registers().pc, 0x1234);
        assert_eq!(cpu.registers().s, 0xFC);
        cpu.step(); // RTI
        assert_eq!(cpu.registers().pc, 0x8002);
        assert_eq!(cpu.registers().p, 0x24);
    }

    #[test]
    fn adc_binary_sets_overflow_and_clears_carry() {
        let mut mmu = mmu_with(&[]);
        let mut cpu = Cpu::new(&mut mmu, 0, 1, 0xFF);
        cpu.state.a = 0x7F;
        let cycles = cpu.execute(&[0x69, 0x01]); // ADC #$01
        let regs = cpu.registers();
        assert_eq!(regs.a, 0x80);
        assert!(regs.p & super::state::NEGATIVE != 0);
        assert!(regs.p & super::state::OVERFLOW != 0);
        assert!(regs.p & super::state::CARRY == 0);
        assert!(regs.p & super::state::ZERO == 0);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn adc_decimal_mode_follows_legacy_bcd_rule() {
        // Low-nibble sum 3+3+0=6 does not exceed 9, so the low-nibble carry
        // that gates both the high-nibble bump and the CARRY flag is clear.
        let mut mmu = mmu_with(&[]);
        let mut cpu = Cpu::new(&mut mmu, 0, 1, 0xFF);
        cpu.state.a = 0x63;
        cpu.state.p |= super::state::DECIMAL;
        let cycles = cpu.execute(&[0x69, 0x63]); // ADC #$63
        let regs = cpu.registers();
        assert_eq!(regs.a, 0x26);
        assert!(regs.p & super::state::CARRY == 0);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn jmp_indirect_wraps_within_the_page() {
        let mut mmu = mmu_with(&[(0x01FF, 0x03), (0x0100, 0x02)]);
        let mut cpu = Cpu::new(&mut mmu, 0, 1, 0xFF);
        let cycles = cpu.execute(&[0x6C, 0xFF, 0x01]); // JMP ($01FF)
        assert_eq!(cpu.registers().pc, 0x0203);
        assert_eq!(cycles, 5);
    }

    #[test]
    fn taken_branch_across_a_page_boundary_costs_four_cycles() {
        let mut mmu = mmu_with(&[(0x00F0, 0x90), (0x00F1, 0x20)]); // BCC +32
        let mut cpu = Cpu::new(&mut mmu, 0x00F0, 1, 0xFF);
        let cycles = cpu.step();
        assert_eq!(cpu.registers().pc, 0x0112);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn nmi_takes_priority_over_irq_on_the_same_poll() {
        let mut mmu = mmu_with(&[
            (VECTOR_NMI, 0x00),
            (VECTOR_NMI + 1, 0x90),
            (VECTOR_IRQ, 0x00),
            (VECTOR_IRQ + 1, 0xA0),
        ]);
        let mut cpu = Cpu::new(&mut mmu, 0, 1, 0xFF);
        cpu.nmi();
        cpu.irq();
        cpu.state.prev_interrupt = true;
        cpu.step();
        assert_eq!(cpu.registers().pc, 0x9000);
    }
}
