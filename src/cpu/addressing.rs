/*!
addressing.rs - instruction-stream fetch and effective-address calculation
for all thirteen 6502 addressing modes.

Every fetch goes through `fetch_byte`/`fetch_word`, which transparently draw
from the `Mmu` at the current `pc` during normal stepping, or from a literal
byte slice during `Cpu::execute` (see `CpuState::adhoc`) — either way `pc`
advances by the number of bytes consumed, so downstream code (stack pushes
of the return address, relative branch targets) never needs to know which
source was used.

Functions that can incur a page-crossing cycle penalty return `(addr, bool)`;
callers decide whether the extra cycle actually applies (some opcodes, like
the read-modify-write forms, always pay it regardless of crossing).
*/

use crate::mmu::Mmu;

use super::state::CpuState;

/// Read a byte through the Mmu, panicking on a memory-map fault — see
/// mmu.rs's module doc for why the CPU core does not propagate `MmuError`.
pub(crate) fn mmu_read(mmu: &Mmu, addr: u16) -> u8 {
    mmu.read(addr)
        .unwrap_or_else(|e| panic!("6502 core: {e}"))
}

pub(crate) fn mmu_write(mmu: &mut Mmu, addr: u16, value: u8) {
    mmu.write(addr, value)
        .unwrap_or_else(|e| panic!("6502 core: {e}"))
}

/// Next instruction-stream byte, advancing `pc`.
pub(crate) fn fetch_byte(cpu: &mut CpuState, mmu: &Mmu) -> u8 {
    let value = match cpu.adhoc.as_mut() {
        Some(stream) => {
            let b = stream.bytes.get(stream.pos).copied().unwrap_or(0);
            stream.pos += 1;
            b
        }
        None => mmu_read(mmu, cpu.pc),
    };
    cpu.pc = cpu.pc.wrapping_add(1);
    value
}

/// Next instruction-stream word (little-endian), advancing `pc` by two.
pub(crate) fn fetch_word(cpu: &mut CpuState, mmu: &Mmu) -> u16 {
    let lo = fetch_byte(cpu, mmu) as u16;
    let hi = fetch_byte(cpu, mmu) as u16;
    (hi << 8) | lo
}

/// Read a little-endian word from two zero-page addresses, wrapping within
/// page zero (`$FF` then `$00`, never `$0100`).
pub(crate) fn read_word_zp(mmu: &Mmu, base: u8) -> u16 {
    let lo = mmu_read(mmu, base as u16) as u16;
    let hi = mmu_read(mmu, base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// Read a little-endian word from `addr`/`addr+1`, reproducing the 6502's
/// JMP-indirect hardware bug: if `addr`'s low byte is `$FF`, the high byte
/// is fetched from `addr & 0xFF00` instead of `addr + 1`.
pub(crate) fn read_word_indirect_bug(mmu: &Mmu, addr: u16) -> u16 {
    let lo = mmu_read(mmu, addr) as u16;
    let hi_addr = if addr & 0x00FF == 0x00FF {
        addr & 0xFF00
    } else {
        addr.wrapping_add(1)
    };
    let hi = mmu_read(mmu, hi_addr) as u16;
    (hi << 8) | lo
}

pub(crate) fn addr_zp(cpu: &mut CpuState, mmu: &Mmu) -> u16 {
    fetch_byte(cpu, mmu) as u16
}

pub(crate) fn addr_zp_x(cpu: &mut CpuState, mmu: &Mmu) -> u16 {
    fetch_byte(cpu, mmu).wrapping_add(cpu.x) as u16
}

pub(crate) fn addr_zp_y(cpu: &mut CpuState, mmu: &Mmu) -> u16 {
    fetch_byte(cpu, mmu).wrapping_add(cpu.y) as u16
}

pub(crate) fn addr_abs(cpu: &mut CpuState, mmu: &Mmu) -> u16 {
    fetch_word(cpu, mmu)
}

fn page_crossed(base: u16, final_addr: u16) -> bool {
    base & 0xFF00 != final_addr & 0xFF00
}

pub(crate) fn addr_abs_x_pc(cpu: &mut CpuState, mmu: &Mmu) -> (u16, bool) {
    let base = fetch_word(cpu, mmu);
    let addr = base.wrapping_add(cpu.x as u16);
    (addr, page_crossed(base, addr))
}

pub(crate) fn addr_abs_y_pc(cpu: &mut CpuState, mmu: &Mmu) -> (u16, bool) {
    let base = fetch_word(cpu, mmu);
    let addr = base.wrapping_add(cpu.y as u16);
    (addr, page_crossed(base, addr))
}

pub(crate) fn addr_ind_x(cpu: &mut CpuState, mmu: &Mmu) -> u16 {
    let ptr = fetch_byte(cpu, mmu).wrapping_add(cpu.x);
    read_word_zp(mmu, ptr)
}

pub(crate) fn addr_ind_y_pc(cpu: &mut CpuState, mmu: &Mmu) -> (u16, bool) {
    let ptr = fetch_byte(cpu, mmu);
    let base = read_word_zp(mmu, ptr);
    let addr = base.wrapping_add(cpu.y as u16);
    (addr, page_crossed(base, addr))
}

/// Relative-branch target from a signed 8-bit offset, computed relative to
/// the already-advanced `pc` (the address of the instruction after the
/// branch).
pub(crate) fn branch_target(pc: u16, offset: i8) -> u16 {
    pc.wrapping_add(offset as i16 as u16)
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
    fn abs_x_page_cross_detection() {
        let mmu = mmu_with(&[(0x00, 0xFF), (0x01, 0x02)]);
        let mut cpu = CpuState::new(0x00, 0x01, 0xFF);
        cpu.x = 0x01;
        let (addr, crossed) = addr_abs_x_pc(&mut cpu, &mmu);
        assert_eq!(addr, 0x0300);
        assert!(crossed);
    }

    #[test]
    fn abs_x_no_cross_when_staying_in_page() {
        let mmu = mmu_with(&[(0x00, 0x00), (0x01, 0x02)]);
        let mut cpu = CpuState::new(0x00, 0x01, 0xFF);
        cpu.x = 0x01;
        let (addr, crossed) = addr_abs_x_pc(&mut cpu, &mmu);
        assert_eq!(addr, 0x0201);
        assert!(!crossed);
    }

    #[test]
    fn indirect_jmp_bug_wraps_within_page() {
        let mmu = mmu_with(&[(0x01FF, 0x03), (0x0100, 0x02), (0x0200, 0xFF)]);
        let target = read_word_indirect_bug(&mmu, 0x01FF);
        assert_eq!(target, 0x0203);
    }

    #[test]
    fn zero_page_indirect_wraps() {
        let mmu = mmu_with(&[(0xFF, 0x34), (0x00, 0x12)]);
        assert_eq!(read_word_zp(&mmu, 0xFF), 0x1234);
    }

    #[test]
    fn adhoc_stream_feeds_fetch_and_advances_pc() {
        use super::super::state::AdhocStream;
        let mmu = mmu_with(&[]);
        let mut cpu = CpuState::new(0x1000, 0x01, 0xFF);
        cpu.adhoc = Some(AdhocStream {
            bytes: vec![0xAA, 0xBB],
            pos: 0,
        });
        assert_eq!(fetch_byte(&mut cpu, &mmu), 0xAA);
        assert_eq!(fetch_byte(&mut cpu, &mmu), 0xBB);
        assert_eq!(cpu.pc, 0x1002);
    }
}
