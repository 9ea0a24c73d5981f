//! Unofficial/illegal opcodes: undocumented combinations of the official
//! ALU and memory-access microcode that real 6502 silicon still executes.
//!
//! Most of these (SLO/RLA/SRE/RRA/DCP/ISC) are a read-modify-write fused
//! with an ALU op against the accumulator; AAX/LAX move a byte between
//! memory and the A/X pair without touching flags the way LDA/STA would.
//! AAC/ASR/ARR/AXS are immediate-only and documented closely enough to be
//! reliable; ATX/XAA/AXA/SXA/SYA/XAS key off unstable internal bus
//! behavior that varies by chip revision, modeled here via `cpu.magic`
//! and the indexed-store "address high byte + 1" quirk.

use crate::mmu::Mmu;

use super::super::addressing::{mmu_read, mmu_write};
use super::super::execute::{adc, and, cmp_generic, get_flag, rmw_memory, sbc, set_flag, update_zn};
use super::super::state::{CpuState, CARRY, OVERFLOW};
use super::super::table::opcode_info;
use super::{operand_value, resolve_addr};

/// The AXA/SXA/SYA/XAS store pattern: recover the pre-index base address
/// from the already-indexed effective address, then reproduce the
/// address-bus glitch that corrupts the high byte when the low-byte add
/// carries. `register` is the value ANDed in (A&X, X, Y, or S); the stored
/// byte itself always uses the *original* high byte, glitched or not.
fn unstable_store(mmu: &mut Mmu, addr: u16, index: u8, register: u8) {
    let base = addr.wrapping_sub(index as u16);
    let low = base & 0x00FF;
    let high = (base >> 8) as u8;
    let low_plus_index = low + index as u16;
    let store_addr = if low_plus_index > 0xFF {
        (((high & register) as u16) << 8) | (low_plus_index & 0xFF)
    } else {
        ((high as u16) << 8) | (low_plus_index & 0xFF)
    };
    let value = register & high.wrapping_add(1);
    mmu_write(mmu, store_addr, value);
}

pub(crate) fn handle(opcode: u8, cpu: &mut CpuState, mmu: &mut Mmu, cycles: &mut u32) -> bool {
    let info = opcode_info(opcode);
    match info.mnemonic {
        "SLO" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            let shifted = rmw_memory(cpu, mmu, addr, |cpu, old| {
                set_flag(cpu, CARRY, old & 0x80 != 0);
                old << 1
            });
            cpu.a |= shifted;
            update_zn(cpu, cpu.a);
            *cycles += extra;
        }
        "RLA" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            let rotated = rmw_memory(cpu, mmu, addr, |cpu, old| {
                let carry_in = get_flag(cpu, CARRY) as u8;
                set_flag(cpu, CARRY, old & 0x80 != 0);
                (old << 1) | carry_in
            });
            cpu.a &= rotated;
            update_zn(cpu, cpu.a);
            *cycles += extra;
        }
        "SRE" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            let shifted = rmw_memory(cpu, mmu, addr, |cpu, old| {
                set_flag(cpu, CARRY, old & 0x01 != 0);
                old >> 1
            });
            cpu.a ^= shifted;
            update_zn(cpu, cpu.a);
            *cycles += extra;
        }
        "RRA" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            let rotated = rmw_memory(cpu, mmu, addr, |cpu, old| {
                let carry_in = get_flag(cpu, CARRY) as u8;
                set_flag(cpu, CARRY, old & 0x01 != 0);
                (old >> 1) | (carry_in << 7)
            });
            adc(cpu, rotated);
            *cycles += extra;
        }
        "DCP" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            let decremented = rmw_memory(cpu, mmu, addr, |_cpu, old| old.wrapping_sub(1));
            cmp_generic(cpu, cpu.a, decremented);
            *cycles += extra;
        }
        "ISC" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            let incremented = rmw_memory(cpu, mmu, addr, |_cpu, old| old.wrapping_add(1));
            sbc(cpu, incremented);
            *cycles += extra;
        }
        "AAX" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            mmu_write(mmu, addr, cpu.a & cpu.x);
            *cycles += extra;
        }
        "LAX" => {
            let (v, extra) = operand_value(opcode, info.mode, cpu, mmu);
            cpu.a = v;
            cpu.x = v;
            update_zn(cpu, v);
            *cycles += extra;
        }
        "AAC" => {
            let (v, _) = operand_value(opcode, info.mode, cpu, mmu);
            and(cpu, v);
            set_flag(cpu, CARRY, cpu.a & 0x80 != 0);
        }
        "ASR" => {
            let (v, _) = operand_value(opcode, info.mode, cpu, mmu);
            and(cpu, v);
            set_flag(cpu, CARRY, cpu.a & 0x01 != 0);
            cpu.a >>= 1;
            update_zn(cpu, cpu.a);
        }
        "ARR" => {
            let (v, _) = operand_value(opcode, info.mode, cpu, mmu);
            cpu.a &= v;
            let carry_in = get_flag(cpu, CARRY) as u8;
            cpu.a = (cpu.a >> 1) | (carry_in << 7);
            update_zn(cpu, cpu.a);
            let bit6 = cpu.a & 0x40 != 0;
            let bit5 = cpu.a & 0x20 != 0;
            set_flag(cpu, CARRY, bit6);
            set_flag(cpu, OVERFLOW, bit6 ^ bit5);
        }
        "ATX" => {
            let (v, _) = operand_value(opcode, info.mode, cpu, mmu);
            cpu.a &= v;
            cpu.x = cpu.a;
            update_zn(cpu, cpu.a);
        }
        "AXS" => {
            let (v, _) = operand_value(opcode, info.mode, cpu, mmu);
            let base = cpu.a & cpu.x;
            set_flag(cpu, CARRY, base >= v);
            cpu.x = base.wrapping_sub(v);
            update_zn(cpu, cpu.x);
        }
        "XAA" => {
            let (v, _) = operand_value(opcode, info.mode, cpu, mmu);
            cpu.a = (cpu.a | cpu.magic) & cpu.x & v;
            update_zn(cpu, cpu.a);
        }
        "LAR" => {
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            let v = mmu_read(mmu, addr);
            let result = v & cpu.s;
            cpu.a = result;
            cpu.x = result;
            cpu.s = result;
            update_zn(cpu, result);
            *cycles += extra;
        }
        "AXA" => {
            // Both AXA forms (IndY $93, AbsY $9F) index with Y.
            let index = cpu.y;
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            unstable_store(mmu, addr, index, cpu.a & cpu.x);
            *cycles += extra;
        }
        "SXA" => {
            let index = cpu.y;
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            unstable_store(mmu, addr, index, cpu.x);
            *cycles += extra;
        }
        "SYA" => {
            let index = cpu.x;
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            unstable_store(mmu, addr, index, cpu.y);
            *cycles += extra;
        }
        "XAS" => {
            let index = cpu.y;
            let (addr, extra) = resolve_addr(opcode, info.mode, cpu, mmu);
            cpu.s = cpu.a & cpu.x;
            unstable_store(mmu, addr, index, cpu.s);
            *cycles += extra;
        }
        _ => return false,
    }
    true
}
