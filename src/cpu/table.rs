/*!
table.rs - the 256-entry opcode metadata table shared by instruction
dispatch and the disassembler.

Every opcode byte maps to exactly one `OpInfo`: mnemonic, addressing mode,
instruction length in bytes, base cycle count, whether it crosses pages for
an extra cycle, and whether it's one of the unofficial/illegal opcodes. This
is the single source of truth both `dispatch` and `disasm` read from, so the
two can never drift out of step with each other.

Illegal opcode mnemonics follow the naming this core's spec uses (AAC, AAX,
ARR, ASR, ATX, AXA, AXS, DCP, ISC, KIL, LAR, LAX, RLA, RRA, SLO, SRE, SXA,
SYA, XAA, XAS) rather than the handful of alternate names circulating for
the same silicon behavior.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddrMode {
    Acc,
    Imp,
    Imm,
    Zp,
    ZpX,
    ZpY,
    Abs,
    AbsX,
    AbsY,
    Ind,
    IndX,
    IndY,
    Rel,
}

impl AddrMode {
    pub(crate) fn operand_len(self) -> u8 {
        match self {
            AddrMode::Acc | AddrMode::Imp => 0,
            AddrMode::Imm
            | AddrMode::Zp
            | AddrMode::ZpX
            | AddrMode::ZpY
            | AddrMode::IndX
            | AddrMode::IndY
            | AddrMode::Rel => 1,
            AddrMode::Abs | AddrMode::AbsX | AddrMode::AbsY | AddrMode::Ind => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OpInfo {
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub cycles: u32,
    pub illegal: bool,
}

impl OpInfo {
    pub(crate) fn len(&self) -> u8 {
        1 + self.mode.operand_len()
    }
}

const fn op(mnemonic: &'static str, mode: AddrMode, cycles: u32, illegal: bool) -> OpInfo {
    OpInfo {
        mnemonic,
        mode,
        cycles,
        illegal,
    }
}

use AddrMode::*;

/// Indexed directly by opcode byte.
pub(crate) static OPCODE_TABLE: [OpInfo; 256] = [
    /* 0x00 */ op("BRK", Imp, 7, false),
    /* 0x01 */ op("ORA", IndX, 6, false),
    /* 0x02 */ op("KIL", Imp, 2, true),
    /* 0x03 */ op("SLO", IndX, 8, true),
    /* 0x04 */ op("NOP", Zp, 3, true),
    /* 0x05 */ op("ORA", Zp, 3, false),
    /* 0x06 */ op("ASL", Zp, 5, false),
    /* 0x07 */ op("SLO", Zp, 5, true),
    /* 0x08 */ op("PHP", Imp, 3, false),
    /* 0x09 */ op("ORA", Imm, 2, false),
    /* 0x0A */ op("ASL", Acc, 2, false),
    /* 0x0B */ op("AAC", Imm, 2, true),
    /* 0x0C */ op("NOP", Abs, 4, true),
    /* 0x0D */ op("ORA", Abs, 4, false),
    /* 0x0E */ op("ASL", Abs, 6, false),
    /* 0x0F */ op("SLO", Abs, 6, true),
    /* 0x10 */ op("BPL", Rel, 2, false),
    /* 0x11 */ op("ORA", IndY, 5, false),
    /* 0x12 */ op("KIL", Imp, 2, true),
    /* 0x13 */ op("SLO", IndY, 8, true),
    /* 0x14 */ op("NOP", ZpX, 4, true),
    /* 0x15 */ op("ORA", ZpX, 4, false),
    /* 0x16 */ op("ASL", ZpX, 6, false),
    /* 0x17 */ op("SLO", ZpX, 6, true),
    /* 0x18 */ op("CLC", Imp, 2, false),
    /* 0x19 */ op("ORA", AbsY, 4, false),
    /* 0x1A */ op("NOP", Imp, 2, true),
    /* 0x1B */ op("SLO", AbsY, 7, true),
    /* 0x1C */ op("NOP", AbsX, 4, true),
    /* 0x1D */ op("ORA", AbsX, 4, false),
    /* 0x1E */ op("ASL", AbsX, 7, false),
    /* 0x1F */ op("SLO", AbsX, 7, true),
    /* 0x20 */ op("JSR", Abs, 6, false),
    /* 0x21 */ op("AND", IndX, 6, false),
    /* 0x22 */ op("KIL", Imp, 2, true),
    /* 0x23 */ op("RLA", IndX, 8, true),
    /* 0x24 */ op("BIT", Zp, 3, false),
    /* 0x25 */ op("AND", Zp, 3, false),
    /* 0x26 */ op("ROL", Zp, 5, false),
    /* 0x27 */ op("RLA", Zp, 5, true),
    /* 0x28 */ op("PLP", Imp, 4, false),
    /* 0x29 */ op("AND", Imm, 2, false),
    /* 0x2A */ op("ROL", Acc, 2, false),
    /* 0x2B */ op("AAC", Imm, 2, true),
    /* 0x2C */ op("BIT", Abs, 4, false),
    /* 0x2D */ op("AND", Abs, 4, false),
    /* 0x2E */ op("ROL", Abs, 6, false),
    /* 0x2F */ op("RLA", Abs, 6, true),
    /* 0x30 */ op("BMI", Rel, 2, false),
    /* 0x31 */ op("AND", IndY, 5, false),
    /* 0x32 */ op("KIL", Imp, 2, true),
    /* 0x33 */ op("RLA", IndY, 8, true),
    /* 0x34 */ op("NOP", ZpX, 4, true),
    /* 0x35 */ op("AND", ZpX, 4, false),
    /* 0x36 */ op("ROL", ZpX, 6, false),
    /* 0x37 */ op("RLA", ZpX, 6, true),
    /* 0x38 */ op("SEC", Imp, 2, false),
    /* 0x39 */ op("AND", AbsY, 4, false),
    /* 0x3A */ op("NOP", Imp, 2, true),
    /* 0x3B */ op("RLA", AbsY, 7, true),
    /* 0x3C */ op("NOP", AbsX, 4, true),
    /* 0x3D */ op("AND", AbsX, 4, false),
    /* 0x3E */ op("ROL", AbsX, 7, false),
    /* 0x3F */ op("RLA", AbsX, 7, true),
    /* 0x40 */ op("RTI", Imp, 6, false),
    /* 0x41 */ op("EOR", IndX, 6, false),
    /* 0x42 */ op("KIL", Imp, 2, true),
    /* 0x43 */ op("SRE", IndX, 8, true),
    /* 0x44 */ op("NOP", Zp, 3, true),
    /* 0x45 */ op("EOR", Zp, 3, false),
    /* 0x46 */ op("LSR", Zp, 5, false),
    /* 0x47 */ op("SRE", Zp, 5, true),
    /* 0x48 */ op("PHA", Imp, 3, false),
    /* 0x49 */ op("EOR", Imm, 2, false),
    /* 0x4A */ op("LSR", Acc, 2, false),
    /* 0x4B */ op("ASR", Imm, 2, true),
    /* 0x4C */ op("JMP", Abs, 3, false),
    /* 0x4D */ op("EOR", Abs, 4, false),
    /* 0x4E */ op("LSR", Abs, 6, false),
    /* 0x4F */ op("SRE", Abs, 6, true),
    /* 0x50 */ op("BVC", Rel, 2, false),
    /* 0x51 */ op("EOR", IndY, 5, false),
    /* 0x52 */ op("KIL", Imp, 2, true),
    /* 0x53 */ op("SRE", IndY, 8, true),
    /* 0x54 */ op("NOP", ZpX, 4, true),
    /* 0x55 */ op("EOR", ZpX, 4, false),
    /* 0x56 */ op("LSR", ZpX, 6, false),
    /* 0x57 */ op("SRE", ZpX, 6, true),
    /* 0x58 */ op("CLI", Imp, 2, false),
    /* 0x59 */ op("EOR", AbsY, 4, false),
    /* 0x5A */ op("NOP", Imp, 2, true),
    /* 0x5B */ op("SRE", AbsY, 7, true),
    /* 0x5C */ op("NOP", AbsX, 4, true),
    /* 0x5D */ op("EOR", AbsX, 4, false),
    /* 0x5E */ op("LSR", AbsX, 7, false),
    /* 0x5F */ op("SRE", AbsX, 7, true),
    /* 0x60 */ op("RTS", Imp, 6, false),
    /* 0x61 */ op("ADC", IndX, 6, false),
    /* 0x62 */ op("KIL", Imp, 2, true),
    /* 0x63 */ op("RRA", IndX, 8, true),
    /* 0x64 */ op("NOP", Zp, 3, true),
    /* 0x65 */ op("ADC", Zp, 3, false),
    /* 0x66 */ op("ROR", Zp, 5, false),
    /* 0x67 */ op("RRA", Zp, 5, true),
    /* 0x68 */ op("PLA", Imp, 4, false),
    /* 0x69 */ op("ADC", Imm, 2, false),
    /* 0x6A */ op("ROR", Acc, 2, false),
    /* 0x6B */ op("ARR", Imm, 2, true),
    /* 0x6C */ op("JMP", Ind, 5, false),
    /* 0x6D */ op("ADC", Abs, 4, false),
    /* 0x6E */ op("ROR", Abs, 6, false),
    /* 0x6F */ op("RRA", Abs, 6, true),
    /* 0x70 */ op("BVS", Rel, 2, false),
    /* 0x71 */ op("ADC", IndY, 5, false),
    /* 0x72 */ op("KIL", Imp, 2, true),
    /* 0x73 */ op("RRA", IndY, 8, true),
    /* 0x74 */ op("NOP", ZpX, 4, true),
    /* 0x75 */ op("ADC", ZpX, 4, false),
    /* 0x76 */ op("ROR", ZpX, 6, false),
    /* 0x77 */ op("RRA", ZpX, 6, true),
    /* 0x78 */ op("SEI", Imp, 2, false),
    /* 0x79 */ op("ADC", AbsY, 4, false),
    /* 0x7A */ op("NOP", Imp, 2, true),
    /* 0x7B */ op("RRA", AbsY, 7, true),
    /* 0x7C */ op("NOP", AbsX, 4, true),
    /* 0x7D */ op("ADC", AbsX, 4, false),
    /* 0x7E */ op("ROR", AbsX, 7, false),
    /* 0x7F */ op("RRA", AbsX, 7, true),
    /* 0x80 */ op("NOP", Imm, 2, true),
    /* 0x81 */ op("STA", IndX, 6, false),
    /* 0x82 */ op("NOP", Imm, 2, true),
    /* 0x83 */ op("AAX", IndX, 6, true),
    /* 0x84 */ op("STY", Zp, 3, false),
    /* 0x85 */ op("STA", Zp, 3, false),
    /* 0x86 */ op("STX", Zp, 3, false),
    /* 0x87 */ op("AAX", Zp, 3, true),
    /* 0x88 */ op("DEY", Imp, 2, false),
    /* 0x89 */ op("NOP", Imm, 2, true),
    /* 0x8A */ op("TXA", Imp, 2, false),
    /* 0x8B */ op("XAA", Imm, 2, true),
    /* 0x8C */ op("STY", Abs, 4, false),
    /* 0x8D */ op("STA", Abs, 4, false),
    /* 0x8E */ op("STX", Abs, 4, false),
    /* 0x8F */ op("AAX", Abs, 4, true),
    /* 0x90 */ op("BCC", Rel, 2, false),
    /* 0x91 */ op("STA", IndY, 6, false),
    /* 0x92 */ op("KIL", Imp, 2, true),
    /* 0x93 */ op("AXA", IndY, 6, true),
    /* 0x94 */ op("STY", ZpX, 4, false),
    /* 0x95 */ op("STA", ZpX, 4, false),
    /* 0x96 */ op("STX", ZpY, 4, false),
    /* 0x97 */ op("AAX", ZpY, 4, true),
    /* 0x98 */ op("TYA", Imp, 2, false),
    /* 0x99 */ op("STA", AbsY, 5, false),
    /* 0x9A */ op("TXS", Imp, 2, false),
    /* 0x9B */ op("XAS", AbsY, 5, true),
    /* 0x9C */ op("SYA", AbsX, 5, true),
    /* 0x9D */ op("STA", AbsX, 5, false),
    /* 0x9E */ op("SXA", AbsY, 5, true),
    /* 0x9F */ op("AXA", AbsY, 5, true),
    /* 0xA0 */ op("LDY", Imm, 2, false),
    /* 0xA1 */ op("LDA", IndX, 6, false),
    /* 0xA2 */ op("LDX", Imm, 2, false),
    /* 0xA3 */ op("LAX", IndX, 6, true),
    /* 0xA4 */ op("LDY", Zp, 3, false),
    /* 0xA5 */ op("LDA", Zp, 3, false),
    /* 0xA6 */ op("LDX", Zp, 3, false),
    /* 0xA7 */ op("LAX", Zp, 3, true),
    /* 0xA8 */ op("TAY", Imp, 2, false),
    /* 0xA9 */ op("LDA", Imm, 2, false),
    /* 0xAA */ op("TAX", Imp, 2, false),
    /* 0xAB */ op("ATX", Imm, 2, true),
    /* 0xAC */ op("LDY", Abs, 4, false),
    /* 0xAD */ op("LDA", Abs, 4, false),
    /* 0xAE */ op("LDX", Abs, 4, false),
    /* 0xAF */ op("LAX", Abs, 4, true),
    /* 0xB0 */ op("BCS", Rel, 2, false),
    /* 0xB1 */ op("LDA", IndY, 5, false),
    /* 0xB2 */ op("KIL", Imp, 2, true),
    /* 0xB3 */ op("LAX", IndY, 5, true),
    /* 0xB4 */ op("LDY", ZpX, 4, false),
    /* 0xB5 */ op("LDA", ZpX, 4, false),
    /* 0xB6 */ op("LDX", ZpY, 4, false),
    /* 0xB7 */ op("LAX", ZpY, 4, true),
    /* 0xB8 */ op("CLV", Imp, 2, false),
    /* 0xB9 */ op("LDA", AbsY, 4, false),
    /* 0xBA */ op("TSX", Imp, 2, false),
    /* 0xBB */ op("LAR", AbsY, 4, true),
    /* 0xBC */ op("LDY", AbsX, 4, false),
    /* 0xBD */ op("LDA", AbsX, 4, false),
    /* 0xBE */ op("LDX", AbsY, 4, false),
    /* 0xBF */ op("LAX", AbsY, 4, true),
    /* 0xC0 */ op("CPY", Imm, 2, false),
    /* 0xC1 */ op("CMP", IndX, 6, false),
    /* 0xC2 */ op("NOP", Imm, 2, true),
    /* 0xC3 */ op("DCP", IndX, 8, true),
    /* 0xC4 */ op("CPY", Zp, 3, false),
    /* 0xC5 */ op("CMP", Zp, 3, false),
    /* 0xC6 */ op("DEC", Zp, 5, false),
    /* 0xC7 */ op("DCP", Zp, 5, true),
    /* 0xC8 */ op("INY", Imp, 2, false),
    /* 0xC9 */ op("CMP", Imm, 2, false),
    /* 0xCA */ op("DEX", Imp, 2, false),
    /* 0xCB */ op("AXS", Imm, 2, true),
    /* 0xCC */ op("CPY", Abs, 4, false),
    /* 0xCD */ op("CMP", Abs, 4, false),
    /* 0xCE */ op("DEC", Abs, 6, false),
    /* 0xCF */ op("DCP", Abs, 6, true),
    /* 0xD0 */ op("BNE", Rel, 2, false),
    /* 0xD1 */ op("CMP", IndY, 5, false),
    /* 0xD2 */ op("KIL", Imp, 2, true),
    /* 0xD3 */ op("DCP", IndY, 8, true),
    /* 0xD4 */ op("NOP", ZpX, 4, true),
    /* 0xD5 */ op("CMP", ZpX, 4, false),
    /* 0xD6 */ op("DEC", ZpX, 6, false),
    /* 0xD7 */ op("DCP", ZpX, 6, true),
    /* 0xD8 */ op("CLD", Imp, 2, false),
    /* 0xD9 */ op("CMP", AbsY, 4, false),
    /* 0xDA */ op("NOP", Imp, 2, true),
    /* 0xDB */ op("DCP", AbsY, 7, true),
    /* 0xDC */ op("NOP", AbsX, 4, true),
    /* 0xDD */ op("CMP", AbsX, 4, false),
    /* 0xDE */ op("DEC", AbsX, 7, false),
    /* 0xDF */ op("DCP", AbsX, 7, true),
    /* 0xE0 */ op("CPX", Imm, 2, false),
    /* 0xE1 */ op("SBC", IndX, 6, false),
    /* 0xE2 */ op("NOP", Imm, 2, true),
    /* 0xE3 */ op("ISC", IndX, 8, true),
    /* 0xE4 */ op("CPX", Zp, 3, false),
    /* 0xE5 */ op("SBC", Zp, 3, false),
    /* 0xE6 */ op("INC", Zp, 5, false),
    /* 0xE7 */ op("ISC", Zp, 5, true),
    /* 0xE8 */ op("INX", Imp, 2, false),
    /* 0xE9 */ op("SBC", Imm, 2, false),
    /* 0xEA */ op("NOP", Imp, 2, false),
    /* 0xEB */ op("SBC", Imm, 2, true),
    /* 0xEC */ op("CPX", Abs, 4, false),
    /* 0xED */ op("SBC", Abs, 4, false),
    /* 0xEE */ op("INC", Abs, 6, false),
    /* 0xEF */ op("ISC", Abs, 6, true),
    /* 0xF0 */ op("BEQ", Rel, 2, false),
    /* 0xF1 */ op("SBC", IndY, 5, false),
    /* 0xF2 */ op("KIL", Imp, 2, true),
    /* 0xF3 */ op("ISC", IndY, 8, true),
    /* 0xF4 */ op("NOP", ZpX, 4, true),
    /* 0xF5 */ op("SBC", ZpX, 4, false),
    /* 0xF6 */ op("INC", ZpX, 6, false),
    /* 0xF7 */ op("ISC", ZpX, 6, true),
    /* 0xF8 */ op("SED", Imp, 2, false),
    /* 0xF9 */ op("SBC", AbsY, 4, false),
    /* 0xFA */ op("NOP", Imp, 2, true),
    /* 0xFB */ op("ISC", AbsY, 7, true),
    /* 0xFC */ op("NOP", AbsX, 4, true),
    /* 0xFD */ op("SBC", AbsX, 4, false),
    /* 0xFE */ op("INC", AbsX, 7, false),
    /* 0xFF */ op("ISC", AbsX, 7, true),
];

/// Opcodes that never pay a page-cross penalty on their (X/Y)-indexed
/// addressing mode even though the mode can cross a page — these always
/// assume the worst case and charge the extra cycle unconditionally
/// because they write through the effective address (store semantics, or
/// read-modify-write). Covers the official stores/RMW forms and their
/// illegal SLO/RLA/SRE/RRA/DCP/ISC counterparts, which are RMW too.
pub(crate) fn always_pays_index_penalty(opcode: u8) -> bool {
    matches!(
        opcode,
        0x1E | 0xDE
            | 0xFE
            | 0x5E
            | 0x3E
            | 0x7E
            | 0x9D
            | 0x99
            | 0x91
            | 0x9C
            | 0x9E
            | 0x9F
            | 0x93
            | 0x9B
            | 0x13
            | 0x1B
            | 0x1F
            | 0x33
            | 0x3B
            | 0x3F
            | 0x53
            | 0x5B
            | 0x5F
            | 0x73
            | 0x7B
            | 0x7F
            | 0xD3
            | 0xDB
            | 0xDF
            | 0xF3
            | 0xFB
            | 0xFF
    )
}

pub(crate) fn opcode_info(opcode: u8) -> &'static OpInfo {
    &OPCODE_TABLE[opcode as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_all_256_entries_populated() {
        assert_eq!(OPCODE_TABLE.len(), 256);
    }

    #[test]
    fn brk_is_seven_cycles_one_byte() {
        let info = opcode_info(0x00);
        assert_eq!(info.mnemonic, "BRK");
        assert_eq!(info.len(), 1);
        assert_eq!(info.cycles, 7);
    }

    #[test]
    fn jmp_indirect_is_three_byte_five_cycle() {
        let info = opcode_info(0x6C);
        assert_eq!(info.mode, AddrMode::Ind);
        assert_eq!(info.len(), 3);
        assert_eq!(info.cycles, 5);
    }

    #[test]
    fn illegal_opcodes_are_flagged() {
        assert!(opcode_info(0xA3).illegal); // LAX (izx)
        assert!(!opcode_info(0xA5).illegal); // LDA zp
    }

    #[test]
    fn sax_variants_never_pay_index_penalty() {
        assert!(!always_pays_index_penalty(0x87));
        assert!(always_pays_index_penalty(0x99));
    }
}
