//! Static 256-entry opcode table.
//!
//! Sizes and base cycle counts come straight from the published 6502 opcode
//! matrix. Dispatch is a tagged (mnemonic, addressing mode) pair per slot;
//! empty slots are the undocumented opcodes, which this core treats as fatal.

use std::fmt;
use std::fmt::Write as _;

/// Addressing mode of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// No operand; the instruction acts on registers alone.
    Implied,
    /// The operand is the accumulator (shift/rotate variants).
    Accumulator,
    /// The operand byte is the value itself.
    Immediate,
    /// One operand byte addressing $0000-$00FF.
    ZeroPage,
    /// Zero page plus X, wrapping within the page.
    ZeroPageX,
    /// Zero page plus Y, wrapping within the page.
    ZeroPageY,
    /// Two operand bytes forming a little-endian address.
    Absolute,
    /// Absolute plus X.
    AbsoluteX,
    /// Absolute plus Y.
    AbsoluteY,
    /// Pointer at (operand + X) in zero page, both bytes wrapping.
    IndirectX,
    /// Pointer at operand in zero page, then plus Y.
    IndirectY,
    /// JMP only: the target address is read through a 16-bit pointer.
    Indirect,
    /// Branches: signed 8-bit displacement from the following instruction.
    Relative,
}

impl AddrMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u8 {
        match self {
            AddrMode::Implied | AddrMode::Accumulator => 0,
            AddrMode::Immediate
            | AddrMode::ZeroPage
            | AddrMode::ZeroPageX
            | AddrMode::ZeroPageY
            | AddrMode::IndirectX
            | AddrMode::IndirectY
            | AddrMode::Relative => 1,
            AddrMode::Absolute | AddrMode::AbsoluteX | AddrMode::AbsoluteY | AddrMode::Indirect => {
                2
            }
        }
    }
}

/// Instruction mnemonic (all 56 documented instructions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = format!("{self:?}").to_uppercase();
        f.write_str(&name)
    }
}

/// One slot of the decode table.
///
/// `size` is the total instruction length in bytes; `base_cycles` the
/// minimum cycle count. Page-crossing and branch-taken penalties are
/// computed by the dispatcher's extra-cycle predicate, driven by `mode`
/// and `page_penalty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    pub size: u8,
    pub base_cycles: u8,
    /// True for the slots the published matrix marks "+1 if page crossed".
    pub page_penalty: bool,
}

const fn ins(mnemonic: Mnemonic, mode: AddrMode, base_cycles: u8) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        mode,
        size: 1 + mode.operand_len(),
        base_cycles,
        page_penalty: false,
    })
}

/// Table entry with the page-cross penalty (read-class indexed operands).
const fn ins_px(mnemonic: Mnemonic, mode: AddrMode, base_cycles: u8) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        mode,
        size: 1 + mode.operand_len(),
        base_cycles,
        page_penalty: true,
    })
}

/// The decode table, indexed by opcode byte. `None` marks an undocumented
/// opcode.
pub static OPCODES: [Option<Instruction>; 256] = build_table();

#[allow(clippy::too_many_lines)]
const fn build_table() -> [Option<Instruction>; 256] {
    use AddrMode::*;
    use Mnemonic::*;

    let mut t: [Option<Instruction>; 256] = [None; 256];

    t[0x00] = ins(Brk, Implied, 7);
    t[0x01] = ins(Ora, IndirectX, 6);
    t[0x05] = ins(Ora, ZeroPage, 3);
    t[0x06] = ins(Asl, ZeroPage, 5);
    t[0x08] = ins(Php, Implied, 3);
    t[0x09] = ins(Ora, Immediate, 2);
    t[0x0A] = ins(Asl, Accumulator, 2);
    t[0x0D] = ins(Ora, Absolute, 4);
    t[0x0E] = ins(Asl, Absolute, 6);
    t[0x10] = ins(Bpl, Relative, 2);
    t[0x11] = ins_px(Ora, IndirectY, 5);
    t[0x15] = ins(Ora, ZeroPageX, 4);
    t[0x16] = ins(Asl, ZeroPageX, 6);
    t[0x18] = ins(Clc, Implied, 2);
    t[0x19] = ins_px(Ora, AbsoluteY, 4);
    t[0x1D] = ins_px(Ora, AbsoluteX, 4);
    t[0x1E] = ins(Asl, AbsoluteX, 7);
    t[0x20] = ins(Jsr, Absolute, 6);
    t[0x21] = ins(And, IndirectX, 6);
    t[0x24] = ins(Bit, ZeroPage, 3);
    t[0x25] = ins(And, ZeroPage, 3);
    t[0x26] = ins(Rol, ZeroPage, 5);
    t[0x28] = ins(Plp, Implied, 4);
    t[0x29] = ins(And, Immediate, 2);
    t[0x2A] = ins(Rol, Accumulator, 2);
    t[0x2C] = ins(Bit, Absolute, 4);
    t[0x2D] = ins(And, Absolute, 4);
    t[0x2E] = ins(Rol, Absolute, 6);
    t[0x30] = ins(Bmi, Relative, 2);
    t[0x31] = ins_px(And, IndirectY, 5);
    t[0x35] = ins(And, ZeroPageX, 4);
    t[0x36] = ins(Rol, ZeroPageX, 6);
    t[0x38] = ins(Sec, Implied, 2);
    t[0x39] = ins_px(And, AbsoluteY, 4);
    t[0x3D] = ins_px(And, AbsoluteX, 4);
    t[0x3E] = ins(Rol, AbsoluteX, 7);
    t[0x40] = ins(Rti, Implied, 6);
    t[0x41] = ins(Eor, IndirectX, 6);
    t[0x45] = ins(Eor, ZeroPage, 3);
    t[0x46] = ins(Lsr, ZeroPage, 5);
    t[0x48] = ins(Pha, Implied, 3);
    t[0x49] = ins(Eor, Immediate, 2);
    t[0x4A] = ins(Lsr, Accumulator, 2);
    t[0x4C] = ins(Jmp, Absolute, 3);
    t[0x4D] = ins(Eor, Absolute, 4);
    t[0x4E] = ins(Lsr, Absolute, 6);
    t[0x50] = ins(Bvc, Relative, 2);
    t[0x51] = ins_px(Eor, IndirectY, 5);
    t[0x55] = ins(Eor, ZeroPageX, 4);
    t[0x56] = ins(Lsr, ZeroPageX, 6);
    t[0x58] = ins(Cli, Implied, 2);
    t[0x59] = ins_px(Eor, AbsoluteY, 4);
    t[0x5D] = ins_px(Eor, AbsoluteX, 4);
    t[0x5E] = ins(Lsr, AbsoluteX, 7);
    t[0x60] = ins(Rts, Implied, 6);
    t[0x61] = ins(Adc, IndirectX, 6);
    t[0x65] = ins(Adc, ZeroPage, 3);
    t[0x66] = ins(Ror, ZeroPage, 5);
    t[0x68] = ins(Pla, Implied, 4);
    t[0x69] = ins(Adc, Immediate, 2);
    t[0x6A] = ins(Ror, Accumulator, 2);
    t[0x6C] = ins(Jmp, Indirect, 5);
    t[0x6D] = ins(Adc, Absolute, 4);
    t[0x6E] = ins(Ror, Absolute, 6);
    t[0x70] = ins(Bvs, Relative, 2);
    t[0x71] = ins_px(Adc, IndirectY, 5);
    t[0x75] = ins(Adc, ZeroPageX, 4);
    t[0x76] = ins(Ror, ZeroPageX, 6);
    t[0x78] = ins(Sei, Implied, 2);
    t[0x79] = ins_px(Adc, AbsoluteY, 4);
    t[0x7D] = ins_px(Adc, AbsoluteX, 4);
    t[0x7E] = ins(Ror, AbsoluteX, 7);
    t[0x81] = ins(Sta, IndirectX, 6);
    t[0x84] = ins(Sty, ZeroPage, 3);
    t[0x85] = ins(Sta, ZeroPage, 3);
    t[0x86] = ins(Stx, ZeroPage, 3);
    t[0x88] = ins(Dey, Implied, 2);
    t[0x8A] = ins(Txa, Implied, 2);
    t[0x8C] = ins(Sty, Absolute, 4);
    t[0x8D] = ins(Sta, Absolute, 4);
    t[0x8E] = ins(Stx, Absolute, 4);
    t[0x90] = ins(Bcc, Relative, 2);
    t[0x91] = ins(Sta, IndirectY, 6);
    t[0x94] = ins(Sty, ZeroPageX, 4);
    t[0x95] = ins(Sta, ZeroPageX, 4);
    t[0x96] = ins(Stx, ZeroPageY, 4);
    t[0x98] = ins(Tya, Implied, 2);
    t[0x99] = ins(Sta, AbsoluteY, 5);
    t[0x9A] = ins(Txs, Implied, 2);
    t[0x9D] = ins(Sta, AbsoluteX, 5);
    t[0xA0] = ins(Ldy, Immediate, 2);
    t[0xA1] = ins(Lda, IndirectX, 6);
    t[0xA2] = ins(Ldx, Immediate, 2);
    t[0xA4] = ins(Ldy, ZeroPage, 3);
    t[0xA5] = ins(Lda, ZeroPage, 3);
    t[0xA6] = ins(Ldx, ZeroPage, 3);
    t[0xA8] = ins(Tay, Implied, 2);
    t[0xA9] = ins(Lda, Immediate, 2);
    t[0xAA] = ins(Tax, Implied, 2);
    t[0xAC] = ins(Ldy, Absolute, 4);
    t[0xAD] = ins(Lda, Absolute, 4);
    t[0xAE] = ins(Ldx, Absolute, 4);
    t[0xB0] = ins(Bcs, Relative, 2);
    t[0xB1] = ins_px(Lda, IndirectY, 5);
    t[0xB4] = ins(Ldy, ZeroPageX, 4);
    t[0xB5] = ins(Lda, ZeroPageX, 4);
    t[0xB6] = ins(Ldx, ZeroPageY, 4);
    t[0xB8] = ins(Clv, Implied, 2);
    t[0xB9] = ins_px(Lda, AbsoluteY, 4);
    t[0xBA] = ins(Tsx, Implied, 2);
    t[0xBC] = ins_px(Ldy, AbsoluteX, 4);
    t[0xBD] = ins_px(Lda, AbsoluteX, 4);
    t[0xBE] = ins_px(Ldx, AbsoluteY, 4);
    t[0xC0] = ins(Cpy, Immediate, 2);
    t[0xC1] = ins(Cmp, IndirectX, 6);
    t[0xC4] = ins(Cpy, ZeroPage, 3);
    t[0xC5] = ins(Cmp, ZeroPage, 3);
    t[0xC6] = ins(Dec, ZeroPage, 5);
    t[0xC8] = ins(Iny, Implied, 2);
    t[0xC9] = ins(Cmp, Immediate, 2);
    t[0xCA] = ins(Dex, Implied, 2);
    t[0xCC] = ins(Cpy, Absolute, 4);
    t[0xCD] = ins(Cmp, Absolute, 4);
    t[0xCE] = ins(Dec, Absolute, 6);
    t[0xD0] = ins(Bne, Relative, 2);
    t[0xD1] = ins_px(Cmp, IndirectY, 5);
    t[0xD5] = ins(Cmp, ZeroPageX, 4);
    t[0xD6] = ins(Dec, ZeroPageX, 6);
    t[0xD8] = ins(Cld, Implied, 2);
    t[0xD9] = ins_px(Cmp, AbsoluteY, 4);
    t[0xDD] = ins_px(Cmp, AbsoluteX, 4);
    t[0xDE] = ins(Dec, AbsoluteX, 7);
    t[0xE0] = ins(Cpx, Immediate, 2);
    t[0xE1] = ins(Sbc, IndirectX, 6);
    t[0xE4] = ins(Cpx, ZeroPage, 3);
    t[0xE5] = ins(Sbc, ZeroPage, 3);
    t[0xE6] = ins(Inc, ZeroPage, 5);
    t[0xE8] = ins(Inx, Implied, 2);
    t[0xE9] = ins(Sbc, Immediate, 2);
    t[0xEA] = ins(Nop, Implied, 2);
    t[0xEC] = ins(Cpx, Absolute, 4);
    t[0xED] = ins(Sbc, Absolute, 4);
    t[0xEE] = ins(Inc, Absolute, 6);
    t[0xF0] = ins(Beq, Relative, 2);
    t[0xF1] = ins_px(Sbc, IndirectY, 5);
    t[0xF5] = ins(Sbc, ZeroPageX, 4);
    t[0xF6] = ins(Inc, ZeroPageX, 6);
    t[0xF8] = ins(Sed, Implied, 2);
    t[0xF9] = ins_px(Sbc, AbsoluteY, 4);
    t[0xFD] = ins_px(Sbc, AbsoluteX, 4);
    t[0xFE] = ins(Inc, AbsoluteX, 7);

    t
}

/// Render the 16x16 implemented/invalid grid, one row per high nibble.
///
/// `X` marks a decodable opcode, `.` an undocumented slot.
#[must_use]
pub fn coverage_matrix() -> String {
    let mut out = String::from("  0 1 2 3 4 5 6 7 8 9 A B C D E F\n");
    for row in 0..16u16 {
        let _ = write!(out, "{row:X}");
        for col in 0..16u16 {
            let slot = OPCODES[usize::from(row << 4 | col)];
            out.push(' ');
            out.push(if slot.is_some() { 'X' } else { '.' });
        }
        out.push('\n');
    }
    out
}
