//! Assembly-text formatting for decoded instructions.
//!
//! Used by the trace log at retirement and available to drivers that want
//! to show what the CPU is doing.

use crate::opcodes::{AddrMode, OPCODES};

/// Format one instruction as assembly text.
///
/// `addr` is the address the opcode was fetched from; branch targets are
/// resolved to absolute addresses. Undocumented opcodes render as a
/// `.byte` directive.
#[must_use]
pub fn format_instruction(addr: u16, opcode: u8, operands: [u8; 2]) -> String {
    let Some(ins) = OPCODES[usize::from(opcode)] else {
        return format!(".byte ${opcode:02X}");
    };

    let operand = match ins.mode {
        AddrMode::Implied => String::new(),
        AddrMode::Accumulator => "A".to_string(),
        AddrMode::Immediate => format!("#${:02X}", operands[0]),
        AddrMode::ZeroPage => format!("${:02X}", operands[0]),
        AddrMode::ZeroPageX => format!("${:02X},X", operands[0]),
        AddrMode::ZeroPageY => format!("${:02X},Y", operands[0]),
        AddrMode::Absolute => format!("${:04X}", absolute(operands)),
        AddrMode::AbsoluteX => format!("${:04X},X", absolute(operands)),
        AddrMode::AbsoluteY => format!("${:04X},Y", absolute(operands)),
        AddrMode::IndirectX => format!("(${:02X},X)", operands[0]),
        AddrMode::IndirectY => format!("(${:02X}),Y", operands[0]),
        AddrMode::Indirect => format!("(${:04X})", absolute(operands)),
        AddrMode::Relative => {
            let offset = operands[0] as i8;
            let target = addr.wrapping_add(2).wrapping_add(offset as u16);
            format!("${target:04X}")
        }
    };

    if operand.is_empty() {
        ins.mnemonic.to_string()
    } else {
        format!("{} {operand}", ins.mnemonic)
    }
}

fn absolute(operands: [u8; 2]) -> u16 {
    u16::from_le_bytes(operands)
}
