//! Cycle-stepped MOS 6502 CPU emulator.
//!
//! The CPU is a deterministic state machine advanced one cycle at a time by
//! an external clock: each `tick()` performs an opcode fetch, an operand
//! fetch, or an idle cycle, and all architectural effects of an instruction
//! land on its final (retirement) cycle. Two silicon revisions are
//! supported, selected at construction: the original NMOS part with its
//! documented quirks, and the 65C02 with the JMP-indirect fix.
//!
//! Deliberately unsupported, and fatal when exercised: decimal-mode
//! arithmetic and the undocumented opcodes.

mod cpu;
mod disasm;
pub mod flags;
mod opcodes;
mod registers;

pub use cpu::{CpuError, Interrupt, Model, Mos6502, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use disasm::format_instruction;
pub use flags::Status;
pub use opcodes::{coverage_matrix, AddrMode, Instruction, Mnemonic, OPCODES};
pub use registers::Registers;
