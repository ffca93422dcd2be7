//! 6502 CPU core: cycle dispatcher and instruction execution.
//!
//! Each `tick()` advances the CPU by exactly one cycle: an opcode fetch, an
//! operand-byte fetch, or an idle cycle of the instruction in flight. All
//! architectural side effects land on the retirement cycle, after the
//! extra-cycle predicate has been evaluated against pre-execution state.

use lockstep_core::{Bus, Cpu, Observable, Value};
use thiserror::Error;

use crate::flags::{C, D, I, N, V, Z};
use crate::opcodes::{AddrMode, Instruction, Mnemonic, OPCODES};
use crate::{Registers, Status};

/// NMI vector location.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector location.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector location.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Hardware interrupt entry runs the BRK sequence: 7 cycles.
const INTERRUPT_ENTRY_CYCLES: u8 = 7;

/// Silicon revision to emulate.
///
/// The revisions differ in documented quirks, notably the JMP indirect
/// page-boundary bug. Selected at construction, never by global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// Original NMOS 6502: JMP `($xxFF)` wraps the pointer within its page.
    Original,
    /// 65C02 revision: the indirect pointer increments across pages.
    Cmos65C02,
}

/// Hardware interrupt kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Maskable interrupt request, honoured only while I is clear.
    Irq,
    /// Non-maskable interrupt.
    Nmi,
}

/// Fatal execution errors.
///
/// None of these occur in a well-formed program; all of them halt the CPU.
/// Every tick after the first failure reports the same error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The fetched opcode has no entry in the decode table.
    #[error("invalid opcode ${opcode:02X} at ${pc:04X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    /// Decimal-mode arithmetic was requested (D set on ADC/SBC, or SED).
    #[error("decimal mode is unsupported ({mnemonic} at ${pc:04X})")]
    DecimalMode { mnemonic: Mnemonic, pc: u16 },
}

/// Dispatcher state between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The next tick fetches a new opcode or services a latched interrupt.
    FetchOpcode,
    /// An instruction is in flight.
    Execute,
    /// A hardware interrupt entry sequence is in flight.
    Service(Interrupt),
}

/// The MOS 6502 CPU.
///
/// Holds no memory of its own; the driver lends it the bus for the duration
/// of each `tick()` or `reset()` call.
#[derive(Debug)]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,

    model: Model,
    state: State,

    /// Opcode of the instruction currently executing.
    opcode: u8,
    /// Operand bytes accumulated over the fetch cycles.
    operands: [u8; 2],
    /// Cycles already spent on the current instruction.
    cycle: u8,
    /// Address the current instruction was fetched from (for diagnostics).
    instr_pc: u16,

    irq_pending: bool,
    nmi_pending: bool,

    /// Total cycles executed since reset.
    total_cycles: u64,

    /// Latched fatal error; set once, never cleared except by reset.
    fault: Option<CpuError>,
}

impl Mos6502 {
    /// Create a CPU of the given silicon revision.
    ///
    /// Registers are in the power-on state but PC is not yet meaningful;
    /// call [`Mos6502::reset`] with the bus to load the reset vector.
    #[must_use]
    pub fn new(model: Model) -> Self {
        Self {
            regs: Registers::new(),
            model,
            state: State::FetchOpcode,
            opcode: 0,
            operands: [0; 2],
            cycle: 0,
            instr_pc: 0,
            irq_pending: false,
            nmi_pending: false,
            total_cycles: 0,
            fault: None,
        }
    }

    /// (Re)initialize from the reset vector at `$FFFC/D`.
    ///
    /// SP is forced to `$FD`, A/X/Y are zeroed, I is set, and all decode
    /// and interrupt-latch state is discarded.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.regs = Registers::new();
        self.regs.pc = self.read_word(bus, RESET_VECTOR);
        self.state = State::FetchOpcode;
        self.opcode = 0;
        self.operands = [0; 2];
        self.cycle = 0;
        self.instr_pc = self.regs.pc;
        self.irq_pending = false;
        self.nmi_pending = false;
        self.total_cycles = 0;
        self.fault = None;
    }

    /// Advance the CPU by one cycle.
    ///
    /// Exactly one host tick advances the dispatcher exactly one step; the
    /// CPU never skips or doubles a tick. After a fatal error the CPU is
    /// halted and every call returns that error.
    pub fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        self.total_cycles += 1;

        let result = match self.state {
            State::FetchOpcode => self.fetch_opcode(bus),
            State::Execute => self.execute_cycle(bus),
            State::Service(kind) => {
                self.service_cycle(bus, kind);
                Ok(())
            }
        };

        if let Err(fault) = result {
            log::warn!("CPU halted: {fault}");
            self.fault = Some(fault);
        }
        result
    }

    /// Latch an interrupt to be serviced at the next instruction boundary.
    ///
    /// IRQ is refused while the I flag is set; NMI is always accepted.
    /// Returns whether the request was latched.
    pub fn request_interrupt(&mut self, kind: Interrupt) -> bool {
        match kind {
            Interrupt::Irq => {
                if self.regs.p.is_set(I) {
                    return false;
                }
                self.irq_pending = true;
                true
            }
            Interrupt::Nmi => {
                self.nmi_pending = true;
                true
            }
        }
    }

    /// The emulated silicon revision.
    #[must_use]
    pub fn model(&self) -> Model {
        self.model
    }

    /// Cycles already spent on the instruction in flight (0 at a boundary).
    #[must_use]
    pub fn cycle_index(&self) -> u8 {
        self.cycle
    }

    /// Total cycles executed since reset.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.total_cycles
    }

    /// True when the next tick will fetch a new opcode.
    #[must_use]
    pub fn is_instruction_complete(&self) -> bool {
        self.state == State::FetchOpcode
    }

    /// The latched fatal error, if the CPU has halted.
    #[must_use]
    pub fn fault(&self) -> Option<CpuError> {
        self.fault
    }

    // ========================================================================
    // Dispatcher
    // ========================================================================

    fn fetch_opcode<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        // Latched interrupts are taken between retirements, never mid-flight.
        // NMI wins when both lines are pending.
        if self.nmi_pending {
            self.nmi_pending = false;
            self.begin_service(Interrupt::Nmi);
            return Ok(());
        }
        if self.irq_pending && !self.regs.p.is_set(I) {
            self.irq_pending = false;
            self.begin_service(Interrupt::Irq);
            return Ok(());
        }

        self.instr_pc = self.regs.pc;
        self.opcode = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);

        if OPCODES[usize::from(self.opcode)].is_none() {
            return Err(CpuError::InvalidOpcode {
                opcode: self.opcode,
                pc: self.instr_pc,
            });
        }

        self.operands = [0; 2];
        self.cycle = 1;
        self.state = State::Execute;
        Ok(())
    }

    fn execute_cycle<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        let Some(ins) = OPCODES[usize::from(self.opcode)] else {
            unreachable!("slot validated at fetch");
        };

        if self.cycle < ins.size {
            self.operands[usize::from(self.cycle) - 1] = bus.read(self.regs.pc);
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        self.cycle += 1;

        // Operands are complete once `cycle` reaches `base_cycles` (the
        // matrix guarantees base_cycles >= size), so the penalty predicate
        // always sees the decoded operand bytes and pre-execution registers.
        if self.cycle >= ins.base_cycles {
            let extra = self.extra_cycles(bus, ins);
            if self.cycle >= ins.base_cycles + extra {
                log::trace!(
                    "${:04X}  {}",
                    self.instr_pc,
                    crate::disasm::format_instruction(self.instr_pc, self.opcode, self.operands)
                );
                self.execute(bus, ins)?;
                self.finish();
            }
        }
        Ok(())
    }

    fn begin_service(&mut self, kind: Interrupt) {
        log::trace!("servicing {kind:?} at ${:04X}", self.regs.pc);
        self.cycle = 1;
        self.state = State::Service(kind);
    }

    fn service_cycle<B: Bus>(&mut self, bus: &mut B, kind: Interrupt) {
        self.cycle += 1;
        if self.cycle >= INTERRUPT_ENTRY_CYCLES {
            self.push(bus, (self.regs.pc >> 8) as u8);
            self.push(bus, self.regs.pc as u8);
            self.push(bus, self.regs.p.pushed_by_irq());
            self.regs.p.set(I);
            let vector = match kind {
                Interrupt::Irq => IRQ_VECTOR,
                Interrupt::Nmi => NMI_VECTOR,
            };
            self.regs.pc = self.read_word(bus, vector);
            self.finish();
        }
    }

    /// Retire the current instruction and arm the next opcode fetch.
    fn finish(&mut self) {
        self.state = State::FetchOpcode;
        self.cycle = 0;
        self.operands = [0; 2];
    }

    // ========================================================================
    // Cycle penalties
    // ========================================================================

    /// Branch-taken and page-crossing penalties, 0..=2.
    ///
    /// Evaluated before the execute action mutates anything: the branch test
    /// reads the post-operand-fetch PC (the address of the following
    /// instruction), the indexed modes read the decoded operand bytes.
    fn extra_cycles<B: Bus>(&mut self, bus: &mut B, ins: Instruction) -> u8 {
        match ins.mode {
            AddrMode::Relative => {
                if !self.branch_taken(ins.mnemonic) {
                    return 0;
                }
                let target = self.branch_target();
                if target & 0xFF00 == self.regs.pc & 0xFF00 {
                    1
                } else {
                    2
                }
            }
            AddrMode::AbsoluteX if ins.page_penalty => {
                page_crossed(self.operands[0], self.regs.x)
            }
            AddrMode::AbsoluteY if ins.page_penalty => {
                page_crossed(self.operands[0], self.regs.y)
            }
            AddrMode::IndirectY if ins.page_penalty => {
                let lo = bus.read(u16::from(self.operands[0]));
                page_crossed(lo, self.regs.y)
            }
            _ => 0,
        }
    }

    fn branch_taken(&self, mnemonic: Mnemonic) -> bool {
        let p = self.regs.p;
        match mnemonic {
            Mnemonic::Bpl => !p.is_set(N),
            Mnemonic::Bmi => p.is_set(N),
            Mnemonic::Bvc => !p.is_set(V),
            Mnemonic::Bvs => p.is_set(V),
            Mnemonic::Bcc => !p.is_set(C),
            Mnemonic::Bcs => p.is_set(C),
            Mnemonic::Bne => !p.is_set(Z),
            Mnemonic::Beq => p.is_set(Z),
            _ => unreachable!("not a branch"),
        }
    }

    /// Branch destination: PC plus the sign-extended displacement.
    fn branch_target(&self) -> u16 {
        let offset = self.operands[0] as i8;
        self.regs.pc.wrapping_add(offset as u16)
    }

    // ========================================================================
    // Addressing-mode evaluation (at retirement)
    // ========================================================================

    /// Little-endian address from the two operand bytes.
    fn absolute(&self) -> u16 {
        u16::from(self.operands[0]) | u16::from(self.operands[1]) << 8
    }

    /// Read a 16-bit pointer from zero page; both bytes wrap within page
    /// zero, never crossing into `$0100`.
    fn read_zp_word<B: Bus>(&mut self, bus: &mut B, ptr: u8) -> u16 {
        let lo = bus.read(u16::from(ptr));
        let hi = bus.read(u16::from(ptr.wrapping_add(1)));
        u16::from(lo) | u16::from(hi) << 8
    }

    /// Effective address for every memory-operand mode.
    fn operand_addr<B: Bus>(&mut self, bus: &mut B, mode: AddrMode) -> u16 {
        match mode {
            AddrMode::ZeroPage => u16::from(self.operands[0]),
            AddrMode::ZeroPageX => u16::from(self.operands[0].wrapping_add(self.regs.x)),
            AddrMode::ZeroPageY => u16::from(self.operands[0].wrapping_add(self.regs.y)),
            AddrMode::Absolute => self.absolute(),
            AddrMode::AbsoluteX => self.absolute().wrapping_add(u16::from(self.regs.x)),
            AddrMode::AbsoluteY => self.absolute().wrapping_add(u16::from(self.regs.y)),
            AddrMode::IndirectX => {
                let ptr = self.operands[0].wrapping_add(self.regs.x);
                self.read_zp_word(bus, ptr)
            }
            AddrMode::IndirectY => self
                .read_zp_word(bus, self.operands[0])
                .wrapping_add(u16::from(self.regs.y)),
            AddrMode::Implied
            | AddrMode::Accumulator
            | AddrMode::Immediate
            | AddrMode::Relative
            | AddrMode::Indirect => unreachable!("mode has no memory operand address"),
        }
    }

    /// Operand value for read-class instructions.
    fn operand_value<B: Bus>(&mut self, bus: &mut B, mode: AddrMode) -> u8 {
        if mode == AddrMode::Immediate {
            self.operands[0]
        } else {
            let addr = self.operand_addr(bus, mode);
            bus.read(addr)
        }
    }

    // ========================================================================
    // Stack and word helpers
    // ========================================================================

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    fn read_word<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read(addr);
        let hi = bus.read(addr.wrapping_add(1));
        u16::from(lo) | u16::from(hi) << 8
    }

    // ========================================================================
    // Execution (the retirement action)
    // ========================================================================

    #[allow(clippy::too_many_lines)]
    fn execute<B: Bus>(&mut self, bus: &mut B, ins: Instruction) -> Result<(), CpuError> {
        use Mnemonic::*;

        match ins.mnemonic {
            // Loads and stores
            Lda => {
                self.regs.a = self.operand_value(bus, ins.mode);
                self.regs.p.update_nz(self.regs.a);
            }
            Ldx => {
                self.regs.x = self.operand_value(bus, ins.mode);
                self.regs.p.update_nz(self.regs.x);
            }
            Ldy => {
                self.regs.y = self.operand_value(bus, ins.mode);
                self.regs.p.update_nz(self.regs.y);
            }
            Sta => {
                let addr = self.operand_addr(bus, ins.mode);
                bus.write(addr, self.regs.a);
            }
            Stx => {
                let addr = self.operand_addr(bus, ins.mode);
                bus.write(addr, self.regs.x);
            }
            Sty => {
                let addr = self.operand_addr(bus, ins.mode);
                bus.write(addr, self.regs.y);
            }

            // Register transfers
            Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
            }
            Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
            }
            Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
            }
            Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
            }
            Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
            }
            // TXS does not affect flags.
            Txs => self.regs.s = self.regs.x,

            // Stack operations
            Pha => self.push(bus, self.regs.a),
            Php => {
                let p = self.regs.p.pushed_by_brk();
                self.push(bus, p);
            }
            Pla => {
                self.regs.a = self.pull(bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Plp => {
                self.regs.p = Status::from_pull(self.pull(bus));
            }

            // Logic
            And => {
                self.regs.a &= self.operand_value(bus, ins.mode);
                self.regs.p.update_nz(self.regs.a);
            }
            Ora => {
                self.regs.a |= self.operand_value(bus, ins.mode);
                self.regs.p.update_nz(self.regs.a);
            }
            Eor => {
                self.regs.a ^= self.operand_value(bus, ins.mode);
                self.regs.p.update_nz(self.regs.a);
            }
            Bit => {
                let value = self.operand_value(bus, ins.mode);
                self.regs.p.set_if(Z, self.regs.a & value == 0);
                self.regs.p.set_if(N, value & 0x80 != 0);
                self.regs.p.set_if(V, value & 0x40 != 0);
            }

            // Arithmetic
            Adc => {
                let value = self.operand_value(bus, ins.mode);
                self.check_binary_mode(Adc)?;
                self.add_binary(value);
            }
            Sbc => {
                let value = self.operand_value(bus, ins.mode);
                self.check_binary_mode(Sbc)?;
                // SBC is ADC with the one's complement of the operand.
                self.add_binary(!value);
            }

            // Shifts and rotates
            Asl | Lsr | Rol | Ror => {
                if ins.mode == AddrMode::Accumulator {
                    self.regs.a = self.apply_shift(ins.mnemonic, self.regs.a);
                } else {
                    let addr = self.operand_addr(bus, ins.mode);
                    let value = bus.read(addr);
                    let result = self.apply_shift(ins.mnemonic, value);
                    bus.write(addr, result);
                }
            }

            // Increments and decrements
            Inc => {
                let addr = self.operand_addr(bus, ins.mode);
                let value = bus.read(addr).wrapping_add(1);
                bus.write(addr, value);
                self.regs.p.update_nz(value);
            }
            Dec => {
                let addr = self.operand_addr(bus, ins.mode);
                let value = bus.read(addr).wrapping_sub(1);
                bus.write(addr, value);
                self.regs.p.update_nz(value);
            }
            Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
            }
            Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
            }

            // Compares
            Cmp => {
                let value = self.operand_value(bus, ins.mode);
                self.compare(self.regs.a, value);
            }
            Cpx => {
                let value = self.operand_value(bus, ins.mode);
                self.compare(self.regs.x, value);
            }
            Cpy => {
                let value = self.operand_value(bus, ins.mode);
                self.compare(self.regs.y, value);
            }

            // Branches
            Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq => {
                if self.branch_taken(ins.mnemonic) {
                    self.regs.pc = self.branch_target();
                }
            }

            // Jumps, subroutines, interrupts
            Jmp => {
                self.regs.pc = if ins.mode == AddrMode::Indirect {
                    self.jmp_indirect_target(bus)
                } else {
                    self.absolute()
                };
            }
            Jsr => {
                // The stacked value is the address of the JSR's last byte;
                // RTS adds one.
                let ret = self.regs.pc.wrapping_sub(1);
                self.push(bus, (ret >> 8) as u8);
                self.push(bus, ret as u8);
                self.regs.pc = self.absolute();
            }
            Rts => {
                let lo = self.pull(bus);
                let hi = self.pull(bus);
                let ret = u16::from(lo) | u16::from(hi) << 8;
                self.regs.pc = ret.wrapping_add(1);
            }
            Brk => {
                // Skip the padding byte; the stacked return address is
                // BRK + 2.
                self.regs.pc = self.regs.pc.wrapping_add(1);
                self.push(bus, (self.regs.pc >> 8) as u8);
                self.push(bus, self.regs.pc as u8);
                let p = self.regs.p.pushed_by_brk();
                self.push(bus, p);
                self.regs.p.set(I);
                self.regs.pc = self.read_word(bus, IRQ_VECTOR);
            }
            Rti => {
                self.regs.p = Status::from_pull(self.pull(bus));
                let lo = self.pull(bus);
                let hi = self.pull(bus);
                self.regs.pc = u16::from(lo) | u16::from(hi) << 8;
            }

            // Flag operations
            Clc => self.regs.p.clear(C),
            Sec => self.regs.p.set(C),
            Cli => self.regs.p.clear(I),
            Sei => self.regs.p.set(I),
            Clv => self.regs.p.clear(V),
            Cld => self.regs.p.clear(D),
            Sed => {
                return Err(CpuError::DecimalMode {
                    mnemonic: Sed,
                    pc: self.instr_pc,
                })
            }

            Nop => {}
        }
        Ok(())
    }

    /// JMP indirect target, honouring the Original-silicon pointer bug.
    fn jmp_indirect_target<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let ptr = self.absolute();
        let lo = bus.read(ptr);
        let hi_addr = match self.model {
            // The pointer increment wraps within its page: `($xxFF)` reads
            // the high byte from `$xx00`.
            Model::Original => ptr & 0xFF00 | u16::from((ptr as u8).wrapping_add(1)),
            Model::Cmos65C02 => ptr.wrapping_add(1),
        };
        let hi = bus.read(hi_addr);
        u16::from(lo) | u16::from(hi) << 8
    }

    fn check_binary_mode(&self, mnemonic: Mnemonic) -> Result<(), CpuError> {
        if self.regs.p.is_set(D) {
            return Err(CpuError::DecimalMode {
                mnemonic,
                pc: self.instr_pc,
            });
        }
        Ok(())
    }

    /// Binary add with carry; SBC routes through here with `!value`.
    fn add_binary(&mut self, value: u8) {
        let a = self.regs.a;
        let carry = u16::from(self.regs.p.is_set(C));
        let sum = u16::from(a) + u16::from(value) + carry;
        let result = sum as u8;

        self.regs.p.set_if(C, sum > 0xFF);
        self.regs
            .p
            .set_if(V, (a ^ result) & (value ^ result) & 0x80 != 0);
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.regs.p.set_if(C, register >= value);
        self.regs.p.update_nz(register.wrapping_sub(value));
    }

    fn apply_shift(&mut self, mnemonic: Mnemonic, value: u8) -> u8 {
        let result = match mnemonic {
            Mnemonic::Asl => {
                self.regs.p.set_if(C, value & 0x80 != 0);
                value << 1
            }
            Mnemonic::Lsr => {
                self.regs.p.set_if(C, value & 0x01 != 0);
                value >> 1
            }
            Mnemonic::Rol => {
                let carry_in = u8::from(self.regs.p.is_set(C));
                self.regs.p.set_if(C, value & 0x80 != 0);
                value << 1 | carry_in
            }
            Mnemonic::Ror => {
                let carry_in = if self.regs.p.is_set(C) { 0x80 } else { 0 };
                self.regs.p.set_if(C, value & 0x01 != 0);
                value >> 1 | carry_in
            }
            _ => unreachable!("not a shift"),
        };
        self.regs.p.update_nz(result);
        result
    }
}

/// One extra cycle when indexing carries out of the low address byte.
fn page_crossed(lo: u8, index: u8) -> u8 {
    u8::from(u16::from(lo) + u16::from(index) > 0xFF)
}

// ============================================================================
// Trait implementations
// ============================================================================

impl Cpu for Mos6502 {
    type Registers = Registers;
    type Error = CpuError;

    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        Mos6502::tick(self, bus)
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        Mos6502::reset(self, bus);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.fault.is_some()
    }

    fn interrupt(&mut self) -> bool {
        self.request_interrupt(Interrupt::Irq)
    }

    fn nmi(&mut self) {
        self.request_interrupt(Interrupt::Nmi);
    }
}

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(self.regs.p.0.into()),
            "flags.c" | "c" => Some(self.regs.p.is_set(C).into()),
            "flags.z" | "z" => Some(self.regs.p.is_set(Z).into()),
            "flags.i" | "i" => Some(self.regs.p.is_set(I).into()),
            "flags.d" | "d" => Some(self.regs.p.is_set(D).into()),
            "flags.v" | "v" => Some(self.regs.p.is_set(V).into()),
            "flags.n" | "n" => Some(self.regs.p.is_set(N).into()),
            "cycle" => Some(Value::U64(self.total_cycles)),
            "halted" => Some(self.fault.is_some().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc", "a", "x", "y", "s", "p", "flags.c", "flags.z", "flags.i", "flags.d", "flags.v",
            "flags.n", "cycle", "halted",
        ]
    }
}
