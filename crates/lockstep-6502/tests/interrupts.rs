//! Interrupt entry tests: masking, boundary latching, stack layout,
//! vectoring, NMI priority.

use lockstep_6502::{flags, Interrupt, Model, Mos6502, Status};
use lockstep_core::{Bus, SimpleBus};

fn run_instruction(cpu: &mut Mos6502, bus: &mut SimpleBus) {
    cpu.tick(bus).expect("instruction failed");
    for _ in 0..20 {
        if cpu.is_instruction_complete() {
            return;
        }
        cpu.tick(bus).expect("instruction failed");
    }
    panic!("instruction did not complete within 20 cycles");
}

fn setup(bus: &mut SimpleBus, cpu: &mut Mos6502, program: &[u8]) {
    bus.load(0x0200, program);
    cpu.regs.pc = 0x0200;
    bus.load(0xFFFA, &[0x00, 0x90]); // NMI  -> $9000
    bus.load(0xFFFE, &[0x00, 0x80]); // IRQ  -> $8000
}

#[test]
fn irq_refused_while_masked() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Model::Original);
    setup(&mut bus, &mut cpu, &[0xEA, 0xEA]);
    assert!(cpu.regs.p.is_set(flags::I), "I is set out of reset");

    assert!(!cpu.request_interrupt(Interrupt::Irq));

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0201, "no interrupt was latched");
}

#[test]
fn irq_enters_at_the_next_boundary() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Model::Original);
    setup(&mut bus, &mut cpu, &[0xEA, 0xEA]);
    cpu.regs.p = Status(0x20);

    // Begin the NOP, then let the request arrive mid-instruction.
    cpu.tick(&mut bus).unwrap();
    assert!(cpu.request_interrupt(Interrupt::Irq));

    // The NOP in flight retires untouched.
    cpu.tick(&mut bus).unwrap();
    assert!(cpu.is_instruction_complete());
    assert_eq!(cpu.regs.pc, 0x0201);

    // Entry runs the 7-cycle BRK sequence.
    let start = cpu.cycles();
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.cycles() - start, 7);

    assert_eq!(cpu.regs.pc, 0x8000);
    assert!(cpu.regs.p.is_set(flags::I));

    // Stacked: return address $0201, then P with B clear and bit 5 set.
    assert_eq!(bus.peek(0x01FD), 0x02);
    assert_eq!(bus.peek(0x01FC), 0x01);
    assert_eq!(bus.peek(0x01FB), 0x20);
}

#[test]
fn irq_does_not_preempt_an_instruction_mid_cycle() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Model::Original);
    setup(&mut bus, &mut cpu, &[0xAD, 0x00, 0x40]); // LDA $4000
    cpu.regs.p = Status(0x20);
    bus.write(0x4000, 0x42);

    // Request arrives mid-instruction.
    cpu.tick(&mut bus).unwrap();
    assert!(cpu.request_interrupt(Interrupt::Irq));
    for _ in 0..3 {
        cpu.tick(&mut bus).unwrap();
    }

    // The load completed before the interrupt was taken.
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.pc, 0x0203);

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x8000);
}

#[test]
fn nmi_is_always_accepted() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Model::Original);
    setup(&mut bus, &mut cpu, &[0xEA]);
    assert!(cpu.regs.p.is_set(flags::I));

    assert!(cpu.request_interrupt(Interrupt::Nmi));
    run_instruction(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.pc, 0x9000, "vectored through $FFFA");
}

#[test]
fn nmi_wins_over_pending_irq() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Model::Original);
    setup(&mut bus, &mut cpu, &[0xEA]);
    cpu.regs.p = Status(0x20);

    assert!(cpu.request_interrupt(Interrupt::Irq));
    assert!(cpu.request_interrupt(Interrupt::Nmi));

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x9000);

    // The IRQ stays latched and is taken once I clears again.
    bus.write(0x9000, 0x58); // CLI
    bus.write(0x9001, 0xEA);
    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x8000);
}

#[test]
fn rti_returns_from_an_interrupt_handler() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new(Model::Original);
    setup(&mut bus, &mut cpu, &[0xEA, 0xEA]);
    cpu.regs.p = Status(0x21); // carry set, to survive the round trip
    bus.write(0x8000, 0x40); // RTI

    cpu.request_interrupt(Interrupt::Irq);
    run_instruction(&mut cpu, &mut bus); // interrupt entry at the boundary
    assert_eq!(cpu.regs.pc, 0x8000);
    assert!(cpu.regs.p.is_set(flags::I));

    run_instruction(&mut cpu, &mut bus); // RTI
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.p, Status(0x21), "I restored from the stacked copy");

    run_instruction(&mut cpu, &mut bus); // execution resumes where it left off
    assert_eq!(cpu.regs.pc, 0x0201);
}
