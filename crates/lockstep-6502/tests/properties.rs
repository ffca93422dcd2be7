//! Property-based tests for the architectural laws of the core.

use lockstep_6502::{flags, Model, Mos6502, Status};
use lockstep_core::SimpleBus;
use proptest::prelude::*;

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

fn cpu_with_program(bus: &mut SimpleBus, program: &[u8]) -> Mos6502 {
    bus.load(0x0200, program);
    let mut cpu = Mos6502::new(Model::Original);
    cpu.regs.pc = 0x0200;
    cpu
}

proptest! {
    // Exact unsigned round trip: CLC + ADC is addition mod 256, SEC + SBC
    // is subtraction mod 256, so adding and subtracting the same operand
    // restores the accumulator for every starting value.
    #[test]
    fn adc_then_sbc_restores_a(a in any::<u8>(), m in any::<u8>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[
            0x18, // CLC
            0x69, m, // ADC #m
            0x38, // SEC
            0xE9, m, // SBC #m
        ]);
        cpu.regs.a = a;

        for _ in 0..4 {
            run_instruction(&mut cpu, &mut bus);
        }

        prop_assert_eq!(cpu.regs.a, a);
    }

    #[test]
    fn adc_carry_matches_wide_sum(a in any::<u8>(), m in any::<u8>(), c in any::<bool>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[0x69, m]);
        cpu.regs.a = a;
        cpu.regs.p.set_if(flags::C, c);

        run_instruction(&mut cpu, &mut bus);

        let wide = u16::from(a) + u16::from(m) + u16::from(c);
        prop_assert_eq!(cpu.regs.a, wide as u8);
        prop_assert_eq!(cpu.regs.p.is_set(flags::C), wide > 0xFF);
        prop_assert_eq!(cpu.regs.p.is_set(flags::Z), wide as u8 == 0);
        prop_assert_eq!(cpu.regs.p.is_set(flags::N), wide as u8 & 0x80 != 0);
    }

    #[test]
    fn sbc_carry_is_the_inverted_borrow(a in any::<u8>(), m in any::<u8>(), c in any::<bool>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[0xE9, m]);
        cpu.regs.a = a;
        cpu.regs.p.set_if(flags::C, c);

        run_instruction(&mut cpu, &mut bus);

        let borrow = u16::from(!c);
        let expected = a.wrapping_sub(m).wrapping_sub(u8::from(!c));
        prop_assert_eq!(cpu.regs.a, expected);
        prop_assert_eq!(
            cpu.regs.p.is_set(flags::C),
            u16::from(a) >= u16::from(m) + borrow
        );
    }

    #[test]
    fn cmp_orders_unsigned(a in any::<u8>(), m in any::<u8>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[0xC9, m]);
        cpu.regs.a = a;

        run_instruction(&mut cpu, &mut bus);

        prop_assert_eq!(cpu.regs.p.is_set(flags::Z), a == m);
        prop_assert_eq!(cpu.regs.p.is_set(flags::C), a >= m);
        prop_assert_eq!(cpu.regs.a, a, "CMP never writes A");
    }

    #[test]
    fn pha_pla_round_trip(a in any::<u8>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[
            0x48, // PHA
            0xA9, 0x00, // LDA #$00
            0x68, // PLA
        ]);
        cpu.regs.a = a;

        for _ in 0..3 {
            run_instruction(&mut cpu, &mut bus);
        }

        prop_assert_eq!(cpu.regs.a, a);
        prop_assert_eq!(cpu.regs.p.is_set(flags::Z), a == 0);
        prop_assert_eq!(cpu.regs.p.is_set(flags::N), a & 0x80 != 0);
        prop_assert_eq!(cpu.regs.s, 0xFD);
    }

    // PHP/PLP round-trips every bit except 4 and 5, which follow the
    // hardware rules: bit 5 always reads 1, bit 4 never survives a pull.
    #[test]
    fn php_plp_round_trip(p in any::<u8>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[0x08, 0x28]); // PHP; PLP
        cpu.regs.p = Status(p);

        run_instruction(&mut cpu, &mut bus);
        prop_assert_eq!(bus.peek(0x01FD), p | 0x30, "stacked copy sets B and bit 5");

        run_instruction(&mut cpu, &mut bus);
        prop_assert_eq!(cpu.regs.p, Status((p | 0x20) & !0x10));
    }

    #[test]
    fn loads_obey_the_zn_contract(v in any::<u8>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[0xA9, v]);

        run_instruction(&mut cpu, &mut bus);

        prop_assert_eq!(cpu.regs.p.is_set(flags::Z), v == 0);
        prop_assert_eq!(cpu.regs.p.is_set(flags::N), v >> 7 == 1);
    }

    // Straight-line instructions advance PC by exactly their size.
    #[test]
    fn pc_advances_by_size(v in any::<u8>()) {
        let mut bus = SimpleBus::new();
        let mut cpu = cpu_with_program(&mut bus, &[0x49, v]); // EOR #v

        run_instruction(&mut cpu, &mut bus);

        prop_assert_eq!(cpu.regs.pc, 0x0202);
    }
}
