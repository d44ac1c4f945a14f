use proptest::prelude::*;

use super::*;
use crate::bus::Bus;

fn load(bus: &mut Bus, base: u16, bytes: &[u8]) {
    for (i, byte) in bytes.iter().enumerate() {
        bus.write(base + i as u16, *byte);
    }
}

#[test]
fn immediate_load_sets_flags_and_cycles() {
    let mut bus = Bus::new();
    let mut cpu = Cpu::new();
    cpu.pc = 0x0200;
    load(&mut bus, 0x0200, &[0xA9, 0x00]); // LDA #$00

    let cycles = cpu.step(&mut bus);

    assert_eq!(cpu.a, 0);
    assert!(cpu.status.contains(Status::ZERO));
    assert!(!cpu.status.contains(Status::NEGATIVE));
    assert_eq!(cycles, 2);
    assert_eq!(cpu.pc, 0x0202);
}

#[test]
fn absolute_x_read_pays_page_cross_penalty() {
    let mut bus = Bus::new();
    let mut cpu = Cpu::new();
    cpu.x = 0x01;
    cpu.pc = 0x0200;
    bus.write(0x1000, 0xAA);
    load(&mut bus, 0x0200, &[0xBD, 0xFF, 0x0F]); // LDA $0FFF,X

    let cycles = cpu.step(&mut bus);

    assert_eq!(cpu.a, 0xAA);
    assert_eq!(cycles, 5);
}

#[test]
fn indirect_jmp_reproduces_page_wrap_bug() {
    let mut bus = Bus::new();
    let mut cpu = Cpu::new();
    cpu.pc = 0x0200;
    bus.write(0x30FF, 0x40);
    bus.write(0x3000, 0x80); // not $3100 -- the bug
    load(&mut bus, 0x0200, &[0x6C, 0xFF, 0x30]); // JMP ($30FF)

    let cycles = cpu.step(&mut bus);

    assert_eq!(cpu.pc, 0x8040);
    assert_eq!(cycles, 5);
}

#[test]
fn jsr_then_rts_round_trips_to_the_instruction_after_jsr() {
    let mut bus = Bus::new();
    let mut cpu = Cpu::new();
    cpu.pc = 0x0200;
    load(&mut bus, 0x0200, &[0x20, 0x07, 0x02, 0xEA, 0x00, 0x00, 0x00, 0x60]);

    let jsr_cycles = cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0x0207);
    let rts_cycles = cpu.step(&mut bus);

    assert_eq!(cpu.pc, 0x0203);
    assert_eq!(jsr_cycles, 6);
    assert_eq!(rts_cycles, 6);
}

#[test]
fn brk_vectors_through_irq_brk_vector_and_pushes_pc_plus_one() {
    let mut bus = Bus::new();
    let mut cpu = Cpu::new();
    cpu.pc = 0x0200;
    bus.write(0xFFFE, 0x34);
    bus.write(0xFFFF, 0x12);
    load(&mut bus, 0x0200, &[0x00, 0x00]);

    cpu.step(&mut bus);

    assert_eq!(cpu.pc, 0x1234);
    assert!(cpu.status.contains(Status::IRQ_DISABLE));
    // SP started at $FF; three bytes pushed leaves it at $FC.
    assert_eq!(cpu.sp, 0xFC);
    assert_eq!(bus.read(0x01FF), 0x02); // PC high
    assert_eq!(bus.read(0x01FE), 0x03); // PC low
    assert_eq!(bus.read(0x01FD) & 0x10, 0x10); // B set in the pushed status
}

#[test]
fn via_timer1_irq_scenario_matches_via_module() {
    use crate::via::{Via, InterruptBits, REG_IER, REG_T1CH, REG_T1CL};

    let mut via = Via::new();
    via.write(REG_IER, 0x80 | InterruptBits::TIMER1.bits());
    via.write(REG_T1CL, 0x02);
    via.write(REG_T1CH, 0x00);

    let fired = via.update_timers(3);

    assert!(fired);
    assert_eq!(via.read(REG_T1CL), 0x02);
    assert_eq!(via.read(super::super::via::REG_IFR) & InterruptBits::TIMER1.bits(), InterruptBits::TIMER1.bits());
}

#[test]
fn pha_then_pla_round_trips_accumulator() {
    let mut bus = Bus::new();
    let mut cpu = Cpu::new();
    cpu.pc = 0x0200;
    cpu.a = 0x42;
    load(&mut bus, 0x0200, &[0x48, 0xA9, 0x00, 0x68]); // PHA; LDA #0; PLA

    cpu.step(&mut bus); // PHA
    cpu.step(&mut bus); // LDA #0
    assert_eq!(cpu.a, 0);
    cpu.step(&mut bus); // PLA

    assert_eq!(cpu.a, 0x42);
    assert!(!cpu.status.contains(Status::ZERO));
}

proptest! {
    #[test]
    fn status_byte_always_has_bit5_set(bits in any::<u8>(), break_bit in any::<bool>()) {
        let mut cpu = Cpu::new();
        cpu.status = Status::from_bits_truncate(bits);
        prop_assert_eq!(cpu.status_byte(break_bit) & 0x20, 0x20);
    }

    #[test]
    fn binary_adc_carry_and_sum_law(a in any::<u8>(), b in any::<u8>()) {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();
        cpu.pc = 0x0200;
        load(&mut bus, 0x0200, &[0x18, 0xA9, a, 0x69, b]); // CLC; LDA #a; ADC #b
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        cpu.step(&mut bus);

        let expected = (a as u16 + b as u16) % 256;
        prop_assert_eq!(cpu.a as u16, expected);
        prop_assert_eq!(cpu.status.contains(Status::CARRY), a as u16 + b as u16 >= 256);
    }

    #[test]
    fn pha_pla_restores_any_value(v in any::<u8>()) {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();
        cpu.pc = 0x0200;
        cpu.a = v;
        load(&mut bus, 0x0200, &[0x48, 0xA9, 0x00, 0x68]);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        cpu.step(&mut bus);

        prop_assert_eq!(cpu.a, v);
        prop_assert_eq!(cpu.status.contains(Status::ZERO), v == 0);
        prop_assert_eq!(cpu.status.contains(Status::NEGATIVE), v & 0x80 != 0);
    }

    #[test]
    fn jsr_rts_round_trip_holds_for_any_target(target_offset in 0x10u16..0x100) {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();
        cpu.pc = 0x0200;
        let target = 0x0200 + target_offset;
        load(&mut bus, 0x0200, &[0x20, (target & 0xFF) as u8, (target >> 8) as u8]);
        bus.write(target, 0x60); // RTS at the target

        cpu.step(&mut bus); // JSR
        prop_assert_eq!(cpu.pc, target);
        cpu.step(&mut bus); // RTS
        prop_assert_eq!(cpu.pc, 0x0203);
    }
}
