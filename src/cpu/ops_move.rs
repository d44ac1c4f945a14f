//! Load, store, register-transfer, and stack-push/pull instructions.
use crate::bus::Bus;
use crate::cpu::opcodes::Mode;
use crate::cpu::{penalize_page_cross, Cpu};

pub fn lda(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (_, operand, crossed) = cpu.read_operand(bus, mode);
    penalize_page_cross(cpu, crossed);
    cpu.a = operand;
    cpu.update_zn(cpu.a);
}

pub fn ldx(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (_, operand, crossed) = cpu.read_operand(bus, mode);
    penalize_page_cross(cpu, crossed);
    cpu.x = operand;
    cpu.update_zn(cpu.x);
}

pub fn ldy(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (_, operand, crossed) = cpu.read_operand(bus, mode);
    penalize_page_cross(cpu, crossed);
    cpu.y = operand;
    cpu.update_zn(cpu.y);
}

/// Stores never take the page-cross penalty: the table already carries
/// their fixed, no-bonus cycle count.
pub fn sta(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (addr, _) = cpu.resolve_address(bus, mode);
    bus.write(addr, cpu.a);
}

pub fn stx(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (addr, _) = cpu.resolve_address(bus, mode);
    bus.write(addr, cpu.x);
}

pub fn sty(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (addr, _) = cpu.resolve_address(bus, mode);
    bus.write(addr, cpu.y);
}

pub fn tax(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.x = cpu.a;
    cpu.update_zn(cpu.x);
}

pub fn tay(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.y = cpu.a;
    cpu.update_zn(cpu.y);
}

pub fn txa(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.a = cpu.x;
    cpu.update_zn(cpu.a);
}

pub fn tya(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.a = cpu.y;
    cpu.update_zn(cpu.a);
}

pub fn tsx(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.x = cpu.sp;
    cpu.update_zn(cpu.x);
}

/// `TXS` does not touch the flags: the stack pointer isn't a "value" in the
/// same sense A/X/Y are.
pub fn txs(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.sp = cpu.x;
}

pub fn pha(cpu: &mut Cpu, bus: &mut Bus, _mode: Mode) {
    cpu.push_u8(bus, cpu.a);
}

pub fn pla(cpu: &mut Cpu, bus: &mut Bus, _mode: Mode) {
    cpu.a = cpu.pull_u8(bus);
    cpu.update_zn(cpu.a);
}

/// `PHP` pushes status with `B` set, matching a software-initiated push.
pub fn php(cpu: &mut Cpu, bus: &mut Bus, _mode: Mode) {
    let status = cpu.status_byte(true);
    cpu.push_u8(bus, status);
}

pub fn plp(cpu: &mut Cpu, bus: &mut Bus, _mode: Mode) {
    let value = cpu.pull_u8(bus);
    cpu.restore_status_byte(value);
}
