//! Control flow: jumps, branches, subroutine call/return, interrupts, and
//! the flag set/clear instructions.
use crate::bus::Bus;
use crate::constants::InterruptVectors;
use crate::cpu::opcodes::Mode;
use crate::cpu::{penalize_page_cross, Cpu, Status};

pub fn jmp(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (addr, _) = cpu.resolve_address(bus, mode);
    cpu.pc = addr;
}

/// Pushes `PC - 1` (the address of the JSR's last operand byte), so `RTS`
/// landing on `pulled + 1` resumes at the instruction after `JSR`.
pub fn jsr(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let (addr, _) = cpu.resolve_address(bus, mode);
    cpu.push_u16(bus, cpu.pc.wrapping_sub(1));
    cpu.pc = addr;
}

pub fn rts(cpu: &mut Cpu, bus: &mut Bus, _mode: Mode) {
    let addr = cpu.pull_u16(bus);
    cpu.pc = addr.wrapping_add(1);
}

pub fn rti(cpu: &mut Cpu, bus: &mut Bus, _mode: Mode) {
    let status = cpu.pull_u8(bus);
    cpu.restore_status_byte(status);
    cpu.pc = cpu.pull_u16(bus);
}

/// `BRK` consumes the signature byte following the opcode, then pushes
/// `PC + 1` (one past that byte) so `RTI` resumes after both bytes.
pub fn brk(cpu: &mut Cpu, bus: &mut Bus, _mode: Mode) {
    let _signature_byte = cpu.next_u8(bus);
    cpu.push_u16(bus, cpu.pc.wrapping_add(1));
    let status = cpu.status_byte(true);
    cpu.push_u8(bus, status);
    cpu.status.insert(Status::IRQ_DISABLE);
    cpu.pc = bus.read_word(InterruptVectors::IrqBrkVector as u16);
}

/// The page-cross penalty only applies if the branch is actually taken;
/// `resolve_address` is only called in that case, and its `crossed` output
/// is evaluated against the base `PC` *after* the operand byte, matching
/// the relative-addressing rule in `resolve_address`.
fn branch(cpu: &mut Cpu, bus: &mut Bus, mode: Mode, taken: bool) {
    if taken {
        let (addr, crossed) = cpu.resolve_address(bus, mode);
        cpu.pc = addr;
        cpu.cycles += 1;
        penalize_page_cross(cpu, crossed);
    } else {
        // Still consume the operand byte even when not taken.
        cpu.next_u8(bus);
    }
}

pub fn bcc(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = !cpu.status.contains(Status::CARRY);
    branch(cpu, bus, mode, taken);
}

pub fn bcs(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = cpu.status.contains(Status::CARRY);
    branch(cpu, bus, mode, taken);
}

pub fn beq(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = cpu.status.contains(Status::ZERO);
    branch(cpu, bus, mode, taken);
}

pub fn bne(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = !cpu.status.contains(Status::ZERO);
    branch(cpu, bus, mode, taken);
}

pub fn bmi(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = cpu.status.contains(Status::NEGATIVE);
    branch(cpu, bus, mode, taken);
}

pub fn bpl(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = !cpu.status.contains(Status::NEGATIVE);
    branch(cpu, bus, mode, taken);
}

pub fn bvc(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = !cpu.status.contains(Status::OVERFLOW);
    branch(cpu, bus, mode, taken);
}

pub fn bvs(cpu: &mut Cpu, bus: &mut Bus, mode: Mode) {
    let taken = cpu.status.contains(Status::OVERFLOW);
    branch(cpu, bus, mode, taken);
}

pub fn clc(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.status.remove(Status::CARRY);
}

pub fn sec(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.status.insert(Status::CARRY);
}

pub fn cli(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.status.remove(Status::IRQ_DISABLE);
}

pub fn sei(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.status.insert(Status::IRQ_DISABLE);
}

pub fn cld(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.status.remove(Status::DECIMAL);
}

pub fn sed(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.status.insert(Status::DECIMAL);
}

pub fn clv(cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {
    cpu.status.remove(Status::OVERFLOW);
}

pub fn nop(_cpu: &mut Cpu, _bus: &mut Bus, _mode: Mode) {}
