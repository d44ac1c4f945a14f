//! The 256-entry opcode decode table. Unassigned bytes fall through to the
//! `ILLEGAL` entry: a 2-cycle no-op, per this core's documented treatment of
//! undocumented opcodes.
use crate::bus::Bus;
use crate::cpu::ops_jump as jump;
use crate::cpu::ops_logical as logical;
use crate::cpu::ops_move as r#move;
use crate::cpu::Cpu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

pub type OpFn = fn(&mut Cpu, &mut Bus, Mode);

#[derive(Clone, Copy)]
pub struct OpDef {
    pub mode: Mode,
    pub cycles: u8,
    pub exec: OpFn,
}

const ILLEGAL: OpDef = OpDef {
    mode: Mode::Implied,
    cycles: 2,
    exec: jump::nop,
};

/// Resolve an opcode byte to its definition. A large `match` rather than a
/// function-pointer array: both are dense tables over the same 256 entries,
/// and the match reads closer to the reference opcode sheet it's transcribed
/// from.
pub fn decode(opcode: u8) -> OpDef {
    use Mode::*;
    match opcode {
        // ADC
        0x69 => OpDef { mode: Immediate, cycles: 2, exec: logical::adc },
        0x65 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::adc },
        0x75 => OpDef { mode: ZeroPageX, cycles: 4, exec: logical::adc },
        0x6D => OpDef { mode: Absolute, cycles: 4, exec: logical::adc },
        0x7D => OpDef { mode: AbsoluteX, cycles: 4, exec: logical::adc },
        0x79 => OpDef { mode: AbsoluteY, cycles: 4, exec: logical::adc },
        0x61 => OpDef { mode: IndirectX, cycles: 6, exec: logical::adc },
        0x71 => OpDef { mode: IndirectY, cycles: 5, exec: logical::adc },

        // AND
        0x29 => OpDef { mode: Immediate, cycles: 2, exec: logical::and },
        0x25 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::and },
        0x35 => OpDef { mode: ZeroPageX, cycles: 4, exec: logical::and },
        0x2D => OpDef { mode: Absolute, cycles: 4, exec: logical::and },
        0x3D => OpDef { mode: AbsoluteX, cycles: 4, exec: logical::and },
        0x39 => OpDef { mode: AbsoluteY, cycles: 4, exec: logical::and },
        0x21 => OpDef { mode: IndirectX, cycles: 6, exec: logical::and },
        0x31 => OpDef { mode: IndirectY, cycles: 5, exec: logical::and },

        // ASL
        0x0A => OpDef { mode: Accumulator, cycles: 2, exec: logical::asl },
        0x06 => OpDef { mode: ZeroPage, cycles: 5, exec: logical::asl },
        0x16 => OpDef { mode: ZeroPageX, cycles: 6, exec: logical::asl },
        0x0E => OpDef { mode: Absolute, cycles: 6, exec: logical::asl },
        0x1E => OpDef { mode: AbsoluteX, cycles: 7, exec: logical::asl },

        // Branches
        0x90 => OpDef { mode: Relative, cycles: 2, exec: jump::bcc },
        0xB0 => OpDef { mode: Relative, cycles: 2, exec: jump::bcs },
        0xF0 => OpDef { mode: Relative, cycles: 2, exec: jump::beq },
        0x30 => OpDef { mode: Relative, cycles: 2, exec: jump::bmi },
        0xD0 => OpDef { mode: Relative, cycles: 2, exec: jump::bne },
        0x10 => OpDef { mode: Relative, cycles: 2, exec: jump::bpl },
        0x50 => OpDef { mode: Relative, cycles: 2, exec: jump::bvc },
        0x70 => OpDef { mode: Relative, cycles: 2, exec: jump::bvs },

        // BIT
        0x24 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::bit },
        0x2C => OpDef { mode: Absolute, cycles: 4, exec: logical::bit },

        // BRK
        0x00 => OpDef { mode: Implied, cycles: 7, exec: jump::brk },

        // Flag clear/set
        0x18 => OpDef { mode: Implied, cycles: 2, exec: jump::clc },
        0xD8 => OpDef { mode: Implied, cycles: 2, exec: jump::cld },
        0x58 => OpDef { mode: Implied, cycles: 2, exec: jump::cli },
        0xB8 => OpDef { mode: Implied, cycles: 2, exec: jump::clv },
        0x38 => OpDef { mode: Implied, cycles: 2, exec: jump::sec },
        0xF8 => OpDef { mode: Implied, cycles: 2, exec: jump::sed },
        0x78 => OpDef { mode: Implied, cycles: 2, exec: jump::sei },

        // CMP
        0xC9 => OpDef { mode: Immediate, cycles: 2, exec: logical::cmp },
        0xC5 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::cmp },
        0xD5 => OpDef { mode: ZeroPageX, cycles: 4, exec: logical::cmp },
        0xCD => OpDef { mode: Absolute, cycles: 4, exec: logical::cmp },
        0xDD => OpDef { mode: AbsoluteX, cycles: 4, exec: logical::cmp },
        0xD9 => OpDef { mode: AbsoluteY, cycles: 4, exec: logical::cmp },
        0xC1 => OpDef { mode: IndirectX, cycles: 6, exec: logical::cmp },
        0xD1 => OpDef { mode: IndirectY, cycles: 5, exec: logical::cmp },

        // CPX / CPY
        0xE0 => OpDef { mode: Immediate, cycles: 2, exec: logical::cpx },
        0xE4 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::cpx },
        0xEC => OpDef { mode: Absolute, cycles: 4, exec: logical::cpx },
        0xC0 => OpDef { mode: Immediate, cycles: 2, exec: logical::cpy },
        0xC4 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::cpy },
        0xCC => OpDef { mode: Absolute, cycles: 4, exec: logical::cpy },

        // DEC / DEX / DEY
        0xC6 => OpDef { mode: ZeroPage, cycles: 5, exec: logical::dec },
        0xD6 => OpDef { mode: ZeroPageX, cycles: 6, exec: logical::dec },
        0xCE => OpDef { mode: Absolute, cycles: 6, exec: logical::dec },
        0xDE => OpDef { mode: AbsoluteX, cycles: 7, exec: logical::dec },
        0xCA => OpDef { mode: Implied, cycles: 2, exec: logical::dex },
        0x88 => OpDef { mode: Implied, cycles: 2, exec: logical::dey },

        // EOR
        0x49 => OpDef { mode: Immediate, cycles: 2, exec: logical::eor },
        0x45 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::eor },
        0x55 => OpDef { mode: ZeroPageX, cycles: 4, exec: logical::eor },
        0x4D => OpDef { mode: Absolute, cycles: 4, exec: logical::eor },
        0x5D => OpDef { mode: AbsoluteX, cycles: 4, exec: logical::eor },
        0x59 => OpDef { mode: AbsoluteY, cycles: 4, exec: logical::eor },
        0x41 => OpDef { mode: IndirectX, cycles: 6, exec: logical::eor },
        0x51 => OpDef { mode: IndirectY, cycles: 5, exec: logical::eor },

        // INC / INX / INY
        0xE6 => OpDef { mode: ZeroPage, cycles: 5, exec: logical::inc },
        0xF6 => OpDef { mode: ZeroPageX, cycles: 6, exec: logical::inc },
        0xEE => OpDef { mode: Absolute, cycles: 6, exec: logical::inc },
        0xFE => OpDef { mode: AbsoluteX, cycles: 7, exec: logical::inc },
        0xE8 => OpDef { mode: Implied, cycles: 2, exec: logical::inx },
        0xC8 => OpDef { mode: Implied, cycles: 2, exec: logical::iny },

        // JMP / JSR / RTS / RTI
        0x4C => OpDef { mode: Absolute, cycles: 3, exec: jump::jmp },
        0x6C => OpDef { mode: Indirect, cycles: 5, exec: jump::jmp },
        0x20 => OpDef { mode: Absolute, cycles: 6, exec: jump::jsr },
        0x60 => OpDef { mode: Implied, cycles: 6, exec: jump::rts },
        0x40 => OpDef { mode: Implied, cycles: 6, exec: jump::rti },

        // LDA / LDX / LDY
        0xA9 => OpDef { mode: Immediate, cycles: 2, exec: r#move::lda },
        0xA5 => OpDef { mode: ZeroPage, cycles: 3, exec: r#move::lda },
        0xB5 => OpDef { mode: ZeroPageX, cycles: 4, exec: r#move::lda },
        0xAD => OpDef { mode: Absolute, cycles: 4, exec: r#move::lda },
        0xBD => OpDef { mode: AbsoluteX, cycles: 4, exec: r#move::lda },
        0xB9 => OpDef { mode: AbsoluteY, cycles: 4, exec: r#move::lda },
        0xA1 => OpDef { mode: IndirectX, cycles: 6, exec: r#move::lda },
        0xB1 => OpDef { mode: IndirectY, cycles: 5, exec: r#move::lda },

        0xA2 => OpDef { mode: Immediate, cycles: 2, exec: r#move::ldx },
        0xA6 => OpDef { mode: ZeroPage, cycles: 3, exec: r#move::ldx },
        0xB6 => OpDef { mode: ZeroPageY, cycles: 4, exec: r#move::ldx },
        0xAE => OpDef { mode: Absolute, cycles: 4, exec: r#move::ldx },
        0xBE => OpDef { mode: AbsoluteY, cycles: 4, exec: r#move::ldx },

        0xA0 => OpDef { mode: Immediate, cycles: 2, exec: r#move::ldy },
        0xA4 => OpDef { mode: ZeroPage, cycles: 3, exec: r#move::ldy },
        0xB4 => OpDef { mode: ZeroPageX, cycles: 4, exec: r#move::ldy },
        0xAC => OpDef { mode: Absolute, cycles: 4, exec: r#move::ldy },
        0xBC => OpDef { mode: AbsoluteX, cycles: 4, exec: r#move::ldy },

        // LSR
        0x4A => OpDef { mode: Accumulator, cycles: 2, exec: logical::lsr },
        0x46 => OpDef { mode: ZeroPage, cycles: 5, exec: logical::lsr },
        0x56 => OpDef { mode: ZeroPageX, cycles: 6, exec: logical::lsr },
        0x4E => OpDef { mode: Absolute, cycles: 6, exec: logical::lsr },
        0x5E => OpDef { mode: AbsoluteX, cycles: 7, exec: logical::lsr },

        // NOP
        0xEA => OpDef { mode: Implied, cycles: 2, exec: jump::nop },

        // ORA
        0x09 => OpDef { mode: Immediate, cycles: 2, exec: logical::ora },
        0x05 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::ora },
        0x15 => OpDef { mode: ZeroPageX, cycles: 4, exec: logical::ora },
        0x0D => OpDef { mode: Absolute, cycles: 4, exec: logical::ora },
        0x1D => OpDef { mode: AbsoluteX, cycles: 4, exec: logical::ora },
        0x19 => OpDef { mode: AbsoluteY, cycles: 4, exec: logical::ora },
        0x01 => OpDef { mode: IndirectX, cycles: 6, exec: logical::ora },
        0x11 => OpDef { mode: IndirectY, cycles: 5, exec: logical::ora },

        // Stack
        0x48 => OpDef { mode: Implied, cycles: 3, exec: r#move::pha },
        0x08 => OpDef { mode: Implied, cycles: 3, exec: r#move::php },
        0x68 => OpDef { mode: Implied, cycles: 4, exec: r#move::pla },
        0x28 => OpDef { mode: Implied, cycles: 4, exec: r#move::plp },

        // ROL / ROR
        0x2A => OpDef { mode: Accumulator, cycles: 2, exec: logical::rol },
        0x26 => OpDef { mode: ZeroPage, cycles: 5, exec: logical::rol },
        0x36 => OpDef { mode: ZeroPageX, cycles: 6, exec: logical::rol },
        0x2E => OpDef { mode: Absolute, cycles: 6, exec: logical::rol },
        0x3E => OpDef { mode: AbsoluteX, cycles: 7, exec: logical::rol },
        0x6A => OpDef { mode: Accumulator, cycles: 2, exec: logical::ror },
        0x66 => OpDef { mode: ZeroPage, cycles: 5, exec: logical::ror },
        0x76 => OpDef { mode: ZeroPageX, cycles: 6, exec: logical::ror },
        0x6E => OpDef { mode: Absolute, cycles: 6, exec: logical::ror },
        0x7E => OpDef { mode: AbsoluteX, cycles: 7, exec: logical::ror },

        // SBC
        0xE9 => OpDef { mode: Immediate, cycles: 2, exec: logical::sbc },
        0xE5 => OpDef { mode: ZeroPage, cycles: 3, exec: logical::sbc },
        0xF5 => OpDef { mode: ZeroPageX, cycles: 4, exec: logical::sbc },
        0xED => OpDef { mode: Absolute, cycles: 4, exec: logical::sbc },
        0xFD => OpDef { mode: AbsoluteX, cycles: 4, exec: logical::sbc },
        0xF9 => OpDef { mode: AbsoluteY, cycles: 4, exec: logical::sbc },
        0xE1 => OpDef { mode: IndirectX, cycles: 6, exec: logical::sbc },
        0xF1 => OpDef { mode: IndirectY, cycles: 5, exec: logical::sbc },

        // STA / STX / STY
        0x85 => OpDef { mode: ZeroPage, cycles: 3, exec: r#move::sta },
        0x95 => OpDef { mode: ZeroPageX, cycles: 4, exec: r#move::sta },
        0x8D => OpDef { mode: Absolute, cycles: 4, exec: r#move::sta },
        0x9D => OpDef { mode: AbsoluteX, cycles: 5, exec: r#move::sta },
        0x99 => OpDef { mode: AbsoluteY, cycles: 5, exec: r#move::sta },
        0x81 => OpDef { mode: IndirectX, cycles: 6, exec: r#move::sta },
        0x91 => OpDef { mode: IndirectY, cycles: 6, exec: r#move::sta },

        0x86 => OpDef { mode: ZeroPage, cycles: 3, exec: r#move::stx },
        0x96 => OpDef { mode: ZeroPageY, cycles: 4, exec: r#move::stx },
        0x8E => OpDef { mode: Absolute, cycles: 4, exec: r#move::stx },

        0x84 => OpDef { mode: ZeroPage, cycles: 3, exec: r#move::sty },
        0x94 => OpDef { mode: ZeroPageX, cycles: 4, exec: r#move::sty },
        0x8C => OpDef { mode: Absolute, cycles: 4, exec: r#move::sty },

        // Register transfers
        0xAA => OpDef { mode: Implied, cycles: 2, exec: r#move::tax },
        0xA8 => OpDef { mode: Implied, cycles: 2, exec: r#move::tay },
        0xBA => OpDef { mode: Implied, cycles: 2, exec: r#move::tsx },
        0x8A => OpDef { mode: Implied, cycles: 2, exec: r#move::txa },
        0x9A => OpDef { mode: Implied, cycles: 2, exec: r#move::txs },
        0x98 => OpDef { mode: Implied, cycles: 2, exec: r#move::tya },

        _ => ILLEGAL,
    }
}
