//! 6522 Versatile Interface Adapter: two 8-bit ports with direction
//! registers, two timers, and an interrupt flag/enable pair.
use bitflags::bitflags;

pub const REG_ORB: u16 = 0x0;
pub const REG_ORA: u16 = 0x1;
pub const REG_DDRB: u16 = 0x2;
pub const REG_DDRA: u16 = 0x3;
pub const REG_T1CL: u16 = 0x4;
pub const REG_T1CH: u16 = 0x5;
pub const REG_T1LL: u16 = 0x6;
pub const REG_T1LH: u16 = 0x7;
pub const REG_T2CL: u16 = 0x8;
pub const REG_T2CH: u16 = 0x9;
pub const REG_SR: u16 = 0xA;
pub const REG_ACR: u16 = 0xB;
pub const REG_PCR: u16 = 0xC;
pub const REG_IFR: u16 = 0xD;
pub const REG_IER: u16 = 0xE;

bitflags! {
    /// Interrupt flag/enable bit layout shared by IFR and IER.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InterruptBits: u8 {
        const TIMER2 = 1 << 5;
        const TIMER1 = 1 << 6;
    }
}

type WriteCallback = Box<dyn FnMut(u8)>;
type ReadCallback = Box<dyn FnMut() -> u8>;

/// A 6522 VIA. Port input pins are pulled lazily through a read callback at
/// register-read time rather than latched eagerly; this is what lets a port
/// wired to something stateful (e.g. a keyboard row mux selected by the same
/// port's own output side) stay correct without the VIA borrowing itself.
pub struct Via {
    ora: u8,
    orb: u8,
    ddra: u8,
    ddrb: u8,

    t1_counter: u16,
    t1_latch: u16,
    t2_counter: u16,

    sr: u8,
    acr: u8,
    pcr: u8,
    ifr: InterruptBits,
    ier: InterruptBits,

    on_porta_read: Option<ReadCallback>,
    on_portb_read: Option<ReadCallback>,
    on_porta_write: Option<WriteCallback>,
    on_portb_write: Option<WriteCallback>,
}

impl Via {
    pub fn new() -> Via {
        Via {
            ora: 0,
            orb: 0,
            ddra: 0,
            ddrb: 0,
            t1_counter: 0,
            t1_latch: 0,
            t2_counter: 0,
            sr: 0,
            acr: 0,
            pcr: 0,
            ifr: InterruptBits::empty(),
            ier: InterruptBits::empty(),
            on_porta_read: None,
            on_portb_read: None,
            on_porta_write: None,
            on_portb_write: None,
        }
    }

    pub fn set_porta_read_callback(&mut self, callback: ReadCallback) {
        self.on_porta_read = Some(callback);
    }

    pub fn set_portb_read_callback(&mut self, callback: ReadCallback) {
        self.on_portb_read = Some(callback);
    }

    pub fn set_porta_write_callback(&mut self, callback: WriteCallback) {
        self.on_porta_write = Some(callback);
    }

    pub fn set_portb_write_callback(&mut self, callback: WriteCallback) {
        self.on_portb_write = Some(callback);
    }

    fn port_value(output: u8, input: u8, ddr: u8) -> u8 {
        (output & ddr) | (input & !ddr)
    }

    pub fn read(&mut self, reg: u16) -> u8 {
        match reg & 0xF {
            REG_ORB => {
                let input = self.on_portb_read.as_mut().map_or(0xFF, |cb| cb());
                Via::port_value(self.orb, input, self.ddrb)
            }
            REG_ORA => {
                let input = self.on_porta_read.as_mut().map_or(0xFF, |cb| cb());
                Via::port_value(self.ora, input, self.ddra)
            }
            REG_DDRB => self.ddrb,
            REG_DDRA => self.ddra,
            REG_T1CL => (self.t1_counter & 0xFF) as u8,
            REG_T1CH => (self.t1_counter >> 8) as u8,
            REG_T1LL => (self.t1_latch & 0xFF) as u8,
            REG_T1LH => (self.t1_latch >> 8) as u8,
            REG_T2CL => (self.t2_counter & 0xFF) as u8,
            REG_T2CH => (self.t2_counter >> 8) as u8,
            REG_SR => self.sr,
            REG_ACR => self.acr,
            REG_PCR => self.pcr,
            REG_IFR => self.ifr.bits(),
            REG_IER => self.ier.bits(),
            _ => 0,
        }
    }

    pub fn write(&mut self, reg: u16, value: u8) {
        match reg & 0xF {
            REG_ORB => {
                self.orb = value;
                if let Some(callback) = self.on_portb_write.as_mut() {
                    callback(value & self.ddrb);
                }
            }
            REG_ORA => {
                self.ora = value;
                if let Some(callback) = self.on_porta_write.as_mut() {
                    callback(value & self.ddra);
                }
            }
            REG_DDRB => self.ddrb = value,
            REG_DDRA => self.ddra = value,
            REG_T1CL => self.t1_latch = (self.t1_latch & 0xFF00) | value as u16,
            REG_T1CH => {
                self.t1_latch = ((value as u16) << 8) | (self.t1_latch & 0xFF);
                self.t1_counter = self.t1_latch;
                self.ifr.remove(InterruptBits::TIMER1);
            }
            REG_T1LL => self.t1_latch = (self.t1_latch & 0xFF00) | value as u16,
            REG_T1LH => self.t1_latch = ((value as u16) << 8) | (self.t1_latch & 0xFF),
            REG_T2CL => self.t2_counter = (self.t2_counter & 0xFF00) | value as u16,
            REG_T2CH => {
                self.t2_counter = ((value as u16) << 8) | (self.t2_counter & 0xFF);
                self.ifr.remove(InterruptBits::TIMER2);
            }
            REG_SR => self.sr = value,
            REG_ACR => self.acr = value,
            REG_PCR => self.pcr = value,
            REG_IFR => self.ifr.remove(InterruptBits::from_bits_truncate(value)),
            REG_IER => {
                let bits = InterruptBits::from_bits_truncate(value);
                if value & 0x80 != 0 {
                    self.ier.insert(bits);
                } else {
                    self.ier.remove(bits);
                }
            }
            _ => {}
        }
    }

    /// Advance both timers by `cycles`. Returns `true` if a timer expired
    /// while its interrupt was enabled, i.e. the caller should raise IRQ.
    ///
    /// Timer 1 reloads from its latch on expiry; Timer 2 falls to zero and
    /// stays there until rewritten. A timer already parked at zero does not
    /// re-expire until the CPU writes its high byte again.
    pub fn update_timers(&mut self, cycles: u32) -> bool {
        let mut irq_triggered = false;
        let cycles = cycles as u16;

        if self.t1_counter > 0 {
            if self.t1_counter <= cycles {
                self.t1_counter = self.t1_latch;
                self.ifr.insert(InterruptBits::TIMER1);
                if self.ier.contains(InterruptBits::TIMER1) {
                    irq_triggered = true;
                }
            } else {
                self.t1_counter -= cycles;
            }
        }

        if self.t2_counter > 0 {
            if self.t2_counter <= cycles {
                self.t2_counter = 0;
                self.ifr.insert(InterruptBits::TIMER2);
                if self.ier.contains(InterruptBits::TIMER2) {
                    irq_triggered = true;
                }
            } else {
                self.t2_counter -= cycles;
            }
        }

        irq_triggered
    }
}

impl Default for Via {
    fn default() -> Via {
        Via::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn port_a_read_mixes_output_and_input_by_ddr() {
        let mut via = Via::new();
        via.write(REG_DDRA, 0x0F); // low nibble output, high nibble input
        via.write(REG_ORA, 0xA5);
        via.set_porta_read_callback(Box::new(|| 0x3C));
        // output bits (low nibble of 0xA5 = 0x5) | input bits (high nibble of 0x3C = 0x30)
        assert_eq!(via.read(REG_ORA), 0x35);
    }

    #[test]
    fn timer1_reloads_from_latch_and_flags_interrupt() {
        let mut via = Via::new();
        via.write(REG_IER, 0x80 | InterruptBits::TIMER1.bits());
        via.write(REG_T1CL, 0x02);
        via.write(REG_T1CH, 0x00); // latch = 2, counter = 2

        assert!(!via.update_timers(1));
        assert!(via.update_timers(1));
        assert_eq!(via.read(REG_T1CL), 2); // reloaded from latch
        assert_eq!(via.read(REG_IFR) & InterruptBits::TIMER1.bits(), InterruptBits::TIMER1.bits());
    }

    #[test]
    fn timer2_stops_at_zero_until_rewritten() {
        let mut via = Via::new();
        via.write(REG_IER, 0x80 | InterruptBits::TIMER2.bits());
        via.write(REG_T2CL, 0x01);
        via.write(REG_T2CH, 0x00); // counter = 1

        assert!(via.update_timers(1));
        assert_eq!(via.read(REG_T2CL), 0);
        assert!(!via.update_timers(100)); // stays at zero, no re-trigger
    }

    #[test]
    fn ifr_write_clears_only_named_bits() {
        let mut via = Via::new();
        via.write(REG_IER, 0x80 | 0x60);
        via.write(REG_T1CL, 0x01);
        via.write(REG_T1CH, 0x00);
        via.write(REG_T2CL, 0x01);
        via.write(REG_T2CH, 0x00);
        via.update_timers(1);

        via.write(REG_IFR, InterruptBits::TIMER1.bits());
        assert_eq!(via.read(REG_IFR) & InterruptBits::TIMER1.bits(), 0);
        assert_eq!(via.read(REG_IFR) & InterruptBits::TIMER2.bits(), InterruptBits::TIMER2.bits());
    }
}
