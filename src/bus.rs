//! The 64 KiB address space: RAM backing store, ROM overlays, and per-address
//! memory-mapped I/O callbacks.
use std::collections::HashMap;

use log::{debug, warn};

use crate::error::RomError;

struct RomOverlay {
    base: u16,
    bytes: Vec<u8>,
}

impl RomOverlay {
    fn contains(&self, addr: u16) -> bool {
        let end = self.base as usize + self.bytes.len();
        let addr = addr as usize;
        addr >= self.base as usize && addr < end
    }

    fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize - self.base as usize]
    }
}

pub type ReadCallback = Box<dyn FnMut() -> u8>;
pub type WriteCallback = Box<dyn FnMut(u8)>;

/// 16-bit address decode. Resolution order on a read is: I/O callback, then
/// ROM overlay, then RAM. Writes follow the same precedence, except a write
/// that lands in ROM is simply dropped.
pub struct Bus {
    ram: Vec<u8>,
    roms: Vec<RomOverlay>,
    read_callbacks: HashMap<u16, ReadCallback>,
    write_callbacks: HashMap<u16, WriteCallback>,
}

impl Bus {
    pub fn new() -> Bus {
        Bus {
            ram: vec![0; 0x10000],
            roms: Vec::new(),
            read_callbacks: HashMap::new(),
            write_callbacks: HashMap::new(),
        }
    }

    /// Register an overlay and seed RAM underneath it with the same bytes, so
    /// a hypothetical overlay removal exposes a sensible reset pattern rather
    /// than whatever RAM happened to hold.
    ///
    /// Overlapping a previously registered overlay is allowed; on a read, the
    /// last-registered overlay covering an address wins.
    pub fn load_rom(&mut self, bytes: &[u8], base: u16) -> Result<(), RomError> {
        if bytes.is_empty() {
            return Err(RomError::Empty);
        }
        if base as usize + bytes.len() > 0x10000 {
            return Err(RomError::OutOfRange {
                base,
                len: bytes.len(),
            });
        }

        for (i, byte) in bytes.iter().enumerate() {
            self.ram[base as usize + i] = *byte;
        }

        let new_base = base as usize;
        let new_end = new_base + bytes.len();
        if self
            .roms
            .iter()
            .any(|rom| new_base < rom.base as usize + rom.bytes.len() && (rom.base as usize) < new_end)
        {
            warn!(
                "ROM overlay at base {:#06x} (len {}) overlaps an existing overlay; the new one wins on reads",
                base,
                bytes.len()
            );
        }
        debug!("loaded ROM overlay: base {:#06x} len {}", base, bytes.len());

        self.roms.push(RomOverlay {
            base,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    /// Register the read and/or write callback for a single address. A range
    /// of addresses is wired up by calling this once per address; see
    /// [`Bus::register_io_range`] for a convenience wrapper that does the
    /// looping (same observable semantics, nothing hidden behind the range).
    pub fn register_io(
        &mut self,
        addr: u16,
        read: Option<ReadCallback>,
        write: Option<WriteCallback>,
    ) {
        if let Some(read) = read {
            self.read_callbacks.insert(addr, read);
        }
        if let Some(write) = write {
            self.write_callbacks.insert(addr, write);
        }
    }

    /// Register the same read/write callback factories across an inclusive
    /// address range, one [`Bus::register_io`] call per address. `make_read`
    /// and `make_write` are invoked once per address so each gets its own
    /// closure state (e.g. capturing the offset into a shared buffer).
    pub fn register_io_range(
        &mut self,
        min: u16,
        max: u16,
        mut make_read: impl FnMut(u16) -> Option<ReadCallback>,
        mut make_write: impl FnMut(u16) -> Option<WriteCallback>,
    ) {
        let mut addr = min;
        loop {
            self.register_io(addr, make_read(addr), make_write(addr));
            if addr == max {
                break;
            }
            addr += 1;
        }
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        if let Some(callback) = self.read_callbacks.get_mut(&addr) {
            return callback();
        }
        if let Some(rom) = self.roms.iter().rev().find(|rom| rom.contains(addr)) {
            return rom.read(addr);
        }
        self.ram[addr as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if let Some(callback) = self.write_callbacks.get_mut(&addr) {
            callback(value);
            return;
        }
        if self.roms.iter().any(|rom| rom.contains(addr)) {
            return;
        }
        self.ram[addr as usize] = value;
    }

    /// Little-endian 16-bit read; `addr + 1` wraps modulo $10000.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        lo | (hi << 8)
    }
}

impl Default for Bus {
    fn default() -> Bus {
        Bus::new()
    }
}
