//! The core of a Commodore PET-class emulator: a cycle-counted MOS 6502,
//! a 64 KiB bus with ROM overlays and memory-mapped I/O, a pair of 6522
//! VIAs, a character-cell video buffer, and a matrix keyboard, wired
//! together by [`System`].
pub mod bus;
pub mod constants;
pub mod cpu;
pub mod error;
pub mod keyboard;
pub mod system;
pub mod via;
pub mod video;

pub use bus::Bus;
pub use cpu::Cpu;
pub use error::RomError;
pub use keyboard::{Key, KeyboardMatrix};
pub use system::{Model, System};
pub use via::Via;
pub use video::VideoBuffer;
