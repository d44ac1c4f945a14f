//! Wires the CPU, bus, two VIAs, video buffer, and keyboard matrix into the
//! host-facing surface of the emulator.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::info;

use crate::bus::Bus;
use crate::constants::{memory_range, BASIC_COLD_START, CYCLES_PER_FRAME};
use crate::cpu::Cpu;
use crate::error::RomError;
use crate::keyboard::{Key, KeyboardMatrix};
use crate::via::Via;
use crate::video::VideoBuffer;

/// Diagnostic-only model selector (see the design notes on per-model memory
/// maps): every variant uses the identical fixed memory map in [`Bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Pet2001,
    Pet4032,
    Pet8032,
}

impl Model {
    fn label(self) -> &'static str {
        match self {
            Model::Pet2001 => "PET 2001",
            Model::Pet4032 => "PET 4032",
            Model::Pet8032 => "PET 8032",
        }
    }
}

pub struct System {
    pub cpu: Cpu,
    bus: Bus,
    via1: Rc<RefCell<Via>>,
    via2: Rc<RefCell<Via>>,
    video: Rc<RefCell<VideoBuffer>>,
    keyboard: Rc<RefCell<KeyboardMatrix>>,
    model: Model,
    running: bool,
}

impl System {
    pub fn new(model: Model) -> System {
        info!("constructing PET system: {}", model.label());

        let mut bus = Bus::new();
        let via1 = Rc::new(RefCell::new(Via::new()));
        let via2 = Rc::new(RefCell::new(Via::new()));
        let video = Rc::new(RefCell::new(VideoBuffer::default()));
        let keyboard = Rc::new(RefCell::new(KeyboardMatrix::new()));
        let keyboard_row = Rc::new(Cell::new(0u8));

        {
            let mut via1_mut = via1.borrow_mut();
            let write_row = keyboard_row.clone();
            via1_mut.set_porta_write_callback(Box::new(move |value| {
                write_row.set(value & 0x07);
            }));
            let read_row = keyboard_row.clone();
            let read_keyboard = keyboard.clone();
            via1_mut.set_porta_read_callback(Box::new(move || {
                read_keyboard.borrow().read_row(read_row.get() as usize)
            }));
        }

        bus.register_io_range(
            memory_range::VIDEO.min,
            memory_range::VIDEO.max,
            {
                let video = video.clone();
                move |addr| {
                    let video = video.clone();
                    let offset = (addr - memory_range::VIDEO.min) as usize;
                    Some(Box::new(move || video.borrow().read(offset)) as Box<dyn FnMut() -> u8>)
                }
            },
            {
                let video = video.clone();
                move |addr| {
                    let video = video.clone();
                    let offset = (addr - memory_range::VIDEO.min) as usize;
                    Some(Box::new(move |value| video.borrow_mut().write(offset, value))
                        as Box<dyn FnMut(u8)>)
                }
            },
        );

        bus.register_io_range(
            memory_range::VIA_1.min,
            memory_range::VIA_1.max,
            {
                let via1 = via1.clone();
                move |addr| {
                    let via1 = via1.clone();
                    let offset = addr - memory_range::VIA_1.min;
                    Some(Box::new(move || via1.borrow_mut().read(offset)) as Box<dyn FnMut() -> u8>)
                }
            },
            {
                let via1 = via1.clone();
                move |addr| {
                    let via1 = via1.clone();
                    let offset = addr - memory_range::VIA_1.min;
                    Some(Box::new(move |value| via1.borrow_mut().write(offset, value))
                        as Box<dyn FnMut(u8)>)
                }
            },
        );

        bus.register_io_range(
            memory_range::VIA_2.min,
            memory_range::VIA_2.max,
            {
                let via2 = via2.clone();
                move |addr| {
                    let via2 = via2.clone();
                    let offset = addr - memory_range::VIA_2.min;
                    Some(Box::new(move || via2.borrow_mut().read(offset)) as Box<dyn FnMut() -> u8>)
                }
            },
            {
                let via2 = via2.clone();
                move |addr| {
                    let via2 = via2.clone();
                    let offset = addr - memory_range::VIA_2.min;
                    Some(Box::new(move |value| via2.borrow_mut().write(offset, value))
                        as Box<dyn FnMut(u8)>)
                }
            },
        );

        System {
            cpu: Cpu::new(),
            bus,
            via1,
            via2,
            video,
            keyboard,
            model,
            running: false,
        }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Register a ROM image (BASIC, KERNAL, character, or a custom bring-up
    /// image) as a bus overlay.
    pub fn load_rom(&mut self, bytes: &[u8], base: u16) -> Result<(), RomError> {
        self.bus.load_rom(bytes, base)
    }

    pub fn start(&mut self) {
        self.cpu.pc = BASIC_COLD_START;
        self.video.borrow_mut().clear();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn key_down(&mut self, key: Key) {
        let (row, col) = key.matrix_cell();
        self.keyboard.borrow_mut().set(row, col, true);
    }

    pub fn key_up(&mut self, key: Key) {
        let (row, col) = key.matrix_cell();
        self.keyboard.borrow_mut().set(row, col, false);
    }

    /// Run the CPU until roughly [`CYCLES_PER_FRAME`] cycles have elapsed or
    /// `stop()` was called. Every instruction's cycle count feeds both VIAs'
    /// timers; a VIA that newly asserts its interrupt raises `cpu.irq_pending`.
    pub fn run_frame(&mut self) {
        let mut elapsed: u32 = 0;
        while self.running && elapsed < CYCLES_PER_FRAME {
            let cycles = self.cpu.step(&mut self.bus);
            elapsed += cycles as u32;

            let via1_irq = self.via1.borrow_mut().update_timers(cycles as u32);
            let via2_irq = self.via2.borrow_mut().update_timers(cycles as u32);
            if via1_irq || via2_irq {
                self.cpu.irq_pending = true;
            }
        }
    }

    /// A read-only view of the video buffer plus its dirty flag, acknowledging
    /// (clearing) the flag as part of the read — the host is expected to
    /// render whenever `dirty` comes back true and not again until the next
    /// change.
    pub fn snapshot_video(&self) -> (Vec<u8>, usize, usize, bool) {
        let mut video = self.video.borrow_mut();
        let dirty = video.is_dirty();
        let bytes = video.bytes().to_vec();
        let (width, height) = (video.width, video.height);
        if dirty {
            video.ack_dirty();
        }
        (bytes, width, height, dirty)
    }
}
