//! Boots a `System`, optionally loading ROM images, and runs it for a
//! bounded number of frames, printing the video buffer after each dirty
//! frame. A debugging aid, not a terminal front-end.
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use pet_core::{Model, System};

#[derive(Parser, Debug)]
#[command(about = "Run the PET core against ROM images or a built-in bring-up ROM")]
struct Args {
    /// BASIC ROM image, loaded at $C000.
    #[arg(long)]
    basic_rom: Option<PathBuf>,

    /// KERNAL ROM image, loaded at $F000.
    #[arg(long)]
    kernal_rom: Option<PathBuf>,

    /// Character ROM image, loaded at $E000.
    #[arg(long)]
    character_rom: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "pet4032")]
    model: ModelArg,

    /// Number of frames to run before printing the final screen.
    #[arg(long, default_value_t = 5)]
    frames: u32,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ModelArg {
    Pet2001,
    Pet4032,
    Pet8032,
}

impl From<ModelArg> for Model {
    fn from(arg: ModelArg) -> Model {
        match arg {
            ModelArg::Pet2001 => Model::Pet2001,
            ModelArg::Pet4032 => Model::Pet4032,
            ModelArg::Pet8032 => Model::Pet8032,
        }
    }
}

/// A tiny bring-up program used when no ROM paths are given: it writes a
/// banner directly into the video buffer, arms VIA #1's Timer 1 as a
/// free-running source, and then parks in a jump-to-self loop (the
/// idiomatic 6502 halt).
fn bring_up_rom() -> Vec<u8> {
    let mut rom = Vec::new();

    // Write "PET CORE" starting at $8000 using STA absolute,X with X as the
    // column index, then fall into a jump-to-self loop.
    let banner = b"PET CORE";
    rom.extend_from_slice(&[0xA2, 0x00]); // LDX #$00
    for &byte in banner {
        rom.extend_from_slice(&[0xA9, byte]); // LDA #byte
        rom.extend_from_slice(&[0x9D, 0x00, 0x80]); // STA $8000,X
        rom.extend_from_slice(&[0xE8]); // INX
    }

    // Arm VIA #1 Timer 1: latch = $0400, enable its interrupt.
    rom.extend_from_slice(&[0xA9, 0x00, 0x8D, 0x14, 0xE8]); // LDA #0; STA T1CL ($E814)
    rom.extend_from_slice(&[0xA9, 0x04, 0x8D, 0x15, 0xE8]); // LDA #4; STA T1CH ($E815)
    rom.extend_from_slice(&[0xA9, 0xC0, 0x8D, 0x1E, 0xE8]); // LDA #$C0; STA IER ($E81E)
    rom.extend_from_slice(&[0x58]); // CLI

    // Jump-to-self at the address this instruction starts.
    let loop_addr = 0xC000u16 + rom.len() as u16;
    rom.push(0x4C); // JMP abs
    rom.push((loop_addr & 0xFF) as u8);
    rom.push((loop_addr >> 8) as u8);

    rom
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let mut system = System::new(args.model.into());

    let using_bring_up = args.basic_rom.is_none();
    if let Some(path) = &args.basic_rom {
        let bytes = fs::read(path).expect("failed to read BASIC ROM");
        system.load_rom(&bytes, 0xC000).expect("invalid BASIC ROM");
    } else {
        let bytes = bring_up_rom();
        system.load_rom(&bytes, 0xC000).expect("bring-up ROM is well-formed");
    }

    if let Some(path) = &args.kernal_rom {
        let bytes = fs::read(path).expect("failed to read KERNAL ROM");
        system.load_rom(&bytes, 0xF000).expect("invalid KERNAL ROM");
    }
    if let Some(path) = &args.character_rom {
        let bytes = fs::read(path).expect("failed to read character ROM");
        system
            .load_rom(&bytes, 0xE000)
            .expect("invalid character ROM");
    }

    if using_bring_up {
        eprintln!("{}", "no --basic-rom given, running the built-in bring-up ROM".yellow());
    }

    system.start();
    for _ in 0..args.frames {
        system.run_frame();
    }

    let (bytes, width, height, dirty) = system.snapshot_video();
    println!("{}", format!("-- video buffer ({width}x{height}, dirty={dirty}) --").cyan());
    for row in bytes.chunks(width) {
        let line: String = row.iter().map(|&b| screen_code_to_char(b)).collect();
        println!("{}", line);
    }
}

fn screen_code_to_char(code: u8) -> char {
    match code {
        0x20..=0x5F => code as char,
        _ => '.',
    }
}
