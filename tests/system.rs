//! Integration tests exercising `System`: ROM overlay precedence on the bus,
//! a VIA timer interrupt reaching the CPU and running its handler, and
//! keyboard-matrix row selection through VIA #1's port A.
use pet_core::{Key, Model, System};

const VIA1_ORA: u16 = 0xE811;
const VIA1_DDRA: u16 = 0xE813;
const VIA1_T1CL: u16 = 0xE814;
const VIA1_T1CH: u16 = 0xE815;
const VIA1_IER: u16 = 0xE81E;
const VIDEO_BASE: u16 = 0x8000;

fn jmp_self(at: u16) -> [u8; 3] {
    [0x4C, (at & 0xFF) as u8, (at >> 8) as u8]
}

#[test]
fn rom_overlay_precedence_last_registered_wins_on_reads() {
    let mut system = System::new(Model::Pet4032);
    system.load_rom(&[0xAA], 0x1000).unwrap();
    system.load_rom(&[0xBB], 0x1000).unwrap(); // same address, should shadow the first

    // LDA $1000 ; STA $8000 ; JMP self
    let mut program = vec![0xAD, 0x00, 0x10, 0x8D, 0x00, 0x80];
    let loop_addr = 0xC000u16 + program.len() as u16;
    program.extend_from_slice(&jmp_self(loop_addr));
    system.load_rom(&program, 0xC000).unwrap();

    system.start();
    system.run_frame();

    let (bytes, _, _, _) = system.snapshot_video();
    assert_eq!(bytes[0], 0xBB);
}

#[test]
fn via_timer_interrupt_reaches_the_cpu_and_runs_its_handler() {
    let mut system = System::new(Model::Pet4032);

    // IRQ vector -> $C200.
    system.load_rom(&[0x00, 0xC2], 0xFFFE).unwrap();

    // ISR: LDA #$2A ; STA $8000 ; RTI
    system
        .load_rom(&[0xA9, 0x2A, 0x8D, 0x00, 0x80, 0x40], 0xC200)
        .unwrap();

    // Arm Timer 1 with a short latch, enable its interrupt, clear I, then
    // park in a jump-to-self loop.
    let mut program = vec![
        0xA9, 0x02, 0x8D, (VIA1_T1CL & 0xFF) as u8, (VIA1_T1CL >> 8) as u8, // LDA #2; STA T1CL
        0xA9, 0x00, 0x8D, (VIA1_T1CH & 0xFF) as u8, (VIA1_T1CH >> 8) as u8, // LDA #0; STA T1CH
        0xA9, 0xC0, 0x8D, (VIA1_IER & 0xFF) as u8, (VIA1_IER >> 8) as u8, // LDA #$C0; STA IER
        0x58, // CLI
    ];
    let loop_addr = 0xC000u16 + program.len() as u16;
    program.extend_from_slice(&jmp_self(loop_addr));
    system.load_rom(&program, 0xC000).unwrap();

    system.start();
    system.run_frame();

    let (bytes, _, _, _) = system.snapshot_video();
    assert_eq!(bytes[0], 0x2A, "timer IRQ never ran its handler");
}

#[test]
fn keyboard_row_selection_reads_back_through_via1_port_a() {
    let mut system = System::new(Model::Pet4032);

    // Select row 0 (low 3 bits of port A are wired as row-select outputs),
    // read the port back, and store it so the test can inspect it.
    let mut program = vec![
        0xA9, 0x07, 0x8D, (VIA1_DDRA & 0xFF) as u8, (VIA1_DDRA >> 8) as u8, // LDA #$07; STA DDRA
        0xA9, 0x00, 0x8D, (VIA1_ORA & 0xFF) as u8, (VIA1_ORA >> 8) as u8, // LDA #0; STA ORA (row 0)
        0xAD, (VIA1_ORA & 0xFF) as u8, (VIA1_ORA >> 8) as u8, // LDA ORA
        0x8D, (VIDEO_BASE & 0xFF) as u8, (VIDEO_BASE >> 8) as u8, // STA $8000
    ];
    let loop_addr = 0xC000u16 + program.len() as u16;
    program.extend_from_slice(&jmp_self(loop_addr));
    system.load_rom(&program, 0xC000).unwrap();

    system.start();
    system.run_frame();
    let (bytes, _, _, _) = system.snapshot_video();
    assert_eq!(bytes[0], 0xF8, "no key down: row 0 columns should read all-up");

    let mut system = System::new(Model::Pet4032);
    system.load_rom(&program, 0xC000).unwrap();
    system.key_down(Key::Digit7); // row 0, column 3
    system.start();
    system.run_frame();
    let (bytes, _, _, _) = system.snapshot_video();
    assert_eq!(bytes[0], 0xF0, "column 3 of row 0 should read as pressed");
}
