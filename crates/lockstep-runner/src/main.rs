//! Headless demo driver for the cycle-stepped 6502.
//!
//! Builds a flat 64 KiB bus, loads a program image (or a built-in demo),
//! points the reset vector at it, then drives the CPU tick by tick at the
//! requested clock rate. State is reported once per emulated frame.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Instant;

use clap::Parser;
use lockstep_6502::{coverage_matrix, CpuError, Model, Mos6502, RESET_VECTOR};
use lockstep_core::{Bus, MasterClock, Observable, SimpleBus};

/// Where programs are loaded and the reset vector points.
const ORIGIN: u16 = 0x6000;

/// Frames per second for pacing and state reports.
const FRAME_RATE: u64 = 60;

#[derive(Parser)]
#[command(about = "Run a 6502 program in lock-step with a paced clock")]
struct Args {
    /// Raw binary image loaded at $6000; runs a built-in demo if omitted.
    program: Option<PathBuf>,

    /// Clock frequency in Hz.
    #[arg(long, default_value_t = 1_000_000)]
    hz: u64,

    /// Emulate the 65C02 revision instead of the original NMOS part.
    #[arg(long)]
    cmos: bool,

    /// Stop after this many cycles (0 = run until halt).
    #[arg(long, default_value_t = 0)]
    cycles: u64,

    /// Run as fast as the host allows instead of pacing to --hz.
    #[arg(long)]
    unpaced: bool,
}

/// Built-in demo: count up in A forever.
///
/// LDA #$99 is the classic first program for this board; the loop after it
/// keeps the CPU busy so the frame reports show progress.
const DEMO: &[u8] = &[
    0xA9, 0x99, // LDA #$99
    0xA2, 0x00, // LDX #$00
    0xE8, // loop: INX
    0x4C, 0x04, 0x60, // JMP loop
];

fn main() {
    env_logger::init();
    let args = Args::parse();

    let model = if args.cmos {
        Model::Cmos65C02
    } else {
        Model::Original
    };

    let mut bus = SimpleBus::new();
    match &args.program {
        Some(path) => {
            let image = match fs::read(path) {
                Ok(image) => image,
                Err(err) => {
                    eprintln!("failed to read {}: {err}", path.display());
                    process::exit(1);
                }
            };
            bus.load(ORIGIN, &image);
        }
        None => bus.load(ORIGIN, DEMO),
    }
    bus.write(RESET_VECTOR, ORIGIN as u8);
    bus.write(RESET_VECTOR.wrapping_add(1), (ORIGIN >> 8) as u8);

    let mut cpu = Mos6502::new(model);
    cpu.reset(&mut bus);

    log::info!("model {model:?}, reset to ${:04X}", cpu.regs.pc);
    log::debug!("opcode coverage:\n{}", coverage_matrix());

    if let Err(err) = run(&mut cpu, &mut bus, &args) {
        eprintln!("{err}");
        report(&cpu);
        process::exit(1);
    }
    report(&cpu);
}

/// Drive the CPU frame by frame until halt or the cycle budget runs out.
fn run(cpu: &mut Mos6502, bus: &mut SimpleBus, args: &Args) -> Result<(), CpuError> {
    let clock = MasterClock::new(args.hz);
    let ticks_per_frame = clock.ticks_per_frame(FRAME_RATE).get().max(1);
    let frame_period = clock.period() * ticks_per_frame as u32;

    let start = Instant::now();
    let mut next_frame = start + frame_period;

    loop {
        for _ in 0..ticks_per_frame {
            cpu.tick(bus)?;
            if args.cycles != 0 && cpu.cycles() >= args.cycles {
                return Ok(());
            }
        }
        report(cpu);

        if !args.unpaced {
            let now = Instant::now();
            if now < next_frame {
                thread::sleep(next_frame - now);
            }
            next_frame += frame_period;
        }
    }
}

/// Log the observable register file.
fn report(cpu: &Mos6502) {
    let line: Vec<String> = ["pc", "a", "x", "y", "s", "p", "cycle"]
        .iter()
        .filter_map(|path| cpu.query(path).map(|value| format!("{path}={value}")))
        .collect();
    log::info!("{}", line.join(" "));
}
