use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8_core::emulator::Emulator;
use chip8_core::keymap::key_index;

/// Run a CHIP-8 program without a screen, then print what it drew.
#[derive(StructOpt, Debug)]
#[structopt(name = "no_frontend")]
struct Opt {
    /// Number of 60 Hz frames to run
    #[structopt(short, long, default_value = "60")]
    frames: u32,

    /// Instructions executed per frame
    #[structopt(short, long, default_value = "10")]
    ticks_per_frame: u32,

    /// Seed for the random number instruction
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Keys held down for the whole run (1-4, q-r, a-f, z-v)
    #[structopt(short, long)]
    press: Vec<String>,

    /// Sleep between frames to run at real speed
    #[structopt(long)]
    realtime: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let mut emulator = match opt.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };

    // Load instructions into emulator memory
    emulator.load(&program)?;

    for name in &opt.press {
        match key_index(name) {
            Some(key) => emulator.key_event(key, true)?,
            None => log::warn!("Ignoring unknown key {:?}", name),
        }
    }

    // Start execution
    for frame in 0..opt.frames {
        for _ in 0..opt.ticks_per_frame {
            if let Err(error) = emulator.step() {
                log::error!("Halted in frame {}: {}", frame, error);
                print!("{}", emulator);
                return Err(error.into());
            }
        }
        emulator.tick_timers();

        if opt.realtime {
            std::thread::sleep(Duration::from_millis(1_000 / 60));
        }
    }

    print!("{}", emulator);
    Ok(())
}
