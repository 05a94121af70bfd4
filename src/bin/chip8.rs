use anyhow::{bail, Context};
use clap::Parser;
use clio::ClioPath;
use log::info;

use chip8::driver::Chip8Driver;
use chip8::frontend::HeadlessFrontend;
use chip8::keymap::parse_key_script;
use chip8::{Chip8, Config, ShiftSource, SpriteEdges, UnknownOpcodePolicy};

/// Run a CHIP-8 ROM headless and print the final screen
#[derive(Parser)]
struct Args {
    rom: ClioPath,
    /// Instructions per second
    #[arg(short, long, default_value_t = 1000)]
    speed: u64,
    /// Frames (60 Hz timer ticks) to run before stopping
    #[arg(short, long, default_value_t = 600)]
    frames: u64,
    /// 8XY6/8XYE shift VY into VX instead of shifting VX in place
    #[arg(long)]
    shift_vy: bool,
    /// Wrap sprites around the screen edges instead of clipping them
    #[arg(long)]
    wrap_sprites: bool,
    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,
    /// Keep running past unknown opcodes
    #[arg(long)]
    skip_unknown: bool,
    /// Key events as FRAME+KEY / FRAME-KEY, e.g. "30+w,40-w"
    #[arg(short, long, default_value = "")]
    keys: String,
    /// Pace frames in real time
    #[arg(long)]
    realtime: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default()
            .clock_speed(self.speed)
            .shift_source(if self.shift_vy { ShiftSource::Vy } else { ShiftSource::Vx })
            .sprite_edges(if self.wrap_sprites { SpriteEdges::Wrap } else { SpriteEdges::Clip })
            .on_unknown_opcode(if self.skip_unknown {
                UnknownOpcodePolicy::Skip
            } else {
                UnknownOpcodePolicy::Halt
            });
        if let Some(seed) = self.seed {
            config = config.rng_seed(seed);
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.speed == 0 {
        bail!("speed must be at least 1 instruction per second");
    }
    let rom_name = args.rom.as_os_str().to_string_lossy().into_owned();
    let script = parse_key_script(&args.keys)?;

    let mut chip8 = Chip8::new(args.config());
    let input = args
        .rom
        .clone()
        .open()
        .with_context(|| format!("No file named {rom_name}"))?;
    chip8
        .load_rom_from(input)
        .with_context(|| format!("Failed to load {rom_name}"))?;
    info!("loaded {rom_name}");

    let frontend = HeadlessFrontend::new(Some(args.frames)).with_script(script);
    let mut driver = Chip8Driver::new(chip8, frontend).realtime(args.realtime);
    let result = driver.run();
    print!("{}", driver.chip8().framebuffer().render_text());
    result.with_context(|| format!("{rom_name} stopped after {} frames", driver.frontend().frames()))?;
    Ok(())
}
