use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;

use nc1020_shell::nc1020;
use nc1020_shell::{FramePacer, LcdDecoder, RomConfig, Session, TestCardMachine, WindowSurface};

/// WQX NC1020 presentation shell.
///
/// Opens the LCD window and runs the frame-paced loop against a machine
/// core. Until a real core is linked in, the shell drives its built-in
/// panel test card; Backspace ends the session.
#[derive(Parser, Debug)]
#[command(name = "nc1020", version, about = "WQX NC1020 presentation shell")]
struct Args {
    /// Firmware ROM image.
    #[arg(long, default_value = nc1020::DEFAULT_ROM_PATH)]
    rom: PathBuf,

    /// NOR flash image.
    #[arg(long, default_value = nc1020::DEFAULT_NOR_FLASH_PATH)]
    nor_flash: PathBuf,

    /// Saved-state snapshot.
    #[arg(long, default_value = nc1020::DEFAULT_STATES_PATH)]
    states: PathBuf,

    /// Pixel scale factor for the LCD window.
    #[arg(long, default_value_t = nc1020::DEFAULT_SCALE)]
    scale: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(args.scale >= 1, "--scale must be at least 1");

    let config = RomConfig {
        rom_path: args.rom,
        nor_flash_path: args.nor_flash,
        states_path: args.states,
    };
    let decoder = LcdDecoder::new(
        nc1020::LCD_WIDTH,
        nc1020::LCD_HEIGHT,
        args.scale,
        nc1020::COLOR_ON,
        nc1020::COLOR_OFF,
    );
    let pacer = FramePacer::new(nc1020::FRAME_INTERVAL_MS);
    let surface = WindowSurface::open(
        nc1020::WINDOW_TITLE,
        decoder.image_width(),
        decoder.image_height(),
    )
    .context("failed to open the LCD window")?;

    let mut session = Session::new(TestCardMachine::new(), surface, config, decoder, pacer)
        .context("failed to start the session")?;
    session.run().context("session ended with an error")
}
