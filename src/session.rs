//! Session orchestration.

use std::thread;
use std::time::Instant;

use log::{info, warn};

use crate::input::InputRouter;
use crate::lcd::{DisplayImage, LcdDecoder};
use crate::machine::{Machine, RomConfig};
use crate::pacer::FramePacer;
use crate::surface::PresentationSurface;
use crate::Result;

/// Drives one emulation session: start-up, the frame-paced tick loop, and
/// the final state persist.
///
/// The session moves strictly through three states. Start-up failures
/// surface from [`Session::new`], before the loop exists and before there is
/// anything worth persisting. Once the loop has been entered, the state is
/// persisted exactly once on the way out, also when the loop ends mid-tick
/// or with an error. The surface and machine are owned by the session, so
/// both are released on every exit path.
pub struct Session<M: Machine, S: PresentationSurface> {
    machine: M,
    surface: S,
    router: InputRouter,
    pacer: FramePacer,
    decoder: LcdDecoder,
    lcd_buf: Vec<u8>,
    image: DisplayImage,
}

impl<M: Machine, S: PresentationSurface> Session<M, S> {
    /// Start-up: hand the media paths to the machine, then restore the
    /// previous session. Any failure aborts the session before the loop.
    pub fn new(
        mut machine: M,
        surface: S,
        config: RomConfig,
        decoder: LcdDecoder,
        pacer: FramePacer,
    ) -> Result<Self> {
        machine.initialize(&config)?;
        machine.load_state()?;
        info!(
            "machine ready (rom {}, state {})",
            config.rom_path.display(),
            config.states_path.display()
        );
        let lcd_buf = vec![0u8; decoder.bitmap_len()];
        let image = decoder.blank_image();
        Ok(Self {
            machine,
            surface,
            router: InputRouter::new(),
            pacer,
            decoder,
            lcd_buf,
            image,
        })
    }

    /// Tick until the router clears the continue flag, then persist. The
    /// persist also runs when a tick fails, so a session that started
    /// successfully always attempts exactly one save; a tick error takes
    /// precedence over a save error in the result.
    pub fn run(&mut self) -> Result<()> {
        let outcome = self.run_loop();
        let saved = self.machine.save_state();
        match &saved {
            Ok(()) => info!("machine state persisted"),
            Err(err) => warn!("state persist failed: {}", err),
        }
        outcome.and(saved)
    }

    fn run_loop(&mut self) -> Result<()> {
        while self.router.is_running() {
            self.tick()?;
        }
        info!("session stopped");
        Ok(())
    }

    /// One tick. The order is load-bearing: input drained this tick reaches
    /// the matrix after the advance call, so it first affects emulation on
    /// the next tick, never retroactively.
    fn tick(&mut self) -> Result<()> {
        let started = Instant::now();

        self.machine
            .run_time_slice(self.pacer.interval_ms(), false);
        self.router.pump(&mut self.surface, &mut self.machine);
        if self.machine.copy_lcd_buffer(&mut self.lcd_buf) {
            self.decoder.decode(&self.lcd_buf, &mut self.image);
        } else {
            warn!("lcd buffer unavailable; presenting the previous frame");
        }
        self.surface.present(&self.image)?;

        thread::sleep(self.pacer.idle_after(started.elapsed()));
        Ok(())
    }

    /// The machine, for inspection once the loop has ended.
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// The surface, for inspection once the loop has ended.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
