//! The machine seam.
//!
//! Everything the shell knows about the emulated NC1020 goes through the
//! [`Machine`] trait: the core owns the CPU, the memory-mapped flash, the
//! key matrix, and the persisted-state format, and the shell only drives it.
//! A built-in test-card core is provided so the shell runs end to end before
//! a real core is linked in.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::nc1020::{KEY_CODE_LIMIT, LCD_BUFFER_LEN, LCD_HEIGHT, LCD_WIDTH};
use crate::{Result, ShellError};

/// Filesystem locations handed to the machine once at start-up: the firmware
/// ROM, the NOR flash image, and the saved-state snapshot.
#[derive(Debug, Clone)]
pub struct RomConfig {
    pub rom_path: PathBuf,
    pub nor_flash_path: PathBuf,
    pub states_path: PathBuf,
}

/// Synchronous contract between the shell and a machine core.
///
/// Every call completes before it returns and the shell issues them from a
/// single thread, so implementations need no interior locking.
pub trait Machine {
    /// Prepare internal state from the configured media. Must precede every
    /// other call; failure is fatal to the session.
    fn initialize(&mut self, config: &RomConfig) -> Result<()>;

    /// Restore the previous session from the states path. A missing file is
    /// a fresh start, not an error; an unreadable one is.
    fn load_state(&mut self) -> Result<()>;

    /// Advance emulated time by `millis` of wall time. `speed_up` lifts the
    /// core's internal speed limit while held.
    fn run_time_slice(&mut self, millis: u32, speed_up: bool);

    /// Press (`down` = true) or release one position of the virtual key
    /// matrix. The matrix state lives in the core, not in the shell.
    fn set_key(&mut self, key_id: u8, down: bool);

    /// Fill `out` with the current panel bits. Returns `false` when the
    /// buffer cannot be produced right now; the caller then keeps showing
    /// its previous copy and simply asks again next tick.
    fn copy_lcd_buffer(&mut self, out: &mut [u8]) -> bool;

    /// Write the session to the states path.
    fn save_state(&mut self) -> Result<()>;
}

const TEST_CARD_STATE_VERSION: u32 = 1;

/// Sidecar document the test-card core persists in place of real machine
/// state.
#[derive(Debug, Serialize, Deserialize)]
struct TestCardState {
    version: u32,
    millis_run: u64,
}

/// Built-in stand-in core.
///
/// Renders a fixed test card: border, center cross, 8x8 checkerboard, and a
/// progress strip along the bottom that advances one column per emulated
/// second, which makes the loop cadence visible by eye. Holding any matrix
/// key inverts the panel, which makes the key path visible. The ROM and
/// flash media are ignored; only the states path is honored, through a small
/// JSON sidecar.
#[derive(Debug)]
pub struct TestCardMachine {
    states_path: Option<PathBuf>,
    millis_run: u64,
    pressed: [bool; KEY_CODE_LIMIT as usize],
    pattern: [u8; LCD_BUFFER_LEN],
}

impl TestCardMachine {
    pub fn new() -> Self {
        let mut pattern = [0u8; LCD_BUFFER_LEN];
        for y in 0..LCD_HEIGHT {
            for x in 0..LCD_WIDTH {
                if test_card_bit(x, y) {
                    set_bit(&mut pattern, x, y);
                }
            }
        }
        Self {
            states_path: None,
            millis_run: 0,
            pressed: [false; KEY_CODE_LIMIT as usize],
            pattern,
        }
    }

    fn any_key_down(&self) -> bool {
        self.pressed.iter().any(|&down| down)
    }
}

impl Default for TestCardMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine for TestCardMachine {
    fn initialize(&mut self, config: &RomConfig) -> Result<()> {
        self.states_path = Some(config.states_path.clone());
        Ok(())
    }

    fn load_state(&mut self) -> Result<()> {
        let path = match &self.states_path {
            Some(path) => path,
            None => return Ok(()),
        };
        match fs::read(path) {
            Ok(bytes) => {
                let state: TestCardState = serde_json::from_slice(&bytes)?;
                if state.version != TEST_CARD_STATE_VERSION {
                    return Err(ShellError::InvalidState(format!(
                        "unsupported sidecar version {}",
                        state.version
                    )));
                }
                self.millis_run = state.millis_run;
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn run_time_slice(&mut self, millis: u32, _speed_up: bool) {
        self.millis_run += u64::from(millis);
    }

    fn set_key(&mut self, key_id: u8, down: bool) {
        if let Some(slot) = self.pressed.get_mut(usize::from(key_id)) {
            *slot = down;
        }
    }

    fn copy_lcd_buffer(&mut self, out: &mut [u8]) -> bool {
        if out.len() != LCD_BUFFER_LEN {
            return false;
        }
        out.copy_from_slice(&self.pattern);

        // One column per emulated second, wrapping just inside the border.
        let columns = (self.millis_run / 1000) as usize % (LCD_WIDTH - 2);
        for y in (LCD_HEIGHT - 4)..(LCD_HEIGHT - 1) {
            for x in 1..=columns {
                set_bit(out, x, y);
            }
        }

        if self.any_key_down() {
            for byte in out.iter_mut() {
                *byte = !*byte;
            }
        }
        true
    }

    fn save_state(&mut self) -> Result<()> {
        let path = match &self.states_path {
            Some(path) => path,
            None => return Ok(()),
        };
        let state = TestCardState {
            version: TEST_CARD_STATE_VERSION,
            millis_run: self.millis_run,
        };
        fs::write(path, serde_json::to_vec_pretty(&state)?)?;
        Ok(())
    }
}

fn test_card_bit(x: usize, y: usize) -> bool {
    if x == 0 || y == 0 || x == LCD_WIDTH - 1 || y == LCD_HEIGHT - 1 {
        return true;
    }
    // Blank lane for the runtime progress strip.
    if y >= LCD_HEIGHT - 4 {
        return false;
    }
    if x == LCD_WIDTH / 2 || y == LCD_HEIGHT / 2 {
        return true;
    }
    (x / 8 + y / 8) % 2 == 0
}

fn set_bit(buf: &mut [u8], x: usize, y: usize) {
    let index = y * LCD_WIDTH + x;
    buf[index / 8] |= 1 << (7 - index % 8);
}
