//! Device-model constants for the WQX NC1020 pocket computer.

/// LCD panel geometry: a fixed 160x80 monochrome dot matrix.
pub const LCD_WIDTH: usize = 160;
pub const LCD_HEIGHT: usize = 80;

/// Packed panel size: one bit per pixel, row-major, most significant bit
/// first within each byte.
pub const LCD_BUFFER_LEN: usize = LCD_WIDTH * LCD_HEIGHT / 8;

/// Display cadence. The interval uses integer milliseconds; the firmware is
/// driven in whole-millisecond slices.
pub const FRAME_RATE: u32 = 30;
pub const FRAME_INTERVAL_MS: u32 = 1000 / FRAME_RATE;

/// Default pixel scale for the window.
pub const DEFAULT_SCALE: usize = 2;

/// Panel colors as 0RGB pixels: lit dots are black on a white field.
pub const COLOR_ON: u32 = 0x0000_0000;
pub const COLOR_OFF: u32 = 0x00FF_FFFF;

pub const WINDOW_TITLE: &str = "WQX";

// Virtual key-matrix codes. How the core splits a code into row and column
// is its own affair; every valid code is below 0x40.
pub const KEY_RIGHT: u8 = 0x1F;
pub const KEY_LEFT: u8 = 0x3F;
pub const KEY_DOWN: u8 = 0x1B;
pub const KEY_UP: u8 = 0x1A;
pub const KEY_F1: u8 = 0x10; // "fly" key
pub const KEY_F4: u8 = 0x13; // menu
pub const KEY_ENTER: u8 = 0x1D;
pub const KEY_ESC: u8 = 0x3B; // back
pub const KEY_F10: u8 = 0x08; // main screen
pub const KEY_F11: u8 = 0x0E; // game menu
pub const KEY_X: u8 = 0x31;
pub const KEY_Y: u8 = 0x25;
pub const KEY_PAGE_UP: u8 = 0x37;
pub const KEY_PAGE_DOWN: u8 = 0x1E;
pub const KEY_POWER: u8 = 0x0F;

/// Exclusive upper bound on valid matrix codes.
pub const KEY_CODE_LIMIT: u8 = 0x40;

// Default media locations used by the frontend.
pub const DEFAULT_ROM_PATH: &str = "./obj_lu.bin";
pub const DEFAULT_NOR_FLASH_PATH: &str = "./nc1020.fls";
pub const DEFAULT_STATES_PATH: &str = "./nc1020.sts";
