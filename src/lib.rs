//! Presentation shell for the WQX NC1020 pocket computer.
//!
//! The machine core (CPU, memory-mapped flash, persisted state) lives behind
//! the [`Machine`] trait; this crate supplies everything between that core
//! and the user: the frame-paced session loop, the packed-bitmap LCD
//! decoder, the physical-to-virtual key table, and the windowed surface.

use thiserror::Error;

pub mod input;
pub mod keymap;
pub mod lcd;
pub mod machine;
pub mod nc1020;
pub mod pacer;
pub mod session;
pub mod surface;

pub use input::InputRouter;
pub use lcd::{DisplayImage, LcdDecoder};
pub use machine::{Machine, RomConfig, TestCardMachine};
pub use pacer::FramePacer;
pub use session::Session;
pub use surface::{PresentationSurface, ScriptedSurface, SurfaceEvent, WindowSurface};

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error("state error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid state file: {0}")]
    InvalidState(String),
    #[error("{0}")]
    Other(String),
}
