//! Presentation surface.
//!
//! The seam between the session loop and whatever actually puts pixels on
//! screen. The windowed implementation lives here; tests drive the loop
//! through [`ScriptedSurface`] instead, so nothing below the seam needs a
//! display server.

use std::collections::VecDeque;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::lcd::DisplayImage;
use crate::Result;

/// One pending platform event, as drained once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// The windowing system was asked to close the surface.
    CloseRequested,
}

/// A fixed-size drawable surface together with its pending-event source.
pub trait PresentationSurface {
    /// Submit an image for presentation.
    fn present(&mut self, image: &DisplayImage) -> Result<()>;

    /// Append every immediately available event to `out`, in order. Never
    /// blocks; an empty queue appends nothing.
    fn drain_events(&mut self, out: &mut Vec<SurfaceEvent>);
}

/// Windowed surface backed by `minifb`.
///
/// The window handle is owned here, so it is released whenever the surface
/// value goes out of scope, on the error paths included.
pub struct WindowSurface {
    window: Window,
}

impl WindowSurface {
    pub fn open(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())?;
        // The session paces itself; the window must not add a second limiter.
        window.set_target_fps(0);
        Ok(Self { window })
    }
}

impl PresentationSurface for WindowSurface {
    fn present(&mut self, image: &DisplayImage) -> Result<()> {
        self.window
            .update_with_buffer(image.pixels(), image.width(), image.height())?;
        Ok(())
    }

    fn drain_events(&mut self, out: &mut Vec<SurfaceEvent>) {
        if !self.window.is_open() {
            out.push(SurfaceEvent::CloseRequested);
            return;
        }
        // minifb reports edges as two per-update lists rather than a single
        // queue; presses are routed first so a tap shorter than one tick
        // still arrives as press-then-release.
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            out.push(SurfaceEvent::KeyDown(key));
        }
        for key in self.window.get_keys_released() {
            out.push(SurfaceEvent::KeyUp(key));
        }
    }
}

/// Surface stand-in that replays scripted event batches and records every
/// presented image. One batch is consumed per drain; when the script runs
/// out the surface reports a close request, so a loop driven by it always
/// terminates.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    batches: VecDeque<Vec<SurfaceEvent>>,
    presented: Vec<Vec<u32>>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the batch the next drain will deliver.
    pub fn push_batch(&mut self, batch: Vec<SurfaceEvent>) {
        self.batches.push_back(batch);
    }

    /// Pixels of every image presented so far, oldest first.
    pub fn presented(&self) -> &[Vec<u32>] {
        &self.presented
    }
}

impl PresentationSurface for ScriptedSurface {
    fn present(&mut self, image: &DisplayImage) -> Result<()> {
        self.presented.push(image.pixels().to_vec());
        Ok(())
    }

    fn drain_events(&mut self, out: &mut Vec<SurfaceEvent>) {
        match self.batches.pop_front() {
            Some(batch) => out.extend(batch),
            None => out.push(SurfaceEvent::CloseRequested),
        }
    }
}
