//! Input routing.

use crate::keymap::{self, EXIT_KEY};
use crate::machine::Machine;
use crate::surface::{PresentationSurface, SurfaceEvent};

/// Drains the surface's pending events once per tick and forwards key edges
/// to the machine's matrix.
///
/// The router owns the session's continue flag and nothing else. Key-state
/// bookkeeping belongs to the machine, so routing is pure forwarding: a
/// bound key becomes a `set_key` edge, an unbound key becomes nothing, and
/// the two terminal signals (window close, exit gesture) clear the flag.
pub struct InputRouter {
    running: bool,
    events: Vec<SurfaceEvent>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self {
            running: true,
            events: Vec::new(),
        }
    }

    /// True until the first terminal event arrives. Never becomes true again
    /// for the life of the router.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Drain the whole pending batch and dispatch it in arrival order. The
    /// batch is finite by the surface contract, so this never blocks. Events
    /// after a terminal one are still dispatched; a press reaching the
    /// matrix on the final tick is harmless because the machine state is
    /// persisted after, not during, the drain.
    pub fn pump<S, M>(&mut self, surface: &mut S, machine: &mut M)
    where
        S: PresentationSurface,
        M: Machine,
    {
        surface.drain_events(&mut self.events);
        for event in self.events.drain(..) {
            match event {
                SurfaceEvent::CloseRequested => self.running = false,
                SurfaceEvent::KeyDown(key) if key == EXIT_KEY => self.running = false,
                SurfaceEvent::KeyDown(key) => {
                    if let Some(code) = keymap::virtual_code(key) {
                        machine.set_key(code, true);
                    }
                }
                SurfaceEvent::KeyUp(key) => {
                    if let Some(code) = keymap::virtual_code(key) {
                        machine.set_key(code, false);
                    }
                }
            }
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::RomConfig;
    use crate::nc1020::{KEY_ENTER, KEY_F1};
    use crate::surface::ScriptedSurface;
    use crate::Result;
    use minifb::Key;

    /// Machine double that just records the edges it is handed.
    #[derive(Default)]
    struct EdgeLog {
        edges: Vec<(u8, bool)>,
    }

    impl Machine for EdgeLog {
        fn initialize(&mut self, _config: &RomConfig) -> Result<()> {
            Ok(())
        }
        fn load_state(&mut self) -> Result<()> {
            Ok(())
        }
        fn run_time_slice(&mut self, _millis: u32, _speed_up: bool) {}
        fn set_key(&mut self, key_id: u8, down: bool) {
            self.edges.push((key_id, down));
        }
        fn copy_lcd_buffer(&mut self, _out: &mut [u8]) -> bool {
            true
        }
        fn save_state(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn pump_one(batch: Vec<SurfaceEvent>) -> (InputRouter, EdgeLog) {
        let mut surface = ScriptedSurface::new();
        surface.push_batch(batch);
        let mut machine = EdgeLog::default();
        let mut router = InputRouter::new();
        router.pump(&mut surface, &mut machine);
        (router, machine)
    }

    #[test]
    fn bound_key_edges_are_forwarded() {
        let (router, machine) = pump_one(vec![
            SurfaceEvent::KeyDown(Key::J),
            SurfaceEvent::KeyDown(Key::U),
            SurfaceEvent::KeyUp(Key::J),
        ]);
        assert!(router.is_running());
        assert_eq!(
            machine.edges,
            vec![(KEY_ENTER, true), (KEY_F1, true), (KEY_ENTER, false)]
        );
    }

    #[test]
    fn unbound_keys_are_dropped_silently() {
        let (router, machine) = pump_one(vec![
            SurfaceEvent::KeyDown(Key::A),
            SurfaceEvent::KeyUp(Key::F5),
        ]);
        assert!(router.is_running());
        assert!(machine.edges.is_empty(), "unbound keys must forward nothing");
    }

    #[test]
    fn close_request_clears_the_continue_flag() {
        let (router, machine) = pump_one(vec![SurfaceEvent::CloseRequested]);
        assert!(!router.is_running());
        assert!(machine.edges.is_empty());
    }

    #[test]
    fn exit_gesture_press_bypasses_the_key_table() {
        let (router, machine) = pump_one(vec![SurfaceEvent::KeyDown(EXIT_KEY)]);
        assert!(!router.is_running(), "exit press must stop the loop");
        assert!(machine.edges.is_empty(), "exit press is not a matrix key");
    }

    #[test]
    fn exit_gesture_release_is_ignored() {
        let (router, machine) = pump_one(vec![SurfaceEvent::KeyUp(EXIT_KEY)]);
        assert!(router.is_running(), "only the press is the gesture");
        assert!(machine.edges.is_empty());
    }

    #[test]
    fn the_whole_batch_is_drained_even_past_a_terminal_event() {
        let (router, machine) = pump_one(vec![
            SurfaceEvent::KeyDown(Key::J),
            SurfaceEvent::CloseRequested,
            SurfaceEvent::KeyDown(Key::U),
        ]);
        assert!(!router.is_running());
        assert_eq!(
            machine.edges,
            vec![(KEY_ENTER, true), (KEY_F1, true)],
            "events queued behind the close must still be dispatched"
        );
    }

    #[test]
    fn the_flag_stays_down_across_later_pumps() {
        let mut surface = ScriptedSurface::new();
        surface.push_batch(vec![SurfaceEvent::CloseRequested]);
        surface.push_batch(vec![SurfaceEvent::KeyDown(Key::J)]);
        let mut machine = EdgeLog::default();
        let mut router = InputRouter::new();
        router.pump(&mut surface, &mut machine);
        router.pump(&mut surface, &mut machine);
        assert!(!router.is_running(), "the flag is never reset");
    }
}
