//! Physical key bindings.
//!
//! One table, one fact per row: which physical key drives which position of
//! the virtual key matrix. Keys outside the table are not errors, they are
//! simply not part of the machine's keyboard and produce nothing.

use minifb::Key;

use crate::nc1020;

/// Pressing this key ends the session. It is a loop-control signal, not a
/// matrix key, so it must never appear in [`KEY_BINDINGS`].
pub const EXIT_KEY: Key = Key::Backspace;

/// Physical key to virtual matrix code. Shifted machine keys get their own
/// physical binding rather than a modifier composition.
pub const KEY_BINDINGS: [(Key, u8); 15] = [
    (Key::Right, nc1020::KEY_RIGHT),
    (Key::Left, nc1020::KEY_LEFT),
    (Key::Down, nc1020::KEY_DOWN),
    (Key::Up, nc1020::KEY_UP),
    (Key::U, nc1020::KEY_F1),
    (Key::I, nc1020::KEY_F4),
    (Key::J, nc1020::KEY_ENTER),
    (Key::K, nc1020::KEY_ESC),
    (Key::NumPadEnter, nc1020::KEY_F10),
    (Key::Space, nc1020::KEY_F11),
    (Key::Y, nc1020::KEY_X),
    (Key::Key0, nc1020::KEY_Y),
    (Key::H, nc1020::KEY_PAGE_UP),
    (Key::L, nc1020::KEY_PAGE_DOWN),
    (Key::Escape, nc1020::KEY_POWER),
];

/// Virtual matrix code bound to `key`, or `None` for keys the machine does
/// not recognize.
pub fn virtual_code(key: Key) -> Option<u8> {
    KEY_BINDINGS
        .iter()
        .find(|&&(bound, _)| bound == key)
        .map(|&(_, code)| code)
}
