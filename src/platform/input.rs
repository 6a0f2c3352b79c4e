//! Keyboard mapping
//!
//! Raw key codes follow the DOM `keyCode` values. Shift is not a key of its
//! own here: any event carrying the shift modifier drives the fire flag.

use serde::{Deserialize, Serialize};

use crate::sim::{KeyState, LogicalKey};

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Escape,
    Space,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Other(u32),
}

impl KeyCode {
    pub fn from_code(code: u32) -> Self {
        match code {
            27 => KeyCode::Escape,
            32 => KeyCode::Space,
            37 => KeyCode::ArrowLeft,
            38 => KeyCode::ArrowUp,
            39 => KeyCode::ArrowRight,
            40 => KeyCode::ArrowDown,
            other => KeyCode::Other(other),
        }
    }

    pub fn logical(self) -> Option<LogicalKey> {
        match self {
            KeyCode::Escape => Some(LogicalKey::Esc),
            KeyCode::Space => Some(LogicalKey::Space),
            KeyCode::ArrowLeft => Some(LogicalKey::Left),
            KeyCode::ArrowUp => Some(LogicalKey::Up),
            KeyCode::ArrowRight => Some(LogicalKey::Right),
            KeyCode::ArrowDown => Some(LogicalKey::Down),
            KeyCode::Other(_) => None,
        }
    }
}

/// A key transition as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    /// Shift modifier held during the event
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self { code, shift: false }
    }

    pub fn with_shift(code: KeyCode) -> Self {
        Self { code, shift: true }
    }
}

/// Apply a key transition to the flags
pub fn update_key_state(keys: &mut KeyState, event: KeyEvent, pressed: bool) {
    if let Some(key) = event.code.logical() {
        keys.set(key, pressed);
    }
    if event.shift {
        keys.set(LogicalKey::Shift, pressed);
    }
}
