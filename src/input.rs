use bitvec::{array::BitArray, BitArr};
use log::{debug, warn};

pub const KEY_COUNT: usize = 16;

/// Platform-independent key events. Frontends translate whatever their
/// windowing layer produces into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(u8),
    KeyUp(u8),
}

/// State of the hex keypad plus the latch consumed by `FX0A`
pub struct Keypad {
    keys: BitArr!(for KEY_COUNT),
    recent: Option<u8>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self {
            keys: BitArray::ZERO,
            recent: None,
        }
    }
}

fn valid_key(key: u8) -> bool {
    (key as usize) < KEY_COUNT
}

impl Keypad {
    /// Mark `key` as held. A released -> pressed transition also latches the key.
    pub fn set_key_pressed(&mut self, key: u8) {
        if !valid_key(key) {
            warn!("ignoring press of out-of-range key {key:#x}");
            return;
        }
        if !self.keys[key as usize] {
            debug!("key {key:X} down");
            self.keys.set(key as usize, true);
            self.latch_recent_key(key);
        }
    }

    pub fn set_key_released(&mut self, key: u8) {
        if !valid_key(key) {
            warn!("ignoring release of out-of-range key {key:#x}");
            return;
        }
        if self.keys[key as usize] {
            debug!("key {key:X} up");
        }
        self.keys.set(key as usize, false);
    }

    /// Keys outside 0x0..=0xF are never pressed
    pub fn is_key_pressed(&self, key: u8) -> bool {
        valid_key(key) && self.keys[key as usize]
    }

    pub fn latch_recent_key(&mut self, key: u8) {
        if valid_key(key) {
            self.recent = Some(key);
        }
    }

    pub fn clear_recent_key_latch(&mut self) {
        self.recent = None;
    }

    pub fn recent_key(&self) -> Option<u8> {
        self.recent
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.set_key_pressed(key),
            InputEvent::KeyUp(key) => self.set_key_released(key),
        }
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.keys[..KEY_COUNT].iter_ones().map(|k| k as u8)
    }
}
