use enigo::KeyboardControllable;
use enigo::{Enigo, Key};
use swipd_core::{Controller, Key as InternalKey, SpecialKey};

/// Injects key events with the enigo crate
///
/// Enigo does not distinguish the left and right variant of modifier keys,
/// so both map to the same key.
pub struct EnigoController {
    enigo: Enigo,
}

impl Controller for EnigoController {
    fn new() -> Self {
        Self {
            enigo: Enigo::new(),
        }
    }

    fn press(&mut self, key: InternalKey) {
        self.enigo.key_down(from_internal_key(key));
    }

    fn release(&mut self, key: InternalKey) {
        self.enigo.key_up(from_internal_key(key));
    }

    fn tap(&mut self, key: InternalKey) {
        self.enigo.key_click(from_internal_key(key));
    }
}

fn from_internal_key(key: InternalKey) -> Key {
    match key {
        InternalKey::Special(special_key) => match special_key {
            SpecialKey::DownArrow => Key::DownArrow,
            SpecialKey::F1 => Key::F1,
            SpecialKey::F10 => Key::F10,
            SpecialKey::F11 => Key::F11,
            SpecialKey::F12 => Key::F12,
            SpecialKey::F2 => Key::F2,
            SpecialKey::F3 => Key::F3,
            SpecialKey::F4 => Key::F4,
            SpecialKey::F5 => Key::F5,
            SpecialKey::F6 => Key::F6,
            SpecialKey::F7 => Key::F7,
            SpecialKey::F8 => Key::F8,
            SpecialKey::F9 => Key::F9,
            SpecialKey::LeftAlt => Key::Alt,
            SpecialKey::LeftArrow => Key::LeftArrow,
            SpecialKey::LeftControl => Key::Control,
            SpecialKey::LeftShift => Key::Shift,
            SpecialKey::RightAlt => Key::Alt,
            SpecialKey::RightArrow => Key::RightArrow,
            SpecialKey::RightControl => Key::Control,
            SpecialKey::RightShift => Key::Shift,
            SpecialKey::Super => Key::Meta,
            SpecialKey::Tab => Key::Tab,
            SpecialKey::UpArrow => Key::UpArrow,
        },
        InternalKey::Layout(c) => Key::Layout(c),
    }
}
