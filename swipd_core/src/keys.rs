use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Deserialize, Serialize)]
pub enum Key {
    Special(SpecialKey),
    Layout(char), // literal key (ex: "a", "b", etc.)
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Deserialize, Serialize)]
pub enum SpecialKey {
    DownArrow,
    F1,
    F10,
    F11,
    F12,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    LeftAlt,
    LeftArrow,
    LeftControl,
    LeftShift,
    RightAlt,
    RightArrow,
    RightControl,
    RightShift,
    Super,
    Tab,
    UpArrow,
}
