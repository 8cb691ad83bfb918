use std::{error::Error, marker::Sized};

mod gesture;
mod keys;
mod sample;

pub use gesture::Button;
pub use gesture::Direction;
pub use gesture::Gesture;
pub use keys::Key;
pub use keys::SpecialKey;
pub use sample::parse_line;
pub use sample::ParseError;
pub use sample::Sample;

/// A touchpad sampling source (or equivalent)
pub trait Machine {
    /// Waits until the next well formed sample is read. Returns `None` when
    /// the underlying stream has ended.
    fn read(&mut self) -> Result<Option<Sample>, Box<dyn Error>>;
}

/// Receiver of recognized gestures
///
/// The classifier holds exactly one listener and calls it synchronously, in
/// the order the gestures were recognized.
pub trait GestureListener {
    fn swipe(&mut self, direction: Direction, fingers: u8);
    fn click(&mut self, button: Button, fingers: u8);
}

/// Controller that can inject key events
pub trait Controller {
    fn new() -> Self
    where
        Self: Sized;
    fn press(&mut self, key: Key);
    fn release(&mut self, key: Key);
    /// A self contained press followed by a release
    fn tap(&mut self, key: Key);
}
