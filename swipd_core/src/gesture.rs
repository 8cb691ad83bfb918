use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four compass directions a swipe can take
///
/// Directions follow the touchpad coordinate space: y grows towards the
/// bottom edge of the pad, so a swipe with decreasing y is `North`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
        };
        write!(f, "{}", s)
    }
}

/// A physical touchpad button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Button {
    Left,
    Right,
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Button::Left => "LEFT",
            Button::Right => "RIGHT",
        };
        write!(f, "{}", s)
    }
}

/// A completed gesture episode
///
/// Produced at most once per contact episode and handed straight to the
/// listener; clicks and swipes are mutually exclusive within one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Gesture {
    Swipe { direction: Direction, fingers: u8 },
    Click { button: Button, fingers: u8 },
}
