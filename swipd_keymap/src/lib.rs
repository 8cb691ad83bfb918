#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use regex::Regex;
use std::{collections::HashMap, error::Error, fs, path::Path};
use swipd_core::{Button, Controller, Direction, GestureListener, Key, SpecialKey};

/// One configured action: the chord to send and the raw right hand side it
/// was parsed from (kept for logging). An empty chord is an explicit no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    keys: Vec<Key>,
    text: String,
}

/// Maps recognized gestures to key chords and plays them on a controller
///
/// Gestures are looked up by symbolic key (`SWIPE_NORTH_3_FINGERS`,
/// `LEFT_CLICK_2_FINGERS`, ...). An absent binding is a normal configuration
/// state, not an error.
pub struct KeyMapper {
    map: HashMap<String, Binding>,
    controller: Box<dyn Controller>,
}

impl KeyMapper {
    pub fn new(map: HashMap<String, Binding>, controller: Box<dyn Controller>) -> Self {
        Self { map, controller }
    }

    /// Reads and parses a binding file. Any malformed line or unknown key
    /// token is an error: the daemon must not run with a partially
    /// understood binding table.
    pub fn load(path: &Path, controller: Box<dyn Controller>) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("unable to read binding file {:?}: {}", path, e))?;
        Ok(Self::new(parse_bindings(&raw)?, controller))
    }

    fn process(&mut self, map_key: &str) {
        let keys = match self.map.get(map_key) {
            Some(binding) if !binding.keys.is_empty() => {
                info!("sending: {}", binding.text);
                binding.keys.clone()
            }
            // unbound or an explicit no-op
            _ => return,
        };

        if let Some((last, held)) = keys.split_last() {
            if held.is_empty() {
                self.controller.tap(*last);
            } else {
                // modifier chord: hold everything but the last key, tap the
                // last, then release the held keys in press order
                for k in held {
                    self.controller.press(*k);
                }
                self.controller.tap(*last);
                for k in held {
                    self.controller.release(*k);
                }
            }
        }
    }
}

impl GestureListener for KeyMapper {
    fn swipe(&mut self, direction: Direction, fingers: u8) {
        self.process(&format!("SWIPE_{}_{}_FINGERS", direction, fingers));
    }

    fn click(&mut self, button: Button, fingers: u8) {
        self.process(&format!("{}_CLICK_{}_FINGERS", button, fingers));
    }
}

/// Parses the whole binding file: one `SYMBOLIC_KEY = KEY+KEY+...` per line,
/// `#` starts a comment (full line or trailing), blank lines are skipped and
/// an empty right hand side is an explicit no-op.
pub fn parse_bindings(raw: &str) -> Result<HashMap<String, Binding>, Box<dyn Error>> {
    let mut map = HashMap::new();

    for raw_line in raw.lines() {
        let mut line = raw_line.trim();
        if let Some(idx) = line.find('#') {
            line = line[..idx].trim_end();
        }
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('=').collect();
        if parts.len() != 2 {
            return Err(format!("invalid syntax near: {}", line).into());
        }
        let name = parts[0].trim();
        let value = parts[1].trim();

        let keys = if value.is_empty() {
            Vec::new()
        } else {
            value
                .split('+')
                .map(|token| parse_key(token.trim()))
                .collect::<Result<Vec<Key>, _>>()?
        };

        info!("loaded binding: {}", line);
        map.insert(
            name.to_owned(),
            Binding {
                keys,
                text: value.to_owned(),
            },
        );
    }

    Ok(map)
}

lazy_static! {
    static ref FUNCTION_KEY: Regex = Regex::new("^[fF](1[0-2]?|[2-9])$").unwrap();
}

/// Parses one key token: a named key, a single alphabetic character, or a
/// function key (`F1`..`F12`, case insensitive)
fn parse_key(token: &str) -> Result<Key, Box<dyn Error>> {
    let special = match token {
        "LEFT_CONTROL" => Some(SpecialKey::LeftControl),
        "RIGHT_CONTROL" => Some(SpecialKey::RightControl),
        "LEFT_ALT" => Some(SpecialKey::LeftAlt),
        "RIGHT_ALT" => Some(SpecialKey::RightAlt),
        "LEFT_SHIFT" => Some(SpecialKey::LeftShift),
        "RIGHT_SHIFT" => Some(SpecialKey::RightShift),
        "LEFT" => Some(SpecialKey::LeftArrow),
        "RIGHT" => Some(SpecialKey::RightArrow),
        "UP" => Some(SpecialKey::UpArrow),
        "DOWN" => Some(SpecialKey::DownArrow),
        "SUPER" => Some(SpecialKey::Super),
        "TAB" => Some(SpecialKey::Tab),
        _ => None,
    };
    if let Some(special) = special {
        return Ok(Key::Special(special));
    }

    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_alphabetic() {
            return Ok(Key::Layout(c.to_ascii_lowercase()));
        }
    }

    if FUNCTION_KEY.is_match(token) {
        return Ok(Key::Special(function_key(&token[1..])?));
    }

    Err(format!("invalid key combination: {}", token).into())
}

fn function_key(num: &str) -> Result<SpecialKey, Box<dyn Error>> {
    let key = match num {
        "1" => SpecialKey::F1,
        "2" => SpecialKey::F2,
        "3" => SpecialKey::F3,
        "4" => SpecialKey::F4,
        "5" => SpecialKey::F5,
        "6" => SpecialKey::F6,
        "7" => SpecialKey::F7,
        "8" => SpecialKey::F8,
        "9" => SpecialKey::F9,
        "10" => SpecialKey::F10,
        "11" => SpecialKey::F11,
        "12" => SpecialKey::F12,
        _ => return Err(format!("invalid function key: F{}", num).into()),
    };
    Ok(key)
}
