use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// One reading of the touchpad state at a point in time, as reported by
/// `synclient -m`
///
/// A `fingers` count of 0 means the surface is idle; no other field carries
/// meaning in that state.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Sample {
    /// Monotonic time in seconds
    pub time: f64,
    pub x: i32,
    pub y: i32,
    pub pressure: u32,
    pub fingers: u8,
    pub left: bool,
    pub right: bool,
}

/// A sample line that could not be parsed
#[derive(Debug, PartialEq)]
pub struct ParseError {
    line: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unable to parse sample line: {:?}", self.line)
    }
}

impl Error for ParseError {}

/// Parses one line of `synclient -m` monitor output
///
/// Returns `Ok(None)` for the column header line (it starts with the token
/// "time"), which synclient echoes periodically. Any other line must have at
/// least 8 whitespace separated tokens in the order
/// `time x y pressure fingers <unused> left right`; extra trailing tokens are
/// ignored. A malformed line is a recoverable error: callers are expected to
/// log it and keep reading.
pub fn parse_line(line: &str) -> Result<Option<Sample>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.first() == Some(&"time") {
        return Ok(None);
    }

    parse_tokens(&tokens).map(Some).ok_or_else(|| ParseError {
        line: line.to_owned(),
    })
}

fn parse_tokens(tokens: &[&str]) -> Option<Sample> {
    if tokens.len() < 8 {
        return None;
    }

    Some(Sample {
        time: tokens[0].parse().ok()?,
        x: tokens[1].parse().ok()?,
        y: tokens[2].parse().ok()?,
        pressure: tokens[3].parse().ok()?,
        fingers: tokens[4].parse().ok()?,
        // token 5 is unused (finger width)
        left: tokens[6].parse::<i32>().ok()? != 0,
        right: tokens[7].parse::<i32>().ok()? != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a sample back into the synclient column format
    fn to_line(s: &Sample) -> String {
        format!(
            "{} {} {} {} {} 0 {} {}",
            s.time, s.x, s.y, s.pressure, s.fingers, s.left as i32, s.right as i32
        )
    }

    #[test]
    fn parse_well_formed() {
        let sample = parse_line("2.971 2966 4501 41 2 3 1 0 0 0")
            .unwrap()
            .unwrap();
        assert_eq!(
            sample,
            Sample {
                time: 2.971,
                x: 2966,
                y: 4501,
                pressure: 41,
                fingers: 2,
                left: true,
                right: false,
            }
        );
    }

    #[test]
    fn parse_exactly_eight_tokens() {
        let sample = parse_line("0.5 10 20 30 1 0 0 1").unwrap().unwrap();
        assert_eq!(sample.fingers, 1);
        assert!(!sample.left);
        assert!(sample.right);
    }

    #[test]
    fn header_is_not_a_sample() {
        assert_eq!(
            parse_line("time     x    y pressure fingers width  left right"),
            Ok(None)
        );
        assert_eq!(parse_line("time"), Ok(None));
    }

    #[test]
    fn too_few_tokens_is_an_error() {
        assert!(parse_line("2.971 2966 4501 41 2 3 1").is_err());
        assert!(parse_line("").is_err());
    }

    #[test]
    fn non_numeric_token_is_an_error() {
        assert!(parse_line("2.971 2966 foo 41 2 3 1 0").is_err());
        assert!(parse_line("abc 2966 4501 41 2 3 1 0").is_err());
    }

    #[test]
    fn nonzero_button_flags_are_true() {
        let sample = parse_line("1.0 0 0 0 1 0 2 7").unwrap().unwrap();
        assert!(sample.left);
        assert!(sample.right);
    }

    #[test]
    fn round_trip() {
        let sample = parse_line("2.971 2966 4501 41 3 0 0 1").unwrap().unwrap();
        let reparsed = parse_line(&to_line(&sample)).unwrap().unwrap();
        assert_eq!(sample, reparsed);
    }
}
