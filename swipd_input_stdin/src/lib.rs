#[macro_use]
extern crate log;

use std::{error::Error, io};
use swipd_core::{parse_line, Machine, Sample};

/// Reads samples in the synclient monitor format from stdin
///
/// Useful for replaying a recorded `synclient -m` log without hardware.
pub struct StdinMachine {}

impl StdinMachine {
    pub fn new() -> Self {
        Self {}
    }
}

impl Machine for StdinMachine {
    fn read(&mut self) -> Result<Option<Sample>, Box<dyn Error>> {
        loop {
            let mut input = String::new();
            // blocks until a line is read; 0 bytes means EOF
            if io::stdin().read_line(&mut input)? == 0 {
                return Ok(None);
            }

            match parse_line(input.trim()) {
                Ok(Some(sample)) => return Ok(Some(sample)),
                Ok(None) => {} // header echo
                Err(e) => warn!("{}", e),
            }
        }
    }
}
