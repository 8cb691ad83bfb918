#[macro_use]
extern crate log;

use std::{
    error::Error,
    io::{BufRead, BufReader, Lines},
    process::{Child, ChildStdout, Command, Stdio},
    sync::{Arc, Mutex},
};
use swipd_core::{parse_line, Machine, Sample};

/// Reads touchpad samples from a `synclient -m` child process
///
/// The child is spawned through `stdbuf -oL` so its output is line buffered
/// rather than block buffered through the pipe.
pub struct SynclientMachine {
    child: Arc<Mutex<Child>>,
    lines: Lines<BufReader<ChildStdout>>,
}

/// Handle that cancels a blocked [`SynclientMachine::read`] by killing the
/// child process, turning the read into end of stream. Safe to call from a
/// signal handler thread and safe to call more than once.
#[derive(Clone)]
pub struct Canceller {
    child: Arc<Mutex<Child>>,
}

impl Canceller {
    pub fn cancel(&self) {
        if let Ok(mut child) = self.child.lock() {
            // already-exited children make kill fail, which is fine
            let _ = child.kill();
        }
    }
}

impl SynclientMachine {
    /// Spawns synclient monitoring at `poll_rate` milliseconds per sample
    pub fn new(poll_rate: u32) -> Result<Self, Box<dyn Error>> {
        let mut child = Command::new("stdbuf")
            .args(&["-oL", "synclient", "-m", &poll_rate.to_string()])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("unable to start synclient: {}", e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or("synclient child has no stdout handle")?;

        info!("monitoring synclient every {} ms", poll_rate);
        Ok(Self {
            child: Arc::new(Mutex::new(child)),
            lines: BufReader::new(stdout).lines(),
        })
    }

    pub fn canceller(&self) -> Canceller {
        Canceller {
            child: Arc::clone(&self.child),
        }
    }

    /// Reaps the child once its output has closed
    fn wait_child(&self) {
        if let Ok(mut child) = self.child.lock() {
            let _ = child.wait();
        }
        debug!("closed synclient process");
    }
}

impl Machine for SynclientMachine {
    fn read(&mut self) -> Result<Option<Sample>, Box<dyn Error>> {
        loop {
            let line = match self.lines.next() {
                Some(line) => line?,
                None => {
                    // synclient exited or was cancelled
                    self.wait_child();
                    return Ok(None);
                }
            };

            match parse_line(&line) {
                Ok(Some(sample)) => return Ok(Some(sample)),
                Ok(None) => {} // header echo
                Err(e) => warn!("{}", e),
            }
        }
    }
}
