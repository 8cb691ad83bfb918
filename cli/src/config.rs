use serde::Deserialize;
use std::path::PathBuf;

use swipd_core::{Controller, Key, Machine};
use swipd_input_stdin::StdinMachine;
use swipd_input_synclient::{Canceller, SynclientMachine};
use swipd_output_enigo::EnigoController;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Milliseconds between synclient samples
    #[serde(default = "default_poll_rate")]
    pub poll_rate: u32,
    /// Path to the binding file; defaults to the user config directory
    #[serde(default)]
    bindings: Option<String>,
    #[serde(default)]
    output: OutputType,
}

fn default_poll_rate() -> u32 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_rate: default_poll_rate(),
            bindings: None,
            output: OutputType::default(),
        }
    }
}

impl Config {
    /// Creates the sample source. Can panic if synclient cannot be spawned.
    /// Accepts an override to ignore the config and read from stdin; the
    /// stdin source has no canceller, it simply runs until EOF.
    pub fn get_machine(&self, use_stdin: bool) -> (Box<dyn Machine + Send>, Option<Canceller>) {
        if use_stdin {
            info!("reading samples from stdin");
            (Box::new(StdinMachine::new()), None)
        } else {
            let machine =
                SynclientMachine::new(self.poll_rate).expect("unable to start synclient");
            let canceller = machine.canceller();
            (Box::new(machine), Some(canceller))
        }
    }

    /// Creates the key injection controller from the config
    pub fn get_controller(&self) -> Box<dyn Controller> {
        info!("output to: {:?}", self.output);
        match self.output {
            OutputType::Enigo => Box::new(EnigoController::new()) as Box<dyn Controller>,
            OutputType::Stdout => Box::new(StdoutController::new()) as Box<dyn Controller>,
        }
    }

    /// Path of the binding file the key mapper should load
    pub fn binding_path(&self) -> PathBuf {
        match &self.bindings {
            Some(path) => PathBuf::from(path),
            None => default_config_dir().join("config.txt"),
        }
    }
}

pub fn load(raw_str: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(raw_str)
}

/// Default settings file location (`~/.config/swipd/settings.toml`)
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.toml")
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .expect("unable to locate the user config directory")
        .join("swipd")
}

#[derive(Debug, Deserialize)]
enum OutputType {
    Enigo,
    Stdout,
}

impl Default for OutputType {
    fn default() -> Self {
        Self::Enigo
    }
}

/// Prints key operations instead of injecting them
struct StdoutController {}

impl Controller for StdoutController {
    fn new() -> Self {
        Self {}
    }
    fn press(&mut self, key: Key) {
        println!("press: {:?}", key);
    }
    fn release(&mut self, key: Key) {
        println!("release: {:?}", key);
    }
    fn tap(&mut self, key: Key) {
        println!("tap: {:?}", key);
    }
}
