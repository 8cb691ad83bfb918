#[macro_use]
extern crate log;

use clap::{App, Arg};
use std::{fs, path::PathBuf, sync::mpsc, thread};

use swipd_classifier::GestureClassifier;
use swipd_core::{Button, Direction, GestureListener};
use swipd_keymap::KeyMapper;

mod config;

use config::Config;

pub fn main() {
    let matches = App::new("swipd")
        .about("Turns touchpad swipes and multi finger clicks into key chords")
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Log recognized gestures instead of sending keys"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read samples from stdin instead of spawning synclient"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("Path to the settings file"),
        )
        .get_matches();

    let debug = matches.is_present("debug");
    init_logging(debug);

    let config_path = matches
        .value_of("config")
        .map(PathBuf::from)
        .unwrap_or_else(config::default_settings_path);
    let config = if config_path.exists() {
        info!("loading settings from {:?}", config_path);
        let raw = fs::read_to_string(&config_path).expect("unable to read settings file");
        config::load(&raw).expect("unable to parse settings file")
    } else {
        info!("no settings file at {:?}, using defaults", config_path);
        Config::default()
    };

    // a malformed binding table is fatal; a missing binding at runtime is not
    let listener: Box<dyn GestureListener> = if debug {
        Box::new(DebugListener {})
    } else {
        let path = config.binding_path();
        info!("loading bindings from {:?}", path);
        Box::new(KeyMapper::load(&path, config.get_controller()).expect("unable to load bindings"))
    };

    let (mut machine, canceller) = config.get_machine(matches.is_present("stdin"));
    let mut classifier = GestureClassifier::new(listener);

    let stopper = classifier.stopper();
    ctrlc::set_handler(move || {
        info!("stopping...");
        stopper.stop();
        if let Some(canceller) = &canceller {
            // unblocks the pump by ending the synclient stream
            canceller.cancel();
        }
    })
    .expect("unable to install the termination handler");

    // ingestion pump: single producer feeding the classifier queue in
    // arrival order
    let (sender, receiver) = mpsc::channel();
    let pump = thread::spawn(move || loop {
        match machine.read() {
            Ok(Some(sample)) => {
                if sender.send(sample).is_err() {
                    break;
                }
            }
            Ok(None) => {
                info!("sample stream ended");
                break;
            }
            Err(e) => {
                error!("sample source failed: {}", e);
                break;
            }
        }
    });

    // the classifier drains whatever the pump already queued, then exits
    // once the sender is gone or a stop was requested
    classifier.run(receiver);
    pump.join().expect("pump thread panicked");
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    builder.parse_default_env();
    builder.init();
}

/// Listener for `--debug` runs: logs gestures without touching the keyboard
struct DebugListener {}

impl GestureListener for DebugListener {
    fn swipe(&mut self, direction: Direction, fingers: u8) {
        info!("swipe: {} with {} fingers", direction, fingers);
    }

    fn click(&mut self, button: Button, fingers: u8) {
        info!("click: {} with {} fingers", button, fingers);
    }
}
