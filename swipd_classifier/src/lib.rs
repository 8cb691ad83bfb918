#[macro_use]
extern crate log;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::Receiver,
    Arc,
};
use swipd_core::{Button, GestureListener, Sample};

mod direction;

pub use direction::infer;

/// Where the classifier is within the current contact episode
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// No click yet; history accumulates and can become a swipe
    Tracking,
    /// A button is held down; this episode can no longer become a swipe
    Clicked,
    /// The click was released but fingers are still down. Another press
    /// produces another click, but swipe evaluation stays disabled.
    Claimed,
}

/// A state machine that consumes an ordered stream of samples and reports
/// swipes and clicks to its listener
///
/// A gesture episode spans one uninterrupted run of nonzero finger contact.
/// The first button press claims the episode as a click and permanently
/// disables swipe evaluation for it, because movement during a held button is
/// usually a drag rather than gesture intent.
pub struct GestureClassifier {
    listener: Box<dyn GestureListener>,
    history: Vec<Sample>,
    state: State,
    stop: Arc<AtomicBool>,
}

/// Requests the classifier loop to stop. Cloneable so it can be handed to a
/// signal handler; stopping more than once is fine.
#[derive(Clone)]
pub struct Stopper(Arc<AtomicBool>);

impl Stopper {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl GestureClassifier {
    pub fn new(listener: Box<dyn GestureListener>) -> Self {
        Self {
            listener,
            history: Vec::new(),
            state: State::Tracking,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn stopper(&self) -> Stopper {
        Stopper(Arc::clone(&self.stop))
    }

    /// Consumes samples from the channel until a stop is requested or the
    /// producer hangs up
    ///
    /// The stop flag is only checked between receives, so samples already
    /// queued are classified before the loop exits. Nothing is force
    /// evaluated on shutdown: an episode without its final lift is dropped.
    pub fn run(&mut self, samples: Receiver<Sample>) {
        info!("start processing samples");
        while !self.stop.load(Ordering::Relaxed) {
            match samples.recv() {
                Ok(sample) => self.handle(sample),
                Err(_) => break, // producer hung up
            }
        }
        info!("done processing samples");
    }

    /// Feeds one sample through the state machine
    pub fn handle(&mut self, sample: Sample) {
        debug!("sample: {:?}", sample);

        if sample.fingers == 0 {
            // episode over; only an unclaimed episode can be a swipe
            if self.state == State::Tracking {
                self.evaluate();
            }
            self.history.clear();
            self.state = State::Tracking;
            return;
        }

        let button_held = sample.left || sample.right;
        match self.state {
            State::Tracking | State::Claimed if button_held => {
                let button = if sample.left {
                    Button::Left
                } else {
                    Button::Right
                };
                info!("click: {} with {} fingers", button, sample.fingers);
                self.listener.click(button, sample.fingers);
                self.state = State::Clicked;
            }
            State::Clicked if !button_held => {
                self.state = State::Claimed;
            }
            State::Tracking => {
                self.history.push(sample);
            }
            _ => {}
        }
    }

    /// Evaluates the accumulated history as a swipe
    fn evaluate(&mut self) {
        if self.history.len() < 2 {
            // not enough motion data
            return;
        }

        // the gesture is recognized at its peak finger contact, which
        // tolerates brief fluctuation at the contact edges
        let fingers = match self.history.iter().map(|s| s.fingers).max() {
            Some(f) => f,
            None => return,
        };

        let coords: Vec<(i32, i32)> = self
            .history
            .iter()
            .filter(|s| s.fingers == fingers)
            .map(|s| (s.x, s.y))
            .collect();

        if let Some(direction) = direction::infer(&coords) {
            info!("swipe: {} with {} fingers", direction, fingers);
            self.listener.swipe(direction, fingers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;
    use swipd_core::{Direction, Gesture};

    /// Test double that records every gesture it is handed
    struct Recorder(Rc<RefCell<Vec<Gesture>>>);

    impl GestureListener for Recorder {
        fn swipe(&mut self, direction: Direction, fingers: u8) {
            self.0.borrow_mut().push(Gesture::Swipe { direction, fingers });
        }
        fn click(&mut self, button: Button, fingers: u8) {
            self.0.borrow_mut().push(Gesture::Click { button, fingers });
        }
    }

    fn classifier() -> (GestureClassifier, Rc<RefCell<Vec<Gesture>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let classifier = GestureClassifier::new(Box::new(Recorder(Rc::clone(&events))));
        (classifier, events)
    }

    fn moving(x: i32, y: i32, fingers: u8) -> Sample {
        Sample {
            time: 0.0,
            x,
            y,
            pressure: 30,
            fingers,
            left: false,
            right: false,
        }
    }

    fn lifted() -> Sample {
        Sample {
            time: 0.0,
            x: 0,
            y: 0,
            pressure: 0,
            fingers: 0,
            left: false,
            right: false,
        }
    }

    fn clicking(fingers: u8, left: bool, right: bool) -> Sample {
        Sample {
            left,
            right,
            ..moving(0, 0, fingers)
        }
    }

    #[test]
    fn swipe_east_three_fingers() {
        let (mut c, events) = classifier();
        c.handle(moving(0, 0, 3));
        c.handle(moving(50, 2, 3));
        c.handle(moving(100, -1, 3));
        assert!(events.borrow().is_empty()); // nothing until the lift
        c.handle(lifted());
        assert_eq!(
            *events.borrow(),
            vec![Gesture::Swipe {
                direction: Direction::East,
                fingers: 3
            }]
        );
    }

    #[test]
    fn single_sample_episode_is_ignored() {
        let (mut c, events) = classifier();
        c.handle(moving(0, 0, 2));
        c.handle(lifted());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn episodes_are_isolated() {
        let (mut c, events) = classifier();
        // half a westward swipe, interrupted by a lift
        c.handle(moving(100, 0, 2));
        c.handle(moving(60, 0, 2));
        c.handle(lifted());
        events.borrow_mut().clear();

        // the next episode must not see the previous coordinates
        c.handle(moving(0, 0, 2));
        c.handle(moving(40, 0, 2));
        c.handle(lifted());
        assert_eq!(
            *events.borrow(),
            vec![Gesture::Swipe {
                direction: Direction::East,
                fingers: 2
            }]
        );
    }

    #[test]
    fn click_takes_precedence_over_swipe() {
        let (mut c, events) = classifier();
        c.handle(moving(0, 0, 2));
        c.handle(clicking(2, true, false));
        // plenty of motion after the click release, then a lift
        c.handle(moving(100, 0, 2));
        c.handle(moving(200, 0, 2));
        c.handle(lifted());
        assert_eq!(
            *events.borrow(),
            vec![Gesture::Click {
                button: Button::Left,
                fingers: 2
            }]
        );
    }

    #[test]
    fn click_reports_the_pressed_button() {
        let (mut c, events) = classifier();
        c.handle(clicking(1, false, true));
        c.handle(lifted());
        assert_eq!(
            *events.borrow(),
            vec![Gesture::Click {
                button: Button::Right,
                fingers: 1
            }]
        );
    }

    #[test]
    fn held_click_fires_once() {
        let (mut c, events) = classifier();
        c.handle(clicking(1, true, false));
        c.handle(clicking(1, true, false));
        c.handle(clicking(1, true, false));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn release_and_press_again_clicks_again() {
        let (mut c, events) = classifier();
        c.handle(clicking(1, true, false));
        c.handle(moving(0, 0, 1)); // released
        c.handle(clicking(1, true, false));
        c.handle(lifted());
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn dominant_finger_count_is_the_maximum() {
        let (mut c, events) = classifier();
        // a third finger lands only partway through
        c.handle(moving(0, 0, 2));
        c.handle(moving(10, 0, 3));
        c.handle(moving(60, 0, 3));
        c.handle(moving(100, 0, 2));
        c.handle(lifted());
        assert_eq!(
            *events.borrow(),
            vec![Gesture::Swipe {
                direction: Direction::East,
                fingers: 3
            }]
        );
    }

    #[test]
    fn lone_sample_at_dominant_count_yields_nothing() {
        let (mut c, events) = classifier();
        // history is long enough, but only one sample has the peak count,
        // so direction inference has a single coordinate to work with
        c.handle(moving(0, 0, 2));
        c.handle(moving(50, 0, 3));
        c.handle(moving(100, 0, 2));
        c.handle(lifted());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn run_drains_queue_on_disconnect() {
        let (mut c, events) = classifier();
        let (tx, rx) = mpsc::channel();
        tx.send(moving(0, 0, 2)).unwrap();
        tx.send(moving(0, 50, 2)).unwrap();
        tx.send(lifted()).unwrap();
        drop(tx);
        c.run(rx);
        assert_eq!(
            *events.borrow(),
            vec![Gesture::Swipe {
                direction: Direction::South,
                fingers: 2
            }]
        );
    }

    #[test]
    fn run_observes_stop_flag() {
        let (mut c, _events) = classifier();
        let (tx, rx) = mpsc::channel::<Sample>();
        c.stopper().stop();
        c.stopper().stop(); // idempotent
        c.run(rx); // returns without blocking on the live sender
        drop(tx);
    }
}
