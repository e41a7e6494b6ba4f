//! Collaborator traits through which the recorder reaches the robot.
//!
//! Everything is polled once per tick from a single thread; there are no
//! callbacks and no interrupts.

use std::thread;
use std::time::{Duration, Instant};

use auton_format::Sample;

/// One poll of the operator controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverFrame {
    pub sample: Sample,
    /// Dedicated cancel button.
    pub cancel: bool,
}

pub trait DriverInput {
    fn poll(&mut self) -> DriverFrame;
}

pub trait Actuators {
    fn drive(&mut self, sample: Sample);

    /// Commands every motor to neutral.
    fn stop_all(&mut self);
}

/// Competition control link.
pub trait FieldStatus {
    /// True once a match has officially started.
    fn is_online(&self) -> bool;
}

/// Two-line status display. Purely observational.
pub trait StatusDisplay {
    fn show(&mut self, top: &str, bottom: &str);

    fn set_backlight(&mut self, _on: bool) {}
}

/// The only suspension point of the record and playback loops.
pub trait Ticker {
    fn sleep(&mut self, duration: Duration);
}

/// Everything the recorder and player need from the robot.
pub trait Rig: DriverInput + Actuators + FieldStatus + StatusDisplay + Ticker {}

impl<T> Rig for T where T: DriverInput + Actuators + FieldStatus + StatusDisplay + Ticker {}

/// Sleeps so that consecutive ticks start `duration` apart, absorbing the
/// time spent working between two calls.
#[derive(Debug, Default)]
pub struct PacedTicker {
    last: Option<Instant>,
}

impl PacedTicker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ticker for PacedTicker {
    fn sleep(&mut self, duration: Duration) {
        let now = Instant::now();
        let wait = match self.last {
            Some(last) => duration.saturating_sub(now.duration_since(last)),
            None => duration,
        };
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.last = Some(Instant::now());
    }
}

/// Ticker that never sleeps, for dry runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Ticker for NoDelay {
    fn sleep(&mut self, _duration: Duration) {}
}

/// Display that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl StatusDisplay for NullDisplay {
    fn show(&mut self, _top: &str, _bottom: &str) {}
}
