//! An in-memory robot for dry runs and tests.

use std::collections::VecDeque;
use std::time::Duration;

use auton_format::Sample;

use crate::rig::{Actuators, DriverFrame, DriverInput, FieldStatus, StatusDisplay, Ticker};
use crate::selector::{ButtonPanel, Buttons};

type InputScript = Box<dyn FnMut(usize) -> DriverFrame>;

/// Robot on the bench: input comes from a script indexed by poll count,
/// everything sent to the motors and the display is kept, and sleeping only
/// adds to a counter.
pub struct BenchRig {
    input: InputScript,
    polls: usize,
    buttons: VecDeque<Buttons>,
    button_polls: usize,
    pub online: bool,
    pub driven: Vec<Sample>,
    pub stops: usize,
    pub screen: Vec<(String, String)>,
    pub slept: Duration,
}

impl BenchRig {
    /// A rig whose controller stays centred.
    pub fn idle() -> Self {
        Self::scripted(|_| DriverFrame::default())
    }

    pub fn scripted(input: impl FnMut(usize) -> DriverFrame + 'static) -> Self {
        Self {
            input: Box::new(input),
            polls: 0,
            buttons: VecDeque::new(),
            button_polls: 0,
            online: false,
            driven: Vec::new(),
            stops: 0,
            screen: Vec::new(),
            slept: Duration::ZERO,
        }
    }

    /// Presses cancel on poll `at` and every poll after it.
    pub fn cancel_from(at: usize) -> Self {
        Self::scripted(move |poll| DriverFrame {
            sample: Sample::NEUTRAL,
            cancel: poll >= at,
        })
    }

    /// Queues button states returned by successive polls of the panel.
    pub fn push_buttons(&mut self, buttons: impl IntoIterator<Item = Buttons>) {
        self.buttons.extend(buttons);
    }

    pub fn last_screen(&self) -> Option<&(String, String)> {
        self.screen.last()
    }

    pub fn showed(&self, top: &str) -> bool {
        self.screen.iter().any(|(t, _)| t == top)
    }
}

impl std::fmt::Debug for BenchRig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchRig")
            .field("polls", &self.polls)
            .field("online", &self.online)
            .field("driven", &self.driven.len())
            .field("stops", &self.stops)
            .finish()
    }
}

impl DriverInput for BenchRig {
    fn poll(&mut self) -> DriverFrame {
        let frame = (self.input)(self.polls);
        self.polls += 1;
        frame
    }
}

impl Actuators for BenchRig {
    fn drive(&mut self, sample: Sample) {
        self.driven.push(sample);
    }

    fn stop_all(&mut self) {
        self.stops += 1;
    }
}

impl FieldStatus for BenchRig {
    fn is_online(&self) -> bool {
        self.online
    }
}

impl StatusDisplay for BenchRig {
    fn show(&mut self, top: &str, bottom: &str) {
        self.screen.push((top.to_string(), bottom.to_string()));
    }
}

impl Ticker for BenchRig {
    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }
}

impl ButtonPanel for BenchRig {
    /// Once the queue runs dry the center button toggles on every poll, so a
    /// selection always terminates.
    fn buttons(&mut self) -> Buttons {
        self.button_polls += 1;
        self.buttons.pop_front().unwrap_or(Buttons {
            center: self.button_polls % 2 == 0,
            ..Buttons::default()
        })
    }
}
