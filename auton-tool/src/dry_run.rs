//! A robot with no motors and no clock, for checking routines off the field.

use std::time::Duration;

use auton_format::Sample;
use recorder::rig::{Actuators, DriverFrame, DriverInput, FieldStatus, StatusDisplay, Ticker};
use tracing::{info, trace};

use crate::summary::Summary;

#[derive(Debug, Default)]
pub struct DryRunRig {
    summary: Summary,
    elapsed: Duration,
}

impl DryRunRig {
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Time the run would take on the robot.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl DriverInput for DryRunRig {
    fn poll(&mut self) -> DriverFrame {
        DriverFrame::default()
    }
}

impl Actuators for DryRunRig {
    fn drive(&mut self, sample: Sample) {
        trace!(?sample, "drive");
        self.summary.add(sample);
    }

    fn stop_all(&mut self) {
        trace!("stop all motors");
    }
}

impl FieldStatus for DryRunRig {
    fn is_online(&self) -> bool {
        false
    }
}

impl StatusDisplay for DryRunRig {
    fn show(&mut self, top: &str, bottom: &str) {
        info!("lcd: {top} {bottom}");
    }
}

impl Ticker for DryRunRig {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
    }
}
