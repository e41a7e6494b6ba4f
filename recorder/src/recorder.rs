use std::time::Duration;

use auton_format::{TICK, TICKS};
use tracing::{info, trace};

use crate::{HorizontalSource, RecorderConfig, Rig, Selection, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordReport {
    /// Ticks written from live input before the recording ended.
    pub ticks_recorded: usize,
    pub cancelled: bool,
}

/// Fills the routine buffer from the operator controller at the poll rate.
#[derive(Debug, Clone)]
pub struct Recorder {
    countdown_secs: u32,
    horizontal: HorizontalSource,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(&RecorderConfig::default())
    }
}

impl Recorder {
    pub fn new(config: &RecorderConfig) -> Self {
        Self {
            countdown_secs: config.countdown_secs,
            horizontal: config.horizontal,
        }
    }

    /// Counts down, then samples one tick every 20 ms until the routine is
    /// full or the cancel button is seen.
    ///
    /// A cancel at tick `k` zeroes ticks `k..750`. The motors follow the
    /// recorded values so the operator sees the robot move while recording.
    pub fn record<R: Rig>(&self, session: &mut Session, rig: &mut R) -> RecordReport {
        for remaining in (1..=self.countdown_secs).rev() {
            rig.set_backlight(true);
            info!("beginning autonomous recording in {remaining}...");
            rig.show("Recording auton", &format!("in {remaining}..."));
            rig.sleep(Duration::from_secs(1));
        }

        info!("ready to begin autonomous recording");
        rig.show("Recording auton...", "");
        let mut light = false;
        let mut cancelled_at = None;
        for tick in 0..TICKS {
            rig.set_backlight(light);
            light = !light;

            let frame = rig.poll();
            if frame.cancel {
                info!(tick, "autonomous recording manually cancelled");
                rig.show("Cancelled record.", "");
                session.routine.zero_from(tick);
                cancelled_at = Some(tick);
                break;
            }

            let sample = self.horizontal.apply(tick, frame.sample);
            session.routine[tick] = sample;
            trace!(tick, ?sample, "recorded state");
            rig.drive(sample);
            rig.sleep(TICK);
        }
        rig.set_backlight(true);

        info!("completed autonomous recording");
        rig.show("Recorded auton!", "");
        rig.stop_all();
        session.selection = Selection::Recorded;
        RecordReport {
            ticks_recorded: cancelled_at.unwrap_or(TICKS),
            cancelled: cancelled_at.is_some(),
        }
    }
}
