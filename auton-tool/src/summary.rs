use std::fmt;

use auton_format::Sample;

const CHANNEL_NAMES: [&str; Sample::CHANNELS] = ["speed", "strafe", "turn", "aux", "lift"];

/// Ranges of every channel over a run of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    ticks: usize,
    active: usize,
    min: [i8; Sample::CHANNELS],
    max: [i8; Sample::CHANNELS],
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            ticks: 0,
            active: 0,
            min: [i8::MAX; Sample::CHANNELS],
            max: [i8::MIN; Sample::CHANNELS],
        }
    }
}

impl Summary {
    pub fn of(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut summary = Self::default();
        for sample in samples {
            summary.add(sample);
        }
        summary
    }

    pub fn add(&mut self, sample: Sample) {
        self.ticks += 1;
        if !sample.is_neutral() {
            self.active += 1;
        }
        for (i, value) in sample.channels().into_iter().enumerate() {
            self.min[i] = self.min[i].min(value);
            self.max[i] = self.max[i].max(value);
        }
    }

    /// Ticks with at least one non-zero channel.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn range(&self, channel: usize) -> Option<(i8, i8)> {
        (self.ticks > 0).then(|| (self.min[channel], self.max[channel]))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} of {} ticks active", self.active, self.ticks)?;
        for (channel, name) in CHANNEL_NAMES.iter().enumerate() {
            match self.range(channel) {
                Some((min, max)) => writeln!(f, "{name:<7}{min:>5} ..{max:>5}")?,
                None => writeln!(f, "{name:<7}    -")?,
            }
        }
        Ok(())
    }
}
