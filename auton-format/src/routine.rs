use std::ops::{Index, IndexMut};

use crate::{Sample, TICKS};

/// Routine buffer: exactly one [`Sample`] per tick of a 15 s window.
///
/// The length is fixed by the type, so a routine is never partially sized.
#[derive(Clone, PartialEq, Eq)]
pub struct Routine {
    samples: Box<[Sample; TICKS]>,
}

impl Routine {
    pub fn zeroed() -> Self {
        Self {
            samples: Box::new([Sample::NEUTRAL; TICKS]),
        }
    }

    /// Builds a routine from a tick-indexed generator.
    pub fn from_fn(mut f: impl FnMut(usize) -> Sample) -> Self {
        let mut routine = Self::zeroed();
        for (tick, sample) in routine.samples.iter_mut().enumerate() {
            *sample = f(tick);
        }
        routine
    }

    pub fn len(&self) -> usize {
        TICKS
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples[..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Resets every tick from `tick` (inclusive) to the end.
    pub fn zero_from(&mut self, tick: usize) {
        if let Some(tail) = self.samples.get_mut(tick..) {
            tail.fill(Sample::NEUTRAL);
        }
    }

    pub fn clear(&mut self) {
        self.zero_from(0);
    }

    /// True if every sample is neutral.
    pub fn is_idle(&self) -> bool {
        self.samples.iter().all(|s| s.is_neutral())
    }
}

impl Default for Routine {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl std::fmt::Debug for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self.samples.iter().filter(|s| !s.is_neutral()).count();
        f.debug_struct("Routine")
            .field("ticks", &TICKS)
            .field("active_ticks", &active)
            .finish()
    }
}

impl Index<usize> for Routine {
    type Output = Sample;

    fn index(&self, tick: usize) -> &Sample {
        &self.samples[tick]
    }
}

impl IndexMut<usize> for Routine {
    fn index_mut(&mut self, tick: usize) -> &mut Sample {
        &mut self.samples[tick]
    }
}
