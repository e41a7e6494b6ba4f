//! Shared data types for recorded autonomous routines.
//!
//! A routine is a fixed-length sequence of [`Sample`]s, one per 20 ms tick of a
//! 15 s window. Routines are persisted as flat 3750-byte logs (see [`codec`]),
//! one file per regular slot or skills section (see [`SlotId`]).

use std::time::Duration;

pub mod codec;
pub mod document;
mod error;
mod routine;
mod sample;
mod slot;

pub use error::FormatError;
pub use routine::Routine;
pub use sample::{Mirror, Sample};
pub use slot::{Section, SlotId, SlotNumber};

/// Length of the autonomous period in seconds.
pub const AUTON_SECS: usize = 15;

/// Length of the programming skills run in seconds.
pub const SKILLS_SECS: usize = 60;

/// Joystick poll rate. The controller updates every 20 ms.
pub const POLL_HZ: usize = 50;

/// Samples in one routine.
pub const TICKS: usize = AUTON_SECS * POLL_HZ;

/// Number of 15 s sections making up a skills run.
pub const SECTIONS: usize = SKILLS_SECS / AUTON_SECS;

/// Number of regular slots.
pub const MAX_SLOTS: u8 = 10;

/// Delay between two ticks.
pub const TICK: Duration = Duration::from_millis(1000 / POLL_HZ as u64);
