//! Record, persist and replay operator input for the autonomous period.
//!
//! A [`Session`] owns the routine buffer, the loaded-routine marker and the
//! skills section counter. The [`Recorder`] fills the buffer from live input,
//! the [`Player`] drives the actuators from it, and the [`SlotStore`] maps
//! slots to files. Hardware is reached only through the traits in [`rig`].

pub mod bench;
pub mod config;
mod error;
pub mod fallback;
mod player;
mod recorder;
pub mod rig;
pub mod selector;
mod session;
mod store;

pub use auton_format::{Mirror, Routine, Sample, Section, SlotId, SlotNumber};
pub use config::{HorizontalSource, RecorderConfig};
pub use error::{Error, Result};
pub use player::{PlaybackReport, Player};
pub use recorder::{RecordReport, Recorder};
pub use rig::Rig;
pub use session::{LoadOutcome, SaveOutcome, Selection, Session};
pub use store::SlotStore;
