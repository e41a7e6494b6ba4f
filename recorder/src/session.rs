use auton_format::{Routine, Section, SlotId, SlotNumber, codec};
use tracing::{error, info, warn};

use crate::rig::StatusDisplay;
use crate::{Error, RecorderConfig, Result, SlotStore};

/// What the routine buffer currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing loaded since start-up.
    Unset,
    /// Explicitly nothing to play.
    None,
    /// Freshly recorded, not yet saved to a slot.
    Recorded,
    Regular(SlotNumber),
    /// Section 0 of a skills run; playback continues through all sections.
    Skills,
    Section(Section),
    /// The built-in routine; the buffer is not used.
    Fallback,
}

impl Selection {
    pub fn is_playable(self) -> bool {
        !matches!(self, Self::Unset | Self::None)
    }

    pub fn label(self) -> String {
        match self {
            Self::Unset => "Nothing loaded".to_string(),
            Self::None => "None".to_string(),
            Self::Recorded => "Recorded".to_string(),
            Self::Regular(slot) => format!("Slot: {}", slot.get()),
            Self::Skills => "Programming skills".to_string(),
            Self::Section(section) => format!("Skills Part: {}", section.index() + 1),
            Self::Fallback => "Hardcoded Skills".to_string(),
        }
    }
}

impl From<SlotId> for Selection {
    fn from(slot: SlotId) -> Self {
        match slot {
            SlotId::None => Self::None,
            SlotId::Regular(n) => Self::Regular(n),
            SlotId::Skills => Self::Skills,
            SlotId::Section(s) => Self::Section(s),
            SlotId::Fallback => Self::Fallback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(SlotId),
    AlreadyLoaded(SlotId),
    /// The slot has no file; the buffer is untouched and nothing is loaded.
    NothingSaved(SlotId),
    /// `SlotId::None` was requested.
    Cleared,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(SlotId),
    /// Nothing to write for `SlotId::None` or the fallback routine.
    Skipped,
}

/// State shared by recording, saving, loading and playback.
///
/// Only one of those operations runs at a time and each borrows the session
/// mutably for its whole duration.
#[derive(Debug)]
pub struct Session {
    pub(crate) routine: Routine,
    pub(crate) selection: Selection,
    /// Section the next skills save goes to. Non-zero while a run is in progress.
    pub(crate) next_section: Section,
    pub(crate) store: SlotStore,
    pub(crate) default_slot: SlotNumber,
}

impl Session {
    pub fn new(store: SlotStore, default_slot: SlotNumber) -> Self {
        Self {
            routine: Routine::zeroed(),
            selection: Selection::Unset,
            next_section: Section::FIRST,
            store,
            default_slot,
        }
    }

    pub fn from_config(config: &RecorderConfig) -> Result<Self> {
        let store = SlotStore::open(&config.storage_dir)?;
        Ok(Self::new(store, config.default_slot))
    }

    /// Resets the session and reports it on the display.
    pub fn init(&mut self, display: &mut impl StatusDisplay) {
        info!("beginning initialization of autonomous recorder");
        display.show("Init recorder...", "");
        self.routine.clear();
        self.selection = Selection::Unset;
        self.next_section = Section::FIRST;
        info!("completed initialization of autonomous recorder");
        display.show("Init-ed recorder!", "");
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn next_section(&self) -> Section {
        self.next_section
    }

    pub fn skills_in_progress(&self) -> bool {
        self.next_section != Section::FIRST
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub fn default_slot(&self) -> SlotNumber {
        self.default_slot
    }

    /// Replaces the buffer wholesale, as if it had just been recorded.
    pub fn set_routine(&mut self, routine: Routine) {
        self.routine = routine;
        self.selection = Selection::Recorded;
    }

    /// Saves the buffer to `requested`.
    ///
    /// While a skills run is in progress the current section is saved instead,
    /// whatever was requested. Saving a section advances the run and wraps to
    /// section 0 after the last one.
    pub fn save(
        &mut self,
        requested: SlotId,
        display: &mut impl StatusDisplay,
    ) -> Result<SaveOutcome> {
        let skills = self.skills_in_progress() || requested == SlotId::Skills;
        let target = if skills {
            info!(section = self.next_section.index(), "saving programming skills section");
            SlotId::Section(self.next_section)
        } else {
            requested
        };
        if matches!(target, SlotId::None | SlotId::Fallback | SlotId::Skills) {
            info!(%target, "not saving this autonomous");
            return Ok(SaveOutcome::Skipped);
        }

        let label = Selection::from(target).label();
        info!(%target, "saving autonomous");
        display.show("Saving auton...", &label);

        let bytes = codec::encode(&self.routine);
        if let Err(err) = self.store.replace(target, &bytes) {
            error!(%target, "error saving autonomous: {err}");
            display.show("Error saving!", &label);
            return Err(err);
        }

        info!(%target, "completed saving autonomous");
        display.show("Saved auton!", &label);
        if skills {
            match self.next_section.next() {
                Some(next) => {
                    info!(section = next.index(), "proceeding to next programming skills section");
                    self.next_section = next;
                }
                None => {
                    info!("finished recording programming skills (all parts)");
                    self.next_section = Section::FIRST;
                }
            }
        }
        self.selection = Selection::from(target);
        Ok(SaveOutcome::Saved(target))
    }

    /// Loads `slot` into the buffer.
    ///
    /// An absent file is not an error: the buffer is left as it was and the
    /// session ends up with nothing loaded. A short file is reported as
    /// malformed and leaves both the buffer and the selection untouched.
    pub fn load(&mut self, slot: SlotId, display: &mut impl StatusDisplay) -> Result<LoadOutcome> {
        let (file_slot, selection) = match slot {
            SlotId::None => {
                info!("not loading an autonomous");
                display.show("Not loading!", "");
                self.selection = Selection::None;
                return Ok(LoadOutcome::Cleared);
            }
            SlotId::Fallback => {
                info!("performing hard-coded programming skills");
                display.show("Loaded skills!", &Selection::Fallback.label());
                self.selection = Selection::Fallback;
                return Ok(LoadOutcome::Fallback);
            }
            SlotId::Regular(n) if self.selection == Selection::Regular(n) => {
                info!(%slot, "autonomous is already loaded");
                display.show("Loaded auton!", &self.selection.label());
                return Ok(LoadOutcome::AlreadyLoaded(slot));
            }
            SlotId::Regular(n) => (slot, Selection::Regular(n)),
            SlotId::Skills => (SlotId::Section(Section::FIRST), Selection::Skills),
            SlotId::Section(s) => (slot, Selection::Section(s)),
        };

        info!(%slot, "loading autonomous");
        display.show("Loading auton...", &selection.label());

        let bytes = match self.store.read(file_slot) {
            Ok(bytes) => bytes,
            Err(Error::NotFound(_)) => {
                warn!(%slot, "no autonomous was saved");
                let top = if selection == Selection::Skills {
                    "No skills saved!"
                } else {
                    "No auton saved!"
                };
                display.show(top, &selection.label());
                self.selection = Selection::None;
                return Ok(LoadOutcome::NothingSaved(slot));
            }
            Err(err) => return Err(err),
        };
        let routine = codec::decode(&bytes).map_err(|source| {
            error!(%slot, "failed to decode autonomous: {source}");
            display.show("Bad auton file!", &selection.label());
            Error::Malformed {
                slot: file_slot,
                source,
            }
        })?;

        self.routine = routine;
        self.selection = selection;
        info!(%slot, "completed loading autonomous");
        display.show("Loaded auton!", &selection.label());
        Ok(LoadOutcome::Loaded(slot))
    }
}
