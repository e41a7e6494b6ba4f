use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{FormatError, MAX_SLOTS, SECTIONS};

/// A regular slot number in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotNumber(u8);

impl SlotNumber {
    pub const FIRST: SlotNumber = SlotNumber(1);

    pub fn new(n: u8) -> Result<Self, FormatError> {
        if (1..=MAX_SLOTS).contains(&n) {
            Ok(Self(n))
        } else {
            Err(FormatError::InvalidSlot(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = SlotNumber> {
        (1..=MAX_SLOTS).map(SlotNumber)
    }
}

impl TryFrom<u8> for SlotNumber {
    type Error = FormatError;

    fn try_from(n: u8) -> Result<Self, FormatError> {
        Self::new(n)
    }
}

impl From<SlotNumber> for u8 {
    fn from(slot: SlotNumber) -> u8 {
        slot.0
    }
}

/// A skills section index in `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Section(u8);

impl Section {
    pub const FIRST: Section = Section(0);
    pub const LAST: Section = Section(SECTIONS as u8 - 1);

    pub fn new(n: u8) -> Result<Self, FormatError> {
        if usize::from(n) < SECTIONS {
            Ok(Self(n))
        } else {
            Err(FormatError::InvalidSection(n))
        }
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// The following section, or `None` after the last one.
    pub fn next(self) -> Option<Section> {
        Section::new(self.0 + 1).ok()
    }

    pub fn all() -> impl Iterator<Item = Section> {
        (0..SECTIONS as u8).map(Section)
    }
}

impl TryFrom<u8> for Section {
    type Error = FormatError;

    fn try_from(n: u8) -> Result<Self, FormatError> {
        Self::new(n)
    }
}

impl From<Section> for u8 {
    fn from(section: Section) -> u8 {
        section.0
    }
}

/// What a selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotId {
    /// Nothing selected.
    None,
    Regular(SlotNumber),
    /// The 60 s skills run stitched from all four sections.
    Skills,
    /// A single skills section.
    Section(Section),
    /// Built-in routine that never touches the routine buffer.
    Fallback,
}

impl SlotId {
    pub fn regular(n: u8) -> Result<SlotId, FormatError> {
        SlotNumber::new(n).map(Self::Regular)
    }

    pub fn section(n: u8) -> Result<SlotId, FormatError> {
        Section::new(n).map(Self::Section)
    }

    /// Backing file name, for identifiers that own a file.
    pub fn file_name(self) -> Option<String> {
        match self {
            Self::Regular(slot) => Some(format!("a{}", slot.get())),
            Self::Section(section) => Some(format!("p{}", section.0)),
            Self::None | Self::Skills | Self::Fallback => None,
        }
    }

    /// Every identifier that owns a file, regular slots first.
    pub fn stored() -> impl Iterator<Item = SlotId> {
        SlotNumber::all()
            .map(Self::Regular)
            .chain(Section::all().map(Self::Section))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Regular(slot) => write!(f, "slot {}", slot.get()),
            Self::Skills => f.write_str("skills"),
            Self::Section(section) => write!(f, "skills section {}", section.0 + 1),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

impl FromStr for SlotId {
    type Err = FormatError;

    /// Accepts `none`, `1`..`10`, `a1`..`a10`, `skills`, `p0`..`p3` and `fallback`.
    fn from_str(s: &str) -> Result<Self, FormatError> {
        let s = s.trim().to_ascii_lowercase();
        let unknown = || FormatError::UnknownSlotName(s.clone());
        match s.as_str() {
            "none" => Ok(Self::None),
            "skills" => Ok(Self::Skills),
            "fallback" => Ok(Self::Fallback),
            _ => {
                if let Some(rest) = s.strip_prefix('p') {
                    let n = rest.parse::<u8>().map_err(|_| unknown())?;
                    return Self::section(n);
                }
                let digits = s.strip_prefix('a').unwrap_or(&s);
                let n = digits.parse::<u8>().map_err(|_| unknown())?;
                Self::regular(n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Section, SlotId, SlotNumber};

    #[test]
    fn file_names_follow_slot_kind() {
        assert_eq!(SlotId::regular(3).unwrap().file_name().as_deref(), Some("a3"));
        assert_eq!(SlotId::regular(10).unwrap().file_name().as_deref(), Some("a10"));
        assert_eq!(SlotId::section(2).unwrap().file_name().as_deref(), Some("p2"));
        assert_eq!(SlotId::None.file_name(), None);
        assert_eq!(SlotId::Skills.file_name(), None);
        assert_eq!(SlotId::Fallback.file_name(), None);
    }

    #[test]
    fn numbers_outside_their_range_are_rejected() {
        assert!(SlotNumber::new(0).is_err());
        assert!(SlotNumber::new(11).is_err());
        assert!(Section::new(4).is_err());
        assert_eq!(Section::LAST.next(), None);
        assert_eq!(Section::FIRST.next(), Section::new(1).ok());
    }

    #[test]
    fn parses_cli_names() {
        assert_eq!("7".parse::<SlotId>().unwrap(), SlotId::regular(7).unwrap());
        assert_eq!("a7".parse::<SlotId>().unwrap(), SlotId::regular(7).unwrap());
        assert_eq!("P3".parse::<SlotId>().unwrap(), SlotId::section(3).unwrap());
        assert_eq!("skills".parse::<SlotId>().unwrap(), SlotId::Skills);
        assert!("p4".parse::<SlotId>().is_err());
        assert!("11".parse::<SlotId>().is_err());
        assert!("left".parse::<SlotId>().is_err());
    }

    #[test]
    fn stored_lists_ten_slots_then_four_sections() {
        let names: Vec<String> = SlotId::stored().filter_map(SlotId::file_name).collect();
        assert_eq!(names.len(), 14);
        assert_eq!(names[0], "a1");
        assert_eq!(names[9], "a10");
        assert_eq!(names[10], "p0");
        assert_eq!(names[13], "p3");
    }
}
