use std::path::{Path, PathBuf};

use auton_format::{Sample, SlotNumber};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Where the recorder gets the strafe channel from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalSource {
    /// Historical behaviour: strafe is replaced by `(2 * tick) % 255 - 127`.
    #[default]
    SyntheticRamp,
    /// Strafe is taken from the controller like every other channel.
    Live,
}

impl HorizontalSource {
    pub fn apply(self, tick: usize, sample: Sample) -> Sample {
        match self {
            Self::SyntheticRamp => Sample {
                strafe: synthetic_strafe(tick),
                ..sample
            },
            Self::Live => sample,
        }
    }
}

pub fn synthetic_strafe(tick: usize) -> i8 {
    (((2 * tick) % 255) as i32 - 127) as i8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RecorderConfig {
    pub storage_dir: PathBuf,
    /// Slot loaded when playback starts with nothing in memory.
    pub default_slot: SlotNumber,
    pub horizontal: HorizontalSource,
    pub countdown_secs: u32,
    pub log_filter: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("autons"),
            default_slot: SlotNumber::FIRST,
            horizontal: HorizontalSource::default(),
            countdown_secs: 3,
            log_filter: "recorder=info,auton_format=info".to_string(),
        }
    }
}

impl RecorderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads `explicit` if given, else the per-user config file if it exists,
    /// else the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            Some(_) => Ok(Self::default()),
            None => {
                warn!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("auton-recorder").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::{HorizontalSource, RecorderConfig, synthetic_strafe};
    use auton_format::{Sample, SlotNumber};

    #[test]
    fn empty_file_gives_defaults() {
        let config = RecorderConfig::parse("").unwrap();
        assert_eq!(config, RecorderConfig::default());
        assert_eq!(config.default_slot.get(), 1);
        assert_eq!(config.horizontal, HorizontalSource::SyntheticRamp);
    }

    #[test]
    fn fields_are_kebab_case() {
        let config = RecorderConfig::parse(
            r#"
            storage-dir = "/tmp/autons"
            default-slot = 4
            horizontal = "live"
            countdown-secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_dir.to_str(), Some("/tmp/autons"));
        assert_eq!(config.default_slot, SlotNumber::new(4).unwrap());
        assert_eq!(config.horizontal, HorizontalSource::Live);
        assert_eq!(config.countdown_secs, 0);
    }

    #[test]
    fn out_of_range_default_slot_is_rejected() {
        assert!(RecorderConfig::parse("default-slot = 11").is_err());
    }

    #[test]
    fn synthetic_ramp_matches_historical_values() {
        assert_eq!(synthetic_strafe(0), -127);
        assert_eq!(synthetic_strafe(1), -125);
        assert_eq!(synthetic_strafe(127), 127);
        assert_eq!(synthetic_strafe(128), -126);
        assert_eq!(synthetic_strafe(749), 96);
    }

    #[test]
    fn live_source_passes_strafe_through() {
        let sample = Sample::new(1, 42, 3, 4, 5);
        assert_eq!(HorizontalSource::Live.apply(10, sample), sample);
        assert_eq!(HorizontalSource::SyntheticRamp.apply(10, sample).strafe, -107);
    }
}
