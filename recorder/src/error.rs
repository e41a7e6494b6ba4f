use std::io;
use std::path::PathBuf;

use auton_format::{FormatError, SlotId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no routine saved in {0}")]
    NotFound(SlotId),

    #[error("{0} has no backing file")]
    NoBackingFile(SlotId),

    #[error("failed to save {slot}: {source}")]
    WriteFailure { slot: SlotId, source: io::Error },

    #[error("routine in {slot} is malformed: {source}")]
    Malformed { slot: SlotId, source: FormatError },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
