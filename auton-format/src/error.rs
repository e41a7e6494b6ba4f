use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("malformed log: expected {expected} bytes, found {actual}")]
    MalformedLog { expected: usize, actual: usize },

    #[error("slot number {0} is outside 1..=10")]
    InvalidSlot(u8),

    #[error("skills section {0} is outside 0..=3")]
    InvalidSection(u8),

    #[error("unrecognised slot name `{0}`")]
    UnknownSlotName(String),

    #[error("routine document holds {actual} samples, expected {expected}")]
    DocumentLength { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
