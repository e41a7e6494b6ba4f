//! Flat log format: 5 bytes per sample, 750 samples, no header or checksum.
//!
//! Byte `5 * i + j` holds channel `j` of sample `i` as a signed 8-bit value.

use std::io::{self, Read};

use crate::{FormatError, Routine, Sample, TICKS};

/// Size of a persisted routine in bytes.
pub const LOG_BYTES: usize = TICKS * Sample::CHANNELS;

pub fn encode(routine: &Routine) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(LOG_BYTES);
    for sample in routine.iter() {
        bytes.extend_from_slice(&sample.to_bytes());
    }
    bytes
}

/// Decodes the first [`LOG_BYTES`] bytes of `bytes`; any surplus is ignored.
pub fn decode(bytes: &[u8]) -> Result<Routine, FormatError> {
    if bytes.len() < LOG_BYTES {
        return Err(FormatError::MalformedLog {
            expected: LOG_BYTES,
            actual: bytes.len(),
        });
    }
    let mut chunks = bytes.chunks_exact(Sample::CHANNELS);
    Ok(Routine::from_fn(|_| {
        let mut raw = [0u8; Sample::CHANNELS];
        if let Some(chunk) = chunks.next() {
            raw.copy_from_slice(chunk);
        }
        Sample::from_bytes(raw)
    }))
}

/// Reads a log one sample at a time.
///
/// Used to stream the next skills section while the current one plays.
pub struct SampleReader<R> {
    inner: R,
    read: usize,
}

impl<R: Read> SampleReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, read: 0 }
    }

    /// Number of samples read so far.
    pub fn position(&self) -> usize {
        self.read
    }

    /// Reads the next sample. A log ending early is reported as malformed.
    pub fn next_sample(&mut self) -> Result<Sample, FormatError> {
        let mut raw = [0u8; Sample::CHANNELS];
        match self.inner.read_exact(&mut raw) {
            Ok(()) => {
                self.read += 1;
                Ok(Sample::from_bytes(raw))
            }
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Err(FormatError::MalformedLog {
                    expected: LOG_BYTES,
                    actual: self.read * Sample::CHANNELS,
                })
            }
            Err(err) => Err(FormatError::Io(err)),
        }
    }
}
