//! JSON rendition of a routine, used by the export/import tooling.

use serde::{Deserialize, Serialize};

use crate::{FormatError, POLL_HZ, Routine, Sample, SlotId, TICKS};

pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineDocument {
    pub version: u32,
    pub poll_hz: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SlotId>,
    pub samples: Vec<Sample>,
}

impl RoutineDocument {
    pub fn new(routine: &Routine, source: Option<SlotId>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            poll_hz: POLL_HZ as u32,
            source,
            samples: routine.samples().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Converts back into a routine; the sample count must match exactly.
    pub fn into_routine(self) -> Result<Routine, FormatError> {
        if self.samples.len() != TICKS {
            return Err(FormatError::DocumentLength {
                expected: TICKS,
                actual: self.samples.len(),
            });
        }
        let samples = self.samples;
        Ok(Routine::from_fn(|tick| samples[tick]))
    }
}

#[cfg(test)]
mod tests {
    use super::RoutineDocument;
    use crate::{FormatError, Routine, Sample, SlotId};

    #[test]
    fn document_survives_json() {
        let routine = Routine::from_fn(|tick| Sample::new(0, 0, 0, (tick % 7) as i8, -5));
        let slot = SlotId::regular(4).unwrap();
        let json = RoutineDocument::new(&routine, Some(slot)).to_json().unwrap();

        let parsed = RoutineDocument::from_json(&json).unwrap();
        assert_eq!(parsed.source, Some(slot));
        assert_eq!(parsed.into_routine().unwrap(), routine);
    }

    #[test]
    fn wrong_sample_count_is_rejected() {
        let mut doc = RoutineDocument::new(&Routine::zeroed(), None);
        doc.samples.truncate(10);
        assert!(matches!(
            doc.into_routine(),
            Err(FormatError::DocumentLength { actual: 10, .. })
        ));
    }

    #[test]
    fn out_of_range_slot_fails_to_parse() {
        let json = r#"{"version":1,"poll_hz":50,"source":{"regular":42},"samples":[]}"#;
        assert!(RoutineDocument::from_json(json).is_err());
    }
}
