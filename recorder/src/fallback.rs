//! Built-in routine played when the fallback entry is selected.
//!
//! It is generated in code and never persisted, so it works even with empty
//! storage.

use auton_format::{POLL_HZ, Routine, Sample};

/// One step of the fallback routine, measured in seconds from the start.
struct Step {
    from_secs: f32,
    to_secs: f32,
    sample: Sample,
}

const STEPS: &[Step] = &[
    Step {
        from_secs: 0.0,
        to_secs: 2.0,
        sample: Sample::new(100, 0, 0, 0, 0),
    },
    Step {
        from_secs: 2.0,
        to_secs: 3.0,
        sample: Sample::new(0, 0, 64, 0, 0),
    },
    Step {
        from_secs: 3.0,
        to_secs: 5.0,
        sample: Sample::new(0, 0, 0, 0, 127),
    },
    Step {
        from_secs: 5.0,
        to_secs: 6.0,
        sample: Sample::new(0, 0, 0, 90, 0),
    },
    Step {
        from_secs: 6.0,
        to_secs: 7.5,
        sample: Sample::new(-80, 0, 0, 0, -60),
    },
];

pub fn routine() -> Routine {
    Routine::from_fn(|tick| {
        let secs = tick as f32 / POLL_HZ as f32;
        STEPS
            .iter()
            .find(|step| (step.from_secs..step.to_secs).contains(&secs))
            .map(|step| step.sample)
            .unwrap_or(Sample::NEUTRAL)
    })
}

#[cfg(test)]
mod tests {
    use super::routine;

    #[test]
    fn drives_forward_first_and_ends_neutral() {
        let routine = routine();
        assert_eq!(routine[0].speed, 100);
        assert_eq!(routine[99].speed, 100);
        assert_eq!(routine[100].turn, 64);
        assert_eq!(routine[374].speed, -80);
        assert!(routine[375].is_neutral());
        assert!(routine[749].is_neutral());
    }
}
