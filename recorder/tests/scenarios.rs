//! End-to-end record, save, load and playback runs against a temporary
//! storage directory.

use auton_format::{Routine, Sample, Section, SlotId, SlotNumber, TICKS, codec};
use recorder::bench::BenchRig;
use recorder::rig::DriverFrame;
use recorder::{
    Error, HorizontalSource, LoadOutcome, Player, RecorderConfig, Recorder, SaveOutcome,
    Selection, Session, SlotStore,
};
use tempfile::TempDir;

fn session(dir: &TempDir) -> Session {
    Session::new(SlotStore::new(dir.path()), SlotNumber::FIRST)
}

fn section_routine(section: usize) -> Routine {
    Routine::from_fn(|tick| Sample::new(section as i8 + 1, 0, (tick % 100) as i8, 0, -(section as i8)))
}

fn synthetic_input(poll: usize) -> DriverFrame {
    DriverFrame {
        sample: Sample::new((poll % 127) as i8, 0, 0, 0, 0),
        cancel: false,
    }
}

fn record_save_reload(horizontal: HorizontalSource) -> (Routine, Routine) {
    let dir = tempfile::tempdir().unwrap();
    let config = RecorderConfig {
        horizontal,
        ..RecorderConfig::default()
    };
    let slot = SlotId::regular(3).unwrap();

    let mut recorded = session(&dir);
    let mut rig = BenchRig::scripted(synthetic_input);
    Recorder::new(&config).record(&mut recorded, &mut rig);
    assert_eq!(recorded.save(slot, &mut rig).unwrap(), SaveOutcome::Saved(slot));
    assert_eq!(
        std::fs::metadata(dir.path().join("a3")).unwrap().len(),
        codec::LOG_BYTES as u64
    );

    let mut reloaded = session(&dir);
    assert_eq!(
        reloaded.load(slot, &mut rig).unwrap(),
        LoadOutcome::Loaded(slot)
    );
    (recorded.routine().clone(), reloaded.routine().clone())
}

#[test]
fn recorded_routine_survives_save_and_reload_with_ramp() {
    let (recorded, reloaded) = record_save_reload(HorizontalSource::SyntheticRamp);

    assert_eq!(recorded, reloaded);
    for tick in 0..TICKS {
        let sample = reloaded[tick];
        assert_eq!(sample.speed, (tick % 127) as i8, "tick {tick}");
        assert_eq!(sample.strafe, recorder::config::synthetic_strafe(tick));
        assert_eq!((sample.turn, sample.aux, sample.lift), (0, 0, 0));
    }
}

#[test]
fn recorded_routine_survives_save_and_reload_live() {
    let (_, reloaded) = record_save_reload(HorizontalSource::Live);

    for tick in 0..TICKS {
        assert_eq!(reloaded[tick], synthetic_input(tick).sample, "tick {tick}");
    }
}

#[test]
fn four_skills_saves_wrap_the_section_counter() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(&dir);
    let mut rig = BenchRig::idle();

    let mut seen = vec![session.next_section().index()];
    for section in 0..4 {
        session.set_routine(section_routine(section));
        let outcome = session.save(SlotId::Skills, &mut rig).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(SlotId::section(section as u8).unwrap()));
        seen.push(session.next_section().index());
    }

    assert_eq!(seen, [0, 1, 2, 3, 0]);
    assert!(!session.skills_in_progress());
    for name in ["p0", "p1", "p2", "p3"] {
        assert!(dir.path().join(name).is_file(), "{name} missing");
    }
}

fn save_all_sections(dir: &TempDir) {
    let mut session = session(dir);
    for section in 0..4 {
        session.set_routine(section_routine(section));
        session.save(SlotId::Skills, &mut BenchRig::idle()).unwrap();
    }
}

#[test]
fn skills_playback_visits_all_sections_in_order() {
    let dir = tempfile::tempdir().unwrap();
    save_all_sections(&dir);

    let mut session = session(&dir);
    let mut rig = BenchRig::idle();
    session.load(SlotId::Skills, &mut rig).unwrap();
    assert_eq!(session.selection(), Selection::Skills);

    let report = Player::default().play(&mut session, &mut rig).unwrap();

    assert_eq!(report.ticks_played, 4 * TICKS);
    assert_eq!(report.sections_played, 4);
    assert!(!report.cancelled);
    assert_eq!(rig.driven.len(), 3000);
    for (i, driven) in rig.driven.iter().enumerate() {
        let (section, tick) = (i / TICKS, i % TICKS);
        assert_eq!(*driven, section_routine(section)[tick], "section {section} tick {tick}");
    }
    assert_eq!(rig.stops, 1);
    assert_eq!(session.selection(), Selection::Section(Section::LAST));
    assert_eq!(session.routine(), &section_routine(3));

    let files: Vec<&str> = rig
        .screen
        .iter()
        .filter(|(top, _)| top == "Playing back...")
        .map(|(_, bottom)| bottom.as_str())
        .filter(|bottom| bottom.starts_with("File"))
        .collect();
    assert_eq!(files, ["File: 1", "File: 2", "File: 3", "File: 4"]);
}

#[test]
fn cancelled_skills_run_stops_every_section() {
    let dir = tempfile::tempdir().unwrap();
    save_all_sections(&dir);

    let mut session = session(&dir);
    let mut rig = BenchRig::cancel_from(TICKS + 10);
    session.load(SlotId::Skills, &mut rig).unwrap();

    let report = Player::default().play(&mut session, &mut rig).unwrap();

    assert!(report.cancelled);
    assert_eq!(report.ticks_played, TICKS + 10);
    assert_eq!(report.sections_played, 2);
    assert_eq!(rig.stops, 1);
    // Half-streamed buffer is discarded.
    assert_eq!(session.selection(), Selection::None);
    assert!(session.routine().is_idle());
}

#[test]
fn cancel_in_last_section_keeps_it_loaded() {
    let dir = tempfile::tempdir().unwrap();
    save_all_sections(&dir);

    let mut session = session(&dir);
    let mut rig = BenchRig::cancel_from(3 * TICKS + 5);
    session.load(SlotId::Skills, &mut rig).unwrap();

    let report = Player::default().play(&mut session, &mut rig).unwrap();

    assert!(report.cancelled);
    assert_eq!(report.ticks_played, 3 * TICKS + 5);
    assert_eq!(report.sections_played, 4);
    assert_eq!(rig.stops, 1);
    // Nothing was streaming, so the buffer still holds the last section whole.
    assert_eq!(session.selection(), Selection::Section(Section::LAST));
    assert_eq!(session.routine(), &section_routine(3));
}

#[test]
fn missing_section_plays_as_neutral() {
    let dir = tempfile::tempdir().unwrap();
    save_all_sections(&dir);
    std::fs::remove_file(dir.path().join("p2")).unwrap();

    let mut session = session(&dir);
    let mut rig = BenchRig::idle();
    session.load(SlotId::Skills, &mut rig).unwrap();
    let report = Player::default().play(&mut session, &mut rig).unwrap();

    assert_eq!(report.ticks_played, 4 * TICKS);
    assert!(rig.driven[2 * TICKS..3 * TICKS].iter().all(|s| s.is_neutral()));
    assert_eq!(rig.driven[3 * TICKS], section_routine(3)[0]);
}

#[test]
fn truncated_section_aborts_playback() {
    let dir = tempfile::tempdir().unwrap();
    save_all_sections(&dir);
    let p1 = dir.path().join("p1");
    let bytes = std::fs::read(&p1).unwrap();
    std::fs::write(&p1, &bytes[..100]).unwrap();

    let mut session = session(&dir);
    let mut rig = BenchRig::idle();
    session.load(SlotId::Skills, &mut rig).unwrap();
    let result = Player::default().play(&mut session, &mut rig);

    assert!(matches!(result, Err(Error::Malformed { slot, .. }) if slot == SlotId::section(1).unwrap()));
    assert_eq!(rig.driven.len(), 21);
    assert_eq!(rig.stops, 1);
    assert_eq!(session.selection(), Selection::None);
}

#[test]
fn loading_an_empty_slot_is_safe() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(&dir);
    let mut rig = BenchRig::idle();
    let slot = SlotId::regular(7).unwrap();

    assert_eq!(
        session.load(slot, &mut rig).unwrap(),
        LoadOutcome::NothingSaved(slot)
    );
    assert_eq!(session.selection(), Selection::None);
    assert!(rig.showed("No auton saved!"));

    let report = Player::default().play(&mut session, &mut rig).unwrap();
    assert_eq!(report.ticks_played, 0);
    assert!(rig.driven.is_empty());
}

#[test]
fn skills_without_any_sections_reports_nothing_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(&dir);
    let mut rig = BenchRig::idle();

    assert_eq!(
        session.load(SlotId::Skills, &mut rig).unwrap(),
        LoadOutcome::NothingSaved(SlotId::Skills)
    );
    assert!(rig.showed("No skills saved!"));
    assert!(matches!(
        session.save(SlotId::None, &mut rig),
        Ok(SaveOutcome::Skipped)
    ));
}
