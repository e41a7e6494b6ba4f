use std::fs::File;
use std::io::BufReader;

use auton_format::codec::SampleReader;
use auton_format::{Mirror, Routine, Sample, Section, SlotId, TICK, TICKS};
use tracing::{error, info, trace, warn};

use crate::{Error, Result, Rig, Selection, Session, fallback};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Ticks driven across all sections.
    pub ticks_played: usize,
    /// Sections started.
    pub sections_played: usize,
    pub cancelled: bool,
}

/// Source of the section that follows the one being played.
enum Prefetch {
    /// Not a skills run, or already on the last section.
    Off,
    Stream {
        slot: SlotId,
        reader: SampleReader<BufReader<File>>,
    },
    /// The next section has no file; it plays as neutral.
    Neutral,
}

enum SectionEnd {
    Completed,
    Cancelled,
}

/// Drives the actuators from the routine buffer at the poll rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player {
    mirror: Mirror,
}

impl Player {
    pub fn new(mirror: Mirror) -> Self {
        Self { mirror }
    }

    /// Plays the loaded routine.
    ///
    /// Loads the session's default slot first if nothing was ever loaded. A
    /// skills run plays all four sections back to back, streaming section
    /// `s + 1` into the buffer one sample per tick while section `s` plays.
    /// The cancel button ends the whole run, but only while the field is not
    /// online. All motors are stopped when playback ends.
    pub fn play<R: Rig>(&self, session: &mut Session, rig: &mut R) -> Result<PlaybackReport> {
        if session.selection == Selection::Unset {
            info!("no autonomous loaded, loading default slot");
            rig.show("Load from?", "");
            session.load(SlotId::Regular(session.default_slot), rig)?;
        }
        if !session.selection.is_playable() {
            info!("nothing loaded, doing nothing");
            return Ok(PlaybackReport::default());
        }

        info!(selection = ?session.selection, mirror = ?self.mirror, "beginning playback");
        rig.show("Playing back...", "");
        rig.set_backlight(true);

        let result = match session.selection {
            Selection::Fallback => {
                let mut routine = fallback::routine();
                self.play_once(&mut routine, &Selection::Fallback.label(), rig)
            }
            Selection::Skills => self.play_skills(session, rig),
            _ => self.play_once(&mut session.routine, "File: 1", rig),
        };

        rig.stop_all();
        let report = result?;
        info!(
            ticks = report.ticks_played,
            sections = report.sections_played,
            cancelled = report.cancelled,
            "completed playback"
        );
        if !report.cancelled {
            rig.show("Played back!", "");
        }
        Ok(report)
    }

    fn play_once<R: Rig>(
        &self,
        routine: &mut Routine,
        label: &str,
        rig: &mut R,
    ) -> Result<PlaybackReport> {
        let mut report = PlaybackReport::default();
        rig.show("Playing back...", label);
        let end = self.play_section(routine, &mut Prefetch::Off, rig, &mut report)?;
        report.cancelled = matches!(end, SectionEnd::Cancelled);
        Ok(report)
    }

    fn play_skills<R: Rig>(&self, session: &mut Session, rig: &mut R) -> Result<PlaybackReport> {
        let mut report = PlaybackReport::default();
        for section in Section::all() {
            rig.show("Playing back...", &format!("File: {}", section.index() + 1));
            let mut prefetch = match section.next() {
                Some(next) => open_prefetch(session, SlotId::Section(next))?,
                None => Prefetch::Off,
            };
            let streaming = !matches!(prefetch, Prefetch::Off);

            let end = match self.play_section(&mut session.routine, &mut prefetch, rig, &mut report) {
                Ok(end) => end,
                Err(err) => {
                    // The buffer now mixes two sections.
                    session.routine.clear();
                    session.selection = Selection::None;
                    return Err(err);
                }
            };

            match end {
                SectionEnd::Completed => {
                    if let Some(next) = section.next() {
                        info!(section = next.index(), "proceeding to next programming skills section");
                    } else {
                        session.selection = Selection::Section(section);
                    }
                }
                SectionEnd::Cancelled => {
                    report.cancelled = true;
                    if streaming {
                        session.routine.clear();
                        session.selection = Selection::None;
                    } else {
                        session.selection = Selection::Section(section);
                    }
                    break;
                }
            }
        }
        Ok(report)
    }

    fn play_section<R: Rig>(
        &self,
        routine: &mut Routine,
        prefetch: &mut Prefetch,
        rig: &mut R,
        report: &mut PlaybackReport,
    ) -> Result<SectionEnd> {
        report.sections_played += 1;
        for tick in 0..TICKS {
            let sample = routine[tick].oriented(self.mirror);
            trace!(tick, ?sample, "playback state");

            let frame = rig.poll();
            if frame.cancel && !rig.is_online() {
                info!(tick, "playback manually cancelled");
                rig.show("Cancelled playback.", "");
                return Ok(SectionEnd::Cancelled);
            }

            rig.drive(sample);
            report.ticks_played += 1;

            match prefetch {
                Prefetch::Off => {}
                Prefetch::Neutral => routine[tick] = Sample::NEUTRAL,
                Prefetch::Stream { slot, reader } => match reader.next_sample() {
                    Ok(next) => routine[tick] = next,
                    Err(source) => {
                        error!(%slot, tick, "next skills section ended early: {source}");
                        rig.show("Bad auton file!", "");
                        return Err(Error::Malformed { slot: *slot, source });
                    }
                },
            }
            rig.sleep(TICK);
        }
        Ok(SectionEnd::Completed)
    }
}

fn open_prefetch(session: &Session, slot: SlotId) -> Result<Prefetch> {
    match session.store.stream(slot) {
        Ok(reader) => {
            info!(%slot, "streaming next section");
            Ok(Prefetch::Stream { slot, reader })
        }
        Err(Error::NotFound(_)) => {
            warn!(%slot, "next skills section has no file, it will play as neutral");
            Ok(Prefetch::Neutral)
        }
        Err(err) => Err(err),
    }
}
