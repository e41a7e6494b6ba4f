use std::io::{self, Stdout, stdout};
use std::panic;
use std::time::Duration;

use auton_format::{Mirror, SlotId};
use color_eyre::Result;
use color_eyre::eyre::{self, WrapErr};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use recorder::{Player, Recorder, RecorderConfig, Session, selector};
use tracing::{error, info};

use crate::console::{Action, Console};

/// How long the idle loop waits for a key before redrawing.
const IDLE_POLL: Duration = Duration::from_millis(100);

pub fn run(session: Session, config: &RecorderConfig, sections: bool) -> Result<()> {
    let terminal = init()?;
    let result = App::new(session, Console::new(terminal), config, sections).run();
    restore()?;
    result
}

pub struct App {
    session: Session,
    console: Console,
    recorder: Recorder,
    mirror: Mirror,
    sections: bool,
}

impl App {
    pub fn new(
        session: Session,
        console: Console,
        config: &RecorderConfig,
        sections: bool,
    ) -> Self {
        Self {
            session,
            console,
            recorder: Recorder::new(config),
            mirror: Mirror::Normal,
            sections,
        }
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self) -> Result<()> {
        self.session.init(&mut self.console);
        while !self.console.exit_requested() {
            self.console.set_status(self.status());
            self.console.draw().wrap_err("drawing failed")?;
            let action = self
                .console
                .next_action(IDLE_POLL)
                .wrap_err("handle events failed")?;
            if let Some(action) = action {
                self.console.set_busy(true);
                self.perform(action);
                self.console.set_busy(false);
                self.console
                    .take_error()
                    .wrap_err_with(|| format!("terminal failed during {action:?}"))?;
            }
        }
        Ok(())
    }

    fn perform(&mut self, action: Action) {
        let result = match action {
            Action::Record => {
                let report = self.recorder.record(&mut self.session, &mut self.console);
                info!(
                    ticks = report.ticks_recorded,
                    cancelled = report.cancelled,
                    "recording finished"
                );
                Ok(())
            }
            Action::Save => {
                let slot = if self.session.skills_in_progress() {
                    SlotId::Skills
                } else {
                    selector::select(&mut self.console, self.session.store(), "Save to?", false)
                };
                self.session.save(slot, &mut self.console).map(drop)
            }
            Action::Load => {
                let slot = selector::select(
                    &mut self.console,
                    self.session.store(),
                    "Load from?",
                    self.sections,
                );
                self.session.load(slot, &mut self.console).map(drop)
            }
            Action::Play => Player::new(self.mirror)
                .play(&mut self.session, &mut self.console)
                .map(drop),
            Action::ToggleMirror => {
                self.mirror = self.mirror.toggled();
                info!(mirror = ?self.mirror, "mirroring toggled");
                Ok(())
            }
        };
        // The status display has already told the operator.
        if let Err(err) = result {
            error!("{action:?} failed: {err}");
        }
    }

    fn status(&self) -> Vec<(&'static str, String)> {
        let mut status = vec![
            ("Loaded", self.session.selection().label()),
            ("Mirror", format!("{:?}", self.mirror)),
            ("Storage", self.session.store().root().display().to_string()),
        ];
        if self.session.skills_in_progress() {
            status.push((
                "Skills",
                format!("next save goes to part {}", self.session.next_section().index() + 1),
            ));
        }
        status
    }
}

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal
pub fn init() -> Result<Tui> {
    install_hooks()?;
    execute!(stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Replaces the standard color_eyre panic and error hooks with hooks that
/// restore the terminal before printing the panic or error.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();

    let panic_hook = panic_hook.into_panic_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // nothing left to report to if the terminal is gone
        let _ = restore();
        panic_hook(panic_info);
    }));

    let eyre_hook = eyre_hook.into_eyre_hook();
    eyre::set_hook(Box::new(move |error| {
        let _ = restore();
        eyre_hook(error)
    }))?;

    Ok(())
}
