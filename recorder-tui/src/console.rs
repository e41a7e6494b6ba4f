//! The keyboard and terminal standing in for the robot.

use std::collections::VecDeque;
use std::io;
use std::mem;
use std::time::Duration;

use auton_format::Sample;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use recorder::rig::{
    Actuators, DriverFrame, DriverInput, FieldStatus, PacedTicker, StatusDisplay, Ticker,
};
use recorder::selector::{ButtonPanel, Buttons};
use tracing::debug;

use crate::tui::Tui;
use crate::widgets::Dashboard;

/// Change of a stick channel per key press.
const STEP: i8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Record,
    Save,
    Load,
    Play,
    ToggleMirror,
}

/// Everything the dashboard shows.
#[derive(Debug, Default)]
pub struct Panel {
    /// Latched stick position.
    pub stick: Sample,
    pub cancel: bool,
    pub online: bool,
    pub buttons: Buttons,
    pub lcd: (String, String),
    pub backlight: bool,
    /// Last sample sent to the motors.
    pub driven: Sample,
    pub status: Vec<(&'static str, String)>,
    /// An operation owns the robot; menu keys are ignored.
    pub busy: bool,
    pub exit: bool,
}

pub struct Console {
    terminal: Tui,
    ticker: PacedTicker,
    panel: Panel,
    actions: VecDeque<Action>,
    error: Option<io::Error>,
}

impl Console {
    pub fn new(terminal: Tui) -> Self {
        Self {
            terminal,
            ticker: PacedTicker::new(),
            panel: Panel {
                backlight: true,
                ..Panel::default()
            },
            actions: VecDeque::new(),
            error: None,
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.panel.exit
    }

    pub fn set_status(&mut self, status: Vec<(&'static str, String)>) {
        self.panel.status = status;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.panel.busy = busy;
        self.panel.cancel = false;
        self.panel.buttons = Buttons::default();
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let panel = &self.panel;
        self.terminal
            .draw(|frame| frame.render_widget(Dashboard::new(panel), frame.size()))?;
        Ok(())
    }

    /// Waits up to `timeout` for input and returns the next menu action.
    pub fn next_action(&mut self, timeout: Duration) -> io::Result<Option<Action>> {
        self.pump(timeout)?;
        Ok(self.actions.pop_front())
    }

    /// The first terminal error hit while an operation was running.
    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn pump(&mut self, timeout: Duration) -> io::Result<()> {
        let mut timeout = timeout;
        while event::poll(timeout)? {
            // crossterm also reports releases and repeats on some platforms
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
            timeout = Duration::ZERO;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if steer(&mut self.panel.stick, key.code) {
            return;
        }
        match key.code {
            KeyCode::Char('c') => self.panel.cancel = true,
            KeyCode::Char('f') => {
                self.panel.online = !self.panel.online;
                debug!(online = self.panel.online, "field status toggled");
            }
            KeyCode::Left => self.panel.buttons.left = true,
            KeyCode::Right => self.panel.buttons.right = true,
            KeyCode::Enter | KeyCode::Down => self.panel.buttons.center = true,
            KeyCode::Char('q') | KeyCode::Esc => self.panel.exit = true,
            code if !self.panel.busy => {
                let action = match code {
                    KeyCode::Char('1') => Action::Record,
                    KeyCode::Char('2') => Action::Save,
                    KeyCode::Char('3') => Action::Load,
                    KeyCode::Char('4') => Action::Play,
                    KeyCode::Char('m') => Action::ToggleMirror,
                    _ => return,
                };
                self.actions.push_back(action);
            }
            _ => {}
        }
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

/// Moves the latched stick. Returns false for keys that are not stick keys.
fn steer(stick: &mut Sample, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('w') => stick.speed = stick.speed.saturating_add(STEP),
        KeyCode::Char('s') => stick.speed = stick.speed.saturating_sub(STEP),
        KeyCode::Char('d') => stick.strafe = stick.strafe.saturating_add(STEP),
        KeyCode::Char('a') => stick.strafe = stick.strafe.saturating_sub(STEP),
        KeyCode::Char('l') => stick.turn = stick.turn.saturating_add(STEP),
        KeyCode::Char('j') => stick.turn = stick.turn.saturating_sub(STEP),
        KeyCode::Char('i') => stick.lift = stick.lift.saturating_add(STEP),
        KeyCode::Char('k') => stick.lift = stick.lift.saturating_sub(STEP),
        KeyCode::Char('o') => stick.aux = stick.aux.saturating_add(STEP),
        KeyCode::Char('u') => stick.aux = stick.aux.saturating_sub(STEP),
        KeyCode::Char(' ') => *stick = Sample::NEUTRAL,
        _ => return false,
    }
    true
}

impl DriverInput for Console {
    fn poll(&mut self) -> DriverFrame {
        let result = self.pump(Duration::ZERO);
        self.keep(result);
        DriverFrame {
            sample: self.panel.stick,
            cancel: mem::take(&mut self.panel.cancel),
        }
    }
}

impl Actuators for Console {
    fn drive(&mut self, sample: Sample) {
        self.panel.driven = sample;
    }

    fn stop_all(&mut self) {
        self.panel.driven = Sample::NEUTRAL;
    }
}

impl FieldStatus for Console {
    fn is_online(&self) -> bool {
        self.panel.online
    }
}

impl StatusDisplay for Console {
    fn show(&mut self, top: &str, bottom: &str) {
        self.panel.lcd = (top.to_string(), bottom.to_string());
        let result = self.draw();
        self.keep(result);
    }

    fn set_backlight(&mut self, on: bool) {
        self.panel.backlight = on;
    }
}

impl Ticker for Console {
    fn sleep(&mut self, duration: Duration) {
        let result = self.draw();
        self.keep(result);
        self.ticker.sleep(duration);
    }
}

impl ButtonPanel for Console {
    fn buttons(&mut self) -> Buttons {
        let result = self.pump(Duration::ZERO);
        self.keep(result);
        mem::take(&mut self.panel.buttons)
    }
}
