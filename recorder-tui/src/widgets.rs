use auton_format::Sample;
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::console::Panel;

const CHANNEL_NAMES: [&str; Sample::CHANNELS] = ["speed", "strafe", "turn", "aux", "lift"];

/// Width of the bar drawn for one channel, without the center mark.
const BAR_WIDTH: usize = 20;

pub struct Dashboard<'a> {
    panel: &'a Panel,
}

impl<'a> Dashboard<'a> {
    pub fn new(panel: &'a Panel) -> Self {
        Self { panel }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(7)])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(5)])
            .split(columns[1]);

        LcdWidget::new(self.panel).render(left[0], buf);
        SampleWidget::new(" Controller ", self.panel.stick, controller_hints())
            .render(left[1], buf);
        SampleWidget::new(" Motors ", self.panel.driven, field_hints(self.panel.online))
            .render(right[0], buf);
        SessionWidget::new(self.panel).render(right[1], buf);
    }
}

fn controller_hints() -> Line<'static> {
    Line::from(vec![
        " Cancel ".into(),
        "<C>".blue().bold(),
        " Neutral ".into(),
        "<Space> ".blue().bold(),
    ])
}

fn field_hints(online: bool) -> Line<'static> {
    let state = if online {
        "online".green().bold()
    } else {
        "offline".red().bold()
    };
    Line::from(vec![" Field ".into(), state, " toggle ".into(), "<F> ".blue().bold()])
}

fn framed<'a>(title: &'a str, bottom: Line<'a>) -> Block<'a> {
    Block::default()
        .title(Title::from(title.bold()).alignment(Alignment::Center))
        .title(
            Title::from(bottom)
                .alignment(Alignment::Center)
                .position(Position::Bottom),
        )
        .borders(Borders::ALL)
        .border_set(border::THICK)
}

/// The two-line status display with its three buttons.
struct LcdWidget<'a> {
    panel: &'a Panel,
}

impl<'a> LcdWidget<'a> {
    fn new(panel: &'a Panel) -> Self {
        Self { panel }
    }
}

impl Widget for LcdWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let buttons = Line::from(vec![
            " ".into(),
            "<Left>".blue().bold(),
            " ".into(),
            "<Enter>".blue().bold(),
            " ".into(),
            "<Right> ".blue().bold(),
        ]);
        let style = if self.panel.backlight {
            Style::new().black().on_light_green()
        } else {
            Style::new().gray().on_black()
        };
        let (top, bottom) = &self.panel.lcd;
        Paragraph::new(vec![Line::from(top.as_str()), Line::from(bottom.as_str())])
            .style(style)
            .centered()
            .block(framed(" LCD ", buttons))
            .render(area, buf);
    }
}

/// One bar per channel of a sample.
struct SampleWidget<'a> {
    title: &'static str,
    sample: Sample,
    hints: Line<'a>,
}

impl<'a> SampleWidget<'a> {
    fn new(title: &'static str, sample: Sample, hints: Line<'a>) -> Self {
        Self {
            title,
            sample,
            hints,
        }
    }
}

impl Widget for SampleWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = CHANNEL_NAMES
            .iter()
            .zip(self.sample.channels())
            .map(|(name, value)| {
                Line::from(vec![
                    format!("{name:<7}{value:>5} ").into(),
                    Span::from(bar(value)).yellow(),
                ])
            })
            .collect::<Vec<Line>>();

        Paragraph::new(lines)
            .block(framed(self.title, self.hints))
            .render(area, buf);
    }
}

/// `[----|##--]` style bar with the neutral position in the middle.
fn bar(value: i8) -> String {
    let half = BAR_WIDTH / 2;
    let filled = (value.unsigned_abs() as usize * half).div_ceil(128);
    let mut cells = vec!['-'; BAR_WIDTH];
    if value < 0 {
        cells[half - filled..half].fill('#');
    } else {
        cells[half..half + filled].fill('#');
    }
    let (left, right) = cells.split_at(half);
    format!(
        "[{}|{}]",
        left.iter().collect::<String>(),
        right.iter().collect::<String>()
    )
}

struct SessionWidget<'a> {
    panel: &'a Panel,
}

impl<'a> SessionWidget<'a> {
    fn new(panel: &'a Panel) -> Self {
        Self { panel }
    }
}

impl Widget for SessionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let actions = Line::from(vec![
            " Record ".into(),
            "<1>".blue().bold(),
            " Save ".into(),
            "<2>".blue().bold(),
            " Load ".into(),
            "<3>".blue().bold(),
            " Play ".into(),
            "<4>".blue().bold(),
            " Mirror ".into(),
            "<M>".blue().bold(),
            " Quit ".into(),
            "<Q> ".blue().bold(),
        ]);
        let mut lines = self
            .panel
            .status
            .iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::from(format!("{key:<9}")).bold(),
                    value.as_str().into(),
                ])
            })
            .collect::<Vec<Line>>();
        if self.panel.busy {
            lines.push(Line::from("busy".yellow().italic()));
        }

        Paragraph::new(lines)
            .block(framed(" Session ", actions))
            .render(area, buf);
    }
}
