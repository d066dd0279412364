//! Birthdate picker Component.

use chrono::NaiveDate;
use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::registration::DateStep;
use crate::theme::Palette;
use crate::tui::activities::register::{Msg, UserEvent, common_msg};
use crate::tui::{AppAction, dispatcher};

/// Shows the chosen birthdate and turns key presses into date steps.
pub struct DateField {
    props: Props,
    date: Option<NaiveDate>,
    palette: Palette,
}

impl DateField {
    pub fn new(date: Option<NaiveDate>, palette: Palette) -> Self {
        Self {
            props: Props::default(),
            date,
            palette,
        }
    }

    fn focused(&self) -> bool {
        self.props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag()
    }
}

impl MockComponent for DateField {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused() {
            Style::default().fg(self.palette.primary)
        } else {
            Style::default().fg(self.palette.text_secondary)
        };
        let block = Block::default()
            .title(" Birthdate ")
            .borders(Borders::ALL)
            .border_style(border)
            .style(Style::default().bg(self.palette.surface));

        let line = match self.date {
            Some(date) => Line::from(vec![
                Span::styled(
                    date.format("%Y-%m-%d").to_string(),
                    Style::default().fg(self.palette.text_primary),
                ),
                Span::styled(
                    "   [ ] day  ←/→ month  { } year",
                    Style::default()
                        .fg(self.palette.text_secondary)
                        .add_modifier(Modifier::DIM),
                ),
            ]),
            None => Line::from(Span::styled(
                "Select your birthdate (Enter)",
                Style::default()
                    .fg(self.palette.text_secondary)
                    .add_modifier(Modifier::ITALIC),
            )),
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        match self.date {
            Some(date) => State::One(StateValue::String(date.to_string())),
            None => State::None,
        }
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for DateField {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !self.focused() {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        match key_event.code {
            Key::Esc => return Some(Msg::Back),
            // First Enter opens the picker at its default date
            Key::Enter if self.date.is_none() => {
                return Some(Msg::AdjustBirthdate(DateStep::Days(0)));
            }
            Key::Enter => return Some(Msg::FocusNext),
            _ => {}
        }

        let action = dispatcher().dispatch(&key_event)?;

        let step = match action {
            AppAction::BirthdatePrevDay => DateStep::Days(-1),
            AppAction::BirthdateNextDay => DateStep::Days(1),
            AppAction::BirthdatePrevYear => DateStep::Years(-1),
            AppAction::BirthdateNextYear => DateStep::Years(1),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => DateStep::Months(-1),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => DateStep::Months(1),
            other => return common_msg(&other),
        };
        Some(Msg::AdjustBirthdate(step))
    }
}
