//! Sign-up button Component.

use crossterm_actions::{InputEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::theme::Palette;
use crate::tui::activities::register::{Msg, UserEvent, common_msg};
use crate::tui::{AppAction, dispatcher};

pub struct SubmitButton {
    props: Props,
    busy: bool,
    palette: Palette,
}

impl SubmitButton {
    /// A `busy` button shows progress and ignores presses.
    pub fn new(busy: bool, palette: Palette) -> Self {
        Self {
            props: Props::default(),
            busy,
            palette,
        }
    }

    fn focused(&self) -> bool {
        self.props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag()
    }
}

impl MockComponent for SubmitButton {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let (label, style) = if self.busy {
            (
                "Signing up...",
                Style::default()
                    .fg(self.palette.text_secondary)
                    .bg(self.palette.surface)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if self.focused() {
            (
                "Sign Up",
                Style::default()
                    .fg(self.palette.text_inverse)
                    .bg(self.palette.primary)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                "Sign Up",
                Style::default()
                    .fg(self.palette.primary)
                    .bg(self.palette.surface),
            )
        };

        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.primary)),
            );
        frame.render_widget(button, area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Bool(self.busy))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Submit if !self.busy => CmdResult::Submit(self.state()),
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for SubmitButton {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !self.focused() {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if key_event.code == Key::Esc {
            return Some(Msg::Back);
        }

        let action = dispatcher().dispatch(&key_event)?;
        match action {
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                match self.perform(Cmd::Submit) {
                    CmdResult::Submit(_) => Some(Msg::Submit),
                    _ => None,
                }
            }
            other => common_msg(&other),
        }
    }
}
