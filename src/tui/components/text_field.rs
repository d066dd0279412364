//! Single-line text input Component for the registration form.

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
    event::{Key, KeyModifiers},
    props::{AttrValue, Attribute, Props},
};

use crate::registration::Field;
use crate::theme::Palette;
use crate::tui::activities::register::{Msg, UserEvent, common_msg};
use crate::tui::dispatcher;

/// Masking character for hidden secrets.
const MASK: char = '•';

pub struct TextField {
    props: Props,
    field: Field,
    value: String,
    hidden: bool,
    palette: Palette,
}

impl TextField {
    pub fn new(field: Field, value: &str, hidden: bool, palette: Palette) -> Self {
        Self {
            props: Props::default(),
            field,
            value: value.to_string(),
            hidden,
            palette,
        }
    }

    fn focused(&self) -> bool {
        self.props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag()
    }

    fn shown_value(&self) -> String {
        if self.hidden {
            std::iter::repeat_n(MASK, self.value.chars().count()).collect()
        } else {
            self.value.clone()
        }
    }
}

impl MockComponent for TextField {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focused();
        let border = if focused {
            Style::default().fg(self.palette.primary)
        } else {
            Style::default().fg(self.palette.text_secondary)
        };

        let mut title = format!(" {} ", self.field.label());
        if self.field.is_secret() {
            title.push_str(if self.hidden { "[hidden] " } else { "[shown] " });
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border)
            .style(Style::default().bg(self.palette.surface));

        let line = if self.value.is_empty() {
            Line::from(Span::styled(
                self.field.placeholder(),
                Style::default()
                    .fg(self.palette.text_secondary)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                self.shown_value(),
                Style::default().fg(self.palette.text_primary),
            ))
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(line), inner);

        if focused {
            let width = self.value.chars().count();
            let x = inner
                .x
                .saturating_add(u16::try_from(width).unwrap_or(u16::MAX))
                .min(inner.right().saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.value.clone()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Type(c) => {
                self.value.push(c);
                CmdResult::Changed(self.state())
            }
            Cmd::Delete => {
                if self.value.pop().is_some() {
                    CmdResult::Changed(self.state())
                } else {
                    CmdResult::None
                }
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for TextField {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !self.focused() {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Raw text input comes before the dispatcher so letters are typed
        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key_event.code {
            Key::Esc => return Some(Msg::Back),
            Key::Enter => return Some(Msg::FocusNext),
            Key::Function(2) if self.field.is_secret() => {
                self.hidden = !self.hidden;
                return Some(Msg::ToggleVisibility(self.field));
            }
            Key::Backspace => {
                return match self.perform(Cmd::Delete) {
                    CmdResult::Changed(_) => Some(Msg::Input(self.field, self.value.clone())),
                    _ => None,
                };
            }
            Key::Char(c) if plain => {
                self.perform(Cmd::Type(c));
                return Some(Msg::Input(self.field, self.value.clone()));
            }
            _ => {}
        }

        let action = dispatcher().dispatch(&key_event)?;
        common_msg(&action)
    }
}
