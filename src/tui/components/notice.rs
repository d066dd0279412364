//! Placeholder Component for screens owned by other collaborators.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tuirealm::{
    Component, Event, MockComponent, State,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::theme::Palette;
use crate::tui::activities::destination::{Msg, UserEvent};
use crate::tui::{GlobalEvent, dispatcher, handle_global_app_events};

pub struct Notice {
    props: Props,
    title: String,
    lines: Vec<String>,
    palette: Palette,
}

impl Notice {
    pub fn new(title: impl Into<String>, lines: Vec<String>, palette: Palette) -> Self {
        Self {
            props: Props::default(),
            title: title.into(),
            lines,
            palette,
        }
    }
}

impl MockComponent for Notice {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.primary))
            .style(
                Style::default()
                    .bg(self.palette.background)
                    .fg(self.palette.text_primary),
            );

        let mut text: Vec<Line> = self
            .lines
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Press Esc to go back",
            Style::default()
                .fg(self.palette.text_secondary)
                .add_modifier(Modifier::ITALIC),
        )));

        let body = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        frame.render_widget(body, area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for Notice {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if key_event.code == Key::Esc {
            return Some(Msg::Back);
        }

        let action = dispatcher().dispatch(&key_event)?;
        match handle_global_app_events(&action)? {
            GlobalEvent::Quit => Some(Msg::Quit),
            GlobalEvent::ShowHelp => Some(Msg::ShowHelp),
            GlobalEvent::OpenRegister => Some(Msg::OpenRegister),
        }
    }
}
