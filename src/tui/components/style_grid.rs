//! Two-column style grid Component.

use crossterm_actions::{InputEvent, NavigationEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::gallery::{GRID_COLUMNS, GridDirection, GridLayout, StyleGrid, display_name};
use crate::theme::Palette;
use crate::tui::activities::gallery::{Msg, UserEvent};
use crate::tui::{AppAction, GlobalEvent, dispatcher, handle_global_app_events};

/// Terminal rows taken by one tile, borders included.
pub const TILE_HEIGHT: u16 = 4;

/// Read-only rendering of a [`StyleGrid`] plus key translation.
///
/// The activity owns the grid; this component is remounted with a fresh
/// snapshot whenever the grid changes.
pub struct StyleGridView {
    props: Props,
    grid: StyleGrid,
    palette: Palette,
}

impl StyleGridView {
    pub fn new(grid: StyleGrid, palette: Palette) -> Self {
        Self {
            props: Props::default(),
            grid,
            palette,
        }
    }

    /// Whole tile rows that fit in `area`.
    pub fn viewport_rows(area: Rect) -> usize {
        // Outer block borders take two rows
        usize::from(area.height.saturating_sub(2) / TILE_HEIGHT).max(1)
    }

    fn render_tile(&self, frame: &mut Frame, area: Rect, index: usize, highlighted: bool) {
        let Some(entry) = self.grid.visible().get(index) else {
            return;
        };

        let border = if highlighted {
            Style::default()
                .fg(self.palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text_secondary)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(Style::default().bg(self.palette.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let title_style = if highlighted {
            Style::default()
                .fg(self.palette.text_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text_primary)
        };
        let lines = vec![
            Line::from(Span::styled(display_name(&entry.value), title_style)),
            Line::from(Span::styled(
                entry.uri.clone(),
                Style::default()
                    .fg(self.palette.text_secondary)
                    .add_modifier(Modifier::DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl MockComponent for StyleGridView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" {} ", display_name(self.grid.category()));
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.text_secondary))
            .style(
                Style::default()
                    .bg(self.palette.background)
                    .fg(self.palette.text_primary),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = match self.grid.layout() {
            GridLayout::Placeholder(message) => {
                let [middle] = Layout::vertical([Constraint::Length(1)])
                    .flex(ratatui::layout::Flex::Center)
                    .areas(inner);
                let placeholder = Paragraph::new(message)
                    .style(Style::default().fg(self.palette.text_secondary))
                    .alignment(Alignment::Center);
                frame.render_widget(placeholder, middle);
                return;
            }
            GridLayout::Rows(rows) => rows.len(),
        };

        let viewport = Self::viewport_rows(area);
        let first = self.grid.scroll_row();
        let highlighted = self.grid.highlighted();

        let row_areas = Layout::vertical(vec![Constraint::Length(TILE_HEIGHT); viewport]).split(inner);
        for (slot, row) in (first..rows.min(first + viewport)).enumerate() {
            let columns =
                Layout::horizontal(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                    .split(row_areas[slot]);
            for (column, tile_area) in columns.iter().enumerate() {
                let index = row * GRID_COLUMNS + column;
                self.render_tile(frame, *tile_area, index, highlighted == Some(index));
            }
        }

        if rows > viewport {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut state = ScrollbarState::new(rows.saturating_sub(viewport)).position(first);
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        match self.grid.highlighted() {
            Some(index) => State::One(StateValue::Usize(index)),
            None => State::None,
        }
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for StyleGridView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if key_event.code == tuirealm::event::Key::Esc {
            return Some(Msg::Back);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(global) = handle_global_app_events(&action) {
            return Some(match global {
                GlobalEvent::Quit => Msg::Quit,
                GlobalEvent::ShowHelp => Msg::ShowHelp,
                GlobalEvent::OpenRegister => Msg::OpenRegister,
            });
        }

        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                Some(Msg::Move(GridDirection::Up))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                Some(Msg::Move(GridDirection::Down))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                Some(Msg::Move(GridDirection::Left))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                Some(Msg::Move(GridDirection::Right))
            }
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => Some(Msg::Choose),
            _ => None,
        }
    }
}
