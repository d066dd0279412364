//! Help modal and footer keybinding hints.

use crossterm_actions::{AppEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Palette;
use crate::tui::{AppAction, dispatcher};

/// Actions to display in a keybinding group.
struct KeybindingGroup {
    title: &'static str,
    actions: &'static [AppAction],
}

const HELP_GROUPS: &[KeybindingGroup] = &[
    KeybindingGroup {
        title: "Global",
        actions: &[
            AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
            AppAction::Tui(TuiEvent::App(AppEvent::Help)),
            AppAction::Register,
        ],
    },
    KeybindingGroup {
        title: "Gallery",
        actions: &[
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)),
        ],
    },
    KeybindingGroup {
        title: "Form Fields",
        actions: &[
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)),
            AppAction::SignIn,
        ],
    },
    KeybindingGroup {
        title: "Birthdate",
        actions: &[
            AppAction::BirthdatePrevDay,
            AppAction::BirthdateNextDay,
            AppAction::BirthdatePrevYear,
            AppAction::BirthdateNextYear,
        ],
    },
];

/// Keys handled directly by components rather than the dispatcher.
const EXTRA_BINDINGS: &[(&str, &str)] = &[
    ("Choose style", "Enter"),
    ("Go back", "Esc"),
    ("Previous/next month", "Left/Right"),
    ("Show/hide password", "F2"),
    ("Delete character", "Backspace"),
];

/// Actions shown in the gallery footer.
pub const GALLERY_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Register,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Actions shown in the registration footer.
pub const REGISTER_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
    AppAction::SignIn,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
];

/// Format a footer string from a list of actions.
/// Format: "desc: key | desc: key" (description first, single key binding)
pub fn format_footer(actions: &[AppAction], extras: &[(&str, &str)]) -> String {
    let help_entries = dispatcher().config().help_entries();
    let mut parts: Vec<String> = Vec::new();

    for action in actions {
        if let Some(entry) = help_entries.get(action)
            && let (Some(key), Some(desc)) = (entry.keys.first(), entry.description)
        {
            let short_desc = desc
                .split_whitespace()
                .next()
                .unwrap_or(desc)
                .to_lowercase();
            parts.push(format!("{short_desc}: {key}"));
        }
    }

    for (desc, key) in extras {
        parts.push(format!("{desc}: {key}"));
    }

    parts.join(" | ")
}

/// Centered popup area with given width/height percentages.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Render the help modal overlay.
pub fn render_help(frame: &mut Frame, palette: &Palette) {
    let area = popup_area(frame.area(), 50, 70);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.surface).fg(palette.text_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
    let content_area = layout[0];
    let footer_area = layout[1];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(palette.text_secondary);

    let mut lines = vec![
        Line::from(Span::styled("Keybindings", bold)),
        Line::from(""),
    ];

    let help_entries = dispatcher().config().help_entries();

    for group in HELP_GROUPS {
        lines.push(Line::from(Span::styled(group.title, bold)));
        for action in group.actions {
            if let Some(entry) = help_entries.get(action) {
                let keys_str = entry
                    .keys
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let desc = entry.description.unwrap_or("(no description)");
                lines.push(Line::from(vec![
                    Span::raw(format!("  {desc:<20}")),
                    Span::styled(keys_str, dim),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Screens", bold)));
    for (description, keys) in EXTRA_BINDINGS {
        lines.push(Line::from(vec![
            Span::raw(format!("  {description:<20}")),
            Span::styled(*keys, dim),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), content_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Press Esc, ?, or Enter to close",
        dim.add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, footer_area);
}

/// Block for one key press while a modal is shown. Returns `true` when the
/// key closes the modal.
pub fn read_modal_key() -> std::io::Result<bool> {
    use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

    if let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        return Ok(matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
        ));
    }
    Ok(false)
}
