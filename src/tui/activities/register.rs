//! Register activity - account creation form.

use std::io::Stdout;
use std::time::Duration;

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Terminal,
    layout::{Constraint, Flex, Layout},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::Paragraph,
};
use tuirealm::{Application, EventListenerCfg, PollStrategy};

use crate::navigation::Navigator;
use crate::registration::{DateStep, Field, RegistrationFlow, RegistrationState};
use crate::theme::Palette;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    DateField, REGISTER_FOOTER_ACTIONS, SubmitButton, TextField, format_footer, read_modal_key,
    render_alert, render_help,
};
use crate::tui::{AppAction, GlobalEvent, handle_global_app_events};

// ============================================================================
// Component identifiers (scoped to RegisterActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Name,
    Surname,
    Email,
    Birthdate,
    Password,
    ConfirmPassword,
    Submit,
}

impl Id {
    fn field(self) -> Option<Field> {
        match self {
            Self::Name => Some(Field::Name),
            Self::Surname => Some(Field::Surname),
            Self::Email => Some(Field::Email),
            Self::Password => Some(Field::Password),
            Self::ConfirmPassword => Some(Field::ConfirmPassword),
            Self::Birthdate | Self::Submit => None,
        }
    }
}

// ============================================================================
// Messages (scoped to RegisterActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    ShowHelp,
    Back,
    FocusNext,
    FocusPrev,
    Input(Field, String),
    ToggleVisibility(Field),
    AdjustBirthdate(DateStep),
    Submit,
    SignIn,
}

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

/// Translation shared by every form component for actions that are not
/// specific to it.
pub fn common_msg(action: &AppAction) -> Option<Msg> {
    if let Some(global) = handle_global_app_events(action) {
        return match global {
            GlobalEvent::Quit => Some(Msg::Quit),
            GlobalEvent::ShowHelp => Some(Msg::ShowHelp),
            GlobalEvent::OpenRegister => None,
        };
    }
    match action {
        AppAction::SignIn => Some(Msg::SignIn),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next))
        | AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => Some(Msg::FocusNext),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev))
        | AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => Some(Msg::FocusPrev),
        _ => None,
    }
}

// ============================================================================
// Focus management (scoped to RegisterActivity)
// ============================================================================

/// All focusable component IDs in order.
const ALL_FOCUS_IDS: &[Id] = &[
    Id::Name,
    Id::Surname,
    Id::Email,
    Id::Birthdate,
    Id::Password,
    Id::ConfirmPassword,
    Id::Submit,
];

/// Manages focus state for Tab navigation in RegisterActivity.
#[derive(Default)]
pub struct FocusManager {
    current_idx: usize,
}

impl FocusManager {
    pub fn current_focus(&self) -> Id {
        ALL_FOCUS_IDS
            .get(self.current_idx)
            .copied()
            .unwrap_or(Id::Name)
    }

    pub fn focus_next(&mut self) -> Id {
        self.current_idx = (self.current_idx + 1) % ALL_FOCUS_IDS.len();
        self.current_focus()
    }

    pub fn focus_prev(&mut self) -> Id {
        self.current_idx = (self.current_idx + ALL_FOCUS_IDS.len() - 1) % ALL_FOCUS_IDS.len();
        self.current_focus()
    }
}

// ============================================================================
// RegisterActivity
// ============================================================================

#[derive(Default)]
pub struct RegisterActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    focus: FocusManager,
    context: Option<Context>,
    flow: RegistrationFlow,
    /// Submit was pressed; the backend steps run after the next frame so the
    /// busy button is on screen while they execute.
    pending_submit: bool,
    exit_reason: Option<ExitReason>,
}

impl RegisterActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn mount(
        app: &mut Application<Id, Msg, UserEvent>,
        id: Id,
        flow: &RegistrationFlow,
        busy: bool,
        palette: Palette,
    ) {
        let form = flow.form();
        let mounted = match (id, id.field()) {
            (_, Some(field)) => app.mount(
                id,
                Box::new(TextField::new(
                    field,
                    form.field(field),
                    form.is_hidden(field),
                    palette,
                )),
                vec![],
            ),
            (Id::Birthdate, None) => {
                app.mount(id, Box::new(DateField::new(form.birthdate, palette)), vec![])
            }
            _ => app.mount(id, Box::new(SubmitButton::new(busy, palette)), vec![]),
        };
        if let Err(e) = mounted {
            tracing::error!(?id, "Failed to mount component: {}", e);
        }
    }

    /// Remount `id` from the flow's current state and restore focus.
    fn remount(&mut self, id: Id) {
        let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_ref()) else {
            return;
        };
        let busy = self.pending_submit || self.flow.is_in_progress();
        let _ = app.umount(&id);
        Self::mount(app, id, &self.flow, busy, context.model.theme.palette);
        let _ = app.active(&self.focus.current_focus());
    }

    /// Apply one message. Returns the component to remount, if any.
    fn handle(&mut self, msg: Msg) -> Option<Id> {
        let context = self.context.as_mut()?;
        let model = &mut context.model;

        match msg {
            Msg::Quit => {
                self.exit_reason = Some(ExitReason::Quit);
                None
            }
            Msg::ShowHelp => {
                model.show_help = true;
                None
            }
            Msg::Back => {
                model.navigation.back();
                self.exit_reason = Some(ExitReason::Navigate);
                None
            }
            Msg::FocusNext => {
                let next = self.focus.focus_next();
                if let Some(app) = self.app.as_mut() {
                    let _ = app.active(&next);
                }
                None
            }
            Msg::FocusPrev => {
                let prev = self.focus.focus_prev();
                if let Some(app) = self.app.as_mut() {
                    let _ = app.active(&prev);
                }
                None
            }
            Msg::Input(field, value) => {
                if !self.flow.set_field(field, value) {
                    // Rejected edit: put the component back in line with the form
                    return Some(self.focus.current_focus());
                }
                model.message = None;
                None
            }
            Msg::ToggleVisibility(field) => {
                if self.flow.toggle_visibility(field) {
                    None
                } else {
                    Some(self.focus.current_focus())
                }
            }
            Msg::AdjustBirthdate(step) => {
                let today = Local::now().date_naive();
                self.flow.adjust_birthdate(step, today);
                Some(Id::Birthdate)
            }
            Msg::Submit => {
                if let Some(hint) = self.flow.submit_hint() {
                    model.message = Some(hint.to_string());
                    return None;
                }
                if self.flow.is_in_progress() || self.pending_submit {
                    return None;
                }
                self.pending_submit = true;
                Some(Id::Submit)
            }
            Msg::SignIn => {
                if self.flow.open_sign_in(&mut model.navigation) {
                    self.exit_reason = Some(ExitReason::Navigate);
                }
                None
            }
        }
    }

    /// Run the submission queued by the Submit button.
    fn run_pending_submit(&mut self) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        let model = &mut context.model;
        self.pending_submit = false;

        let state = self
            .flow
            .submit(&mut model.backend, &mut model.navigation)
            .clone();
        model.message = match state {
            RegistrationState::Failed(message) => Some(message),
            _ => None,
        };
        self.remount(Id::Submit);
    }
}

impl Activity for RegisterActivity {
    fn on_create(&mut self, mut context: Context) {
        context.model.message = None;
        let palette = context.model.theme.palette;
        self.context = Some(context);

        let mut app = Self::create_application();
        for id in ALL_FOCUS_IDS {
            Self::mount(&mut app, *id, &self.flow, false, palette);
        }
        let _ = app.active(&self.focus.current_focus());
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let Some(context) = self.context.as_mut() else {
            self.exit_reason = Some(ExitReason::Quit);
            return Ok(());
        };
        let model = &mut context.model;
        let Some(app) = self.app.as_mut() else {
            self.exit_reason = Some(ExitReason::Quit);
            return Ok(());
        };
        let palette = model.theme.palette;
        let alert = self.flow.alert().cloned();

        terminal.draw(|frame| {
            let rows = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Min(0),    // Form
                Constraint::Length(1), // Status
            ])
            .split(frame.area());

            frame.render_widget(
                Paragraph::new(" Create Account ").style(
                    Style::default()
                        .fg(palette.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                rows[0],
            );

            let [column] = Layout::horizontal([Constraint::Max(64)])
                .flex(Flex::Center)
                .areas(rows[1]);
            let slots = Layout::vertical(vec![Constraint::Length(3); ALL_FOCUS_IDS.len()])
                .split(column);
            for (id, area) in ALL_FOCUS_IDS.iter().zip(slots.iter()) {
                app.view(id, frame, *area);
            }

            let (status, style) = match model.message.clone() {
                Some(message) => (message, Style::default().fg(palette.error)),
                None => (
                    format_footer(
                        REGISTER_FOOTER_ACTIONS,
                        &[("password", "F2"), ("back", "Esc")],
                    ),
                    Style::default()
                        .fg(palette.text_secondary)
                        .add_modifier(Modifier::DIM),
                ),
            };
            frame.render_widget(Paragraph::new(status).style(style), rows[2]);

            if let Some(ref alert) = alert {
                render_alert(frame, alert, &palette);
            } else if model.show_help {
                render_help(frame, &palette);
            }
        })?;

        if self.pending_submit {
            self.run_pending_submit();
            return Ok(());
        }

        if alert.is_some() {
            if read_modal_key()? {
                self.flow.dismiss_alert();
                if self.flow.state().is_terminal() {
                    // Sign-in already replaced this screen
                    self.exit_reason = Some(ExitReason::Navigate);
                }
            }
            return Ok(());
        }

        if model.show_help {
            if read_modal_key()? {
                model.show_help = false;
            }
            return Ok(());
        }

        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                if let Some(id) = self.handle(msg) {
                    self.remount(id);
                }
                if self.exit_reason.is_some() {
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut focus = FocusManager::default();
        assert_eq!(focus.current_focus(), Id::Name);
        assert_eq!(focus.focus_prev(), Id::Submit);
        assert_eq!(focus.focus_next(), Id::Name);
    }

    #[test]
    fn tab_and_arrows_move_focus() {
        let next = AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next));
        let up = AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up));
        assert_eq!(common_msg(&next), Some(Msg::FocusNext));
        assert_eq!(common_msg(&up), Some(Msg::FocusPrev));
        assert_eq!(common_msg(&AppAction::Register), None);
        assert_eq!(common_msg(&AppAction::SignIn), Some(Msg::SignIn));
    }
}
