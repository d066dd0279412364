//! Destination activity - stand-in for screens owned by other collaborators
//! (sign-in, photo upload).

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tuirealm::{Application, EventListenerCfg, PollStrategy};

use crate::gallery::display_name;
use crate::navigation::{Navigator, Route};
use crate::tui::Model;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{Notice, read_modal_key, render_help};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Notice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    ShowHelp,
    Back,
    OpenRegister,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

#[derive(Default)]
pub struct DestinationActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl DestinationActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Title and body for the route on top of the stack.
    fn describe(model: &Model) -> (String, Vec<String>) {
        match model.navigation.current() {
            Some(Route::SignIn) => {
                let mut lines =
                    vec!["Sign-in is provided by the authentication service.".to_string()];
                if let Some(email) = model.backend.verification_outbox().last() {
                    lines.push(format!("A verification email was sent to {email}."));
                }
                ("Sign In".to_string(), lines)
            }
            Some(route @ Route::UploadImage { value }) => (
                "Upload Image".to_string(),
                vec![
                    format!("Style: {}", display_name(value)),
                    format!("Route: {route}"),
                ],
            ),
            other => (
                "pixstyle".to_string(),
                vec![format!(
                    "Nothing to show for {}",
                    other.map(ToString::to_string).unwrap_or_default()
                )],
            ),
        }
    }
}

impl Activity for DestinationActivity {
    fn on_create(&mut self, context: Context) {
        let (title, lines) = Self::describe(&context.model);
        let notice = Notice::new(title, lines, context.model.theme.palette);
        self.context = Some(context);

        let mut app = Self::create_application();
        if let Err(e) = app.mount(Id::Notice, Box::new(notice), vec![]) {
            tracing::error!("Failed to mount notice: {}", e);
        }
        let _ = app.active(&Id::Notice);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let (Some(context), Some(app)) = (self.context.as_mut(), self.app.as_mut()) else {
            self.exit_reason = Some(ExitReason::Quit);
            return Ok(());
        };
        let model = &mut context.model;

        terminal.draw(|frame| {
            let area = frame.area();
            app.view(&Id::Notice, frame, area);
            if model.show_help {
                render_help(frame, &model.theme.palette);
            }
        })?;

        if model.show_help {
            if read_modal_key()? {
                model.show_help = false;
            }
            return Ok(());
        }

        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                match msg {
                    Msg::Quit => self.exit_reason = Some(ExitReason::Quit),
                    Msg::ShowHelp => model.show_help = true,
                    Msg::Back => {
                        model.navigation.back();
                        self.exit_reason = Some(ExitReason::Navigate);
                    }
                    Msg::OpenRegister => {
                        model.navigation.push(Route::Register);
                        self.exit_reason = Some(ExitReason::Navigate);
                    }
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
