//! Interactive TUI: style gallery and account registration.
//!
//! Architecture: Activity-based with tui-realm for components.
//! Each screen (activity) has its own Application instance and message types.
//! The route on top of the navigation stack decides which activity runs.

mod activities;
mod activity;
mod components;
mod model;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::Result;
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher,
    defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};

use crate::catalog::StaticCatalog;
use crate::config::AppConfig;

pub use model::Model;

use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Open the registration screen
    Register,
    /// Leave registration for the sign-in screen
    SignIn,
    /// Birthdate one day earlier
    BirthdatePrevDay,
    /// Birthdate one day later
    BirthdateNextDay,
    /// Birthdate one year earlier
    BirthdatePrevYear,
    /// Birthdate one year later
    BirthdateNextYear,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::Register)
            .key(keys::char('a'))
            .description("Create account")
            .build(),
    );

    // Ctrl so it still works while typing in a form field
    config.bind(
        ActionBinding::builder()
            .action(AppAction::SignIn)
            .key(keys::char('o').with_ctrl())
            .description("Sign-in for existing accounts")
            .build(),
    );

    // Birthdate picker: [/] by day, {/} by year
    config.bind(
        ActionBinding::builder()
            .action(AppAction::BirthdatePrevDay)
            .key(keys::char('['))
            .description("Previous day")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::BirthdateNextDay)
            .key(keys::char(']'))
            .description("Next day")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::BirthdatePrevYear)
            .key(keys::char('{'))
            .description("Previous year")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::BirthdateNextYear)
            .key(keys::char('}'))
            .description("Next year")
            .build(),
    );

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Actions every screen reacts to the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalEvent {
    Quit,
    ShowHelp,
    OpenRegister,
}

/// Handle global application events that are common across all components.
pub fn handle_global_app_events(action: &AppAction) -> Option<GlobalEvent> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(GlobalEvent::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(GlobalEvent::ShowHelp),
        AppAction::Register => Some(GlobalEvent::OpenRegister),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive TUI, starting on the gallery or, with `register`,
/// on the registration screen.
pub fn run(config: AppConfig, catalogs: StaticCatalog, register: bool) -> Result<()> {
    let model = Model::new(config, catalogs, register)?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let context = Context { model };
    let mut manager = ActivityManager::new(context);

    let result = manager.run(&mut terminal);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "TUI exited with error");
    }
    result
}

#[cfg(test)]
mod tests {
    use tuirealm::event::{Key, KeyEvent, KeyModifiers};

    use super::*;

    fn dispatch(code: Key, modifiers: KeyModifiers) -> Option<AppAction> {
        dispatcher().dispatch(&KeyEvent::new(code, modifiers))
    }

    #[test]
    fn brackets_step_the_birthdate_by_day() {
        assert_eq!(
            dispatch(Key::Char('['), KeyModifiers::NONE),
            Some(AppAction::BirthdatePrevDay)
        );
        assert_eq!(
            dispatch(Key::Char(']'), KeyModifiers::NONE),
            Some(AppAction::BirthdateNextDay)
        );
    }

    #[test]
    fn ctrl_o_opens_sign_in() {
        assert_eq!(
            dispatch(Key::Char('o'), KeyModifiers::CONTROL),
            Some(AppAction::SignIn)
        );
        assert_ne!(
            dispatch(Key::Char('o'), KeyModifiers::NONE),
            Some(AppAction::SignIn)
        );
    }
}
