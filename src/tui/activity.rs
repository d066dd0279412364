//! Activity-based architecture for the TUI.
//!
//! Each screen in the TUI is an Activity with its own Application instance,
//! component IDs, and message types. The ActivityManager starts the activity
//! matching the route on top of the navigation stack.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};

use super::Model;
use super::activities::{DestinationActivity, GalleryActivity, RegisterActivity};
use crate::navigation::Route;

/// Shared context passed between activities.
pub struct Context {
    pub model: Model,
}

/// Exit reasons for activity transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
    /// The navigation stack changed; start the activity for the new top route
    Navigate,
}

/// Activity lifecycle trait.
///
/// Each activity owns its own tui-realm Application and handles its own events.
pub trait Activity {
    /// Initialize the activity with context from the manager.
    fn on_create(&mut self, context: Context);

    /// Draw the UI and handle one tick of events.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// Check if activity wants to exit. Returns Some(reason) to exit, None to continue.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Clean up and return the context to the manager.
    fn on_destroy(&mut self) -> Option<Context>;
}

/// Activity types available in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Gallery,
    Register,
    Destination,
}

impl ActivityType {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Gallery { .. } => Self::Gallery,
            Route::Register => Self::Register,
            Route::SignIn | Route::UploadImage { .. } => Self::Destination,
        }
    }
}

/// Manages activity lifecycle and transitions.
pub struct ActivityManager {
    context: Option<Context>,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            let context = self
                .context
                .take()
                .ok_or_else(|| eyre!("activity did not return its context"))?;

            let Some(route) = context.model.navigation.current() else {
                tracing::info!("Navigation stack empty, exiting");
                return Ok(());
            };
            let kind = ActivityType::for_route(route);
            tracing::debug!(%route, ?kind, "Starting activity");

            let mut activity: Box<dyn Activity> = match kind {
                ActivityType::Gallery => Box::<GalleryActivity>::default(),
                ActivityType::Register => Box::<RegisterActivity>::default(),
                ActivityType::Destination => Box::<DestinationActivity>::default(),
            };

            activity.on_create(context);

            loop {
                activity.on_draw(terminal)?;

                if let Some(reason) = activity.will_umount() {
                    match reason {
                        ExitReason::Quit => {
                            activity.on_destroy();
                            return Ok(());
                        }
                        ExitReason::Navigate => {
                            self.context = activity.on_destroy();
                            terminal.clear()?;
                            break;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_map_to_activities() {
        let gallery = Route::Gallery {
            category: "fun".into(),
        };
        assert_eq!(ActivityType::for_route(&gallery), ActivityType::Gallery);
        assert_eq!(ActivityType::for_route(&Route::Register), ActivityType::Register);
        assert_eq!(ActivityType::for_route(&Route::SignIn), ActivityType::Destination);
    }
}
