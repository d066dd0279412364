//! Gallery activity - paginated two-column grid of style presets.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::Paragraph,
};
use tuirealm::{Application, EventListenerCfg, PollStrategy};

use crate::catalog::CatalogProvider;
use crate::gallery::{GridDirection, StyleGrid, display_name};
use crate::navigation::{Navigator, Route};
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    GALLERY_FOOTER_ACTIONS, StyleGridView, format_footer, read_modal_key, render_help,
};

// ============================================================================
// Component identifiers (scoped to GalleryActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Grid,
}

// ============================================================================
// Messages (scoped to GalleryActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    ShowHelp,
    Back,
    OpenRegister,
    Move(GridDirection),
    Choose,
}

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// GalleryActivity
// ============================================================================

#[derive(Default)]
pub struct GalleryActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    grid: Option<StyleGrid>,
    viewport_rows: usize,
    exit_reason: Option<ExitReason>,
}

impl GalleryActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Grid for the category on top of the stack, reusing the parked one when
    /// it shows the same category.
    fn grid_for(context: &mut Context) -> Result<StyleGrid> {
        let model = &mut context.model;
        let category = match model.navigation.current() {
            Some(Route::Gallery { category }) => category.clone(),
            _ => model.config.gallery.category.clone(),
        };

        if let Some(grid) = model.gallery.take()
            && grid.category() == category
        {
            return Ok(grid);
        }

        let catalog = model.catalogs.catalog(&category);
        tracing::info!(%category, entries = catalog.len(), "Opening gallery");
        Ok(StyleGrid::new(category, catalog, &model.config.gallery)?)
    }

    /// Remount the grid view with the current grid state.
    fn sync_grid(&mut self) {
        let (Some(app), Some(grid), Some(context)) =
            (self.app.as_mut(), self.grid.as_ref(), self.context.as_ref())
        else {
            return;
        };
        let _ = app.umount(&Id::Grid);
        let view = StyleGridView::new(grid.clone(), context.model.theme.palette);
        if let Err(e) = app.mount(Id::Grid, Box::new(view), vec![]) {
            tracing::error!("Failed to mount grid: {}", e);
        }
        let _ = app.active(&Id::Grid);
    }

    /// Apply one message. Returns `true` when the grid view must be remounted.
    fn handle(&mut self, msg: Msg) -> bool {
        let (Some(context), Some(grid)) = (self.context.as_mut(), self.grid.as_mut()) else {
            return false;
        };
        let model = &mut context.model;

        match msg {
            Msg::Quit => {
                self.exit_reason = Some(ExitReason::Quit);
                false
            }
            Msg::ShowHelp => {
                model.show_help = true;
                false
            }
            Msg::Back => {
                // The gallery is the root screen
                if model.navigation.depth() > 1 {
                    model.navigation.back();
                    self.exit_reason = Some(ExitReason::Navigate);
                }
                false
            }
            Msg::OpenRegister => {
                model.navigation.push(Route::Register);
                self.exit_reason = Some(ExitReason::Navigate);
                false
            }
            Msg::Move(direction) => {
                let moved = grid.move_highlight(direction);
                let paged = grid.fill_viewport(self.viewport_rows);
                if paged {
                    model.message = Some(format!(
                        "Showing {} of {}",
                        grid.visible().len(),
                        grid.catalog().len()
                    ));
                }
                moved || paged
            }
            Msg::Choose => {
                if let Some(event) = grid.select_highlighted() {
                    model.navigation.push(Route::UploadImage { value: event.value });
                    self.exit_reason = Some(ExitReason::Navigate);
                }
                false
            }
        }
    }
}

impl Activity for GalleryActivity {
    fn on_create(&mut self, mut context: Context) {
        context.model.message = None;
        match Self::grid_for(&mut context) {
            Ok(grid) => self.grid = Some(grid),
            Err(e) => tracing::error!("Failed to build style grid: {}", e),
        }
        self.context = Some(context);
        self.app = Some(Self::create_application());
        self.sync_grid();
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

        let mut grid_area = Rect::default();
        let title = self
            .grid
            .as_ref()
            .map(|g| {
                format!(
                    " {} styles - {} of {} ",
                    display_name(g.category()),
                    g.visible().len(),
                    g.catalog().len()
                )
            })
            .unwrap_or_default();

        terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(6),    // Grid
                    Constraint::Length(1), // Status
                ])
                .split(frame.area());

            frame.render_widget(
                Paragraph::new(title).style(
                    Style::default()
                        .fg(model.theme.palette.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                rows[0],
            );

            grid_area = rows[1];
            app.view(&Id::Grid, frame, rows[1]);

            let status = model.message.clone().unwrap_or_else(|| {
                format_footer(GALLERY_FOOTER_ACTIONS, &[("choose", "Enter"), ("move", "arrows")])
            });
            frame.render_widget(
                Paragraph::new(status).style(
                    Style::default()
                        .fg(model.theme.palette.text_secondary)
                        .add_modifier(Modifier::DIM),
                ),
                rows[2],
            );

            if model.show_help {
                render_help(frame, &model.theme.palette);
            }
        })?;

        let viewport_rows = StyleGridView::viewport_rows(grid_area);
        let mut needs_sync = false;
        if viewport_rows != self.viewport_rows {
            self.viewport_rows = viewport_rows;
            // A taller terminal may already be near the end of the content
            if let Some(grid) = self.grid.as_mut() {
                needs_sync |= grid.fill_viewport(viewport_rows);
            }
        }

        if model.show_help {
            if read_modal_key()? {
                model.show_help = false;
            }
            return Ok(());
        }

        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                needs_sync |= self.handle(msg);
                if self.exit_reason.is_some() {
                    return Ok(());
                }
            }
        }

        if needs_sync {
            self.sync_grid();
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        let mut context = self.context.take()?;
        context.model.gallery = self.grid.take();
        Some(context)
    }
}
