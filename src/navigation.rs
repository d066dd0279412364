//! Screen routes and the navigation collaborator.

use std::fmt;

/// A navigable screen, with the parameters it is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Style grid for a catalog category
    Gallery { category: String },
    /// Account registration
    Register,
    /// Sign-in screen (owned by the authentication collaborator)
    SignIn,
    /// Photo upload for the chosen style
    UploadImage { value: String },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gallery { category } => write!(f, "/gallery/{category}"),
            Self::Register => write!(f, "/auth/register"),
            Self::SignIn => write!(f, "/auth/login"),
            Self::UploadImage { value } => write!(f, "/upload-image?value={value}"),
        }
    }
}

/// Fire-and-forget navigation operations.
pub trait Navigator {
    /// Open `route` on top of the current screen.
    fn push(&mut self, route: Route);

    /// Return to the previous screen. Returns `false` when there is none.
    fn back(&mut self) -> bool;

    /// Swap the current screen for `route`.
    fn replace(&mut self, route: Route);
}

/// History stack of routes, the in-process [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    history: Vec<Route>,
}

impl NavigationStack {
    pub fn new(root: Route) -> Self {
        Self {
            history: vec![root],
        }
    }

    /// Route currently on top, `None` once everything has been popped.
    pub fn current(&self) -> Option<&Route> {
        self.history.last()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Navigator for NavigationStack {
    fn push(&mut self, route: Route) {
        tracing::info!(%route, "push");
        self.history.push(route);
    }

    fn back(&mut self) -> bool {
        let popped = self.history.pop();
        tracing::info!(route = ?popped.as_ref().map(ToString::to_string), "back");
        popped.is_some()
    }

    fn replace(&mut self, route: Route) {
        tracing::info!(%route, "replace");
        self.history.pop();
        self.history.push(route);
    }
}
