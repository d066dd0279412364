//! Application model shared by all activities.

use color_eyre::eyre::{Result, WrapErr};

use crate::catalog::StaticCatalog;
use crate::config::AppConfig;
use crate::gallery::StyleGrid;
use crate::navigation::{NavigationStack, Navigator, Route};
use crate::registration::MemoryBackend;
use crate::theme::Theme;

/// State that outlives a single screen.
pub struct Model {
    pub config: AppConfig,
    pub theme: Theme,
    pub catalogs: StaticCatalog,
    pub backend: MemoryBackend,
    pub navigation: NavigationStack,

    /// Grid of the gallery screen, parked while another screen is on top so
    /// pagination survives a round trip.
    pub gallery: Option<StyleGrid>,

    // UI state
    pub show_help: bool,
    pub message: Option<String>,
}

impl Model {
    pub fn new(config: AppConfig, catalogs: StaticCatalog, register: bool) -> Result<Self> {
        let theme = Theme::from_config(&config.theme).wrap_err("Invalid theme configuration")?;

        let mut navigation = NavigationStack::new(Route::Gallery {
            category: config.gallery.category.clone(),
        });
        if register {
            navigation.push(Route::Register);
        }

        Ok(Self {
            config,
            theme,
            catalogs,
            backend: MemoryBackend::new(),
            navigation,
            gallery: None,
            show_help: false,
            message: None,
        })
    }
}
