//! Layered application configuration.
//!
//! Precedence, lowest first: built-in defaults, TOML file, `PIXSTYLE_*`
//! environment variables, command line flags.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::pagination::{CursorPolicy, DEFAULT_END_THRESHOLD, DEFAULT_PAGE_SIZE};
use crate::theme::ColorScheme;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pixstyle.toml";

/// Prefix for environment overrides. Nested keys are separated by `__`,
/// e.g. `PIXSTYLE_GALLERY__PAGE_SIZE=8`.
pub const ENV_PREFIX: &str = "PIXSTYLE_";

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid color '{value}' for {key}: {reason}")]
    InvalidColor {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Style grid settings
    pub gallery: GalleryConfig,
    /// Catalog source
    pub catalog: CatalogConfig,
    /// Colors and light/dark scheme
    pub theme: ThemeConfig,
}

/// Style grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Catalog category shown by the gallery
    pub category: String,
    /// Entries exposed per page
    pub page_size: usize,
    /// Fraction of a viewport left below the fold that triggers the next page
    pub end_threshold: f32,
    /// Stop the visible-count cursor at the catalog length
    pub clamp_cursor: bool,
}

impl GalleryConfig {
    pub fn cursor_policy(&self) -> CursorPolicy {
        if self.clamp_cursor {
            CursorPolicy::Clamped
        } else {
            CursorPolicy::Unclamped
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            category: "professional".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            end_threshold: DEFAULT_END_THRESHOLD,
            clamp_cursor: true,
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file; the embedded catalog is used when unset
    pub path: Option<PathBuf>,
}

/// Theme settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub scheme: ColorScheme,
    /// Per-color overrides in any CSS color format
    pub palette: PaletteOverrides,
}

/// Palette overrides. Unset entries keep the scheme's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    pub background: Option<String>,
    pub surface: Option<String>,
    pub primary: Option<String>,
    pub text_primary: Option<String>,
    pub text_secondary: Option<String>,
    pub text_inverse: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Command line overrides. Only explicitly set values are serialized, so
/// unset flags never mask file or environment settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub gallery: GalleryOverrides,
    pub catalog: CatalogOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GalleryOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Merge defaults, the TOML file, environment and CLI overrides.
    ///
    /// An explicitly requested file must exist; the default file is optional.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => return Err(ConfigError::Missing(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides))
            .extract()?;

        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Reject values the rest of the application cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "gallery.page_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.gallery.end_threshold.is_finite() || self.gallery.end_threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "gallery.end_threshold",
                reason: format!("expected a non-negative number, got {}", self.gallery.end_threshold),
            });
        }
        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
