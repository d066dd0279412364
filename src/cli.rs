//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use crate::config::{CatalogOverrides, ConfigOverrides, GalleryOverrides};

/// Output format for `--list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML sequence of entries
    #[default]
    Yaml,
    /// JSON array of entries
    Json,
}

/// Browse photo style presets and register an account.
#[derive(Parser, Debug)]
#[command(name = "pixstyle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog category to show
    #[arg(short, long)]
    pub category: Option<String>,

    /// Number of styles revealed per page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Load the style catalog from a JSON file instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Open the registration screen instead of the gallery
    #[arg(short, long, conflicts_with = "list")]
    pub register: bool,

    /// Print the visible styles and exit without starting the TUI
    #[arg(short, long)]
    pub list: bool,

    /// Pages to reveal before listing (with --list)
    #[arg(long, value_name = "N", default_value_t = 1, requires = "list")]
    pub pages: usize,

    /// Output format for --list
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the merged configuration to a TOML file and exit
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Log file path (default: pixstyle.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Command line values for figment merging.
    ///
    /// Only options given on the command line are set, so they layer over
    /// the TOML file and environment without masking them.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            gallery: GalleryOverrides {
                category: self.category.clone(),
                page_size: self.page_size.and_then(|n| usize::try_from(n).ok()),
            },
            catalog: CatalogOverrides {
                path: self.catalog.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_produce_empty_overrides() {
        let cli = Cli::parse_from(["pixstyle"]);
        let overrides = cli.to_config_overrides();
        assert!(overrides.gallery.category.is_none());
        assert!(overrides.gallery.page_size.is_none());
        assert!(overrides.catalog.path.is_none());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["pixstyle", "--page-size", "0"]).is_err());
    }

    #[test]
    fn pages_requires_list() {
        assert!(Cli::try_parse_from(["pixstyle", "--pages", "2"]).is_err());
        let cli = Cli::parse_from(["pixstyle", "--list", "--pages", "2", "--format", "json"]);
        assert_eq!(cli.pages, 2);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
