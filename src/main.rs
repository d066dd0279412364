//! CLI entry point for pixstyle.

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};

use pixstyle::catalog::StaticCatalog;
use pixstyle::cli::Cli;
use pixstyle::config::AppConfig;
use pixstyle::listing::{list_category, unknown_category_note};
use pixstyle::logging::init_logging;
use pixstyle::pagination::Pager;
use pixstyle::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "pixstyle", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to write config to {}", path.display()))?;
        eprintln!("Saved configuration to {}", path.display());
        return Ok(());
    }

    let catalogs = StaticCatalog::load_or_embedded(config.catalog.path.as_deref())
        .wrap_err("Failed to load style catalog")?;

    if cli.list {
        if let Some(note) = unknown_category_note(&catalogs, &config.gallery.category) {
            eprintln!("{note}");
        }
        let mut pager = Pager::with_policy(config.gallery.page_size, config.gallery.cursor_policy())?;
        let out = list_category(
            &catalogs,
            &config.gallery.category,
            &mut pager,
            cli.pages,
            cli.format,
        )?;
        print!("{out}");
        return Ok(());
    }

    let _guard = init_logging(cli.log_file.as_deref(), Some(&cli.log_level));
    tracing::info!(category = %config.gallery.category, "Starting pixstyle");

    tui::run(config, catalogs, cli.register)
}
