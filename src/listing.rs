//! Non-interactive listing of the visible slice of a category.

use std::sync::Arc;

use crate::catalog::{CatalogProvider, StyleEntry};
use crate::cli::OutputFormat;
use crate::pagination::{Pager, PagerError};

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error(transparent)]
    Pager(#[from] PagerError),

    #[error("YAML serialize error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialize error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Entries exposed after `pages` pagination steps (the first page counts as one).
pub fn visible_after_pages(
    catalog: &[StyleEntry],
    pager: &mut Pager,
    pages: usize,
) -> Vec<StyleEntry> {
    for _ in 1..pages.max(1) {
        if !pager.request_more(catalog.len()) {
            break;
        }
    }
    pager.visible_slice(catalog).to_vec()
}

/// Serialize entries in the requested format.
pub fn render_listing(entries: &[StyleEntry], format: OutputFormat) -> Result<String, ListingError> {
    let out = match format {
        OutputFormat::Yaml => serde_yaml::to_string(entries)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(entries)?;
            json.push('\n');
            json
        }
    };
    Ok(out)
}

/// Look up `category`, paginate and render in one step.
pub fn list_category<P: CatalogProvider + ?Sized>(
    provider: &P,
    category: &str,
    pager: &mut Pager,
    pages: usize,
    format: OutputFormat,
) -> Result<String, ListingError> {
    let catalog: Arc<Vec<StyleEntry>> = provider.catalog(category);
    let entries = visible_after_pages(&catalog, pager, pages);
    tracing::debug!(category, pages, shown = entries.len(), "Listing category");
    render_listing(&entries, format)
}

/// Note for a category the provider does not know, naming the ones it does.
pub fn unknown_category_note<P: CatalogProvider + ?Sized>(
    provider: &P,
    category: &str,
) -> Option<String> {
    let known = provider.categories();
    if known.iter().any(|name| name == category) {
        return None;
    }
    Some(format!(
        "Unknown category '{category}' (available: {})",
        known.join(", ")
    ))
}
