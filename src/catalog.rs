//! Style catalog: the ordered list of presets a user can apply to a photo.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Catalog bundled with the binary, used when no catalog file is configured.
const EMBEDDED_CATALOG: &str = include_str!("../assets/styles.json");

/// A single selectable style preset.
///
/// `value` is the identifier handed to the upload screen. It is not guaranteed
/// to be unique across a catalog; list positions identify entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleEntry {
    /// Preview image locator
    pub uri: String,
    /// Selection identifier
    pub value: String,
}

impl StyleEntry {
    pub fn new(uri: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            value: value.into(),
        }
    }
}

/// Error type for catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of style catalogs, one ordered list per category.
pub trait CatalogProvider {
    /// Catalog for `category`. Unknown categories yield an empty catalog.
    fn catalog(&self, category: &str) -> Arc<Vec<StyleEntry>>;

    /// Known category names, sorted.
    fn categories(&self) -> Vec<String>;
}

/// Catalog provider backed by data that is fully loaded up front.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: HashMap<String, Arc<Vec<StyleEntry>>>,
}

impl StaticCatalog {
    /// Catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse a `{ "category": [{ "uri": .., "value": .. }, ..] }` document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, Vec<StyleEntry>> = serde_json::from_str(json)?;
        let categories = raw
            .into_iter()
            .map(|(name, entries)| (name, Arc::new(entries)))
            .collect();
        Ok(Self { categories })
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "Loaded style catalog"
        );
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise fall back to the embedded catalog.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Build a provider from in-memory entries.
    pub fn from_entries<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<StyleEntry>)>,
        S: Into<String>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(name, entries)| (name.into(), Arc::new(entries)))
                .collect(),
        }
    }
}

impl CatalogProvider for StaticCatalog {
    fn catalog(&self, category: &str) -> Arc<Vec<StyleEntry>> {
        self.categories
            .get(category)
            .cloned()
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }

    fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self.categories.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_has_professional_styles() {
        let catalog = StaticCatalog::embedded().unwrap();
        let professional = catalog.catalog("professional");
        assert_eq!(professional.len(), 20);
        assert_eq!(professional[0].value, "studio-portrait");
    }

    #[test]
    fn unknown_category_is_empty() {
        let catalog = StaticCatalog::embedded().unwrap();
        assert!(catalog.catalog("does-not-exist").is_empty());
    }

    #[test]
    fn categories_are_sorted() {
        let catalog = StaticCatalog::from_entries([
            ("fun", vec![]),
            ("artistic", vec![StyleEntry::new("a.jpg", "a")]),
        ]);
        assert_eq!(catalog.categories(), vec!["artistic", "fun"]);
    }

    #[test]
    fn duplicate_values_are_kept_in_order() {
        let json = r#"{"pro": [
            {"uri": "one.jpg", "value": "same"},
            {"uri": "two.jpg", "value": "same"}
        ]}"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        let pro = catalog.catalog("pro");
        assert_eq!(pro.len(), 2);
        assert_eq!(pro[1].uri, "two.jpg");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = StaticCatalog::from_json("{\"pro\": 3}").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
