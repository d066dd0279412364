//! Style grid model: the paginated two-column gallery, independent of rendering.

use std::sync::Arc;

use crate::catalog::StyleEntry;
use crate::config::GalleryConfig;
use crate::pagination::{Pager, PagerError, ScrollMetrics};

/// Number of tiles per grid row.
pub const GRID_COLUMNS: usize = 2;

/// Emitted when the user picks a style. Carries only the selection value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub value: String,
}

/// What the view should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridLayout<'a> {
    /// The catalog is empty; show this message instead of a grid.
    Placeholder(String),
    /// Visible entries, row by row. The last row may be partially filled.
    Rows(Vec<[Option<&'a StyleEntry>; GRID_COLUMNS]>),
}

/// Highlight movement within the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Paginated grid over one catalog category.
#[derive(Debug, Clone)]
pub struct StyleGrid {
    category: String,
    catalog: Arc<Vec<StyleEntry>>,
    pager: Pager,
    end_threshold: f32,
    highlighted: usize,
    scroll_row: usize,
}

impl StyleGrid {
    pub fn new(
        category: impl Into<String>,
        catalog: Arc<Vec<StyleEntry>>,
        config: &GalleryConfig,
    ) -> Result<Self, PagerError> {
        Ok(Self {
            category: category.into(),
            catalog,
            pager: Pager::with_policy(config.page_size, config.cursor_policy())?,
            end_threshold: config.end_threshold,
            highlighted: 0,
            scroll_row: 0,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn catalog(&self) -> &[StyleEntry] {
        &self.catalog
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Entries currently exposed by the pager.
    pub fn visible(&self) -> &[StyleEntry] {
        self.pager.visible_slice(&self.catalog)
    }

    pub fn placeholder_message(&self) -> String {
        format!("No {} styles available", self.category)
    }

    pub fn layout(&self) -> GridLayout<'_> {
        if self.catalog.is_empty() {
            return GridLayout::Placeholder(self.placeholder_message());
        }

        let rows = self
            .visible()
            .chunks(GRID_COLUMNS)
            .map(|chunk| {
                let mut row = [None; GRID_COLUMNS];
                for (slot, entry) in row.iter_mut().zip(chunk) {
                    *slot = Some(entry);
                }
                row
            })
            .collect();
        GridLayout::Rows(rows)
    }

    /// Number of grid rows the visible slice occupies.
    pub fn total_rows(&self) -> usize {
        self.visible().len().div_ceil(GRID_COLUMNS)
    }

    /// Selection event for the visible entry at `index`.
    pub fn select(&self, index: usize) -> Option<SelectionEvent> {
        let entry = self.visible().get(index)?;
        tracing::info!(index, value = %entry.value, "Style selected");
        Some(SelectionEvent {
            value: entry.value.clone(),
        })
    }

    /// Highlighted tile index, `None` when there is nothing to highlight.
    pub fn highlighted(&self) -> Option<usize> {
        (!self.visible().is_empty()).then_some(self.highlighted)
    }

    pub fn select_highlighted(&self) -> Option<SelectionEvent> {
        self.select(self.highlighted()?)
    }

    /// First grid row inside the viewport.
    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// Move the highlight. Returns `true` when it moved.
    pub fn move_highlight(&mut self, direction: GridDirection) -> bool {
        let len = self.visible().len();
        if len == 0 {
            return false;
        }

        let current = self.highlighted;
        let column = current % GRID_COLUMNS;
        let next = match direction {
            GridDirection::Up => current.checked_sub(GRID_COLUMNS).unwrap_or(current),
            GridDirection::Down => {
                if current + GRID_COLUMNS < len {
                    current + GRID_COLUMNS
                } else if current / GRID_COLUMNS < (len - 1) / GRID_COLUMNS {
                    // Partial last row: land on its final tile
                    len - 1
                } else {
                    current
                }
            }
            GridDirection::Left if column > 0 => current - 1,
            GridDirection::Right if column + 1 < GRID_COLUMNS && current + 1 < len => current + 1,
            GridDirection::Left | GridDirection::Right => current,
        };

        self.highlighted = next;
        next != current
    }

    /// Feed a scroll-proximity report to the pager.
    ///
    /// Returns `true` when another page was exposed.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !metrics.is_near_end(self.end_threshold) {
            return false;
        }
        self.pager.request_more(self.catalog.len())
    }

    /// Scroll so the highlighted row sits inside a viewport of
    /// `viewport_rows`, then report the resulting position to the pager.
    ///
    /// Returns `true` when another page was exposed.
    pub fn reveal_highlight(&mut self, viewport_rows: usize) -> bool {
        let viewport = viewport_rows.max(1);
        let row = self.highlighted / GRID_COLUMNS;

        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + viewport {
            self.scroll_row = row + 1 - viewport;
        }

        let total = self.total_rows();
        self.scroll_row = self.scroll_row.min(total.saturating_sub(viewport));

        self.on_scroll(ScrollMetrics {
            offset: self.scroll_row,
            viewport,
            content: total,
        })
    }

    /// [`reveal_highlight`](Self::reveal_highlight) repeated until the
    /// viewport is no longer near the end of the content, so a tall viewport
    /// keeps pulling pages without further input.
    ///
    /// Returns `true` when at least one page was exposed.
    pub fn fill_viewport(&mut self, viewport_rows: usize) -> bool {
        let mut paged = false;
        while self.reveal_highlight(viewport_rows) {
            paged = true;
        }
        paged
    }
}

/// Human-readable title for a style value, e.g. `studio-portrait` becomes
/// `Studio Portrait`.
pub fn display_name(value: &str) -> String {
    value
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(len: usize, page_size: usize) -> StyleGrid {
        let entries = (0..len)
            .map(|i| StyleEntry::new(format!("{i}.jpg"), format!("style-{i}")))
            .collect();
        let config = GalleryConfig {
            page_size,
            ..GalleryConfig::default()
        };
        StyleGrid::new("professional", Arc::new(entries), &config).unwrap()
    }

    #[test]
    fn down_from_right_column_lands_on_partial_last_row() {
        let mut grid = grid(5, 16);
        grid.move_highlight(GridDirection::Right);
        grid.move_highlight(GridDirection::Down);
        assert_eq!(grid.highlighted(), Some(3));
        assert!(grid.move_highlight(GridDirection::Down));
        assert_eq!(grid.highlighted(), Some(4));
        assert!(!grid.move_highlight(GridDirection::Down));
    }

    #[test]
    fn right_stops_at_row_edge() {
        let mut grid = grid(4, 16);
        assert!(grid.move_highlight(GridDirection::Right));
        assert!(!grid.move_highlight(GridDirection::Right));
        assert_eq!(grid.highlighted(), Some(1));
    }

    #[test]
    fn highlight_never_leaves_visible_slice() {
        let mut grid = grid(40, 4);
        for _ in 0..10 {
            grid.move_highlight(GridDirection::Down);
        }
        assert!(grid.highlighted().unwrap() < grid.visible().len());
    }

    #[test]
    fn reveal_highlight_scrolls_and_pages() {
        // 16 visible tiles = 8 rows, viewport of 3 rows
        let mut grid = grid(40, 16);
        assert!(!grid.reveal_highlight(3));

        let mut paged = false;
        for _ in 0..7 {
            grid.move_highlight(GridDirection::Down);
            paged |= grid.reveal_highlight(3);
        }
        assert_eq!(grid.scroll_row(), 5);
        assert!(paged);
        assert_eq!(grid.visible().len(), 32);
    }

    #[test]
    fn fill_viewport_pages_until_content_overflows() {
        // 20 rows fit the first two pages entirely
        let mut grid = grid(40, 16);
        assert!(grid.fill_viewport(20));
        assert_eq!(grid.visible().len(), 40);
        assert!(!grid.fill_viewport(20));
    }

    #[test]
    fn fill_viewport_stops_when_far_from_end() {
        let mut grid = grid(40, 16);
        assert!(!grid.fill_viewport(3));
        assert_eq!(grid.visible().len(), 16);
    }

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(display_name("studio-portrait"), "Studio Portrait");
        assert_eq!(display_name("neon_noir"), "Neon Noir");
        assert_eq!(display_name("--"), "");
    }
}
