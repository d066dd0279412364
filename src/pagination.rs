//! Incremental ("infinite scroll") pagination over a fully loaded list.
//!
//! The [`Pager`] never fetches anything: the whole list is already in memory
//! and the pager only decides how much of it is exposed to the view. The view
//! reports its scroll position as [`ScrollMetrics`]; once the viewport gets
//! close enough to the end of the rendered content the view asks for more.

use serde::{Deserialize, Serialize};

/// Number of entries exposed per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 16;

/// Fraction of a viewport that may remain below the visible area before the
/// next page is requested.
pub const DEFAULT_END_THRESHOLD: f32 = 0.4;

/// How the visible-count cursor behaves when a page would overshoot the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorPolicy {
    /// Cursor stops at the list length.
    #[default]
    Clamped,
    /// Cursor always grows by a full page; only the slice is clamped.
    Unclamped,
}

/// Errors constructing a [`Pager`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagerError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Owns the visible-count cursor for one screen instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    visible_count: usize,
    policy: CursorPolicy,
}

impl Pager {
    /// Start with one page visible.
    pub fn new(page_size: usize) -> Result<Self, PagerError> {
        Self::with_policy(page_size, CursorPolicy::default())
    }

    pub fn with_policy(page_size: usize, policy: CursorPolicy) -> Result<Self, PagerError> {
        if page_size == 0 {
            return Err(PagerError::ZeroPageSize);
        }
        Ok(Self {
            page_size,
            visible_count: page_size,
            policy,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current cursor value. Under [`CursorPolicy::Unclamped`] this may exceed
    /// the list length.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Whether every entry of a list of `len` items is already exposed.
    pub fn is_exhausted(&self, len: usize) -> bool {
        self.visible_count >= len
    }

    /// Expose another page of a list holding `len` entries.
    ///
    /// Returns `true` when the cursor moved. Once the list is exhausted this is
    /// a no-op, so redundant calls from the view are harmless.
    pub fn request_more(&mut self, len: usize) -> bool {
        if self.is_exhausted(len) {
            tracing::trace!(visible = self.visible_count, len, "Pagination saturated");
            return false;
        }

        let before = self.visible_count;
        let advanced = self.visible_count.saturating_add(self.page_size);
        self.visible_count = match self.policy {
            CursorPolicy::Clamped => advanced.min(len),
            CursorPolicy::Unclamped => advanced,
        };

        tracing::debug!(
            from = before,
            to = self.visible_count,
            len,
            "Exposed next page"
        );
        true
    }

    /// Number of entries the view should render for a list of `len` items.
    pub fn visible_len(&self, len: usize) -> usize {
        self.visible_count.min(len)
    }

    /// The exposed prefix of `items`.
    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_len(items.len())]
    }
}

/// Scroll position reported by a view, in any consistent unit (rows, pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// First visible unit
    pub offset: usize,
    /// Visible extent
    pub viewport: usize,
    /// Total extent of the rendered content
    pub content: usize,
}

impl ScrollMetrics {
    /// Units of content below the bottom edge of the viewport.
    pub fn remaining(&self) -> usize {
        self.content
            .saturating_sub(self.offset.saturating_add(self.viewport))
    }

    /// Whether the end of the content is within `threshold` viewports of the
    /// bottom edge. Content that fits entirely in the viewport is always near
    /// its end.
    pub fn is_near_end(&self, threshold: f32) -> bool {
        let remaining = self.remaining();
        if remaining == 0 {
            return true;
        }
        let trigger = (self.viewport as f32 * threshold.max(0.0)).floor() as usize;
        remaining <= trigger
    }
}
