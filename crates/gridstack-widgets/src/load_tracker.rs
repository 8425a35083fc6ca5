#![forbid(unsafe_code)]

//! Widget-loaded notifications.
//!
//! Dashboard hosts show a loading state until every widget on the surface has
//! reported in. Templates call [`TemplateContext::mark_loaded`] once their
//! content is ready; the host reads the tracker.
//!
//! [`TemplateContext::mark_loaded`]: crate::template::TemplateContext::mark_loaded

use ahash::AHashSet;
use gridstack_layout::{GridItem, ItemId};

/// Set of item ids whose widgets have reported loaded.
#[derive(Debug, Clone, Default)]
pub struct WidgetLoadTracker {
    loaded: AHashSet<ItemId>,
}

impl WidgetLoadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an item's widget loaded. Returns `true` if it was not
    /// already recorded.
    pub fn set_widget_loaded(&mut self, id: ItemId) -> bool {
        let inserted = self.loaded.insert(id);
        #[cfg(feature = "tracing")]
        if inserted {
            tracing::debug!(item_id = id.get(), "widget loaded");
        }
        inserted
    }

    #[must_use]
    pub fn is_loaded(&self, id: ItemId) -> bool {
        self.loaded.contains(&id)
    }

    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Whether every item in `items` has reported loaded.
    #[must_use]
    pub fn all_loaded(&self, items: &[GridItem]) -> bool {
        items.iter().all(|item| self.loaded.contains(&item.id))
    }

    /// Forget items that are no longer on the surface.
    pub fn retain_items(&mut self, items: &[GridItem]) {
        let live: AHashSet<ItemId> = items.iter().map(|item| item.id).collect();
        self.loaded.retain(|id| live.contains(id));
    }

    pub fn clear(&mut self) {
        self.loaded.clear();
    }
}
