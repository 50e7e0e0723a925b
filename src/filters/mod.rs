//! Filter state holder: raw user input plus its debounced copy.
//!
//! Every edit updates the raw [`FilterCriteria`] immediately (the filter
//! panel always shows exactly what was typed) and reschedules publication
//! of the debounced copy. Only the debounced copy drives fetches.

pub mod debounce;

use std::time::Duration;

use tokio::sync::watch;

use crate::domain::FilterCriteria;

pub use debounce::Debouncer;

/// Default quiescence window before filter edits are published.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Owner of the user's filter criteria.
#[derive(Debug)]
pub struct FilterState {
    raw: FilterCriteria,
    debouncer: Debouncer<FilterCriteria>,
}

impl FilterState {
    /// Creates an empty filter state publishing after `window` of quiet.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            raw: FilterCriteria::default(),
            debouncer: Debouncer::new(window, FilterCriteria::default()),
        }
    }

    /// Criteria exactly as the user last entered them.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.raw
    }

    /// Last published criteria.
    #[must_use]
    pub fn debounced(&self) -> FilterCriteria {
        self.debouncer.current()
    }

    /// Receiver woken whenever new criteria are published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FilterCriteria> {
        self.debouncer.subscribe()
    }

    /// Replaces the criteria.
    pub fn set(&mut self, criteria: FilterCriteria) {
        self.raw = criteria;
        tracing::trace!(criteria = ?self.raw, "filter criteria edited");
        self.debouncer.schedule(self.raw.clone());
    }

    /// Edits the criteria in place.
    pub fn edit(&mut self, change: impl FnOnce(&mut FilterCriteria)) {
        let mut criteria = self.raw.clone();
        change(&mut criteria);
        self.set(criteria);
    }

    /// Resets every filter.
    pub fn clear(&mut self) {
        self.set(FilterCriteria::default());
    }

    /// Whether the raw criteria narrow or reorder the listing.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.raw.is_active()
    }

    /// Whether an edit is still waiting out the debounce window.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
