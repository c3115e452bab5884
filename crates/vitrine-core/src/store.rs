//! Sparse index-addressed item storage with paging-extent bookkeeping

use std::collections::BTreeMap;

/// Direction of a paging fetch, attached to every request.
///
/// Determines how the boundary flags and the known extent are updated
/// when the response merges into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDirection {
    /// First fetch after a reset (or a deep-link landing at an offset).
    Initial,
    /// Fetch extending the collection past the largest known index.
    Forward,
    /// Fetch filling indices below the smallest loaded index.
    Backward,
}

/// Sparse mapping from global sequence index to item.
///
/// Keys may have gaps; an index is only ever overwritten by an idempotent
/// re-fetch of the same range, never evicted. Alongside the map the store
/// tracks a lower bound on the collection size (`known_extent`), the two
/// "has more" flags gating further paging, and a generation counter
/// (`epoch`) bumped on every reset so that stale in-flight results can be
/// recognized and discarded.
#[derive(Debug, Clone)]
pub struct ItemStore<T> {
    items: BTreeMap<usize, T>,
    known_extent: usize,
    has_more_down: bool,
    has_more_up: bool,
    epoch: u64,
}

impl<T> ItemStore<T> {
    /// Create an empty store: nothing loaded, forward paging open,
    /// backward paging closed.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            known_extent: 0,
            has_more_down: true,
            has_more_up: false,
            epoch: 0,
        }
    }

    /// Merge one fetched page into the store.
    ///
    /// `offset` is the global index of the first item in `items`;
    /// `page_size` is the limit the fetch was issued with. An empty page
    /// closes the corresponding direction and leaves the map untouched.
    pub fn merge(
        &mut self,
        offset: usize,
        items: Vec<T>,
        direction: FetchDirection,
        page_size: usize,
    ) {
        if items.is_empty() {
            match direction {
                FetchDirection::Forward => self.has_more_down = false,
                FetchDirection::Backward => self.has_more_up = false,
                FetchDirection::Initial => {}
            }
            return;
        }

        let count = items.len();
        for (k, item) in items.into_iter().enumerate() {
            self.items.insert(offset + k, item);
        }

        match direction {
            FetchDirection::Initial => {
                self.has_more_down = count == page_size;
                self.has_more_up = offset > 0;
                self.known_extent = offset + count;
            }
            FetchDirection::Forward => {
                self.has_more_down = count == page_size;
                self.known_extent = self.known_extent.max(offset + count);
            }
            FetchDirection::Backward => {
                self.has_more_up = offset > 0;
            }
        }

        tracing::debug!(
            offset,
            count,
            direction = ?direction,
            known_extent = self.known_extent,
            "merged page into store"
        );
    }

    /// Item at a global index, if that index has been fetched.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(&index)
    }

    /// Loaded `(index, item)` pairs inside `[start, end)`, ascending.
    pub fn slice(&self, start: usize, end: usize) -> impl Iterator<Item = (usize, &T)> {
        // BTreeMap::range panics on an inverted range; a window scrolled
        // far past the known extent can produce one.
        let end = end.max(start);
        self.items.range(start..end).map(|(i, item)| (*i, item))
    }

    /// Number of loaded items (not the collection size).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lower bound on the collection size, grown only by initial and
    /// forward merges.
    pub fn known_extent(&self) -> usize {
        self.known_extent
    }

    /// Whether a forward fetch may still find more items.
    pub fn has_more_down(&self) -> bool {
        self.has_more_down
    }

    /// Whether indices below the smallest loaded index remain unfetched.
    pub fn has_more_up(&self) -> bool {
        self.has_more_up
    }

    /// Current generation. Fetches capture this at issue time; a result
    /// whose captured epoch no longer matches is stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Clear all state and advance the epoch.
    ///
    /// Runs on every search-term change; in-flight fetches issued before
    /// the reset will fail the epoch check when they resolve.
    pub fn reset(&mut self) {
        self.items.clear();
        self.known_extent = 0;
        self.has_more_down = true;
        self.has_more_up = false;
        self.epoch += 1;
    }
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: usize = 40;

    #[test]
    fn new_store_is_empty_with_forward_open() {
        let store: ItemStore<u32> = ItemStore::new();
        assert!(store.is_empty());
        assert_eq!(store.known_extent(), 0);
        assert!(store.has_more_down());
        assert!(!store.has_more_up());
        assert_eq!(store.epoch(), 0);
    }

    #[test]
    fn merge_writes_items_at_offset() {
        let mut store = ItemStore::new();
        store.merge(10, vec!["a", "b", "c"], FetchDirection::Forward, PAGE);
        assert_eq!(store.get(10), Some(&"a"));
        assert_eq!(store.get(11), Some(&"b"));
        assert_eq!(store.get(12), Some(&"c"));
        assert_eq!(store.get(13), None);
        assert_eq!(store.get(9), None);
    }

    #[test]
    fn initial_full_page_opens_down_and_sets_extent() {
        let mut store = ItemStore::new();
        store.merge(0, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        assert!(store.has_more_down());
        assert!(!store.has_more_up());
        assert_eq!(store.known_extent(), PAGE);
    }

    #[test]
    fn initial_at_nonzero_offset_opens_up() {
        let mut store = ItemStore::new();
        store.merge(80, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        assert!(store.has_more_up());
        assert_eq!(store.known_extent(), 120);
    }

    #[test]
    fn short_forward_page_closes_down() {
        let mut store = ItemStore::new();
        store.merge(0, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        store.merge(40, (0..25).collect(), FetchDirection::Forward, PAGE);
        assert!(!store.has_more_down());
        assert_eq!(store.known_extent(), 65);
    }

    #[test]
    fn empty_forward_page_closes_down_without_mutation() {
        let mut store = ItemStore::new();
        store.merge(0, vec![1, 2, 3], FetchDirection::Initial, PAGE);
        store.merge(3, Vec::new(), FetchDirection::Forward, PAGE);
        assert!(!store.has_more_down());
        assert_eq!(store.len(), 3);
        assert_eq!(store.known_extent(), 3);
    }

    #[test]
    fn empty_backward_page_closes_up() {
        let mut store = ItemStore::new();
        store.merge(80, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        assert!(store.has_more_up());
        store.merge(40, Vec::new(), FetchDirection::Backward, PAGE);
        assert!(!store.has_more_up());
    }

    #[test]
    fn backward_merge_leaves_extent_alone() {
        let mut store = ItemStore::new();
        store.merge(80, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        store.merge(40, (0..PAGE).collect(), FetchDirection::Backward, PAGE);
        assert_eq!(store.known_extent(), 120);
        assert!(store.has_more_up());
        store.merge(0, (0..PAGE).collect(), FetchDirection::Backward, PAGE);
        assert!(!store.has_more_up());
        assert_eq!(store.known_extent(), 120);
    }

    #[test]
    fn extent_is_monotone_across_forward_merges() {
        let mut store = ItemStore::new();
        store.merge(0, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        let mut last = store.known_extent();
        // Re-fetching an already covered page must not shrink the extent.
        for offset in [40, 0, 40, 80, 0] {
            store.merge(offset, (0..PAGE).collect(), FetchDirection::Forward, PAGE);
            assert!(store.known_extent() >= last);
            last = store.known_extent();
        }
        assert_eq!(store.known_extent(), 120);
    }

    #[test]
    fn refetch_overwrites_same_indices() {
        let mut store = ItemStore::new();
        store.merge(0, vec!["old"], FetchDirection::Initial, 1);
        store.merge(0, vec!["new"], FetchDirection::Forward, 1);
        assert_eq!(store.get(0), Some(&"new"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn slice_is_ascending_and_skips_holes() {
        let mut store = ItemStore::new();
        store.merge(5, vec![50, 60], FetchDirection::Initial, PAGE);
        store.merge(9, vec![90], FetchDirection::Forward, PAGE);
        let got: Vec<_> = store.slice(0, 20).map(|(i, v)| (i, *v)).collect();
        assert_eq!(got, vec![(5, 50), (6, 60), (9, 90)]);
    }

    #[test]
    fn slice_tolerates_inverted_range() {
        let mut store = ItemStore::new();
        store.merge(0, vec![1, 2, 3], FetchDirection::Initial, PAGE);
        assert_eq!(store.slice(10, 2).count(), 0);
    }

    #[test]
    fn reset_clears_state_and_bumps_epoch() {
        let mut store = ItemStore::new();
        store.merge(80, (0..25).collect(), FetchDirection::Initial, PAGE);
        assert!(!store.has_more_down());
        assert!(store.has_more_up());

        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.known_extent(), 0);
        assert!(store.has_more_down());
        assert!(!store.has_more_up());
        assert_eq!(store.epoch(), 1);

        store.reset();
        assert_eq!(store.epoch(), 2);
    }
}
