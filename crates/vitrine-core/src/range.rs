//! Visible-range computation and fetch trigger policy

use crate::store::{FetchDirection, ItemStore};

/// Scroll state sampled from the host viewport, in pixels.
///
/// `container_top` is the document-relative offset of the list's top
/// edge; the core is agnostic to where the numbers come from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub container_top: f64,
    pub viewport_height: f64,
}

/// Grid layout of the rendered list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Height of one row in pixels.
    pub row_height: f64,
    /// Items laid out side by side per row.
    pub items_per_row: usize,
    /// Extra rows rendered beyond the strict viewport on each side.
    pub overscan_rows: usize,
    /// Items requested per fetch.
    pub page_size: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            row_height: 280.0,
            items_per_row: 5,
            overscan_rows: 5,
            page_size: 40,
        }
    }
}

/// Half-open index interval `[start, end)` the renderer currently needs.
///
/// `start` may exceed `end` when the viewport is scrolled far past the
/// known extent; consumers treat such a range as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Index range that must be rendered for the given scroll position.
///
/// The `end` cap at `known_extent + page_size` bounds lookahead to one
/// page past the confirmed extent regardless of overscan size.
pub fn visible_range(
    geometry: ScrollGeometry,
    layout: &LayoutParams,
    known_extent: usize,
) -> VisibleRange {
    let rel_top = geometry.scroll_top - geometry.container_top;
    let rel_bottom = geometry.scroll_top + geometry.viewport_height - geometry.container_top;

    let start_row = ((rel_top / layout.row_height).floor() as i64 - layout.overscan_rows as i64)
        .max(0) as usize;
    let end_row = ((rel_bottom / layout.row_height).ceil() as i64 + layout.overscan_rows as i64)
        .max(0) as usize;

    let start = start_row * layout.items_per_row;
    let end = ((end_row + 1) * layout.items_per_row).min(known_extent + layout.page_size);

    VisibleRange::new(start, end)
}

/// A fetch the trigger policy wants issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    pub offset: usize,
    pub direction: FetchDirection,
}

/// Decide whether the current range is close enough to an edge of known
/// data to warrant a fetch.
///
/// The forward edge wins when both directions qualify; with single-flight
/// dispatch only one fetch could start anyway. The backward trigger
/// probes a single index (`start - page_size`) for absence rather than
/// the whole prospective range, so it can misfire around gaps; that
/// matches the long-standing behavior this policy was lifted from.
pub fn plan_fetch<T>(
    range: VisibleRange,
    store: &ItemStore<T>,
    page_size: usize,
) -> Option<FetchPlan> {
    let threshold = page_size / 2;

    if store.has_more_down() && range.end + threshold >= store.known_extent() {
        return Some(FetchPlan {
            offset: store.known_extent(),
            direction: FetchDirection::Forward,
        });
    }

    if store.has_more_up() && range.start <= threshold {
        let load_start = range.start.saturating_sub(page_size);
        if store.get(load_start).is_none() {
            return Some(FetchPlan {
                offset: load_start,
                direction: FetchDirection::Backward,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: usize = 40;

    fn layout() -> LayoutParams {
        LayoutParams::default()
    }

    fn geometry(scroll_top: f64) -> ScrollGeometry {
        ScrollGeometry {
            scroll_top,
            container_top: 0.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn range_at_top_of_list() {
        // 800px viewport over 280px rows: rows 0..=3 visible, plus 5
        // overscan rows below, capped by extent 200 + one page.
        let range = visible_range(geometry(0.0), &layout(), 200);
        assert_eq!(range, VisibleRange::new(0, 45));
    }

    #[test]
    fn range_mid_scroll_applies_overscan_both_ways() {
        let range = visible_range(geometry(2800.0), &layout(), 10_000);
        // floor(2800/280) - 5 = 5; ceil(3600/280) + 5 = 18.
        assert_eq!(range.start, 5 * 5);
        assert_eq!(range.end, 19 * 5);
    }

    #[test]
    fn range_end_capped_one_page_past_extent() {
        // Nothing confirmed yet: the window may look at most one page ahead.
        let range = visible_range(geometry(0.0), &layout(), 0);
        assert_eq!(range.end, PAGE);

        // Ample extent: the cap does not bind.
        let range = visible_range(geometry(0.0), &layout(), 200);
        assert_eq!(range.end, 45);
    }

    #[test]
    fn range_clamps_when_container_below_viewport() {
        let geometry = ScrollGeometry {
            scroll_top: 0.0,
            container_top: 5000.0,
            viewport_height: 800.0,
        };
        let range = visible_range(geometry, &layout(), 200);
        assert_eq!(range.start, 0);
    }

    #[test]
    fn forward_trigger_near_bottom_edge() {
        let mut store = ItemStore::new();
        store.merge(0, (0..PAGE).collect(), FetchDirection::Initial, PAGE);

        // end=45 >= 40 - 20: already inside the trigger zone.
        let plan = plan_fetch(VisibleRange::new(0, 45), &store, PAGE).unwrap();
        assert_eq!(plan.offset, PAGE);
        assert_eq!(plan.direction, FetchDirection::Forward);
    }

    #[test]
    fn no_forward_trigger_far_from_edge() {
        let mut store = ItemStore::new();
        for page in 0..5 {
            store.merge(page * PAGE, (0..PAGE).collect(), FetchDirection::Forward, PAGE);
        }
        assert_eq!(store.known_extent(), 200);
        assert_eq!(plan_fetch(VisibleRange::new(0, 45), &store, PAGE), None);
    }

    #[test]
    fn no_forward_trigger_once_down_is_closed() {
        let mut store = ItemStore::new();
        store.merge(0, (0..25).collect(), FetchDirection::Initial, PAGE);
        assert!(!store.has_more_down());
        assert_eq!(plan_fetch(VisibleRange::new(0, 45), &store, PAGE), None);
    }

    #[test]
    fn backward_trigger_near_top_with_absent_page() {
        let mut store = ItemStore::new();
        store.merge(120, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        store.merge(160, Vec::new(), FetchDirection::Forward, PAGE);
        assert!(store.has_more_up());

        let plan = plan_fetch(VisibleRange::new(20, 60), &store, PAGE).unwrap();
        assert_eq!(plan.direction, FetchDirection::Backward);
        assert_eq!(plan.offset, 0);
    }

    #[test]
    fn backward_probe_suppresses_trigger_when_index_loaded() {
        let mut store = ItemStore::new();
        store.merge(120, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        store.merge(160, Vec::new(), FetchDirection::Forward, PAGE);
        // Index 0 loaded: the single-index probe sees data and stands down,
        // even though 1..120 is still a hole.
        store.merge(0, vec![0], FetchDirection::Backward, PAGE);
        assert!(!store.has_more_up());
        assert_eq!(plan_fetch(VisibleRange::new(20, 60), &store, PAGE), None);
    }

    #[test]
    fn backward_offset_clamps_at_zero() {
        let mut store = ItemStore::new();
        store.merge(30, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        store.merge(70, Vec::new(), FetchDirection::Forward, PAGE);
        let plan = plan_fetch(VisibleRange::new(10, 50), &store, PAGE).unwrap();
        assert_eq!(plan.direction, FetchDirection::Backward);
        assert_eq!(plan.offset, 0);
    }

    #[test]
    fn forward_edge_wins_when_both_directions_qualify() {
        let mut store = ItemStore::new();
        store.merge(40, (0..PAGE).collect(), FetchDirection::Initial, PAGE);
        assert!(store.has_more_up());
        assert!(store.has_more_down());

        let plan = plan_fetch(VisibleRange::new(0, 80), &store, PAGE).unwrap();
        assert_eq!(plan.direction, FetchDirection::Forward);
    }
}
