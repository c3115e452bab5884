//! Projection of the visible window into renderable items and padding

use crate::range::{LayoutParams, VisibleRange};
use crate::store::ItemStore;

/// Spacer heights (px) keeping the scrollable height stable while only
/// the window is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
}

/// Ordered `(index, item)` pairs to render for `range`.
///
/// Holes in the store are silently skipped, never materialized as
/// placeholders. Pure: the same range and store contents always yield
/// the same slice.
pub fn project<'a, T>(range: VisibleRange, store: &'a ItemStore<T>) -> Vec<(usize, &'a T)> {
    store.slice(range.start, range.end).collect()
}

/// Spacer heights for the rows above and below the window.
///
/// The bottom spacer covers confirmed rows only, so the scrollbar grows
/// as the known extent does.
pub fn padding(range: VisibleRange, layout: &LayoutParams, known_extent: usize) -> Padding {
    let rows_above = range.start / layout.items_per_row;
    let total_rows = known_extent.div_ceil(layout.items_per_row);
    let rows_through_end = range.end.div_ceil(layout.items_per_row);

    Padding {
        top: rows_above as f64 * layout.row_height,
        bottom: total_rows.saturating_sub(rows_through_end) as f64 * layout.row_height,
    }
}
