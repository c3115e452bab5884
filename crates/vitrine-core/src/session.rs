//! Wiring: geometry in, rendered slice out

use crate::coordinator::LoadCoordinator;
use crate::range::{plan_fetch, visible_range, LayoutParams, ScrollGeometry, VisibleRange};
use crate::source::{CatalogQuery, CatalogSource};
use crate::store::{FetchDirection, ItemStore};
use crate::view::{padding, project, Padding};

/// Coalesces scroll-geometry events to at most one recomputation per
/// rendering frame.
///
/// `offer` stores the latest geometry and reports whether a frame
/// callback still needs scheduling; further events before the frame
/// fires just replace the pending geometry. `take` is called from the
/// frame callback and drains it.
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    pending: Option<ScrollGeometry>,
    scheduled: bool,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a geometry event. Returns `true` when the caller should
    /// schedule a frame callback, `false` when one is already pending.
    pub fn offer(&mut self, geometry: ScrollGeometry) -> bool {
        self.pending = Some(geometry);
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Drain the pending geometry at frame time.
    pub fn take(&mut self) -> Option<ScrollGeometry> {
        self.scheduled = false;
        self.pending.take()
    }
}

/// What the renderer needs for one frame: the window, its items in
/// ascending index order, and the spacer heights around them.
#[derive(Debug)]
pub struct ViewSlice<'a, T> {
    pub range: VisibleRange,
    pub items: Vec<(usize, &'a T)>,
    pub padding: Padding,
}

/// One scrolling list over one catalog query.
///
/// Ties the pieces together: geometry comes in, the visible range is
/// recomputed, the trigger policy may issue a fetch (dropped if one is
/// already in flight), and the projected slice goes back out.
pub struct ScrollSession<S: CatalogSource> {
    coordinator: LoadCoordinator<S>,
    layout: LayoutParams,
    range: VisibleRange,
}

impl<S: CatalogSource> ScrollSession<S> {
    pub fn new(source: S, layout: LayoutParams) -> Self {
        let page_size = layout.page_size;
        Self {
            coordinator: LoadCoordinator::new(source, page_size),
            layout,
            range: VisibleRange::new(0, page_size),
        }
    }

    /// Session with filter/sort parameters passed through to the catalog.
    pub fn with_filters(source: S, layout: LayoutParams, filters: CatalogQuery) -> Self {
        let page_size = layout.page_size;
        Self {
            coordinator: LoadCoordinator::with_filters(source, page_size, filters),
            layout,
            range: VisibleRange::new(0, page_size),
        }
    }

    /// First fetch after mount.
    pub async fn initialize(&mut self) {
        self.coordinator.request(0, FetchDirection::Initial).await;
    }

    /// Recompute the window for new scroll geometry, fetching if the
    /// window is near an edge of known data, and return the slice to
    /// render.
    pub async fn handle_geometry(&mut self, geometry: ScrollGeometry) -> ViewSlice<'_, S::Item> {
        self.range = visible_range(geometry, &self.layout, self.store().known_extent());

        if let Some(plan) = plan_fetch(self.range, self.store(), self.layout.page_size) {
            self.coordinator.request(plan.offset, plan.direction).await;
        }

        self.slice()
    }

    /// Change the search term: full reset, scroll back to the top
    /// window, then the initial fetch for the new term.
    pub async fn set_search(&mut self, term: &str) {
        self.coordinator.set_search(term);
        self.range = VisibleRange::new(0, self.layout.page_size);
        self.coordinator.request(0, FetchDirection::Initial).await;
    }

    /// Slice for the current range without touching the network.
    pub fn slice(&self) -> ViewSlice<'_, S::Item> {
        ViewSlice {
            range: self.range,
            items: project(self.range, self.store()),
            padding: padding(self.range, &self.layout, self.store().known_extent()),
        }
    }

    pub fn store(&self) -> &ItemStore<S::Item> {
        self.coordinator.store()
    }

    pub fn source(&self) -> &S {
        self.coordinator.source()
    }

    pub fn range(&self) -> VisibleRange {
        self.range
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    pub fn is_loading(&self) -> bool {
        self.coordinator.is_loading()
    }
}
