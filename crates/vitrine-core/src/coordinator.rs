//! Single-flight fetch coordination between the catalog source and the store

use crate::source::{CatalogQuery, CatalogSource, Page, SourceError};
use crate::store::{FetchDirection, ItemStore};

/// Handle for one accepted fetch.
///
/// Captures the store epoch at issue time; `settle` compares it against
/// the current epoch so a result that raced a reset is discarded instead
/// of resurrecting pre-reset data.
#[derive(Debug)]
pub struct FetchTicket {
    offset: usize,
    direction: FetchDirection,
    epoch: u64,
    query: CatalogQuery,
}

impl FetchTicket {
    /// The query this fetch must be issued with.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn direction(&self) -> FetchDirection {
        self.direction
    }
}

/// Owns the store and the single-flight fetch state for one list.
///
/// All store mutation funnels through here; the in-flight marker is
/// coordinator state rather than anything ambient, so independent lists
/// can each run an isolated coordinator.
///
/// The async [`request`](Self::request) path is split into [`begin`]
/// (accept or drop, capture epoch) and [`settle`](Self::settle) (merge
/// or discard) so callers and tests can control exactly when a fetch
/// resolves relative to resets.
///
/// [`begin`]: Self::begin
pub struct LoadCoordinator<S: CatalogSource> {
    source: S,
    store: ItemStore<S::Item>,
    filters: CatalogQuery,
    page_size: usize,
    in_flight: bool,
}

impl<S: CatalogSource> LoadCoordinator<S> {
    pub fn new(source: S, page_size: usize) -> Self {
        Self {
            source,
            store: ItemStore::new(),
            filters: CatalogQuery::default(),
            page_size,
            in_flight: false,
        }
    }

    /// Use a pre-built query as the template for every fetch; its limit
    /// and offset are overwritten per page.
    pub fn with_filters(source: S, page_size: usize, filters: CatalogQuery) -> Self {
        Self {
            filters,
            ..Self::new(source, page_size)
        }
    }

    pub fn store(&self) -> &ItemStore<S::Item> {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Current search term, if any.
    pub fn search(&self) -> Option<&str> {
        self.filters.search.as_deref()
    }

    /// Swap the search term and perform a full reset.
    pub fn set_search(&mut self, term: &str) {
        let trimmed = term.trim();
        self.filters.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.reset();
    }

    /// Full reset: clear the store, reopen forward paging, bump the
    /// epoch, drop the in-flight marker.
    ///
    /// An outstanding network call is not cancelled; its result fails
    /// the epoch check in `settle` and is thrown away.
    pub fn reset(&mut self) {
        self.store.reset();
        self.in_flight = false;
        tracing::debug!(epoch = self.store.epoch(), "coordinator reset");
    }

    /// Try to start a fetch. Returns `None` (dropped, not queued) while
    /// another fetch is outstanding.
    pub fn begin(&mut self, offset: usize, direction: FetchDirection) -> Option<FetchTicket> {
        if self.in_flight {
            tracing::trace!(offset, ?direction, "fetch dropped, one already in flight");
            return None;
        }
        self.in_flight = true;
        tracing::debug!(offset, ?direction, "fetch issued");
        Some(FetchTicket {
            offset,
            direction,
            epoch: self.store.epoch(),
            query: self.filters.page(offset, self.page_size),
        })
    }

    /// Resolve a fetch. Merges on success, closes the direction on
    /// failure, and always clears the in-flight marker.
    pub fn settle(&mut self, ticket: FetchTicket, outcome: Result<Page<S::Item>, SourceError>) {
        self.in_flight = false;

        if ticket.epoch != self.store.epoch() {
            tracing::debug!(
                issued_epoch = ticket.epoch,
                current_epoch = self.store.epoch(),
                "discarding stale fetch result"
            );
            return;
        }

        match outcome {
            Ok(page) => {
                self.store
                    .merge(ticket.offset, page.products, ticket.direction, self.page_size);
            }
            Err(error) => {
                // Failures degrade to "no more data in this direction";
                // there is no retry until the next reset.
                tracing::warn!(%error, offset = ticket.offset, direction = ?ticket.direction, "fetch failed");
                self.store
                    .merge(ticket.offset, Vec::new(), ticket.direction, self.page_size);
            }
        }
    }

    /// Issue a fetch and drive it to completion.
    pub async fn request(&mut self, offset: usize, direction: FetchDirection) {
        let Some(ticket) = self.begin(offset, direction) else {
            return;
        };
        let outcome = self.source.fetch_page(ticket.query()).await;
        self.settle(ticket, outcome);
    }
}
