//! Windowed incremental data loader for paginated catalog browsing.
//!
//! The core of a bidirectional infinite-scroll list: items fetched
//! page-by-page from a remote paginated source land in a sparse
//! index-addressed [`ItemStore`]; scroll geometry turns into a
//! [`VisibleRange`] of indices to render; proximity to an edge of known
//! data triggers a single-flight fetch through the [`LoadCoordinator`];
//! and [`project`]/[`padding`] produce the rendered slice plus the
//! spacer heights that keep the scrollbar stable.
//!
//! The remote side is abstracted behind [`CatalogSource`]; see
//! `vitrine-catalog` for the in-process implementation and
//! `vitrine-client` for the HTTP one.

pub mod coordinator;
pub mod range;
pub mod session;
pub mod source;
pub mod store;
pub mod view;

pub use coordinator::{FetchTicket, LoadCoordinator};
pub use range::{plan_fetch, visible_range, FetchPlan, LayoutParams, ScrollGeometry, VisibleRange};
pub use session::{FrameCoalescer, ScrollSession, ViewSlice};
pub use source::{CatalogQuery, CatalogSource, Page, SortKey, SortOrder, SourceError};
pub use store::{FetchDirection, ItemStore};
pub use view::{padding, project, Padding};
