//! # Character View
//!
//! The in-memory engine behind a paginated character list: it pulls an
//! entire remote collection by walking a paged API to exhaustion, then
//! derives the visible page through a filter → sort → paginate pipeline
//! whenever an input changes.
//!
//! ## Features
//!
//! - **Sequential Fetch**: one outstanding request at a time, bounded by a page ceiling
//! - **Stale-Result Guard**: generation tokens drop results that arrive after a refresh or teardown
//! - **Pure Pipeline**: filtering, stable sorting and pagination never mutate the collection
//! - **Explicit State Machine**: `Idle → Fetching → Ready | Failed`, mutated only through named operations
//! - **Change Notifications**: broadcast events for every transition and recompute
//! - **Configuration-Based**: endpoint, page ceiling and view defaults from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use character_view::prelude::*;
//!
//! let source = Arc::new(HttpPageSource::default());
//! let mut view = ViewCoordinator::new(source);
//!
//! view.load().await;
//! view.set_filter(FilterPatch::field(FilterField::Status, "alive"));
//! view.set_sort_str("name-desc")?;
//!
//! for record in view.current_page() {
//!     println!("{} {}", record.id, record.name);
//! }
//! ```

pub mod config;
pub mod core;
pub mod source;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::record::{Gender, Place, Record, Status};

    // === View inputs ===
    pub use crate::core::query::{
        FilterCriteria, FilterField, FilterPatch, PageState, SortDirection, SortField, SortSpec,
    };

    // === Engine ===
    pub use crate::core::fetcher::{DatasetFetcher, FetchGeneration};
    pub use crate::core::filter::filter;
    pub use crate::core::paginate::{PaginationMeta, paginate, total_pages};
    pub use crate::core::sort::sort;
    pub use crate::core::view::{ViewCoordinator, ViewSnapshot, ViewState};

    // === Events ===
    pub use crate::core::events::{ViewEvent, ViewEventBus};

    // === Errors ===
    pub use crate::core::error::{ConfigError, FetchError, ViewError};

    // === Sources ===
    pub use crate::source::{ApiPage, HttpPageSource, PageInfo, PageSource, StaticPageSource};

    // === Config ===
    pub use crate::config::ViewConfig;

    // === External dependencies ===
    pub use std::sync::Arc;
}
