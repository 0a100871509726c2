//! The view coordinator: one explicit state record for the list view
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──begin_fetch──▶ Fetching ──ok──▶ Ready ◀─┐ set_filter / set_sort /
//!                          │                │    │ set_page_size / set_page_index /
//!                          └──err──▶ Failed │    │ reset_filters
//!                                     │     └────┘
//!                                     └──begin_fetch (refresh)──▶ Fetching
//! ```
//!
//! Every mutation ends with a synchronous [`recompute`](ViewCoordinator)
//! that re-runs filter → sort → paginate over the held collection. The
//! collection itself is never mutated; each run derives a fresh page.
//!
//! Fetching is split in two so the network wait does not hold the
//! coordinator: [`ViewCoordinator::begin_fetch`] hands out a [`FetchTask`]
//! tagged with the current generation, and [`ViewCoordinator::apply_fetch`]
//! only accepts its outcome if no newer fetch or teardown happened since.

use crate::config::ViewConfig;
use crate::core::error::{ConfigError, FetchError, ViewError};
use crate::core::events::{EventEnvelope, ViewEvent, ViewEventBus};
use crate::core::fetcher::{DatasetFetcher, FetchGeneration, GenerationToken};
use crate::core::filter;
use crate::core::paginate::{PaginationMeta, paginate};
use crate::core::query::{
    FilterCriteria, FilterField, FilterPatch, PageState, SortDirection, SortField, SortSpec,
};
use crate::core::record::Record;
use crate::core::sort;
use crate::source::PageSource;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Lifecycle state of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Fetching,
    Ready,
    Failed,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewState::Idle => "idle",
            ViewState::Fetching => "fetching",
            ViewState::Ready => "ready",
            ViewState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Read model handed to presentation
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub state: ViewState,
    pub current_page: Vec<Record>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Records matching the current criteria, across all pages
    pub total_matches: usize,
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
    /// User-visible error message when `state` is `Failed`
    pub error: Option<String>,
    pub selected: Option<Record>,
}

impl ViewSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Fetching
    }

    /// Loaded fine, but nothing matches the current filters
    pub fn is_empty_result(&self) -> bool {
        self.state == ViewState::Ready && self.total_matches == 0
    }
}

/// A detached fetch, runnable on any task
pub struct FetchTask<S: PageSource + ?Sized> {
    fetcher: DatasetFetcher<S>,
    token: GenerationToken,
}

impl<S: PageSource + ?Sized> FetchTask<S> {
    pub fn generation(&self) -> u64 {
        self.token.generation()
    }

    pub async fn run(self) -> FetchOutcome {
        let result = self.fetcher.fetch_all_with(&self.token).await;
        FetchOutcome {
            token: self.token,
            result,
        }
    }
}

/// Result of a [`FetchTask`], to be handed back to the coordinator
#[derive(Debug)]
pub struct FetchOutcome {
    token: GenerationToken,
    result: Result<Vec<Record>, FetchError>,
}

impl FetchOutcome {
    pub fn generation(&self) -> u64 {
        self.token.generation()
    }

    pub fn result(&self) -> &Result<Vec<Record>, FetchError> {
        &self.result
    }
}

/// Owns the full collection and every view input
pub struct ViewCoordinator<S: PageSource + ?Sized = dyn PageSource> {
    fetcher: DatasetFetcher<S>,
    generation: FetchGeneration,
    torn_down: bool,

    state: ViewState,
    records: Vec<Record>,
    error: Option<FetchError>,

    criteria: FilterCriteria,
    sort: SortSpec,
    page: PageState,
    page_sizes: Vec<usize>,

    current_page: Vec<Record>,
    meta: PaginationMeta,
    selected: Option<u64>,

    events: ViewEventBus,
}

impl<S: PageSource + ?Sized> fmt::Debug for ViewCoordinator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCoordinator")
            .field("state", &self.state)
            .field("generation", &self.generation.current())
            .field("torn_down", &self.torn_down)
            .field("records", &self.records.len())
            .field("criteria", &self.criteria)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("meta", &self.meta)
            .finish()
    }
}

impl<S: PageSource + ?Sized> ViewCoordinator<S> {
    /// Coordinator with default inputs: no filters, `id` ascending, 10 per page
    pub fn new(source: Arc<S>) -> Self {
        let defaults = ViewConfig::default();
        Self {
            fetcher: DatasetFetcher::new(source).with_max_pages(defaults.source.max_pages),
            generation: FetchGeneration::new(),
            torn_down: false,
            state: ViewState::Idle,
            records: Vec::new(),
            error: None,
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            page: PageState::default(),
            page_sizes: defaults.view.page_sizes,
            current_page: Vec::new(),
            meta: PaginationMeta::new(1, PageState::default().page_size, 0),
            selected: None,
            events: ViewEventBus::default(),
        }
    }

    /// Coordinator whose defaults and fetch ceiling come from `config`
    pub fn from_config(source: Arc<S>, config: &ViewConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut view = Self::new(source);
        view.fetcher = view.fetcher.with_max_pages(config.source.max_pages);
        view.sort = config.default_sort()?;
        view.page.page_size = config.view.default_page_size;
        view.page_sizes = config.view.page_sizes.clone();
        view.meta = PaginationMeta::new(1, view.page.page_size, 0);
        Ok(view)
    }

    /// Publish change notifications on an existing bus
    pub fn with_event_bus(mut self, events: ViewEventBus) -> Self {
        self.events = events;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    // === Read model ===

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Fetching
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// The full collection; empty until a fetch succeeds
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn current_page(&self) -> &[Record] {
        &self.current_page
    }

    pub fn page_index(&self) -> usize {
        self.page.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.meta.total_pages
    }

    pub fn total_matches(&self) -> usize {
        self.meta.total
    }

    pub fn pagination(&self) -> &PaginationMeta {
        &self.meta
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn allowed_page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            state: self.state,
            current_page: self.current_page.clone(),
            page_index: self.page.page_index,
            page_size: self.page.page_size,
            total_pages: self.meta.total_pages,
            total_matches: self.meta.total,
            criteria: self.criteria.clone(),
            sort: self.sort,
            error: self.error.as_ref().map(FetchError::user_message),
            selected: self.selected().cloned(),
        }
    }

    // === Fetch lifecycle ===

    /// Start a fetch, invalidating any fetch still in flight
    ///
    /// Moves to `Fetching` from any state and drops the derived page, so
    /// nothing from the previous collection stays visible. Run the returned
    /// task wherever convenient and pass its outcome to
    /// [`apply_fetch`](Self::apply_fetch). Returns `None` once torn down.
    pub fn begin_fetch(&mut self) -> Option<FetchTask<S>> {
        if self.torn_down {
            tracing::debug!("Ignoring fetch request on torn down view");
            return None;
        }

        self.generation.advance();
        let token = self.generation.token();
        tracing::info!(generation = token.generation(), "Starting collection fetch");

        self.error = None;
        self.clear_collection();
        self.transition(ViewState::Fetching);

        Some(FetchTask {
            fetcher: self.fetcher.clone(),
            token,
        })
    }

    /// Apply a finished fetch; returns false if it was stale and dropped
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if self.torn_down || !outcome.token.is_current() {
            tracing::debug!(
                generation = outcome.generation(),
                current = self.generation.current(),
                torn_down = self.torn_down,
                "Discarding stale fetch result"
            );
            if !self.torn_down {
                self.events.publish(ViewEvent::StaleFetchDiscarded {
                    generation: outcome.generation(),
                });
            }
            return false;
        }

        match outcome.result {
            Ok(records) => {
                tracing::info!(records = records.len(), "Collection ready");
                self.records = records;
                self.error = None;
                self.page.page_index = 1;
                self.transition(ViewState::Ready);
                self.recompute();
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "Collection fetch failed");
                self.clear_collection();
                self.error = Some(e);
                self.transition(ViewState::Failed);
            }
        }
        true
    }

    /// Fetch the collection and apply the result in one step
    ///
    /// Also serves as a refresh from `Ready` or `Failed`. A torn down view
    /// issues no requests and keeps its state.
    pub async fn load(&mut self) -> ViewState {
        if let Some(task) = self.begin_fetch() {
            let outcome = task.run().await;
            self.apply_fetch(outcome);
        }
        self.state
    }

    /// Detach from the owning context
    ///
    /// Any fetch still in flight stops at its next page boundary, and any
    /// outcome that does arrive is discarded without touching state.
    pub fn teardown(&mut self) {
        let generation = self.generation.advance();
        self.torn_down = true;
        tracing::debug!(generation, "View torn down");
    }

    // === Mutations ===

    /// Merge `patch` into the criteria and go back to page 1
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.criteria.merge(patch);
        self.page.page_index = 1;
        self.recompute();
    }

    /// Set one filter field by name (`name`, `status`, `species`, `gender`)
    pub fn set_filter_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), ViewError> {
        let field: FilterField = field.parse()?;
        self.set_filter(FilterPatch::field(field, value));
        Ok(())
    }

    /// Clear all four criteria and go back to page 1
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.page.page_index = 1;
        self.recompute();
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort = SortSpec::new(field, direction);
        self.page.page_index = 1;
        self.recompute();
    }

    /// Parse a sort such as `name-desc` and apply it
    pub fn set_sort_str(&mut self, input: &str) -> Result<(), ViewError> {
        let spec: SortSpec = input.parse()?;
        self.set_sort(spec.field, spec.direction);
        Ok(())
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<(), ViewError> {
        if size == 0 || (!self.page_sizes.is_empty() && !self.page_sizes.contains(&size)) {
            return Err(ViewError::InvalidPageSize {
                size,
                allowed: self.page_sizes.clone(),
            });
        }
        self.page.page_size = size;
        self.page.page_index = 1;
        self.recompute();
        Ok(())
    }

    /// Jump to page `index` (1-based), clamped to the last page
    pub fn set_page_index(&mut self, index: usize) -> Result<(), ViewError> {
        if index == 0 {
            return Err(ViewError::InvalidPageIndex { index });
        }
        self.page.page_index = index;
        self.recompute();
        Ok(())
    }

    // === Selection ===

    /// Select a record on the current page, or deselect it if selected
    ///
    /// Returns the newly selected record; `None` after a deselect or when
    /// `id` is not on the current page.
    pub fn toggle_selection(&mut self, id: u64) -> Option<&Record> {
        if self.selected == Some(id) {
            self.selected = None;
            return None;
        }
        if self.current_page.iter().any(|r| r.id == id) {
            self.selected = Some(id);
            return self.selected();
        }
        None
    }

    pub fn selected(&self) -> Option<&Record> {
        let id = self.selected?;
        self.current_page.iter().find(|r| r.id == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // === Internals ===

    fn clear_collection(&mut self) {
        self.records = Vec::new();
        self.current_page = Vec::new();
        self.selected = None;
        self.page.page_index = 1;
        self.meta = PaginationMeta::new(1, self.page.page_size, 0);
    }

    fn transition(&mut self, to: ViewState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        tracing::debug!(%from, %to, "View state changed");
        self.events.publish(ViewEvent::StateChanged { from, to });
    }

    /// Re-derive the visible page from the held collection
    ///
    /// Runs to completion without suspending. Only `Ready` has a collection
    /// to derive from; other states keep criteria, sort and page size for the
    /// next run and pin the empty page at index 1.
    fn recompute(&mut self) {
        if self.state != ViewState::Ready {
            self.meta = PaginationMeta::new(1, self.page.page_size, 0);
            self.page.page_index = self.meta.page;
            return;
        }

        let filtered = filter::filter(&self.records, &self.criteria);
        let sorted = sort::sort(filtered, &self.sort);
        let slice = paginate(&sorted, self.page.page_size, self.page.page_index);

        self.meta = slice.meta;
        self.page.page_index = slice.meta.page;
        self.current_page = slice.items.iter().copied().cloned().collect();

        if let Some(id) = self.selected {
            if !self.current_page.iter().any(|r| r.id == id) {
                self.selected = None;
            }
        }

        tracing::debug!(
            page_index = self.meta.page,
            total_pages = self.meta.total_pages,
            total_matches = self.meta.total,
            visible = self.current_page.len(),
            sort = %self.sort,
            "Recomputed view"
        );
        self.events.publish(ViewEvent::PageRecomputed {
            page_index: self.meta.page,
            total_pages: self.meta.total_pages,
            total_matches: self.meta.total,
        });
    }
}
