//! Full-collection acquisition
//!
//! [`DatasetFetcher`] walks a [`PageSource`] page by page, strictly in
//! sequence, until a page reports no `next` link. The cursor is a plain
//! counter starting at 1; the `next` URL itself is only used as the
//! continue/stop signal.
//!
//! Two guards bound the loop:
//!
//! - `max_pages`: a source that never reports exhaustion fails with
//!   [`FetchError::PageLimitExceeded`] instead of growing forever.
//! - [`GenerationToken`]: checked after every awaited page. Once the owning
//!   [`FetchGeneration`] has advanced, the fetch stops with
//!   [`FetchError::Cancelled`] and the accumulated records are dropped.

use crate::core::error::FetchError;
use crate::core::record::Record;
use crate::source::PageSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default ceiling on the number of pages requested in one fetch
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// Shared generation counter owned by whoever applies fetch results
///
/// Advancing the generation invalidates every token issued before.
#[derive(Debug, Clone, Default)]
pub struct FetchGeneration {
    current: Arc<AtomicU64>,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    /// Invalidate outstanding tokens and return the new generation
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Token bound to the current generation
    pub fn token(&self) -> GenerationToken {
        GenerationToken {
            generation: self.current(),
            current: Arc::clone(&self.current),
        }
    }
}

/// Proof that a fetch was started under a given generation
#[derive(Debug, Clone)]
pub struct GenerationToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl GenerationToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once the issuing [`FetchGeneration`] has advanced
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }
}

/// Sequentially retrieves every page of a source
#[derive(Debug)]
pub struct DatasetFetcher<S: PageSource + ?Sized> {
    source: Arc<S>,
    max_pages: u32,
}

impl<S: PageSource + ?Sized> Clone for DatasetFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            max_pages: self.max_pages,
        }
    }
}

impl<S: PageSource + ?Sized> DatasetFetcher<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Override the page ceiling (values below 1 are raised to 1)
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Fetch the whole collection with no external cancellation
    pub async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        let generation = FetchGeneration::new();
        self.fetch_all_with(&generation.token()).await
    }

    /// Fetch the whole collection, aborting once `token` goes stale
    ///
    /// On any error the partially accumulated records are discarded.
    pub async fn fetch_all_with(&self, token: &GenerationToken) -> Result<Vec<Record>, FetchError> {
        let mut records = Vec::new();
        let mut cursor: u32 = 1;

        loop {
            if cursor > self.max_pages {
                tracing::warn!(
                    limit = self.max_pages,
                    "Source kept reporting more pages, giving up"
                );
                return Err(FetchError::PageLimitExceeded {
                    limit: self.max_pages,
                });
            }

            let page = match self.source.fetch_page(cursor).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(page = cursor, error = %e, "Page request failed, aborting fetch");
                    return Err(e);
                }
            };

            if !token.is_current() {
                tracing::debug!(
                    generation = token.generation(),
                    page = cursor,
                    "Fetch superseded, discarding accumulated records"
                );
                return Err(FetchError::Cancelled);
            }

            let has_next = page.has_next();
            tracing::debug!(
                page = cursor,
                received = page.results.len(),
                has_next,
                "Fetched page"
            );
            records.extend(page.results);

            if !has_next {
                break;
            }
            cursor += 1;
        }

        tracing::info!(pages = cursor, records = records.len(), "Fetched full collection");
        Ok(records)
    }
}
