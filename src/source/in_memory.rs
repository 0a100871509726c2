//! In-memory page source for testing and development

use crate::core::error::FetchError;
use crate::core::record::Record;
use crate::source::{ApiPage, PageInfo, PageSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves a fixed list of pages, optionally failing chosen ones
///
/// Page `n` links to page `n + 1` until the last page, whose `next` is null.
/// Every call is recorded, so tests can check the request sequence.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: Vec<Vec<Record>>,
    failures: HashMap<u32, FetchError>,
    endless: bool,
    requests: Arc<Mutex<Vec<u32>>>,
}

impl StaticPageSource {
    pub fn new(pages: Vec<Vec<Record>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Split `records` into pages of `per_page` (at least one page)
    pub fn chunked(records: Vec<Record>, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let mut pages: Vec<Vec<Record>> = records
            .chunks(per_page)
            .map(|chunk| chunk.to_vec())
            .collect();
        if pages.is_empty() {
            pages.push(Vec::new());
        }
        Self::new(pages)
    }

    /// Make the request for `page` fail with `error`
    pub fn fail_page(mut self, page: u32, error: FetchError) -> Self {
        self.failures.insert(page, error);
        self
    }

    /// Never report exhaustion: the last page links to itself forever
    pub fn endless(mut self) -> Self {
        self.endless = true;
        self
    }

    /// Pages requested so far, in order
    pub fn requests(&self) -> Vec<u32> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageSource for StaticPageSource {
    async fn fetch_page(&self, page: u32) -> Result<ApiPage, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(page);
        }

        if let Some(error) = self.failures.get(&page) {
            return Err(error.clone());
        }

        let total = self.pages.len() as u32;
        let index = (page as usize).saturating_sub(1);
        let results = match self.pages.get(index) {
            Some(records) => records.clone(),
            None if self.endless => self.pages.last().cloned().unwrap_or_default(),
            None => {
                return Err(FetchError::Status { page, status: 404 });
            }
        };

        let next = if self.endless || page < total {
            Some(format!("memory://characters?page={}", page + 1))
        } else {
            None
        };
        let prev = (page > 1).then(|| format!("memory://characters?page={}", page - 1));

        Ok(ApiPage {
            info: PageInfo {
                count: Some(self.pages.iter().map(|p| p.len() as u64).sum()),
                pages: Some(total),
                next,
                prev,
            },
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Place;

    fn record(id: u64) -> Record {
        Record {
            id,
            name: format!("Character {id}"),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            kind: None,
            gender: "Male".to_string(),
            origin: Place::default(),
            location: Place::default(),
            image: String::new(),
            episode_urls: Vec::new(),
            url: None,
            created: String::new(),
        }
    }

    #[tokio::test]
    async fn test_chunked_pages_link_forward() {
        let source = StaticPageSource::chunked((1..=5).map(record).collect(), 2);

        let first = source.fetch_page(1).await.unwrap();
        assert_eq!(first.results.len(), 2);
        assert!(first.has_next());
        assert!(first.info.prev.is_none());

        let last = source.fetch_page(3).await.unwrap();
        assert_eq!(last.results.len(), 1);
        assert!(!last.has_next());
        assert_eq!(last.info.count, Some(5));

        assert_eq!(source.requests(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let source = StaticPageSource::chunked((1..=4).map(record).collect(), 2)
            .fail_page(2, FetchError::Status { page: 2, status: 500 });

        assert!(source.fetch_page(1).await.is_ok());
        assert_eq!(
            source.fetch_page(2).await.unwrap_err(),
            FetchError::Status { page: 2, status: 500 }
        );
    }

    #[test]
    fn test_out_of_range_page_is_not_found() {
        let source = StaticPageSource::chunked(vec![record(1)], 10);
        let err = tokio_test::block_on(source.fetch_page(2)).unwrap_err();
        assert_eq!(err, FetchError::Status { page: 2, status: 404 });
    }

    #[tokio::test]
    async fn test_endless_keeps_linking() {
        let source = StaticPageSource::chunked(vec![record(1)], 10).endless();
        let page = source.fetch_page(50).await.unwrap();
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_empty_collection_has_single_page() {
        let source = StaticPageSource::chunked(Vec::new(), 10);
        let page = source.fetch_page(1).await.unwrap();
        assert!(page.results.is_empty());
        assert!(!page.has_next());
    }
}
