//! Remote page sources
//!
//! A source hands out one page of the collection at a time. The fetcher
//! drives it with a 1-based page counter and stops once a page reports no
//! `next` link.

pub mod http;
pub mod in_memory;

pub use http::{DEFAULT_BASE_URL, HttpPageSource};
pub use in_memory::StaticPageSource;

use crate::core::error::FetchError;
use crate::core::record::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Paging metadata sent alongside each page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total records in the collection, if the source reports it
    #[serde(default)]
    pub count: Option<u64>,

    /// Total pages, if the source reports it
    #[serde(default)]
    pub pages: Option<u32>,

    /// Link to the next page; `None` (null or absent) on the last page
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of the remote collection: `{ info, results }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPage {
    pub info: PageInfo,
    pub results: Vec<Record>,
}

impl ApiPage {
    pub fn has_next(&self) -> bool {
        self.info.next.is_some()
    }
}

/// Source of collection pages
///
/// Implementations must report transport problems as
/// [`FetchError::Network`]/[`FetchError::Status`] and shape problems as
/// [`FetchError::Malformed`].
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch page `page` (1-based)
    async fn fetch_page(&self, page: u32) -> Result<ApiPage, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_info_next_absent_or_null() {
        let absent: PageInfo = serde_json::from_value(json!({"count": 1, "pages": 1})).unwrap();
        assert!(absent.next.is_none());

        let null: PageInfo = serde_json::from_value(json!({"next": null})).unwrap();
        assert!(null.next.is_none());

        let present: PageInfo =
            serde_json::from_value(json!({"next": "https://example.test/api/character?page=2"}))
                .unwrap();
        assert!(present.next.is_some());
    }

    #[test]
    fn test_api_page_requires_results() {
        let err = serde_json::from_value::<ApiPage>(json!({"info": {"next": null}}));
        assert!(err.is_err());
    }
}
