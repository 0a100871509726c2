//! Typed errors for the character view engine
//!
//! # Error Categories
//!
//! - [`FetchError`]: failures while acquiring the remote collection. Fatal
//!   to the fetch attempt; partial data is never exposed.
//! - [`ViewError`]: malformed input rejected at the mutation boundary, before
//!   it can reach the filter/sort/paginate pipeline.
//! - [`ConfigError`]: invalid configuration values.
//!
//! The pipeline stages themselves are infallible: an empty result is a
//! normal state, not an error.
//!
//! # Example
//!
//! ```rust,ignore
//! match coordinator.set_sort_str("age-desc") {
//!     Ok(()) => {}
//!     Err(ViewError::InvalidSort { input, .. }) => eprintln!("bad sort: {input}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use serde::Serialize;

/// Errors raised while retrieving the full collection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, body read)
    #[error("network error on page {page}: {message}")]
    Network { page: u32, message: String },

    /// The source answered with a non-success HTTP status
    #[error("page {page} returned HTTP status {status}")]
    Status { page: u32, status: u16 },

    /// The response body did not have the expected `{info, results}` shape
    #[error("malformed response for page {page}: {message}")]
    Malformed { page: u32, message: String },

    /// The source kept reporting a next page past the configured ceiling
    #[error("source still reported more pages after {limit} pages")]
    PageLimitExceeded { limit: u32 },

    /// The fetch was superseded or its owner was torn down
    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "FETCH_NETWORK_ERROR",
            FetchError::Status { .. } => "FETCH_BAD_STATUS",
            FetchError::Malformed { .. } => "FETCH_MALFORMED_RESPONSE",
            FetchError::PageLimitExceeded { .. } => "FETCH_PAGE_LIMIT_EXCEEDED",
            FetchError::Cancelled => "FETCH_CANCELLED",
        }
    }

    /// Whether the failure happened at the transport level
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network { .. } | FetchError::Status { .. })
    }

    /// Message suitable for showing to the user verbatim
    pub fn user_message(&self) -> String {
        format!("Failed to load characters: {}", self)
    }
}

/// Errors raised by view mutation operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// Sort field or direction outside the supported set
    #[error("invalid sort '{input}': {message}")]
    InvalidSort { input: String, message: String },

    /// Filter field name not one of name, status, species, gender
    #[error("unknown filter field '{field}'")]
    InvalidFilterField { field: String },

    /// Page size of zero, or not among the allowed sizes
    #[error("invalid page size {size} (allowed: {allowed:?})")]
    InvalidPageSize { size: usize, allowed: Vec<usize> },

    /// Page indices are 1-based
    #[error("invalid page index {index}: pages start at 1")]
    InvalidPageIndex { index: usize },
}

impl ViewError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewError::InvalidSort { .. } => "INVALID_SORT",
            ViewError::InvalidFilterField { .. } => "INVALID_FILTER_FIELD",
            ViewError::InvalidPageSize { .. } => "INVALID_PAGE_SIZE",
            ViewError::InvalidPageIndex { .. } => "INVALID_PAGE_INDEX",
        }
    }
}

/// Errors in configuration values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }
}

/// Serializable error body for presentation layers that speak JSON
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&FetchError> for ErrorResponse {
    fn from(err: &FetchError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.user_message(),
        }
    }
}

impl From<&ViewError> for ErrorResponse {
    fn from(err: &ViewError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}
