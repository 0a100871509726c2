//! Core module: the record model and the filter/sort/paginate engine

pub mod error;
pub mod events;
pub mod fetcher;
pub mod filter;
pub mod paginate;
pub mod query;
pub mod record;
pub mod sort;
pub mod view;

pub use error::{ConfigError, ErrorResponse, FetchError, ViewError};
pub use events::{EventEnvelope, ViewEvent, ViewEventBus};
pub use fetcher::{DatasetFetcher, FetchGeneration, GenerationToken};
pub use paginate::{PageSlice, PaginationMeta};
pub use query::{FilterCriteria, FilterField, FilterPatch, PageState, SortDirection, SortField, SortSpec};
pub use record::{Gender, Place, Record, Status};
pub use view::{FetchOutcome, FetchTask, ViewCoordinator, ViewSnapshot, ViewState};
