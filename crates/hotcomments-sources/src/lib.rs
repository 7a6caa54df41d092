pub mod douban;
pub mod error;
pub mod traits;

pub use douban::{parse_page, DoubanClient, PageOutcome};
pub use error::{ExtractionError, FetchError, SourceError};
pub use traits::{PageFetch, PageSource};
