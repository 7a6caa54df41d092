use thiserror::Error;

/// Failure to turn one listing item into a record. Only the item is lost.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("page {page} comment item {index} has no {element} element")]
    MissingSubtree { page: u32, index: usize, element: &'static str },
}

/// Failure to retrieve one listing page. Only the page is lost.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("page {page} timed out")]
    Timeout { page: u32 },
    #[error("page {page} request failed: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("page {page} returned HTTP {status}")]
    Status { page: u32, status: u16 },
}

impl FetchError {
    pub(crate) fn from_reqwest(page: u32, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout { page }
        } else {
            FetchError::Transport { page, source }
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            FetchError::Timeout { page }
            | FetchError::Transport { page, .. }
            | FetchError::Status { page, .. } => *page,
        }
    }
}

/// Failure to set up a source before any page is requested.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid value for header {name}: {source}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
